//! Fence drawing state
//!
//! Two states: not drawing (initial) and drawing. Taps only land while
//! drawing; leaving drawing mode requires an evaluable polygon, and `clear`
//! escapes from either state.

use thiserror::Error;

use crate::geometry::{Point, Polygon};

/// Minimum vertex count for a usable fence
pub const MIN_FENCE_VERTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FenceError {
    #[error("Please draw at least 3 points for the fence (have {found})")]
    InsufficientVertices { found: usize },
}

#[derive(Debug, Clone, Default)]
pub struct FenceEditor {
    vertices: Vec<Point>,
    drawing: bool,
}

impl FenceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter drawing mode. Idempotent.
    pub fn start_drawing(&mut self) {
        self.drawing = true;
    }

    /// Append a vertex if drawing, returning whether it was accepted
    pub fn add_vertex(&mut self, p: Point) -> bool {
        if !self.drawing {
            return false;
        }
        self.vertices.push(p);
        true
    }

    /// Leave drawing mode. Rejected (state untouched) below three vertices.
    pub fn finish_drawing(&mut self) -> Result<(), FenceError> {
        if self.vertices.len() < MIN_FENCE_VERTICES {
            return Err(FenceError::InsufficientVertices {
                found: self.vertices.len(),
            });
        }
        self.drawing = false;
        Ok(())
    }

    /// Single-button toggle: finish when drawing, start otherwise.
    ///
    /// Returns the drawing flag after the toggle.
    pub fn toggle_drawing(&mut self) -> Result<bool, FenceError> {
        if self.drawing {
            self.finish_drawing()?;
        } else {
            self.start_drawing();
        }
        Ok(self.drawing)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.drawing = false;
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Snapshot of the current vertices for evaluation or rendering
    pub fn polygon(&self) -> Polygon {
        Polygon::new(self.vertices.clone())
    }

    pub fn button_label(&self) -> &'static str {
        if self.drawing {
            "Finish Drawing"
        } else {
            "Start Drawing"
        }
    }
}
