use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use fencewatch::config::FileConfig;
use fencewatch::fence::SeedPolicy;
use fencewatch::geometry::Polygon;
use fencewatch::location::{SessionEvent, read_feed};
use fencewatch::session::Session;

/// Replay a recorded geofence session and report enter/exit alerts
///
/// A session file holds one JSON event per line:
///   {"event":"start_drawing"}
///   {"event":"tap","lat":37.789,"lon":-122.435}
///   {"event":"finish_drawing"}
///   {"event":"position","lat":37.788,"lon":-122.432}
///
/// Examples:
///   # Replay a session with default settings
///   fencewatch walk.jsonl
///
///   # Use a pre-drawn fence and a track with no drawing events
///   fencewatch track.jsonl --fence block.json
///
///   # Reproduce the app's "start outside" behaviour, no movement filter
///   fencewatch walk.jsonl --seed outside --distance-filter 0
#[derive(Parser, Debug)]
#[command(name = "fencewatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Session file (JSON lines)
    session: PathBuf,

    /// Path to config file (optional, auto-searches fencewatch.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fence to draw before replaying: JSON array of {"lat", "lon"} points
    #[arg(long)]
    fence: Option<PathBuf>,

    /// Minimum movement in meters before a location sample is evaluated
    #[arg(long)]
    distance_filter: Option<f64>,

    /// Status assumed before the first sample: unknown (no alert) or outside
    #[arg(long)]
    seed: Option<SeedPolicy>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let mut config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::from_path(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    if let Some(d) = args.distance_filter {
        if !d.is_finite() || d < 0.0 {
            bail!("--distance-filter must be a non-negative number of meters");
        }
        config.distance_filter_m = d;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let verbose = args.verbose || config.verbose;

    init_logging(verbose);

    println!("fencewatch - Geofence Session Replay");
    println!("====================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Session: {}", args.session.display());
        if let Some(ref f) = args.fence {
            println!("  Fence: {}", f.display());
        }
        println!("  Distance filter: {}m", config.distance_filter_m);
        println!(
            "  High accuracy: {}",
            if config.high_accuracy { "enabled" } else { "disabled" }
        );
        println!("  Seed: {:?}", config.seed);
        println!(
            "  Default region: ({:.4}, {:.4})",
            config.default_region.lat, config.default_region.lon
        );
        println!();
    }

    let spinner = create_spinner("Loading session...");
    let start = Instant::now();
    let mut events = Vec::new();
    if let Some(ref fence_path) = args.fence {
        events.extend(fence_events(&read_fence(fence_path)?));
    }
    events.extend(read_feed(&args.session).context("Failed to load session")?);
    spinner.finish_with_message(format!(
        "Loaded {} events [{:.1}s]",
        events.len(),
        start.elapsed().as_secs_f32()
    ));

    if events.is_empty() {
        bail!("Session contains no events");
    }

    let mut session = Session::from_config(&config);
    let mut samples = 0usize;
    let mut alert_count = 0usize;

    let pb = ProgressBar::new(events.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for event in events {
        if matches!(event, SessionEvent::Position { .. }) {
            samples += 1;
        }

        for alert in session.handle(event) {
            alert_count += 1;
            let at = session
                .location()
                .map(|p| format!(" at ({:.5}, {:.5})", p.lat, p.lon))
                .unwrap_or_default();
            pb.println(format!("[{}] {}{}", alert.title, alert.message, at));
        }

        pb.set_message(session.status_text());
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!();
    println!("Status: {}", session.status_text());
    println!(
        "Fence: {} vertices ({})",
        session.fence().len(),
        session.editor().button_label()
    );
    println!("Location samples: {}", samples);
    println!("Alerts: {}", alert_count);
    if verbose {
        let region = session.region();
        println!(
            "Map region: ({:.4}, {:.4}) span {:.4} x {:.4}",
            region.lat, region.lon, region.lat_delta, region.lon_delta
        );
    }
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_fence(path: &std::path::Path) -> Result<Polygon> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fence file: {:?}", path))?;
    let fence: Polygon =
        serde_json::from_str(&contents).context("Failed to parse fence file")?;
    if !fence.is_evaluable() {
        bail!(
            "Fence file has {} points; at least 3 are required",
            fence.len()
        );
    }
    Ok(fence)
}

/// Drawing events that reproduce `fence` as if tapped in by hand
fn fence_events(fence: &Polygon) -> Vec<SessionEvent> {
    let mut events = Vec::with_capacity(fence.len() + 2);
    events.push(SessionEvent::StartDrawing);
    events.extend(fence.vertices.iter().map(|p| SessionEvent::Tap {
        lat: p.lat,
        lon: p.lon,
    }));
    events.push(SessionEvent::FinishDrawing);
    events
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fence_events_wrap_taps() {
        let fence = Polygon::from(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)][..]);
        let events = fence_events(&fence);
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], SessionEvent::StartDrawing);
        assert_eq!(events[4], SessionEvent::FinishDrawing);

        let mut session = Session::default();
        for e in events {
            assert!(session.handle(e).is_empty());
        }
        assert_eq!(session.fence(), fence);
        assert!(!session.editor().is_drawing());
    }

    #[test]
    fn test_read_fence_rejects_short_fence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fence.json");
        std::fs::write(&path, r#"[{"lat":0.0,"lon":0.0},{"lat":1.0,"lon":1.0}]"#).unwrap();
        assert!(read_fence(&path).is_err());
    }

    #[test]
    fn test_read_fence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fence.json");
        std::fs::write(
            &path,
            r#"[{"lat":0.0,"lon":0.0},{"lat":0.0,"lon":10.0},{"lat":10.0,"lon":10.0}]"#,
        )
        .unwrap();
        assert_eq!(read_fence(&path).unwrap().len(), 3);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "fencewatch",
            "walk.jsonl",
            "--seed",
            "outside",
            "--distance-filter",
            "0",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.session, PathBuf::from("walk.jsonl"));
        assert_eq!(args.seed, Some(SeedPolicy::Outside));
        assert_eq!(args.distance_filter, Some(0.0));
        assert!(args.verbose);
    }
}
