//! Sky Snapshot Tool
//!
//! Places the sky for one observer and one viewing orientation, then prints
//! what would be drawn: visible objects, cardinal markers and, for a tap
//! point, the selected object's details.
//!
//! Usage:
//!   cargo run --bin sky_snapshot -- --lat 41.9 --lon 12.5 --yaw 90 --pitch -20
//!   cargo run --bin sky_snapshot -- --data-dir data --tap-x 200 --tap-y 380
//!
//! Set `RUST_LOG=debug` for loader and refresh logging.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use nalgebra::Matrix3;
use starmap::{Loader, ObjectFilter, Observer, ScreenPoint, Viewport};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sky Snapshot Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints the objects a star map would draw for an observer and orientation",
    long_about = None
)]
struct Args {
    /// Observer latitude in degrees, north positive
    #[arg(long, default_value_t = 41.9, allow_hyphen_values = true)]
    lat: f64,

    /// Observer longitude in degrees, east positive
    #[arg(long, default_value_t = 12.5, allow_hyphen_values = true)]
    lon: f64,

    /// Observation time (RFC 3339); defaults to now
    #[arg(long)]
    time: Option<String>,

    /// Directory holding stars_compact.json and nebulae.json
    #[arg(long, conflicts_with = "random")]
    data_dir: Option<PathBuf>,

    /// Use this many synthetic stars instead of a catalog
    #[arg(long)]
    random: Option<usize>,

    /// Seed for synthetic stars
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tabulated ephemeris (JSON, optionally gzipped) for planet positions
    #[arg(long)]
    ephemeris: Option<PathBuf>,

    /// Manual pitch in degrees; negative looks up
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pitch: f64,

    /// Manual yaw in degrees; 0 faces south, 90 faces east
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw: f64,

    /// Device attitude as nine comma-separated values in row-major order
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    attitude: Option<Vec<f64>>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 390.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 844.0)]
    height: f64,

    /// Field of view in degrees; defaults to the configured value
    #[arg(long)]
    fov: Option<f64>,

    /// Object classes to show: all, stars, planets or nebulae
    #[arg(long, default_value = "all")]
    filter: ObjectFilter,

    /// Tap X coordinate for selection
    #[arg(long, requires = "tap_y")]
    tap_x: Option<f64>,

    /// Tap Y coordinate for selection
    #[arg(long, requires = "tap_x")]
    tap_y: Option<f64>,

    /// Maximum number of objects to list
    #[arg(long, default_value_t = 25)]
    limit: usize,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn parse_time(time: Option<&str>) -> Result<DateTime<Utc>> {
    match time {
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn parse_attitude(values: &[f64]) -> Result<Matrix3<f64>> {
    if values.len() != 9 {
        return Err(format!("--attitude needs 9 values, got {}", values.len()).into());
    }
    Ok(Matrix3::from_row_slice(values))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut loader = Loader::new();
    if let Some(dir) = &args.data_dir {
        loader = loader.with_data_dir(dir);
    }
    if let Some(count) = args.random {
        loader = loader.random(args.seed, count);
    }
    if let Some(path) = &args.config {
        loader = loader.with_config_file(path);
    }
    if let Some(path) = &args.ephemeris {
        loader = loader.with_ephemeris_table(path);
    }
    let mut session = loader.build()?;

    let observer = Observer::new(args.lat, args.lon, parse_time(args.time.as_deref())?);
    if !observer.is_valid() {
        return Err(format!("invalid observer location: {}, {}", args.lat, args.lon).into());
    }
    session.update_observer(observer)?;
    session.set_filter(args.filter);

    match &args.attitude {
        Some(values) => session.orientation_mut().apply_attitude(parse_attitude(values)?),
        None => session
            .orientation_mut()
            .set_manual(args.pitch.to_radians(), args.yaw.to_radians()),
    }

    if let Some(fov) = args.fov {
        // A single pinch from the current field of view, clamped to the configured range
        let current = session.field_of_view().degrees();
        session.field_of_view_mut().apply_pinch(current / fov);
        session.field_of_view_mut().end_pinch();
    }

    let viewport = Viewport::new(args.width, args.height);

    print_section_header("Observer");
    println!("Latitude:  {:.4}°", observer.latitude);
    println!("Longitude: {:.4}°", observer.longitude);
    println!("Time:      {}", observer.timestamp.to_rfc3339());
    println!("Julian Day: {:.5}", observer.julian_day());
    println!(
        "Placed: {} stars, {} planets, {} deep-sky objects",
        session.stars().len(),
        session.planets().len(),
        session.nebulae().len()
    );

    print_section_header("View");
    println!("Orientation: {:?}", session.orientation().state());
    println!("Field of view: {:.1}°", session.field_of_view().degrees());
    println!("Viewport: {} x {}", viewport.width, viewport.height);

    let mut items = session.frame(&viewport);
    print_section_header(&format!("Visible objects ({})", items.len()));
    items.sort_by(|a, b| b.render_size.total_cmp(&a.render_size));
    for item in items.iter().take(args.limit) {
        println!(
            "{:<8} {:<24} at ({:7.1}, {:7.1})  size {:6.2}  opacity {:.2}{}",
            item.kind.type_name(),
            item.name,
            item.point.x,
            item.point.y,
            item.render_size,
            item.opacity,
            if item.glow { "  glow" } else { "" }
        );
    }
    if items.len() > args.limit {
        println!("... and {} more", items.len() - args.limit);
    }

    print_section_header("Cardinal markers");
    let markers = session.cardinal_markers(&viewport);
    if markers.is_empty() {
        println!("(none in view)");
    }
    for marker in markers {
        println!("{:<2} at ({:.1}, {:.1})", marker.label, marker.point.x, marker.point.y);
    }
    let horizon = session.horizon(&viewport);
    println!(
        "Horizon: {} segment(s), {} points",
        horizon.len(),
        horizon.iter().map(Vec::len).sum::<usize>()
    );

    if let (Some(x), Some(y)) = (args.tap_x, args.tap_y) {
        print_section_header("Selection");
        match session.select_at(&ScreenPoint::new(x, y), &viewport) {
            Some(selection) => {
                println!("{} ({})", selection.object.name(), selection.type_name);
                for (label, value) in &selection.details {
                    println!("  {}: {}", label, value);
                }
            }
            None => println!("Nothing within {:.0} px", session.config().selection_radius_px),
        }
    }

    Ok(())
}
