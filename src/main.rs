//! Zen Face headless runner
//!
//! Drives the face the way a watch host would (resize, a run of ~16ms frames,
//! optional taps) and writes the last frame to a PPM image.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;

use zen_face::renderer::{Canvas, Color};
use zen_face::{Bounds, ColorTheme, SceneKind, Settings, WatchFace};

#[derive(Parser)]
#[command(name = "zen-face")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render animated watch face frames headlessly", long_about = None)]
struct Cli {
    /// Background scene (static, fluid_motion, fluid_touch, zen_garden)
    #[arg(short, long)]
    scene: Option<String>,

    /// Accent theme (dynamic, mint, sky_blue, orange, white)
    #[arg(short, long)]
    theme: Option<String>,

    /// JSON settings file; --scene and --theme override it
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Square display size in pixels
    #[arg(long, default_value = "240")]
    size: u32,

    /// Frames to simulate
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Frame interval in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: i64,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Tap at X,Y halfway through the run (repeatable)
    #[arg(long, value_parser = parse_point)]
    tap: Vec<(f32, f32)>,

    /// Render in ambient (low-power) mode
    #[arg(long)]
    ambient: bool,

    /// Local time offset from UTC in minutes
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    utc_offset_minutes: i64,

    /// Output image
    #[arg(short, long, default_value = "frame.ppm")]
    out: PathBuf,
}

fn parse_point(s: &str) -> std::result::Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Settings::from_json(&json)?
        }
        None => Settings::default(),
    };

    if let Some(name) = &cli.scene {
        match SceneKind::from_str(name) {
            Some(scene) => settings.scene = scene,
            None => bail!("unknown scene {name:?}"),
        }
    }
    if let Some(name) = &cli.theme {
        match ColorTheme::from_str(name) {
            Some(theme) => settings.theme = theme,
            None => bail!("unknown theme {name:?}"),
        }
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let face = match cli.seed {
        Some(seed) => WatchFace::with_seed(settings, seed),
        None => WatchFace::new(settings),
    };
    log::info!(
        "Zen Face: {} / {} at {}px, {} frames",
        settings.scene.as_str(),
        settings.theme.as_str(),
        cli.size,
        cli.frames
    );

    let size = cli.size as f32;
    face.resize(Bounds::from_size(size, size))?;
    let mut canvas = Canvas::new(cli.size, cli.size, Color::BLACK);

    let now_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as i64;
    let start_ms = now_ms + cli.utc_offset_minutes * 60_000;

    for frame in 0..cli.frames {
        if frame == cli.frames / 2 {
            for &(x, y) in &cli.tap {
                let moved = face.on_tap(x, y);
                log::info!("Tap ({x}, {y}) moved {moved} particles");
            }
        }
        let timestamp = start_ms + frame as i64 * cli.frame_ms;
        face.render(&mut canvas, timestamp, cli.ambient, &[]);
    }

    let file = File::create(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
    canvas.write_ppm(BufWriter::new(file))?;
    log::info!("Wrote {}", cli.out.display());
    Ok(())
}
