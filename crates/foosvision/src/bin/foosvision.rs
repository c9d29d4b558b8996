//! Scene replay tool.
//!
//! Replays a recorded scene (frame images plus per-frame marker
//! observations, produced by whatever marker detector the deployment uses)
//! through a `TrackerSession` and prints one JSON line per frame.

use std::path::{Path, PathBuf};

use clap::Parser;
use foosvision::interop::color_view;
use foosvision::{FrameOutcome, Marker, TrackerConfig, TrackerSession};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "foosvision", about = "Replay a recorded scene through the rod tracker")]
struct Args {
    /// Scene description (JSON): frames with image paths and marker
    /// observations.
    scene: PathBuf,

    /// Tracker configuration (JSON). Falls back to the scene's inline
    /// config, then to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(default)]
    config: Option<TrackerConfig>,
    frames: Vec<SceneFrame>,
}

#[derive(Debug, Deserialize)]
struct SceneFrame {
    /// Image path, relative to the scene file.
    image: String,
    #[serde(default)]
    markers: Vec<Marker>,
}

#[derive(Debug, Serialize)]
struct FrameReport<'a> {
    frame: usize,
    #[serde(flatten)]
    outcome: &'a FrameOutcome,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Pipeline(#[from] foosvision::PipelineError),
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let scene: Scene = load_json(&args.scene)?;

    let config = match &args.config {
        Some(path) => load_json(path)?,
        None => scene.config.clone().unwrap_or_default(),
    };

    let base = args.scene.parent().unwrap_or_else(|| Path::new("."));
    let mut session = TrackerSession::new(config);

    for (i, frame) in scene.frames.iter().enumerate() {
        let path = base.join(&frame.image);
        let rgb = image::open(&path)
            .map_err(|source| CliError::Image {
                path: path.clone(),
                source,
            })?
            .to_rgb8();

        let outcome = session.process_frame(&color_view(&rgb), &frame.markers)?;
        let report = FrameReport { frame: i, outcome: &outcome };
        println!(
            "{}",
            serde_json::to_string(&report).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
        );
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = foosvision::core::init_with_level(args.log_level) {
        eprintln!("logger init failed: {err}");
    }

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
