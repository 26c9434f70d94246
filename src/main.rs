//! `mio`: headless driver for the viewer.
//!
//! Runs console commands from a script (or stdin), echoing each result,
//! renders one frame into a draw-call recorder and logs what would have been
//! drawn. A script line whose asset fails to load ends the run with an error.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use mio_viewer::console::PROMPT;
use mio_viewer::errors::CommandError;
use mio_viewer::{DrawRecorder, Viewer, ViewerSettings};

/// Frame step of the single headless frame.
const FRAME_TIME: Duration = Duration::from_micros(16_667);

#[derive(Parser)]
#[command(name = "mio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Skeletal scene viewer", long_about = None)]
struct Cli {
    /// Viewer settings (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra asset directory, searched before the configured ones
    #[arg(short = 'd', long = "data")]
    data_dirs: Vec<PathBuf>,

    /// Console script to run; reads stdin when omitted or "-"
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => ViewerSettings::load(path)?,
        None => ViewerSettings::default(),
    };
    if !cli.data_dirs.is_empty() {
        let mut dirs = cli.data_dirs.clone();
        dirs.append(&mut settings.asset_dirs);
        settings.asset_dirs = dirs;
    }

    let script = match cli.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
            text
        }
    };

    let mut viewer = Viewer::new(settings);
    for (number, line) in script.lines().enumerate() {
        println!("{PROMPT}{line}");
        match viewer.run_command(line) {
            Ok(output) => {
                for text in output {
                    println!("{text}");
                }
            }
            Err(CommandError::AssetLoad(err)) => {
                return Err(err).with_context(|| format!("script line {}", number + 1));
            }
            Err(err) => println!("{err}"),
        }
    }

    let mut recorder = DrawRecorder::new();
    let draws = viewer.render_frame_after(&mut recorder, FRAME_TIME);
    info!("{} node(s), {draws} draw call(s)", viewer.scene.len());
    for call in recorder.calls() {
        let origin = call.view_origin();
        info!(
            "draw '{}' ({} triangles) at view ({:.3}, {:.3}, {:.3})",
            call.mesh_name, call.triangles, origin.x, origin.y, origin.z
        );
    }

    Ok(())
}
