#![deny(unsafe_code)]
//! CLI binary for the plexus particle animation.
//!
//! Subcommands:
//! - `render` — run the field headless for N ticks, write a PNG frame
//! - `play` — run the live 60 Hz controller for a few seconds, then snapshot
//! - `params` — print the parameter schema

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use plexus_core::{Animation, Rgba, Scene};
use plexus_field::{FieldConfig, ParticleField};
use plexus_runtime::{snapshot, Controller, FixedDimensions, RasterSurface};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "plexus", about = "Drifting-particle background animation")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the field headless for N ticks and write a PNG frame.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 480.0)]
        width: f64,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 320.0)]
        height: f64,

        /// Number of simulation ticks.
        #[arg(short, long, default_value_t = 600)]
        ticks: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Reproducible scene file (JSON); overrides the options above.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Background color as #rrggbb or #rrggbbaa.
        #[arg(long, default_value = "#0b0b12")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Run the live 60 Hz controller for a few seconds, then snapshot.
    Play {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 480.0)]
        width: f64,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 320.0)]
        height: f64,

        /// How long to run, in seconds.
        #[arg(short, long, default_value_t = 3.0)]
        seconds: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Background color as #rrggbb or #rrggbbaa.
        #[arg(long, default_value = "#0b0b12")]
        background: String,

        /// Output file path for the final frame.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Print the parameter schema.
    Params,
}

fn parse_params(params: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(params).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn parse_background(background: &str) -> Result<Rgba, CliError> {
    Rgba::from_hex(background).map_err(|e| CliError::Input(e.to_string()))
}

fn surface_for(scene: &Scene, background: Rgba) -> Result<RasterSurface, CliError> {
    let surface = RasterSurface::new(
        scene.width.ceil() as usize,
        scene.height.ceil() as usize,
        background,
    )?;
    Ok(surface)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            width,
            height,
            ticks,
            seed,
            params,
            scene,
            background,
            output,
        } => {
            let scene = match scene {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                    serde_json::from_str::<Scene>(&text)?
                }
                None => Scene {
                    width,
                    height,
                    params: parse_params(&params)?,
                    seed,
                    ticks,
                },
            };
            scene.validate()?;
            log::debug!("rendering scene: {scene:?}");

            let background = parse_background(&background)?;
            let mut surface = surface_for(&scene, background)?;
            let mut field = ParticleField::new(
                scene.width,
                scene.height,
                FieldConfig::from_json(&scene.params),
                scene.seed,
            )?;

            for _ in 0..scene.ticks {
                field.update(&mut surface)?;
            }
            snapshot::write_png(&surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": scene.width,
                    "height": scene.height,
                    "ticks": scene.ticks,
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} field ({} ticks, seed {}) -> {}",
                    scene.width,
                    scene.height,
                    scene.ticks,
                    scene.seed,
                    output.display()
                );
            }
        }
        Command::Play {
            width,
            height,
            seconds,
            seed,
            params,
            background,
            output,
        } => {
            let params = parse_params(&params)?;
            let background = parse_background(&background)?;
            let surface = RasterSurface::new(
                width.ceil().max(1.0) as usize,
                height.ceil().max(1.0) as usize,
                background,
            )?;
            let resolver = FixedDimensions { width, height };
            let mut controller = Controller::create(&resolver, surface, &params, seed)
                .ok_or_else(|| CliError::Input("could not start the animation".into()))?;

            let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
            std::thread::sleep(Duration::from_secs_f64(seconds));

            let (field, surface) = controller
                .destroy()
                .ok_or_else(|| CliError::Input("animation already destroyed".into()))?;
            snapshot::write_png(&surface, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "seconds": seconds,
                    "frames": surface.frames_presented(),
                    "params": field.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "played {seconds}s ({} frames) -> {}",
                    surface.frames_presented(),
                    output.display()
                );
            }
        }
        Command::Params => {
            let field = ParticleField::new(100.0, 100.0, FieldConfig::default(), 0)?;
            println!("{}", serde_json::to_string_pretty(&field.param_schema())?);
        }
    }

    Ok(())
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .map_err(|e| eprintln!("logging unavailable: {e}"))
        .ok();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
