use anyhow::Context;
use clap::{ArgAction, Parser};
use gesso::config::Config;
use gesso::editor::Editor;
use gesso::export;
use gesso::script::{ReplayOptions, Script};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gesso")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GESSO_GIT_HASH"), ")"),
    about = "Vector drawing editor with undo/redo, driven by scripted input"
)]
struct Cli {
    /// TOML event script to replay
    #[arg(value_name = "SCRIPT", required_unless_present = "init_config")]
    script: Option<PathBuf>,

    /// Where to write the PNG (default: timestamped file in the current directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/gesso/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Canvas width override
    #[arg(long, value_name = "N")]
    width: Option<i32>,

    /// Canvas height override
    #[arg(long, value_name = "N")]
    height: Option<i32>,

    /// Only run frames where the script has explicit frame events
    #[arg(long, action = ArgAction::SetTrue)]
    manual_frames: bool,

    /// Write the example config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&config_path)?;
        println!("Created config at {}", config_path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    config.validate_and_clamp();

    let script_path = cli.script.context("No script given (see --help)")?;
    let script = Script::load(&script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;

    let mut editor = Editor::from_config(&config)?;
    let options = ReplayOptions {
        manual_frames: cli.manual_frames,
    };
    script
        .replay(&mut editor, options)
        .with_context(|| format!("Failed to replay {}", script_path.display()))?;

    let output = match cli.output {
        Some(path) => path,
        None => export::default_output_path(&std::env::current_dir()?),
    };
    let saved = export::save_png(editor.canvas(), &output)?;
    println!("Saved {}", saved.display());

    Ok(())
}
