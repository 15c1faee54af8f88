use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use scriptreel::{ConfigArgs, Producer, SystemRunner};

/// Log file written in the working directory alongside console output.
const LOG_FILE: &str = "video_production.log";

#[derive(Parser, Debug)]
#[command(name = "scriptreel", version, about = "Render markdown narration scripts to MP4")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every script matching the pattern (default).
    Render,
    /// Parse one script and print its scenes as JSON.
    Scenes {
        /// Script to parse.
        script: PathBuf,
    },
    /// Report which external tools are on PATH.
    Tools,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(".", LOG_FILE));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "scriptreel=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("read current directory")?;
    let config = cli.config.into_config(&cwd)?;

    match cli.cmd.unwrap_or(Command::Render) {
        Command::Render => cmd_render(&config),
        Command::Scenes { script } => cmd_scenes(&config, &script),
        Command::Tools => cmd_tools(),
    }
}

fn cmd_render(config: &scriptreel::Config) -> anyhow::Result<()> {
    tracing::info!("starting video production");
    let mut runner = SystemRunner::new();
    let summary = Producer::prepare(config, &mut runner)?.run()?;

    if summary.discovered > 0 {
        println!(
            "generated {}/{} videos in {}",
            summary.produced(),
            summary.discovered,
            config.video_out_dir.display()
        );
    }
    Ok(())
}

fn cmd_scenes(config: &scriptreel::Config, script: &std::path::Path) -> anyhow::Result<()> {
    let scenes = scriptreel::parse_script_file(script, &config.timing)?;
    let json = serde_json::to_string_pretty(&scenes).context("serialize scenes")?;
    println!("{json}");
    Ok(())
}

fn cmd_tools() -> anyhow::Result<()> {
    for program in ["ffmpeg", "ffprobe", "espeak", "pico2wave"] {
        match which::which(program) {
            Ok(path) => println!("{program:<10} {}", path.display()),
            Err(_) => println!("{program:<10} not found"),
        }
    }
    Ok(())
}
