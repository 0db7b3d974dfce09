use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use dungeon_core::{DungeonGenerator, DungeonMap, GeneratorConfig};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Fingerprint,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the generation stream
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Optional TOML file overriding generator constants
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Print per-stage generation logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Writes `level target: message` lines to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{:>5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) -> Result<()> {
    if !verbose {
        return Ok(());
    }
    log::set_logger(&LOGGER).map_err(|error| anyhow!("Failed to install logger: {error}"))?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GeneratorConfig::from_toml_str(&source)
        .with_context(|| format!("Invalid generator config in {}", path.display()))
}

fn render(map: &DungeonMap, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Ascii => map.to_ascii(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(map).context("Failed to serialize dungeon to JSON")?
        }
        OutputFormat::Fingerprint => format!("{:016x}", map.fingerprint()),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(args.config.as_deref().map(Path::new))?;
    let map = DungeonGenerator::new(args.seed, config)
        .generate()
        .with_context(|| format!("Dungeon generation failed for seed {}", args.seed))?;

    println!("{}", render(&map, args.format)?);
    Ok(())
}
