// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::registry::{AssetsCache, NameMap, SpeakerProfile, SpeakerRegistry};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod registry;
mod script;
mod story;
mod validation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate TTS script lines from a normalized story
    Generate(GenerateArgs),

    /// Validate story documents against the expected structure
    Validate(ValidateArgs),

    /// Manage the speakers registry and name mappings
    Speakers {
        #[command(subcommand)]
        command: SpeakersCommands,
    },

    /// Manage the content-addressed assets cache
    Assets {
        #[command(subcommand)]
        command: AssetsCommands,
    },

    /// Generate shell completions for kazkar
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Path to the normalized story JSON
    #[arg(short, long)]
    input: PathBuf,

    /// Output path for the TTS lines JSON
    #[arg(short, long)]
    output: PathBuf,

    /// Maximum characters per narration chunk
    #[arg(long)]
    max_chars: Option<usize>,

    /// Fail when any speaker resolves only via the fallback
    #[arg(long)]
    enforce_known: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Story JSON file to validate
    #[arg(short, long, conflicts_with = "all")]
    story: Option<PathBuf>,

    /// Validate every JSON document under a directory
    #[arg(long, value_name = "DIR")]
    all: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum SpeakersCommands {
    /// Initialize the speakers registry and name map
    Init,

    /// Add or update a speaker profile
    Add {
        /// Speaker ID
        #[arg(long)]
        id: String,
        /// Display name
        #[arg(long)]
        display: String,
        /// Default voice
        #[arg(long)]
        voice: String,
        /// Language code
        #[arg(long, default_value = "uk")]
        lang: String,
        /// Voice pitch adjustment
        #[arg(long, default_value_t = 0)]
        pitch: i32,
        /// Speech rate multiplier
        #[arg(long, default_value_t = 1.0)]
        rate: f64,
        /// Speaking style
        #[arg(long, default_value = "calm")]
        style: String,
    },

    /// Update the default voice of an existing speaker
    LinkVoice {
        /// Speaker ID
        #[arg(long)]
        id: String,
        /// Default voice
        #[arg(long)]
        voice: String,
    },

    /// Append a name-mapping pattern
    AddMapPattern {
        /// Regex pattern matched against raw speaker names
        #[arg(long)]
        pattern: String,
        /// Canonical speaker ID the pattern maps to
        #[arg(long)]
        speaker: String,
    },

    /// Suggest speakers and mappings missing for a story
    SuggestMissing {
        /// Path to the normalized story JSON
        #[arg(long, value_name = "STORY")]
        input: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum AssetsCommands {
    /// Initialize the assets cache layout and registries
    Init,

    /// Add a constant JSON file to the cache
    AddConstant {
        /// Path to the constant file
        #[arg(long)]
        file: PathBuf,
    },
}

/// kazkar - story-to-TTS script generation
#[derive(Parser, Debug)]
#[command(name = "kazkar")]
#[command(version = "1.0.0")]
#[command(about = "Story-to-TTS script generation with speaker canonicalization")]
#[command(long_about = "kazkar turns normalized story documents into TTS-ready scripts.

EXAMPLES:
    kazkar generate -i story.json -o lines.json             # Generate TTS lines
    kazkar generate -i story.json -o lines.json --enforce-known
    kazkar validate --story story.json                      # Validate one story
    kazkar validate --all stories/                          # Validate a directory
    kazkar speakers init                                    # Seed the registries
    kazkar speakers add --id lina --display 'Ліна' --voice voice_lina
    kazkar speakers add-map-pattern --pattern 'ліна' --speaker lina
    kazkar speakers suggest-missing --input story.json
    kazkar assets init                                      # Prepare assets cache
    kazkar completions bash > kazkar.bash                   # Shell completions

CONFIGURATION:
    Configuration is stored in kazkar.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "kazkar.json")]
    config_path: String,

    /// Assets directory (overrides the config file)
    #[arg(short, long, global = true)]
    assets_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "kazkar", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&level));
    }

    let mut config = load_or_create_config(&cli.config_path)?;

    // Override config with CLI options if provided
    if let Some(assets_dir) = &cli.assets_dir {
        config.assets_dir = assets_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    match cli.command {
        Commands::Generate(args) => run_generate(config, args),
        Commands::Validate(args) => run_validate(config, args),
        Commands::Speakers { command } => run_speakers(config, command),
        Commands::Assets { command } => run_assets(config, command),
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

/// Load the configuration file, creating a default one when absent.
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json).context(format!(
            "Failed to write default config to file: {}",
            config_path
        ))?;

        Ok(config)
    }
}

fn run_generate(mut config: Config, args: GenerateArgs) -> Result<()> {
    if let Some(max_chars) = args.max_chars {
        config.generation.max_chars = max_chars;
    }
    if args.enforce_known {
        config.generation.enforce_known = true;
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_generate(&args.input, &args.output)
}

fn run_validate(config: Config, args: ValidateArgs) -> Result<()> {
    config.validate().context("Configuration validation failed")?;
    let controller = Controller::with_config(config)?;

    if let Some(dir) = args.all {
        let (_, failed) = controller.run_validate_all(&dir)?;
        if failed > 0 {
            return Err(anyhow!("{failed} document(s) failed validation"));
        }
        return Ok(());
    }

    let story = args
        .story
        .ok_or_else(|| anyhow!("Either --story or --all is required"))?;
    if !controller.run_validate(&story)? {
        return Err(anyhow!("Validation failed for {:?}", story));
    }
    Ok(())
}

fn run_speakers(config: Config, command: SpeakersCommands) -> Result<()> {
    let assets_dir = config.assets_dir.clone();

    match command {
        SpeakersCommands::Init => {
            if SpeakerRegistry::init(&assets_dir)? {
                log::info!(
                    "Initialized speakers registry: {:?}",
                    SpeakerRegistry::path(&assets_dir)
                );
            } else {
                log::info!(
                    "Speakers registry already exists: {:?}",
                    SpeakerRegistry::path(&assets_dir)
                );
            }
            if NameMap::init(&assets_dir)? {
                log::info!("Initialized speaker name map: {:?}", NameMap::path(&assets_dir));
            } else {
                log::info!(
                    "Speaker name map already exists: {:?}",
                    NameMap::path(&assets_dir)
                );
            }
            Ok(())
        }
        SpeakersCommands::Add {
            id,
            display,
            voice,
            lang,
            pitch,
            rate,
            style,
        } => {
            let mut registry = SpeakerRegistry::load(&assets_dir)?;
            registry.upsert(
                &id,
                SpeakerProfile {
                    display_name: display.clone(),
                    default_voice: voice,
                    lang,
                    pitch,
                    rate,
                    style,
                },
            );
            registry.save(&assets_dir)?;
            log::info!("Added/updated speaker '{id}': {display}");
            Ok(())
        }
        SpeakersCommands::LinkVoice { id, voice } => {
            let mut registry = SpeakerRegistry::load(&assets_dir)?;
            registry.link_voice(&id, &voice)?;
            registry.save(&assets_dir)?;
            log::info!("Updated voice for speaker '{id}': {voice}");
            Ok(())
        }
        SpeakersCommands::AddMapPattern { pattern, speaker } => {
            let mut map = NameMap::load(&assets_dir)?;
            map.add_pattern(&pattern, &speaker);
            map.save(&assets_dir)?;
            log::info!("Added mapping pattern: '{pattern}' -> '{speaker}'");
            Ok(())
        }
        SpeakersCommands::SuggestMissing { input } => {
            let controller = Controller::with_config(config)?;
            controller.run_suggest_missing(&input)
        }
    }
}

fn run_assets(config: Config, command: AssetsCommands) -> Result<()> {
    let cache = AssetsCache::new(&config.assets_dir);
    match command {
        AssetsCommands::Init => {
            cache.init()?;
            log::info!("Assets cache initialized at {:?}", config.assets_dir);
            Ok(())
        }
        AssetsCommands::AddConstant { file } => {
            let digest = cache.add_constant(&file)?;
            log::info!("SHA256: {digest}");
            Ok(())
        }
    }
}
