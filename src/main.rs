//! portfolio-term CLI - Browse a portfolio through a simulated shell

use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_term::{
    config::{Config, ConfigError},
    storage::{FileStore, KeyValueStore, MemoryStore},
    theme::ThemeStore,
    tui::{run_batch, InteractiveShell},
    Shell,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "portfolio-term")]
#[command(about = "Browse a portfolio through a simulated shell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file (default: ~/.config/portfolio-term/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// State file holding themes and the current selection
    #[arg(long)]
    state: Option<PathBuf>,

    /// Keep themes in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Print output immediately instead of typing it out
    #[arg(long)]
    no_animation: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Interactive,

    /// Run a single command and print its output
    Exec {
        /// Command line, e.g. `theme blue`
        #[arg(required = true, trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize configuration file with defaults
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_file.as_ref())?;

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let initializing = matches!(cli.command, Some(Commands::Config(ConfigCommands::Init { .. })));
    if cli.config.is_some() && !config_path.exists() && !initializing {
        return Err(ConfigError::NotFound(config_path).into());
    }

    match cli.command.take() {
        Some(Commands::Config(cmd)) => run_config(cmd, config_path),
        Some(Commands::Exec { words }) => {
            let config = load_config(&cli, config_path)?;
            let mut shell = build_shell(&cli, &config, "");
            if let Some(output) = shell.run_line(&words.join(" ")) {
                println!("{}", output);
            }
            Ok(())
        }
        Some(Commands::Interactive) | None => {
            let config = load_config(&cli, config_path)?;
            if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
                let mut shell = build_shell(&cli, &config, "");
                return run_batch(&mut shell, io::stdin().lock(), &mut io::stdout().lock());
            }

            let shell = build_shell(&cli, &config, &config.terminal.greeting);
            let mut interactive = InteractiveShell::new(
                shell,
                config.terminal.clone(),
                config.animation.char_interval(),
            );
            interactive.run().await
        }
    }
}

fn init_logging(level: &str, log_file: Option<&PathBuf>) -> Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = builder.with_writer(io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn load_config(cli: &Cli, path: PathBuf) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    if let Some(state) = &cli.state {
        config.storage.state_file = Some(state.clone());
    }
    if cli.no_animation {
        config.animation.enabled = false;
    }
    Ok(config)
}

fn build_shell(cli: &Cli, config: &Config, greeting: &str) -> Shell {
    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let path = config.state_path();
        info!("Using state file {}", path.display());
        Box::new(FileStore::open(path))
    };
    Shell::new(ThemeStore::load(store), &config.animation, greeting)
}

fn run_config(cmd: ConfigCommands, path: PathBuf) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            Config::init_at(path.clone(), force)?;
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigCommands::Show => {
            let config = Config::load_from(path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
