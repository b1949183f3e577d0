//! CLI module graph and command dispatch.

pub mod alert;
pub mod command;
pub mod config;
pub mod output;
pub mod paths;
pub mod price;
pub mod run;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

use command::{AlertCommand, Cli, Commands, ConfigCommand};

/// Execute the parsed command line.
///
/// # Errors
///
/// Returns the first error from configuration loading or the command itself.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run => run::execute(load_config(config_path)?).await,
        Commands::Price(args) => {
            let config = load_config(config_path)?;
            init_logging(&config, false);
            price::execute(&config, &args).await
        }
        Commands::Alert(command) => {
            let config = load_config(config_path)?;
            init_logging(&config, false);
            match command {
                AlertCommand::Set(args) => alert::execute_set(&config, &args).await,
                AlertCommand::List(args) => alert::execute_list(&config, &args.subscriber).await,
                AlertCommand::Remove(args) => alert::execute_remove(&config, &args).await,
                AlertCommand::Show(args) => alert::execute_show(&config, &args.id).await,
            }
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&load_config(config_path)?),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(config_path),
    }
}

/// Load the configuration file.
///
/// An explicit path must exist. When no path is given and the default file
/// is missing, defaults are used with the database under `~/.tokenwatch/`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    let path = paths::default_config();
    if path.exists() {
        return Config::load(&path);
    }

    output::warning(&format!(
        "No config file at {}, using defaults",
        path.display()
    ));
    paths::ensure_home_dir()?;
    let mut config = Config::from_env_defaults()?;
    config.database = paths::default_database().display().to_string();
    Ok(config)
}

/// Initialize tracing for a command.
///
/// Long-running commands always log; one-shot commands only log when `-v`
/// is given, so their stdout stays clean.
pub(crate) fn init_logging(config: &Config, always: bool) {
    let verbose = output::verbosity();
    if !always && verbose == 0 {
        return;
    }

    let logging = match verbose {
        0 => config.logging.clone(),
        1 => LoggingConfig {
            level: "debug".into(),
            ..config.logging.clone()
        },
        _ => LoggingConfig {
            level: "trace".into(),
            ..config.logging.clone()
        },
    };
    logging.init();
}
