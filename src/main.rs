use std::path::Path;
use clap::Parser;
use log::{ debug, info };
use anyhow::Result;
use autocodegen::AutoCodeGenConfig;
mod cli;
use cli::{ AutoCodeGenCli, Commands };

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = AutoCodeGenCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Synthesize { prompt, save, code, browse } => {
            cli::commands::synthesize::execute(
                &config,
                prompt.as_deref(),
                save.as_deref(),
                *code,
                *browse,
                cli.output_format
            ).await?;
        }

        Commands::Show { asset, lenient, code, browse } => {
            cli::commands::show::execute(&config, asset, *lenient, *code, *browse, cli.output_format)?;
        }

        Commands::Schema => {
            cli::commands::schema::execute(cli.output_format)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AutoCodeGenConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Ok(AutoCodeGenConfig::from_file(path)?)
        }
        None => Ok(AutoCodeGenConfig::default()),
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
