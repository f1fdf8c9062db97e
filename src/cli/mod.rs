use clap::{ Parser, Subcommand, ValueEnum };
use std::path::PathBuf;

use autocodegen::CodeLanguage;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "autocodegen",
    about = "Synthesizes automotive SoA asset bundles with a hosted LLM",
    version,
    author,
    long_about = None
)]
pub struct AutoCodeGenCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an asset bundle for a vehicle feature
    Synthesize {
        /// Feature description; asked for interactively when omitted
        prompt: Option<String>,

        /// Write the received asset bundle to this file as JSON
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Code tab opened first (cpp, rust, java)
        #[arg(long, value_parser = parse_code_language, default_value = "cpp")]
        code: CodeLanguage,

        /// Open the interactive tab browser after rendering
        #[arg(short, long, default_value = "false")]
        browse: bool,
    },

    /// Render a previously saved asset bundle
    Show {
        /// Path to the asset JSON
        #[arg(short, long)]
        asset: PathBuf,

        /// Accept out-of-range scores and unknown simulation verdicts
        #[arg(long, default_value = "false")]
        lenient: bool,

        /// Code tab opened first (cpp, rust, java)
        #[arg(long, value_parser = parse_code_language, default_value = "cpp")]
        code: CodeLanguage,

        /// Open the interactive tab browser after rendering
        #[arg(short, long, default_value = "false")]
        browse: bool,
    },

    /// Print the response schema sent to the generation service
    Schema,
}

fn parse_code_language(key: &str) -> Result<CodeLanguage, String> {
    CodeLanguage::from_key(key).ok_or_else(|| {
        format!("unknown language '{}' (expected cpp, rust or java)", key)
    })
}
