//! Command-line arguments

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "aicd", version, about = "Check text and documents for AI-generated content")]
pub struct Cli {
    /// Detection service base URL
    #[arg(long, global = true, env = "AICD_API_URL")]
    pub api_url: Option<String>,

    /// API key sent with every request
    #[arg(long, global = true, env = "AICD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the detection service is reachable
    Health,

    /// Analyze text or a document
    #[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
    Detect {
        /// Text to analyze
        #[arg(long)]
        text: Option<String>,

        /// PDF, Word or plain-text document to analyze
        #[arg(long)]
        file: Option<PathBuf>,

        /// Analyze the input as a whole instead of sentence by sentence
        #[arg(long)]
        single: bool,
    },

    /// List past analyses for this session
    History,

    /// Show one past analysis
    Analysis {
        id: String,
    },

    /// Show server-side session details
    Session,

    /// Delete every past analysis for this session
    ClearHistory,

    /// Print the locally stored session token
    SessionId,

    /// Forget the local session token
    Logout,
}
