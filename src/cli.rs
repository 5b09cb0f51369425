//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::ai::AiFlags;

/// A wrapper for the GitHub CLI with enhanced clone and commit functionality.
#[derive(Parser, Debug, Clone)]
#[command(name = "ghw")]
#[command(about = "A wrapper for the GitHub CLI with enhanced clone and commit functionality")]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// The gh command to run, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        required_unless_present = "update",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub argv: Vec<String>,

    /// Update the CLI to the latest release
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Print the command without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Use the default gh behavior for the clone command
    #[arg(long = "default")]
    pub use_default: bool,

    /// The base directory to clone repositories into
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Use ChatGPT to generate the commit message
    #[arg(long)]
    pub chatgpt: bool,

    /// Use Claude to generate the commit message
    #[arg(long)]
    pub claude: bool,

    /// Use Claude Sonnet with a persistent conversation (requires --claude)
    #[arg(long)]
    pub sonnet: bool,

    /// OpenAI API key for ChatGPT (otherwise uses OPENAI_API_KEY)
    #[arg(long)]
    pub openai_api_key: Option<String>,

    /// Anthropic API key for Claude (otherwise uses ANTHROPIC_API_KEY)
    #[arg(long)]
    pub anthropic_api_key: Option<String>,
}

impl Cli {
    /// The gh command, or an empty string when only `--update` was given.
    pub fn command_name(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    /// Everything after the gh command, exactly as given.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    /// Vendor selector flags for the commit path.
    pub fn ai_flags(&self) -> AiFlags {
        AiFlags {
            chatgpt: self.chatgpt,
            claude: self.claude,
            sonnet: self.sonnet,
            openai_api_key: self.openai_api_key.clone(),
            anthropic_api_key: self.anthropic_api_key.clone(),
        }
    }
}
