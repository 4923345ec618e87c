//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{ActionButton, BtnOrientation};

/// Send messages to a DingTalk group robot
#[derive(Parser, Debug)]
#[command(name = "dingtalk-bot")]
#[command(about = "Send messages to a DingTalk group robot")]
#[command(long_about = "
dingtalk-bot posts text and action card messages to a DingTalk custom robot
webhook, signing the request when the robot has a secret configured.

The destination is read from a TOML file (--config or DINGTALK_CONFIG_FILE),
DINGTALK_* environment variables and the flags below, in increasing priority.

EXAMPLES:
    # Send a text message using DINGTALK_BOT__WEBHOOK and DINGTALK_BOT__SECRET
    dingtalk-bot text \"Pipeline #42 passed\"

    # Mention everyone
    dingtalk-bot text \"Production is down\" --at-all

    # Build the webhook from its parts
    dingtalk-bot --base-url https://oapi.dingtalk.com/robot/send --access-token xxx \\
        text \"hello\"

    # Action card with two buttons laid out side by side
    dingtalk-bot action-card --title \"Release v1.2\" --text \"#### Release v1.2 is out\" \\
        --orientation horizontal \\
        --button \"Notes=https://example.com/notes\" --button \"Download=https://example.com/dl\"

    # Show the resolved destination without sending anything
    dingtalk-bot --config ci/dingtalk.toml check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// TOML file with [bot], [http] and [logger] sections.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/dingtalk-bot.toml
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Full webhook URL, including access_token
    ///
    /// Takes precedence over --base-url/--access-token.
    #[arg(long, global = true, value_name = "URL", value_parser = super::validation::validate_url)]
    pub webhook: Option<String>,

    /// Robot send endpoint, combined with --access-token
    ///
    /// Example: --base-url https://oapi.dingtalk.com/robot/send
    #[arg(long, global = true, value_name = "URL", value_parser = super::validation::validate_url)]
    pub base_url: Option<String>,

    /// Robot access token, combined with --base-url
    #[arg(long, global = true, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Signing secret for robots with the "sign" security setting
    #[arg(long, global = true, value_name = "SECRET")]
    pub secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS", value_parser = super::validation::validate_timeout)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a text message
    ///
    /// Examples:
    ///   dingtalk-bot text "Build failed"
    ///   dingtalk-bot text "Build failed" --at-mobile 13800000000
    ///   dingtalk-bot text "Build failed" --at-all
    Text {
        /// Message content
        content: String,

        /// Mention the member registered with this phone number (repeatable)
        #[arg(long = "at-mobile", value_name = "MOBILE")]
        at_mobiles: Vec<String>,

        /// Mention everyone in the group
        #[arg(long)]
        at_all: bool,
    },

    /// Send an action card
    ///
    /// Title and text are passed through unchecked; the robot rejects cards
    /// that lack them.
    ///
    /// Examples:
    ///   dingtalk-bot action-card --title "Deploy" --text "Deployed to prod" \
    ///       --button "Open=https://example.com"
    ActionCard {
        /// Card title
        #[arg(long)]
        title: Option<String>,

        /// Card body (markdown)
        #[arg(long)]
        text: Option<String>,

        /// Button layout
        #[arg(long, value_enum)]
        orientation: Option<Orientation>,

        /// Button as TITLE=URL (repeatable)
        #[arg(long = "button", value_name = "TITLE=URL", value_parser = super::validation::parse_button)]
        buttons: Vec<ActionButton>,
    },

    /// Validate configuration and print the resolved destination
    ///
    /// No request is sent. The access token is masked in the output.
    Check,
}

/// Button orientation options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    #[value(name = "vertical", alias = "0")]
    Vertical,
    #[value(name = "horizontal", alias = "1")]
    Horizontal,
}

impl From<Orientation> for BtnOrientation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => BtnOrientation::Vertical,
            Orientation::Horizontal => BtnOrientation::Horizontal,
        }
    }
}

impl Cli {
    /// Validate CLI arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<(), String> {
        if let Commands::Text {
            at_mobiles, at_all, ..
        } = &self.command
            && *at_all
            && !at_mobiles.is_empty()
        {
            return Err("Use either --at-all or --at-mobile, not both".to_string());
        }

        Ok(())
    }
}
