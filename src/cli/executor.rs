//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use std::sync::Arc;

use anyhow::Context;

use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{NotifierResult, TransportError};
use crate::external::client::build_http_client;
use crate::external::{HttpResponse, ReqwestTransport};
use crate::models::{At, CardOptions};
use crate::services::Notifier;
use crate::services::dingtalk::SystemClock;

/// Execute a CLI command with the given settings
///
/// Prints the robot's reply body to stdout. Fails when the configuration is
/// incomplete, the request fails, or the reply carries a non-zero `errcode`.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    cli.validate().map_err(anyhow::Error::msg)?;

    let notifier = build_notifier(&settings).context("Failed to create notifier")?;

    match dispatch(&cli.command, &notifier).await? {
        Some(response) => {
            println!("{}", response.body);
            ensure_accepted(&response)
        }
        None => {
            println!("destination: {}", notifier.masked_url());
            println!("signed: {}", notifier.is_signed());
            Ok(())
        }
    }
}

/// Build a notifier from settings, honouring the configured HTTP timeouts
pub fn build_notifier(settings: &Settings) -> NotifierResult<Notifier> {
    let client = build_http_client(&settings.http).map_err(TransportError::from)?;

    Notifier::with_capabilities(
        settings.bot.clone().into_notifier_config(),
        Arc::new(ReqwestTransport::new(client)),
        Arc::new(SystemClock),
    )
}

/// Run one command against the notifier
///
/// Returns `None` for commands that send nothing.
pub async fn dispatch(
    command: &Commands,
    notifier: &Notifier,
) -> NotifierResult<Option<HttpResponse>> {
    let response = match command {
        Commands::Text {
            content,
            at_mobiles,
            at_all,
        } => {
            let at = if *at_all {
                Some(At::all())
            } else if !at_mobiles.is_empty() {
                Some(At::mobiles(at_mobiles.iter().cloned()))
            } else {
                None
            };
            notifier.text(content.clone(), at).await?
        }
        Commands::ActionCard {
            title,
            text,
            orientation,
            buttons,
        } => {
            let card = CardOptions {
                title: title.clone(),
                text: text.clone(),
                btn_orientation: orientation.map(Into::into),
                btns: (!buttons.is_empty()).then(|| buttons.clone()),
            };
            notifier.action_card(card).await?
        }
        Commands::Check => return Ok(None),
    };

    tracing::info!(status = response.status, "Message delivered");
    Ok(Some(response))
}

/// Turn a non-zero `errcode` into an error; non-JSON bodies are accepted with a warning
fn ensure_accepted(response: &HttpResponse) -> anyhow::Result<()> {
    match response.reply() {
        Ok(reply) if !reply.is_ok() => anyhow::bail!(
            "DingTalk rejected the message: errcode={} errmsg={}",
            reply.errcode,
            reply.errmsg
        ),
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "Reply is not a DingTalk errcode envelope");
            Ok(())
        }
    }
}
