//! dingtalk-bot Library
//!
//! Client for DingTalk custom robot webhooks: signs requests, formats text
//! and action card payloads, and posts them.
//!
//! ```ignore
//! use dingtalk_bot::{At, Notifier, NotifierConfig};
//!
//! let notifier = Notifier::new(
//!     NotifierConfig::token("https://oapi.dingtalk.com/robot/send", "xxx").with_secret("SECxxx"),
//! )?;
//! notifier.text("Pipeline #42 passed", Some(At::all())).await?;
//! ```

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;

pub use error::{NotifierError, NotifierResult, TransportError};
pub use external::{HttpResponse, HttpTransport};
pub use models::{ActionButton, At, BtnOrientation, CardOptions, Message};
pub use services::{Notifier, NotifierConfig};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
