//! DingTalk custom robot client.
//!
//! The core trait seams are [`HttpTransport`](crate::external::HttpTransport)
//! for the network call and [`Clock`] for the signature timestamp.

mod notifier;
pub mod signer;

pub use notifier::{Destination, Notifier, NotifierConfig, mask_access_token};
pub use signer::{Clock, FixedClock, SignedQuery, SystemClock, sign};
