pub mod dingtalk;

pub use dingtalk::{Notifier, NotifierConfig};
