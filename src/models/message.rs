//! DingTalk robot message payloads.
//!
//! Each variant of [`Message`] serializes to the exact JSON shape the robot
//! webhook expects, with `msgtype` as the discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Message
// ============================================================================

/// Message payload accepted by the robot webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msgtype")]
pub enum Message {
    /// Plain text, optionally mentioning group members
    #[serde(rename = "text")]
    Text {
        text: TextContent,
        #[serde(default)]
        at: At,
    },

    /// Card with a markdown body and one or more buttons
    #[serde(rename = "actionCard")]
    ActionCard {
        #[serde(rename = "actionCard")]
        action_card: ActionCard,
    },
}

impl Message {
    /// Builds a text message; `at` defaults to no mentions
    pub fn text(content: impl Into<String>, at: Option<At>) -> Self {
        Message::Text {
            text: TextContent {
                content: content.into(),
            },
            at: at.unwrap_or_default(),
        }
    }

    /// Builds an action card, filling in the orientation and button defaults
    pub fn action_card(options: CardOptions) -> Self {
        Message::ActionCard {
            action_card: ActionCard {
                title: options.title,
                text: options.text,
                btn_orientation: options.btn_orientation.unwrap_or_default(),
                btns: options.btns.unwrap_or_default(),
            },
        }
    }

    /// Wire value of the `msgtype` discriminator
    pub fn msgtype(&self) -> &'static str {
        match self {
            Message::Text { .. } => "text",
            Message::ActionCard { .. } => "actionCard",
        }
    }
}

// ============================================================================
// Text
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

/// Group members to mention with a text message.
///
/// Unset fields are left out of the JSON, so the default value is `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct At {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_mobiles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_at_all: Option<bool>,
}

impl At {
    /// Mention everyone in the group
    pub fn all() -> Self {
        Self {
            at_mobiles: None,
            is_at_all: Some(true),
        }
    }

    /// Mention the members registered with the given phone numbers
    pub fn mobiles<I, S>(mobiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            at_mobiles: Some(mobiles.into_iter().map(Into::into).collect()),
            is_at_all: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.at_mobiles.is_none() && self.is_at_all.is_none()
    }
}

// ============================================================================
// Action card
// ============================================================================

/// Action card body as sent on the wire.
///
/// `title` and `text` are passed through as given; a card without them is
/// left for the provider to reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub btn_orientation: BtnOrientation,
    #[serde(default)]
    pub btns: Vec<ActionButton>,
}

/// Caller-facing action card input; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOptions {
    pub title: Option<String>,
    pub text: Option<String>,
    pub btn_orientation: Option<BtnOrientation>,
    pub btns: Option<Vec<ActionButton>>,
}

impl CardOptions {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_orientation(mut self, orientation: BtnOrientation) -> Self {
        self.btn_orientation = Some(orientation);
        self
    }

    pub fn with_button(mut self, button: ActionButton) -> Self {
        self.btns.get_or_insert_with(Vec::new).push(button);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub title: String,
    #[serde(rename = "actionURL")]
    pub action_url: String,
}

impl ActionButton {
    pub fn new(title: impl Into<String>, action_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action_url: action_url.into(),
        }
    }
}

/// Button layout; serialized as the strings `"0"` and `"1"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BtnOrientation {
    /// Buttons stacked top to bottom
    #[default]
    #[serde(rename = "0")]
    Vertical,
    /// Buttons side by side
    #[serde(rename = "1")]
    Horizontal,
}

impl BtnOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BtnOrientation::Vertical => "0",
            BtnOrientation::Horizontal => "1",
        }
    }
}

impl FromStr for BtnOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "vertical" => Ok(BtnOrientation::Vertical),
            "1" | "horizontal" => Ok(BtnOrientation::Horizontal),
            _ => Err(format!(
                "Invalid button orientation '{}'. Valid values are: vertical (0), horizontal (1)",
                s
            )),
        }
    }
}

impl fmt::Display for BtnOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
