mod message;

pub use message::{
    ActionButton, ActionCard, At, BtnOrientation, CardOptions, Message, TextContent,
};
