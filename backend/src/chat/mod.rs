//! Master chat
//!
//! Keyword-routed canned replies plus the message types a chat UI builds
//! around them.

pub mod models;
pub mod rules;
pub mod steps;

pub use models::{ChatAction, ChatMessage, ChatReply, ChatRequest, LoadingStep, MessageKind};
pub use rules::{respond, select_reply, Topic};
pub use steps::loading_steps;
