pub mod action;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod template;
pub mod translators;

pub use error::{Result, SendbotError};
