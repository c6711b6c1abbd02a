//! # homework-bot core library
//!
//! Polls the homework review API for status changes of the caller's latest
//! submission and forwards them to a Telegram chat.
//!
//! ## Key Components
//!
//! - [`check_response`]: structural check of an API response
//! - [`parse_status`]: homework record to notification text
//! - [`PracticumClient`]: the single outbound API request
//! - [`Notifier`]: best-effort delivery over a [`Messenger`] such as [`TelegramBot`]
//! - [`Poller`]: cursor-owning poll loop

pub mod api;
pub mod config;
pub mod error;
pub mod homework;
pub mod notifier;
pub mod poller;
pub mod response;
pub mod telegram;

pub use api::{HomeworkSource, PracticumClient};
pub use config::Config;
pub use error::{BotError, ConfigError, MessagingError, RequestDiagnostics};
pub use homework::{parse_status, HomeworkStatus};
pub use notifier::{Messenger, Notifier};
pub use poller::{failure_message, Clock, CycleOutcome, Poller, PollerState, SystemClock};
pub use response::{check_response, ApiResponse};
pub use telegram::TelegramBot;
