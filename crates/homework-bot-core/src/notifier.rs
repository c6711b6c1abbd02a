//! Best-effort message delivery.

use tracing::{debug, error};

use crate::error::MessagingError;

/// A channel that can deliver a text message to the fixed recipient.
#[allow(async_fn_in_trait)]
pub trait Messenger {
    async fn send_message(&self, text: &str) -> Result<(), MessagingError>;
}

/// Wraps a [`Messenger`] so delivery failures never reach the caller.
pub struct Notifier<M> {
    messenger: M,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M) -> Self {
        Self { messenger }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Send `message`, logging and discarding any delivery failure.
    ///
    /// Returns whether the message was delivered.
    pub async fn notify(&self, message: &str) -> bool {
        match self.messenger.send_message(message).await {
            Ok(()) => {
                debug!("Message sent: {message}");
                true
            }
            Err(e) => {
                error!("Failed to send message: {e}");
                false
            }
        }
    }
}
