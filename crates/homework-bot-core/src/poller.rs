//! Poll loop.
//!
//! The poller owns the `from_date` cursor and runs one cycle at a time:
//!
//! ```text
//! Idle -> Cycling (fetch, validate, translate, notify) -> Idle (sleep)
//! ```
//!
//! Whatever happens during a cycle, the cursor is moved to the time the
//! cycle finished, so a failed window is never retried.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::api::{HomeworkSource, PracticumClient};
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::homework::parse_status;
use crate::notifier::{Messenger, Notifier};
use crate::response::check_response;
use crate::telegram::TelegramBot;

/// Prefix of every failure notification.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Source of the current Unix time in seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// Between cycles.
    Idle,
    /// A fetch/validate/translate/notify pass is in progress.
    Cycling,
}

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found and handed to the notifier.
    Notified { message: String },
    /// The response held no homework.
    NoChanges,
    /// The cycle failed and the failure was handed to the notifier.
    FailureReported { message: String },
    /// The cycle failed with the same message as the last reported failure.
    FailureSuppressed { message: String },
    /// The messaging channel failed; logged only.
    ChannelError { message: String },
}

/// Failure notification text for an error.
pub fn failure_message(err: &BotError) -> String {
    format!("{FAILURE_PREFIX}: {err}")
}

/// The poll loop controller.
pub struct Poller<S, M, C = SystemClock> {
    source: S,
    notifier: Notifier<M>,
    clock: C,
    retry_period: Duration,
    state: PollerState,
    cursor: i64,
    last_error: Option<String>,
}

impl Poller<PracticumClient, TelegramBot, SystemClock> {
    /// Wire the production API client and Telegram bot from `config`.
    pub fn from_config(config: &Config) -> Self {
        Poller::new(
            PracticumClient::new(config),
            TelegramBot::new(config),
            SystemClock,
            config.retry_period,
        )
    }
}

impl<S, M, C> Poller<S, M, C>
where
    S: HomeworkSource,
    M: Messenger,
    C: Clock,
{
    /// Create an idle poller whose cursor starts at the current time.
    pub fn new(source: S, messenger: M, clock: C, retry_period: Duration) -> Self {
        let cursor = clock.now();
        Self {
            source,
            notifier: Notifier::new(messenger),
            clock,
            retry_period,
            state: PollerState::Idle,
            cursor,
            last_error: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    /// Text of the last failure notification, if the most recent cycles failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn messenger(&self) -> &M {
        self.notifier.messenger()
    }

    // ── Loop ─────────────────────────────────────────────────────────

    /// Run cycles forever, sleeping `retry_period` after each one.
    pub async fn run(&mut self) {
        info!(
            "Polling homework statuses every {}s starting from {}",
            self.retry_period.as_secs(),
            self.cursor
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run one cycle and advance the cursor.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.state = PollerState::Cycling;

        let outcome = match self.check_updates().await {
            Ok(Some(message)) => {
                self.notifier.notify(&message).await;
                self.last_error = None;
                CycleOutcome::Notified { message }
            }
            Ok(None) => {
                debug!("No status changes");
                self.last_error = None;
                CycleOutcome::NoChanges
            }
            Err(err) => self.report_failure(err).await,
        };

        self.cursor = self.clock.now();
        self.state = PollerState::Idle;
        outcome
    }

    /// Fetch, validate and translate the latest homework, if any.
    async fn check_updates(&self) -> Result<Option<String>> {
        let response = self.source.fetch(self.cursor).await?;
        let checked = check_response(&response)?;
        debug!(
            "Fetched {} homework(s), current_date={}",
            checked.homeworks.len(),
            checked.current_date
        );

        // Only the most recent homework is reported.
        checked.latest().map(parse_status).transpose()
    }

    async fn report_failure(&mut self, err: BotError) -> CycleOutcome {
        if let BotError::Messaging(_) = err {
            let message = err.to_string();
            error!("Messaging channel failure: {message}");
            return CycleOutcome::ChannelError { message };
        }

        let message = failure_message(&err);
        error!("{message}");

        if self.last_error.as_deref() == Some(message.as_str()) {
            debug!("Same failure as last cycle; not notifying again");
            return CycleOutcome::FailureSuppressed { message };
        }

        self.notifier.notify(&message).await;
        self.last_error = Some(message.clone());
        CycleOutcome::FailureReported { message }
    }
}
