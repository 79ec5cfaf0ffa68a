//! Poll loop: fetch → validate → format → deduplicate → notify → sleep
//!
//! The loop keeps two pieces of state between cycles: the cursor passed as
//! `from_date` and the text of the last message it sent. A message identical to
//! the previous one is never sent twice in a row, whether it is a status update
//! or a failure report.

use crate::config::{MessagesConfig, PollerConfig, Settings};
use crate::errors::{BotError, BotResult};
use crate::homework::{check_response, failure_message, parse_status, HomeworkSource};
use crate::logger::{self, LogTag};
use crate::telegram::Notifier;
use std::time::Duration;

/// Source of "now" as a unix timestamp
pub type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

pub fn system_clock() -> Clock {
    Box::new(|| chrono::Utc::now().timestamp())
}

/// State carried from one cycle to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// `from_date` for the next request
    pub cursor: i64,
    /// Last text handed to the notifier; empty before the first send
    pub last_message: String,
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A new message was dispatched (delivery itself is best-effort)
    Notified { message: String, delivered: bool },
    /// The message matched the previous one; nothing sent
    Unchanged,
    /// The cycle failed; `reported` says whether the failure went to the chat
    Failed { error: BotError, reported: bool },
}

pub struct Poller<S: HomeworkSource, N: Notifier> {
    source: S,
    notifier: N,
    config: PollerConfig,
    messages: MessagesConfig,
    state: PollState,
    clock: Clock,
}

impl<S: HomeworkSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, settings: &Settings) -> Self {
        Self::with_clock(source, notifier, settings, system_clock())
    }

    /// Cursor starts at the clock's current time
    pub fn with_clock(source: S, notifier: N, settings: &Settings, clock: Clock) -> Self {
        let cursor = clock();
        Self {
            source,
            notifier,
            config: settings.poller.clone(),
            messages: settings.messages.clone(),
            state: PollState {
                cursor,
                last_message: String::new(),
            },
            clock,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.config.retry_period_secs)
    }

    /// Fetch, validate and format; every failure surfaces as a `BotError`
    async fn next_message(&self) -> BotResult<String> {
        let response = self.source.fetch(self.state.cursor).await?;
        let homeworks = check_response(&response)?;

        match homeworks.first() {
            Some(record) => parse_status(record, &self.messages),
            None => Ok(self.messages.empty_list.clone()),
        }
    }

    /// Run one cycle without sleeping
    pub async fn poll_once(&mut self) -> CycleOutcome {
        logger::debug(
            LogTag::Poller,
            &format!("Polling with from_date={}", self.state.cursor),
        );

        match self.next_message().await {
            Ok(message) => {
                if message == self.state.last_message {
                    logger::debug(LogTag::Poller, "No new statuses in the response");
                    return CycleOutcome::Unchanged;
                }

                let delivered = self.notifier.send(&message).await;
                if !delivered {
                    logger::warning(
                        LogTag::Poller,
                        "Status message was not delivered; it will not be resent",
                    );
                }
                self.state.cursor = (self.clock)();
                self.state.last_message = message.clone();
                CycleOutcome::Notified { message, delivered }
            }
            Err(error) => {
                let message = failure_message(&error, &self.messages);
                logger::error(
                    LogTag::Poller,
                    &format!("{} [kind={}] {:?}", message, error.kind(), error),
                );

                let mut reported = false;
                if self.config.notify_failures && message != self.state.last_message {
                    self.notifier.send(&message).await;
                    self.state.last_message = message;
                    reported = true;
                }
                CycleOutcome::Failed { error, reported }
            }
        }
    }

    /// Poll forever, sleeping the fixed retry period after every cycle
    pub async fn run(&mut self) {
        logger::info(
            LogTag::Poller,
            &format!(
                "Polling every {}s starting from {}",
                self.config.retry_period_secs, self.state.cursor
            ),
        );
        loop {
            self.poll_once().await;
            tokio::time::sleep(self.retry_period()).await;
        }
    }
}
