//! Bounded retry with exponential backoff.
//!
//! [`Retrying`] wraps any [`TrelloApi`] and retries calls that failed with a
//! retryable [`ApiError`] (rate limits, transient network failures). Other
//! errors return immediately. A raised [`Interrupt`] ends the wait between
//! attempts with [`PlannerError::Interrupted`].

use std::{thread, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    application::{
        ApiError,
        ports::{BoardDraft, CardDraft, CardUpdate, TrelloApi},
        services::Interrupt,
    },
    domain::{Board, BoardList, Card, Label, LabelColor, Member},
    error::{PlannerError, PlannerResult},
};

/// Longest uninterrupted stretch of a [`ThreadSleeper`] wait.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Source of delay between attempts.
///
/// Implementations may return early once `interrupt` is raised.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration, interrupt: &Interrupt);
}

/// Blocks the current thread in short slices, checking `interrupt` between
/// them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration, interrupt: &Interrupt) {
        let mut remaining = duration;
        while !remaining.is_zero() && !interrupt.is_raised() {
            let slice = remaining.min(SLEEP_SLICE);
            thread::sleep(slice);
            remaining -= slice;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Always at least 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            ..Self::default()
        }
    }

    /// Backoff after failed attempt number `attempt` (1-based), capped at
    /// `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let nanos = self.base_delay.as_nanos() as f64 * self.multiplier.max(0.0).powi(exponent);
        // f64::min discards NaN, so an overflowing product still lands on the cap.
        let capped = nanos.min(self.max_delay.as_nanos() as f64).max(0.0);
        Duration::from_nanos(capped as u64)
    }

    /// Run `call` until it succeeds, fails with a non-retryable error, or
    /// attempts run out.
    ///
    /// A server-provided `Retry-After` replaces the computed backoff when it
    /// is longer. `interrupt` is checked before and after every wait.
    pub fn execute<T>(
        &self,
        sleeper: &dyn Sleeper,
        interrupt: &Interrupt,
        operation: &str,
        mut call: impl FnMut() -> PlannerResult<T>,
    ) -> PlannerResult<T> {
        let mut attempt = 1;
        loop {
            match call() {
                Ok(value) => return Ok(value),
                Err(PlannerError::Api(err)) if err.is_retryable() => {
                    if attempt >= self.max_attempts {
                        warn!(operation, attempts = attempt, error = %err, "Retries exhausted");
                        return Err(ApiError::RetriesExhausted {
                            attempts: attempt,
                            last: Box::new(err),
                        }
                        .into());
                    }

                    let delay = self
                        .delay_for(attempt)
                        .max(err.retry_after().unwrap_or_default());
                    debug!(
                        operation,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying after failure"
                    );
                    if interrupt.is_raised() {
                        info!(operation, attempt, "Interrupted; not retrying");
                        return Err(PlannerError::Interrupted);
                    }
                    sleeper.sleep(delay, interrupt);
                    if interrupt.is_raised() {
                        info!(operation, attempt, "Interrupted while waiting to retry");
                        return Err(PlannerError::Interrupted);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// [`TrelloApi`] decorator that applies a [`RetryPolicy`] to every call.
pub struct Retrying<A, S = ThreadSleeper> {
    inner: A,
    policy: RetryPolicy,
    sleeper: S,
    interrupt: Interrupt,
}

impl<A: TrelloApi> Retrying<A> {
    pub fn new(inner: A, policy: RetryPolicy) -> Self {
        Self::with_sleeper(inner, policy, ThreadSleeper)
    }
}

impl<A: TrelloApi, S: Sleeper> Retrying<A, S> {
    pub fn with_sleeper(inner: A, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            inner,
            policy,
            sleeper,
            interrupt: Interrupt::default(),
        }
    }

    /// Abandon pending retries once `interrupt` is raised.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn run<T>(&self, operation: &str, call: impl FnMut() -> PlannerResult<T>) -> PlannerResult<T> {
        self.policy
            .execute(&self.sleeper, &self.interrupt, operation, call)
    }
}

impl<A: TrelloApi, S: Sleeper> TrelloApi for Retrying<A, S> {
    fn verify_credentials(&self) -> PlannerResult<Member> {
        self.run("verify_credentials", || self.inner.verify_credentials())
    }

    fn create_board(&self, draft: &BoardDraft) -> PlannerResult<Board> {
        self.run("create_board", || self.inner.create_board(draft))
    }

    fn get_board(&self, board_id: &str) -> PlannerResult<Board> {
        self.run("get_board", || self.inner.get_board(board_id))
    }

    fn list_boards(&self) -> PlannerResult<Vec<Board>> {
        self.run("list_boards", || self.inner.list_boards())
    }

    fn delete_board(&self, board_id: &str) -> PlannerResult<()> {
        self.run("delete_board", || self.inner.delete_board(board_id))
    }

    fn create_list(&self, board_id: &str, name: &str) -> PlannerResult<BoardList> {
        self.run("create_list", || self.inner.create_list(board_id, name))
    }

    fn board_lists(&self, board_id: &str) -> PlannerResult<Vec<BoardList>> {
        self.run("board_lists", || self.inner.board_lists(board_id))
    }

    fn archive_list(&self, list_id: &str) -> PlannerResult<()> {
        self.run("archive_list", || self.inner.archive_list(list_id))
    }

    fn create_label(&self, board_id: &str, name: &str, color: LabelColor) -> PlannerResult<Label> {
        self.run("create_label", || {
            self.inner.create_label(board_id, name, color)
        })
    }

    fn create_card(&self, draft: &CardDraft) -> PlannerResult<Card> {
        self.run("create_card", || self.inner.create_card(draft))
    }

    fn list_cards(&self, list_id: &str) -> PlannerResult<Vec<Card>> {
        self.run("list_cards", || self.inner.list_cards(list_id))
    }

    fn update_card(&self, card_id: &str, update: &CardUpdate) -> PlannerResult<Card> {
        self.run("update_card", || self.inner.update_card(card_id, update))
    }

    fn move_card(&self, card_id: &str, list_id: &str) -> PlannerResult<Card> {
        self.run("move_card", || self.inner.move_card(card_id, list_id))
    }

    fn delete_card(&self, card_id: &str) -> PlannerResult<()> {
        self.run("delete_card", || self.inner.delete_card(card_id))
    }
}
