use super::{DomainError, QueryOutcome};
use std::collections::HashSet;
use std::time::Duration;

/// Retry schedule for transient query outcomes.
///
/// Attempt `k` (1-based) that ends in a retryable outcome is followed by a
/// pause of `base_delay * backoff_multiplier^(k-1)`, up to `max_attempts`
/// attempts in total.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    backoff_multiplier: f64,
    retryable_outcomes: HashSet<QueryOutcome>,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        backoff_multiplier: f64,
    ) -> Result<Self, DomainError> {
        if max_attempts == 0 {
            return Err(DomainError::InvalidRetryPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if !backoff_multiplier.is_finite() || backoff_multiplier < 1.0 {
            return Err(DomainError::InvalidRetryPolicy(format!(
                "backoff_multiplier must be a finite number >= 1.0, got {backoff_multiplier}"
            )));
        }

        Ok(Self {
            max_attempts,
            base_delay,
            backoff_multiplier,
            retryable_outcomes: HashSet::from([QueryOutcome::Timeout, QueryOutcome::ServerFailure]),
        })
    }

    /// One attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            retryable_outcomes: HashSet::new(),
        }
    }

    /// Replaces the set of outcomes that trigger a retry. `Success` and the
    /// absence outcomes are never retried, whatever is passed here.
    pub fn with_retryable_outcomes<I>(mut self, outcomes: I) -> Self
    where
        I: IntoIterator<Item = QueryOutcome>,
    {
        self.retryable_outcomes = outcomes
            .into_iter()
            .filter(|o| !matches!(o, QueryOutcome::Success) && !o.is_absence())
            .collect();
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    pub fn is_retryable(&self, outcome: QueryOutcome) -> bool {
        self.retryable_outcomes.contains(&outcome)
    }

    /// Whether attempt `attempt` (1-based) ending in `outcome` gets another try.
    pub fn should_retry(&self, attempt: u32, outcome: QueryOutcome) -> bool {
        attempt < self.max_attempts && self.is_retryable(outcome)
    }

    /// Pause between attempt `attempt` and `attempt + 1` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.backoff_multiplier.powi(exponent);
        Duration::try_from_secs_f64(self.base_delay.as_secs_f64() * factor)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            backoff_multiplier: 2.0,
            retryable_outcomes: HashSet::from([QueryOutcome::Timeout, QueryOutcome::ServerFailure]),
        }
    }
}
