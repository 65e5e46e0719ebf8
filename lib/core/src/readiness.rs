//! Waiting for the identity provider script to become available.
//!
//! The provider script is loaded asynchronously by the page shell, so the
//! sign-in flow probes for it on a fixed interval. The interval is clamped to
//! a sane range and the overall wait can be bounded by a timeout.

use crate::error::{Result, SignInError};
use std::future::Future;
use std::time::Duration;

/// Shortest allowed retry interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Longest allowed retry interval.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// How often and how long to probe for the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    timeout: Option<Duration>,
}

impl PollPolicy {
    /// Creates a policy; the interval is clamped into the allowed range.
    #[must_use]
    pub fn new(interval: Duration, timeout: Option<Duration>) -> Self {
        Self {
            interval: interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL),
            timeout,
        }
    }

    /// Builds a policy from millisecond settings; a zero timeout means unbounded.
    #[must_use]
    pub fn from_millis(interval_ms: u32, timeout_ms: u32) -> Self {
        let timeout = (timeout_ms > 0).then(|| Duration::from_millis(u64::from(timeout_ms)));
        Self::new(Duration::from_millis(u64::from(interval_ms)), timeout)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Some(Duration::from_secs(15)))
    }
}

/// Polls `probe` until it reports ready, sleeping with `sleep` between attempts.
///
/// Returns the number of probes made. Time is accounted in whole intervals,
/// so the caller's `sleep` is the only clock involved.
///
/// # Errors
///
/// Returns [`SignInError::ProviderUnavailable`] once the accumulated wait
/// reaches the policy timeout.
pub async fn wait_until_ready<P, S, F>(
    policy: &PollPolicy,
    mut probe: P,
    mut sleep: S,
) -> Result<u32, SignInError>
where
    P: FnMut() -> bool,
    S: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut attempts: u32 = 0;
    let mut waited = Duration::ZERO;

    loop {
        attempts = attempts.saturating_add(1);
        if probe() {
            tracing::debug!(attempts, waited_ms = millis(waited), "provider ready");
            return Ok(attempts);
        }

        if let Some(timeout) = policy.timeout
            && waited >= timeout
        {
            let waited_ms = millis(waited);
            tracing::warn!(attempts, waited_ms, "provider did not become ready");
            return Err(SignInError::ProviderUnavailable { waited_ms }.into());
        }

        sleep(policy.interval).await;
        waited += policy.interval;
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
