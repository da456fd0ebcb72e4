use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

use crate::domain::errors::CuraError;

// Spacing between successive checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// Stand-in for deadlines that would overflow `Instant` (about 30 years out).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

// Run `predicate` once per tick until it reports done, fails, or the deadline passes.
//
// The first call happens one tick after entry. When a tick and the deadline are
// ready together the deadline wins. A call already in flight is never aborted.
pub async fn wait_or_timeout<F, Fut>(
    mut predicate: F,
    timeout: Duration,
    tick: Duration,
) -> Result<(), CuraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, CuraError>>,
{
    let start = Instant::now();
    let deadline = start
        .checked_add(timeout)
        .unwrap_or_else(|| start + FAR_FUTURE);
    let cutoff = time::sleep_until(deadline);
    tokio::pin!(cutoff);

    // `interval_at` panics on a zero period; huge periods must not overflow `Instant`.
    let tick = tick.clamp(Duration::from_millis(1), FAR_FUTURE);
    let mut ticker = time::interval_at(start + tick, tick);
    // A slow exchange delays the next poll instead of bursting missed ticks.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut polls: u32 = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut cutoff => {
                tracing::debug!(polls, "poll deadline reached");
                return Err(CuraError::Timeout(timeout));
            }
            _ = ticker.tick() => {
                polls += 1;
                if predicate().await? {
                    tracing::debug!(polls, "poll predicate satisfied");
                    return Ok(());
                }
            }
        }
    }
}
