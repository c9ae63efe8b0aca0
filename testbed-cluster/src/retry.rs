//! Bounded retry with fixed delay.

use std::future::Future;
use std::time::Duration;

/// Run `op` up to `attempts` times, sleeping `delay` between attempts, and
/// stop on the first success.
///
/// The last attempt's error is returned unchanged, with no sleep after it.
/// `attempts == 0` is clamped to one: the action always runs at least once.
pub async fn retry<F, Fut, T, E>(attempts: usize, delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                tracing::debug!(
                    "attempt {}/{} failed: {}; retrying in {:?}",
                    attempt,
                    attempts,
                    err,
                    delay
                );
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
