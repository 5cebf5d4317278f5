//! Shared timing utilities for measurement phases.

use std::future::Future;
use std::time::Duration;

use futures_util::future::try_join_all;
use tokio::time::Instant;

use crate::error::Result;

/// Dispatch a batch of requests concurrently and wait for all of them,
/// returning the wall-clock span enclosing the whole batch.
///
/// The clock is read strictly before the first request is dispatched and
/// strictly after the last one finishes. The first error aborts the batch;
/// still-pending sibling futures are dropped.
pub(crate) async fn timed_fanout<I, F>(requests: I) -> Result<Duration>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<()>>,
{
    let start = Instant::now();
    try_join_all(requests).await?;
    Ok(start.elapsed())
}

/// Elapsed seconds with the per-request round-trip floor subtracted.
pub(crate) fn corrected_secs(elapsed: Duration, latency: Duration) -> f64 {
    positive_secs(elapsed.saturating_sub(latency))
}

/// Elapsed seconds, kept strictly positive so speed denominators never
/// divide by zero even on a degenerate clock reading.
pub(crate) fn positive_secs(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64().max(f64::EPSILON)
}
