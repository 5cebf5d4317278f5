//! Latency measurement against a server's `latency.txt` endpoint.
//!
//! Probes run sequentially, not concurrently: the metric is the best-case
//! single round trip, not throughput.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Result, SpeedtestError};
use crate::params;
use crate::server::Server;
use crate::transport::Transport;

/// Measure the target's latency and store the one-way estimate in
/// `server.latency`.
///
/// Issues [`params::LATENCY_PROBE_ATTEMPTS`] sequential GET probes and keeps
/// the minimum observed round trip, halved. The first failing probe aborts
/// the whole measurement and leaves the latency field untouched.
pub async fn measure<T: Transport>(server: &mut Server, transport: &T) -> Result<()> {
    let url = format!("{}/latency.txt", server.base_url());
    let best = probe(transport, &url, params::LATENCY_PROBE_ATTEMPTS).await?;
    // Halve the round trip for a one-way estimate.
    server.latency = best / 2;
    Ok(())
}

async fn probe<T: Transport>(transport: &T, url: &str, attempts: usize) -> Result<Duration> {
    let mut best: Option<Duration> = None;
    for _ in 0..attempts {
        let start = Instant::now();
        transport.get(url).await?;
        let rtt = start.elapsed();
        best = Some(best.map_or(rtt, |b| b.min(rtt)));
    }
    best.ok_or(SpeedtestError::InsufficientData)
}
