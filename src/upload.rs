//! Upload throughput test.
//!
//! Mirrors the download test's warm-up/main-phase structure, with a
//! synthetic form-encoded body POSTed to the server's submission URL. The
//! latency correction applies to the warm-up formula only; the main-phase
//! denominator is the raw wall time. That asymmetry is part of the
//! measurement contract and is pinned by the tests below.

use crate::calibrate;
use crate::error::Result;
use crate::params;
use crate::server::Server;
use crate::timing;
use crate::transport::Transport;

/// Measure upload throughput and store the result in `server.upload_mbps`.
///
/// Requires `server.latency` to be measured first. With `reduced_load` the
/// main phase is forced to a single minimal-tier request regardless of the
/// warm-up speed, for callers wanting a cheap one-shot sample. Any failing
/// request aborts the test and nothing is written.
pub async fn measure<T: Transport>(
    server: &mut Server,
    transport: &T,
    reduced_load: bool,
) -> Result<()> {
    let body = form_body(params::UPLOAD_WARMUP_TIER);
    let elapsed = timing::timed_fanout(
        (0..params::WARMUP_REQUESTS).map(|_| transport.post_form(&server.url, body.clone())),
    )
    .await?;
    let warmup_mbps = tier_megabytes(params::UPLOAD_WARMUP_TIER) * 8.0
        * params::WARMUP_REQUESTS as f64
        / timing::corrected_secs(elapsed, server.latency);

    let plan = if reduced_load {
        Some(calibrate::reduced_upload_plan())
    } else {
        calibrate::upload_plan(warmup_mbps)
    };

    let mut speed = warmup_mbps;
    if let Some(plan) = plan {
        let body = form_body(plan.tier);
        let elapsed = timing::timed_fanout(
            (0..plan.requests).map(|_| transport.post_form(&server.url, body.clone())),
        )
        .await?;
        // Raw wall time here: the latency correction is warm-up only.
        speed = tier_megabytes(plan.tier) * 8.0 * plan.requests as f64
            / timing::positive_secs(elapsed);
    }

    server.upload_mbps = speed;
    Ok(())
}

fn tier_megabytes(tier: usize) -> f64 {
    params::UL_SIZES[tier] as f64 / 1000.0
}

/// Form-encoded body for one upload request: a `content` field holding the
/// decimal-digit pattern repeated `sizeKB * 100 - 51` times.
fn form_body(tier: usize) -> String {
    let size_kb = params::UL_SIZES[tier] as usize;
    let payload = "0123456789".repeat(size_kb * 100 - 51);
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("content", &payload)
        .finish()
}
