//! Download throughput test.
//!
//! Two sequential phases: a fixed two-request warm-up that estimates the
//! achievable bandwidth, then a main burst sized by
//! [`calibrate::download_plan`]. On a slow link the main burst is skipped
//! and the warm-up estimate is reported.

use crate::calibrate;
use crate::error::Result;
use crate::params;
use crate::server::Server;
use crate::timing;
use crate::transport::Transport;

/// Measure download throughput and store the result in
/// `server.download_mbps`.
///
/// Requires `server.latency` to be measured first; the measured latency is
/// subtracted from each phase's wall time as the per-request round-trip
/// floor. Any failing request aborts the test and nothing is written.
pub async fn measure<T: Transport>(server: &mut Server, transport: &T) -> Result<()> {
    let tile = tile_url(server.base_url(), params::DOWNLOAD_WARMUP_TIER);
    let elapsed =
        timing::timed_fanout((0..params::WARMUP_REQUESTS).map(|_| transport.get(&tile))).await?;
    let warmup_mbps = tile_megabytes(params::DOWNLOAD_WARMUP_TIER) * 8.0
        * params::WARMUP_REQUESTS as f64
        / timing::corrected_secs(elapsed, server.latency);

    let mut speed = warmup_mbps;
    if let Some(plan) = calibrate::download_plan(warmup_mbps) {
        let tile = tile_url(server.base_url(), plan.tier);
        let elapsed =
            timing::timed_fanout((0..plan.requests).map(|_| transport.get(&tile))).await?;
        speed = tile_megabytes(plan.tier) * 8.0 * plan.requests as f64
            / timing::corrected_secs(elapsed, server.latency);
    }

    server.download_mbps = speed;
    Ok(())
}

fn tile_url(base: &str, tier: usize) -> String {
    let size = params::DL_SIZES[tier];
    format!("{base}/random{size}x{size}.jpg")
}

/// Approximate payload of one tile in megabytes; two bytes per pixel stands
/// in for the JPEG encoding.
fn tile_megabytes(tier: usize) -> f64 {
    let size = params::DL_SIZES[tier] as f64;
    size * size * 2.0 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpeedtestError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    /// Deterministic transport: the first two calls (the warm-up) take
    /// `warmup_ms`, every later call takes `main_ms`.
    struct TimedTransport {
        warmup_ms: u64,
        main_ms: u64,
        fail_at: Option<usize>,
        calls: AtomicUsize,
    }

    impl TimedTransport {
        fn new(warmup_ms: u64, main_ms: u64) -> Self {
            TimedTransport {
                warmup_ms,
                main_ms,
                fail_at: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Transport for TimedTransport {
        async fn get(&self, url: &str) -> Result<()> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(call) {
                return Err(SpeedtestError::BadStatus {
                    url: url.into(),
                    status: reqwest::StatusCode::NOT_FOUND,
                });
            }
            let delay = if call < params::WARMUP_REQUESTS {
                self.warmup_ms
            } else {
                self.main_ms
            };
            sleep(Duration::from_millis(delay)).await;
            Ok(())
        }

        async fn post_form(&self, _url: &str, _body: String) -> Result<()> {
            unreachable!("download tests never POST")
        }
    }

    fn test_server(latency_ms: u64) -> Server {
        Server {
            url: "http://fake.example/speedtest/upload.php".into(),
            latency: Duration::from_millis(latency_ms),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn regression_oracle_for_the_calibrated_burst() {
        // 100 ms warm-up with 10 ms latency gives 1.125 * 8 * 2 / 0.09
        // = 200 Mbit/s, selecting the 32-request tier-6 burst; 500 ms per
        // main request then gives 12.5 * 8 * 32 / 0.49 = 6530.6 Mbit/s.
        let transport = TimedTransport::new(100, 500);
        let mut server = test_server(10);

        measure(&mut server, &transport).await.unwrap();

        assert!(
            (6300.0..=6600.0).contains(&server.download_mbps),
            "got {}",
            server.download_mbps
        );
        assert_eq!(
            transport.calls.load(Ordering::SeqCst),
            params::WARMUP_REQUESTS + 32
        );
    }

    #[tokio::test(start_paused = true)]
    async fn identical_timings_give_identical_speeds() {
        let mut first = test_server(10);
        measure(&mut first, &TimedTransport::new(100, 500)).await.unwrap();

        let mut second = test_server(10);
        measure(&mut second, &TimedTransport::new(100, 500)).await.unwrap();

        assert_eq!(first.download_mbps.to_bits(), second.download_mbps.to_bits());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_warmup_skips_the_main_burst() {
        // 9 s warm-up with zero latency: 18 / 9 = 2 Mbit/s, below the floor.
        let transport = TimedTransport::new(9_000, 500);
        let mut server = test_server(0);

        measure(&mut server, &transport).await.unwrap();

        assert!((server.download_mbps - 2.0).abs() < 1e-9);
        assert_eq!(
            transport.calls.load(Ordering::SeqCst),
            params::WARMUP_REQUESTS
        );
    }

    #[tokio::test(start_paused = true)]
    async fn one_failing_request_fails_the_phase() {
        let mut transport = TimedTransport::new(100, 500);
        transport.fail_at = Some(params::WARMUP_REQUESTS + 5);
        let mut server = test_server(10);

        let result = measure(&mut server, &transport).await;

        assert!(matches!(result, Err(SpeedtestError::BadStatus { .. })));
        assert_eq!(server.download_mbps, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_warmup_fails_the_whole_test() {
        let mut transport = TimedTransport::new(100, 500);
        transport.fail_at = Some(0);
        let mut server = test_server(10);

        assert!(measure(&mut server, &transport).await.is_err());
        assert_eq!(server.download_mbps, 0.0);
    }

    #[test]
    fn tile_urls_follow_the_wire_shape() {
        assert_eq!(
            tile_url("http://fake.example/speedtest", 2),
            "http://fake.example/speedtest/random750x750.jpg"
        );
        assert_eq!(
            tile_url("http://fake.example/speedtest", 6),
            "http://fake.example/speedtest/random2500x2500.jpg"
        );
    }

    #[test]
    fn warmup_tile_is_1_125_megabytes() {
        assert!((tile_megabytes(params::DOWNLOAD_WARMUP_TIER) - 1.125).abs() < 1e-12);
    }
}
