//! An HTTP speed test client library and CLI.
//!
//! Estimates latency, download and upload throughput against
//! speedtest.net-style measurement hosts by issuing calibrated bursts of
//! concurrent HTTP requests and timing them. Each throughput test runs a
//! small warm-up burst, sizes the main burst from the warm-up estimate, and
//! reports a single Mbit/s figure per direction.
//!
//! # Quick start
//!
//! ```no_run
//! use speedtest_client::transport::HttpTransport;
//! use speedtest_client::{download, latency, locate, transport, upload};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let http = HttpTransport::new()?;
//! let servers = locate::fetch_servers(&transport::user_agent()).await?;
//!
//! if let Some(mut server) = servers.into_iter().next() {
//!     latency::measure(&mut server, &http).await?;
//!     download::measure(&mut server, &http).await?;
//!     upload::measure(&mut server, &http, false).await?;
//!     println!(
//!         "{:.2} Mbit/s down, {:.2} Mbit/s up",
//!         server.download_mbps, server.upload_mbps
//!     );
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod calibrate;
pub mod download;
pub mod emitter;
pub mod error;
pub mod latency;
pub mod locate;
pub mod params;
pub mod server;
pub mod summary;
pub mod transport;
pub mod upload;

mod timing;
