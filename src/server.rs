//! The measurement target and its accumulated results.

use std::time::Duration;

use serde::Deserialize;

/// A speed test measurement host together with the results accumulated
/// against it during one session.
///
/// The metadata fields come from the server list; the measurement fields
/// start at zero and are each written once, by
/// [`latency::measure`](crate::latency::measure),
/// [`download::measure`](crate::download::measure) and
/// [`upload::measure`](crate::upload::measure) respectively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Server {
    /// Upload submission URL, e.g. `http://host:8080/speedtest/upload.php`.
    /// Latency and download endpoints hang off [`Server::base_url`].
    pub url: String,
    /// Declared latitude of the server.
    pub lat: String,
    /// Declared longitude of the server.
    pub lon: String,
    /// Server display name, usually the city.
    pub name: String,
    /// Country the server is located in.
    pub country: String,
    /// Operator sponsoring the server.
    pub sponsor: String,
    /// Server identifier, unique within the list.
    pub id: String,
    /// Hostname and port, when the list provides one.
    #[serde(default)]
    pub host: String,
    /// Distance from the caller in kilometers, as ranked by the list API.
    #[serde(default)]
    pub distance: f64,
    /// One-way latency estimate, written by the latency prober.
    #[serde(skip)]
    pub latency: Duration,
    /// Measured download speed in Mbit/s.
    #[serde(skip)]
    pub download_mbps: f64,
    /// Measured upload speed in Mbit/s.
    #[serde(skip)]
    pub upload_mbps: f64,
}

impl Server {
    /// Base URL for latency and download requests: the submission URL with
    /// its `/upload.php` suffix stripped.
    pub fn base_url(&self) -> &str {
        self.url.split("/upload.php").next().unwrap_or(&self.url)
    }

    /// Whether the measured download/upload pair looks like a real link
    /// rather than a measurement artifact.
    ///
    /// A result is implausible when one direction exceeds 100x the other.
    /// Two zero speeds pass the ratio rule and count as plausible.
    pub fn is_result_plausible(&self) -> bool {
        !(self.download_mbps > self.upload_mbps * 100.0
            || self.upload_mbps > self.download_mbps * 100.0)
    }
}
