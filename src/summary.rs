//! Final result records for presentation and JSON output.

use serde::Serialize;

use crate::server::Server;

/// Measured results for one server, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct ServerReport {
    /// Server identifier.
    pub id: String,
    /// Server display name.
    pub name: String,
    /// Operator sponsoring the server.
    pub sponsor: String,
    /// Country the server is located in.
    pub country: String,
    /// Distance from the caller in kilometers.
    pub distance_km: f64,
    /// One-way latency estimate in milliseconds.
    pub latency_ms: f64,
    /// Measured download speed in Mbit/s.
    pub download_mbps: f64,
    /// Measured upload speed in Mbit/s.
    pub upload_mbps: f64,
}

impl From<&Server> for ServerReport {
    fn from(server: &Server) -> Self {
        ServerReport {
            id: server.id.clone(),
            name: server.name.clone(),
            sponsor: server.sponsor.clone(),
            country: server.country.clone(),
            distance_km: server.distance,
            latency_ms: server.latency.as_secs_f64() * 1000.0,
            download_mbps: server.download_mbps,
            upload_mbps: server.upload_mbps,
        }
    }
}

/// Results for a whole run, with averages across the measured servers.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Per-server results, in measurement order.
    pub servers: Vec<ServerReport>,
    /// Mean download speed across all measured servers, Mbit/s.
    pub download_avg_mbps: f64,
    /// Mean upload speed across all measured servers, Mbit/s.
    pub upload_avg_mbps: f64,
}

impl Summary {
    /// Build a summary from the servers measured during a run.
    pub fn from_servers(servers: &[Server]) -> Self {
        let count = servers.len().max(1) as f64;
        Summary {
            servers: servers.iter().map(ServerReport::from).collect(),
            download_avg_mbps: servers.iter().map(|s| s.download_mbps).sum::<f64>() / count,
            upload_avg_mbps: servers.iter().map(|s| s.upload_mbps).sum::<f64>() / count,
        }
    }
}
