//! Candidate server discovery.
//!
//! speedtest.net's server-list API ranks measurement hosts by proximity to
//! the caller and reports the distance for each, so no separate caller
//! geolocation step is needed before picking a target.

use crate::error::{Result, SpeedtestError};
use crate::server::Server;

/// Server-list endpoint, ranked nearest-first relative to the caller.
pub const SERVERS_URL: &str = "https://www.speedtest.net/api/js/servers?engine=js";

/// Fetch the candidate server list, sorted nearest-first.
pub async fn fetch_servers(user_agent: &str) -> Result<Vec<Server>> {
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;
    let response = client.get(SERVERS_URL).send().await?.error_for_status()?;

    let mut servers: Vec<Server> = response.json().await?;
    if servers.is_empty() {
        return Err(SpeedtestError::NoServers);
    }
    servers.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(servers)
}

/// Select servers by id, keeping list order. When none of the ids match,
/// fall back to the nearest server so a test can still run.
pub fn find_servers(mut all: Vec<Server>, ids: &[String]) -> Result<Vec<Server>> {
    if all.is_empty() {
        return Err(SpeedtestError::NoServers);
    }

    let picked: Vec<Server> = all
        .iter()
        .filter(|server| ids.contains(&server.id))
        .cloned()
        .collect();
    if picked.is_empty() {
        all.truncate(1);
        return Ok(all);
    }
    Ok(picked)
}
