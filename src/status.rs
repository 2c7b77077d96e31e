// src/status.rs
//! One-shot availability check against the service's status endpoint.

use std::time::Duration;

use serde::Deserialize;

use crate::config::consts::STATUS_TIMEOUT_SECS;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceStatus {
    Available,
    Degraded,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: bool,
}

/// `{"status": false}` means degraded. Anything we can't fetch or read is
/// treated as available so a flaky status page never blocks a capture.
pub async fn check(url: &str) -> ServiceStatus {
    match fetch(url).await {
        Ok(body) => interpret(&body),
        Err(e) => {
            logd!("Status: check failed, assuming available: {}", e);
            ServiceStatus::Available
        }
    }
}

async fn fetch(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(STATUS_TIMEOUT_SECS))
        .build()?;
    let resp = client.get(url).send().await?.error_for_status()?;
    Ok(resp.text().await?)
}

/// Decode a status payload; undecodable bodies count as available.
pub fn interpret(body: &str) -> ServiceStatus {
    match serde_json::from_str::<StatusBody>(body) {
        Ok(StatusBody { status: false }) => ServiceStatus::Degraded,
        Ok(_) => ServiceStatus::Available,
        Err(e) => {
            logd!("Status: unreadable body: {}", e);
            ServiceStatus::Available
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_false_is_degraded() {
        assert_eq!(interpret(r#"{"status": false}"#), ServiceStatus::Degraded);
        assert_eq!(interpret(r#"{"status": true, "msg": "ok"}"#), ServiceStatus::Available);
        assert_eq!(interpret("<html>502</html>"), ServiceStatus::Available);
        assert_eq!(interpret(r#"{"other": 1}"#), ServiceStatus::Available);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_available() {
        assert_eq!(check("http://127.0.0.1:9/status").await, ServiceStatus::Available);
    }
}
