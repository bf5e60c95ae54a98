// src/health/probe.rs
use super::parser::{parse_healthy, HealthResponse, Interpreter};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response body is not a JSON object: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Issues single health probes against a target.
///
/// Request options (currently the timeout) live on the underlying client, so a
/// `Prober` can be cloned and shared between tasks.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Probe `target` and return the interpreter's verdict, or the failure
    /// that prevented one.
    pub async fn try_check<P>(&self, target: &str, parser: &P) -> Result<bool, ProbeError>
    where
        P: Interpreter + ?Sized,
    {
        let response = self.client.get(target).send().await?;
        debug!("GET {} returned {}", target, response.status());

        let body = response.text().await?;
        let decoded: HealthResponse = serde_json::from_str(&body)?;

        Ok(parser.verdict(&decoded))
    }

    /// Probe `target`, failing closed: any transport or decode error is `false`.
    pub async fn check<P>(&self, target: &str, parser: &P) -> bool
    where
        P: Interpreter + ?Sized,
    {
        match self.try_check(target, parser).await {
            Ok(healthy) => healthy,
            Err(e @ ProbeError::Transport(_)) => {
                warn!("Probe of {} failed: {}", target, e);
                false
            }
            Err(e @ ProbeError::Decode(_)) => {
                warn!("Probe of {} returned an unreadable body: {}", target, e);
                false
            }
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

/// Probe `target` with the default client and the `healthy` field interpreter.
pub async fn check_health(target: &str) -> bool {
    check_health_with(target, &parse_healthy).await
}

/// Probe `target` with the default client and a caller-supplied interpreter.
pub async fn check_health_with<P>(target: &str, parser: &P) -> bool
where
    P: Interpreter + ?Sized,
{
    Prober::default().check(target, parser).await
}
