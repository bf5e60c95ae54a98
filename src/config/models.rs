// src/config/models.rs
use crate::health::ParserKind;
use anyhow::{bail, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub parser: ParserKind,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replace file settings with whatever the command line supplied.
    pub fn apply_overrides(
        mut self,
        target: Option<String>,
        parser: Option<ParserKind>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(target) = target {
            self.target = Some(target);
        }
        if let Some(parser) = parser {
            self.parser = parser;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if let Some(target) = &self.target {
            if target.trim().is_empty() {
                bail!("target must not be empty");
            }
        }
        Ok(())
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: None,
            parser: ParserKind::default(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
