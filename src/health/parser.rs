// src/health/parser.rs
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Decoded body of a health endpoint. No fixed schema.
pub type HealthResponse = Map<String, Value>;

/// `status` values that count as healthy, compared lowercase.
const HEALTHY_STATUSES: [&str; 3] = ["pass", "ok", "up"];

/// Maps a decoded response to a healthy/unhealthy verdict.
///
/// Implementations must be pure and total: unrecognized shapes yield `false`.
pub trait Interpreter {
    fn verdict(&self, response: &HealthResponse) -> bool;
}

impl<F> Interpreter for F
where
    F: Fn(&HealthResponse) -> bool,
{
    fn verdict(&self, response: &HealthResponse) -> bool {
        self(response)
    }
}

/// Interprets `{"healthy": <bool or "true"/"false">}`.
pub fn parse_healthy(response: &HealthResponse) -> bool {
    match response.get("healthy") {
        Some(Value::Bool(healthy)) => *healthy,
        Some(Value::String(healthy)) => healthy.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Interprets `{"status": "pass" | "ok" | "up"}`, case-insensitively.
pub fn parse_status(response: &HealthResponse) -> bool {
    match response.get("status") {
        Some(Value::String(status)) => {
            let status = status.to_ascii_lowercase();
            HEALTHY_STATUSES.contains(&status.as_str())
        }
        _ => false,
    }
}

/// Built-in interpreter selected by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(try_from = "String")]
pub enum ParserKind {
    #[default]
    Healthy,
    Status,
}

impl Interpreter for ParserKind {
    fn verdict(&self, response: &HealthResponse) -> bool {
        match self {
            ParserKind::Healthy => parse_healthy(response),
            ParserKind::Status => parse_status(response),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserKind::Healthy => write!(f, "healthy"),
            ParserKind::Status => write!(f, "status"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown parser '{0}', expected 'healthy' or 'status'")]
pub struct UnknownParser(String);

impl FromStr for ParserKind {
    type Err = UnknownParser;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "healthy" => Ok(ParserKind::Healthy),
            "status" => Ok(ParserKind::Status),
            _ => Err(UnknownParser(s.to_string())),
        }
    }
}

impl TryFrom<String> for ParserKind {
    type Error = UnknownParser;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> HealthResponse {
        match value {
            Value::Object(map) => map,
            other => panic!("expected a JSON object, got {}", other),
        }
    }

    #[test]
    fn test_parse_healthy_invalid_format() {
        assert!(!parse_healthy(&response(json!({}))));
        assert!(!parse_healthy(&response(json!({"healthy": ""}))));
        assert!(!parse_healthy(&response(json!({"healthy": 1}))));
        assert!(!parse_healthy(&response(json!({"healthy": null}))));
        assert!(!parse_healthy(&response(json!({"healthy": {"ok": true}}))));
        assert!(!parse_healthy(&response(json!({"healthy": [true]}))));
        assert!(!parse_healthy(&response(json!({"status": "ok"}))));
    }

    #[test]
    fn test_parse_healthy_unhealthy() {
        assert!(!parse_healthy(&response(json!({"healthy": false}))));
        assert!(!parse_healthy(&response(json!({"healthy": "False"}))));
        assert!(!parse_healthy(&response(json!({"healthy": "false"}))));
        assert!(!parse_healthy(&response(json!({"healthy": "yes"}))));
    }

    #[test]
    fn test_parse_healthy_healthy() {
        assert!(parse_healthy(&response(json!({"healthy": true}))));
        assert!(parse_healthy(&response(json!({"healthy": "True"}))));
        assert!(parse_healthy(&response(json!({"healthy": "true"}))));
        assert!(parse_healthy(&response(json!({"healthy": "TRUE", "extra": 1}))));
    }

    #[test]
    fn test_parse_status_invalid_format() {
        assert!(!parse_status(&response(json!({}))));
        assert!(!parse_status(&response(json!({"status": ""}))));
        assert!(!parse_status(&response(json!({"status": true}))));
        assert!(!parse_status(&response(json!({"status": 200}))));
        assert!(!parse_status(&response(json!({"healthy": true}))));
    }

    #[test]
    fn test_parse_status_unhealthy() {
        assert!(!parse_status(&response(json!({"status": "warn"}))));
        assert!(!parse_status(&response(json!({"status": "fail"}))));
        assert!(!parse_status(&response(json!({"status": "not_ok"}))));
        assert!(!parse_status(&response(json!({"status": " ok"}))));
    }

    #[test]
    fn test_parse_status_healthy() {
        assert!(parse_status(&response(json!({"status": "pass"}))));
        assert!(parse_status(&response(json!({"status": "Pass"}))));
        assert!(parse_status(&response(json!({"status": "ok"}))));
        assert!(parse_status(&response(json!({"status": "OK"}))));
        assert!(parse_status(&response(json!({"status": "up"}))));
    }

    #[test]
    fn test_interpreters_are_idempotent() {
        let body = response(json!({"healthy": "True", "status": "Up"}));
        assert_eq!(parse_healthy(&body), parse_healthy(&body));
        assert_eq!(parse_status(&body), parse_status(&body));
    }

    #[test]
    fn test_parser_kind_dispatch() {
        let body = response(json!({"healthy": true}));
        assert!(ParserKind::Healthy.verdict(&body));
        assert!(!ParserKind::Status.verdict(&body));
        assert_eq!(ParserKind::default(), ParserKind::Healthy);
    }

    #[test]
    fn test_parser_kind_from_str() {
        assert_eq!("healthy".parse::<ParserKind>().unwrap(), ParserKind::Healthy);
        assert_eq!("Status".parse::<ParserKind>().unwrap(), ParserKind::Status);
        assert!("uptime".parse::<ParserKind>().is_err());
        assert_eq!(ParserKind::Status.to_string(), "status");
    }

    #[test]
    fn test_closure_interpreter() {
        let custom = |r: &HealthResponse| r.get("alive").and_then(Value::as_bool).unwrap_or(false);
        assert!(custom.verdict(&response(json!({"alive": true}))));
        assert!(!custom.verdict(&response(json!({"healthy": true}))));
    }
}
