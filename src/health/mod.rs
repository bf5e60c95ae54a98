// src/health/mod.rs
mod parser;
mod probe;

pub use parser::{parse_healthy, parse_status, HealthResponse, Interpreter, ParserKind, UnknownParser};
pub use probe::{check_health, check_health_with, ProbeError, Prober};
