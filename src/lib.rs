// src/lib.rs
pub mod config;
pub mod health;

pub use health::{check_health, check_health_with, parse_healthy, parse_status};
