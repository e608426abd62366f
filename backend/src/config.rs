//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::dispatcher::LatencyProfile;
use std::env;

/// Yard shown by the gate log when none is configured
pub const DEFAULT_YARD_ID: &str = "nfi-long-beach-01";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Mock API configuration
    pub mock: MockConfig,
    /// Gate log configuration
    pub gate: GateConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Mock API configuration
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Whether dispatcher calls sleep for a simulated round-trip
    pub latency_enabled: bool,
    /// Multiplier applied to every latency window
    pub latency_scale: f64,
}

/// Gate log configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Yard the gate log records entries for
    pub yard_id: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            mock: MockConfig {
                latency_enabled: env::var("MOCK_LATENCY")
                    .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "off" | "0" | "false"))
                    .unwrap_or(true),
                latency_scale: env::var("MOCK_LATENCY_SCALE")
                    .ok()
                    .and_then(|s| s.parse::<f64>().ok())
                    .filter(|s| s.is_finite() && *s >= 0.0)
                    .unwrap_or(1.0),
            },
            gate: GateConfig {
                yard_id: env::var("GATE_YARD_ID").unwrap_or_else(|_| DEFAULT_YARD_ID.to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Latency profile the dispatcher should run with
    pub fn latency_profile(&self) -> LatencyProfile {
        if self.mock.latency_enabled {
            LatencyProfile::scaled(self.mock.latency_scale)
        } else {
            LatencyProfile::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "PORT",
            "HOST",
            "MOCK_LATENCY",
            "MOCK_LATENCY_SCALE",
            "GATE_YARD_ID",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(config.mock.latency_enabled);
        assert_eq!(config.mock.latency_scale, 1.0);
        assert_eq!(config.gate.yard_id, DEFAULT_YARD_ID);
        assert!(config.latency_profile().enabled);
    }

    #[test]
    #[serial]
    fn test_latency_off() {
        clear_env();
        env::set_var("MOCK_LATENCY", "off");
        let config = Config::from_env();
        assert!(!config.latency_profile().enabled);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_values_fall_back() {
        clear_env();
        env::set_var("PORT", "not-a-port");
        env::set_var("MOCK_LATENCY_SCALE", "-2");
        let config = Config::from_env();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mock.latency_scale, 1.0);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_huge_latency_scale_is_clamped() {
        clear_env();
        env::set_var("MOCK_LATENCY_SCALE", "1e20");
        let profile = Config::from_env().latency_profile();
        assert_eq!(profile.scale, crate::dispatcher::latency::MAX_LATENCY_SCALE);
        clear_env();
    }
}
