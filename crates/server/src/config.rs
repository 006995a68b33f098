//! Runtime settings for the web server.

use std::path::PathBuf;
use std::time::Duration;

use crate::sessions::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};

/// Where to listen and where to find the startup artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `host:port` the HTTP listener binds to
    pub bind_address: String,
    /// Product catalog CSV
    pub catalog_path: PathBuf,
    /// Directory holding the classifier artifacts
    pub models_dir: PathBuf,
    /// Products listed per recommendation
    pub recommendation_limit: usize,
    /// Name of the cookie carrying the session id
    pub session_cookie: String,
    /// Idle time after which a session is forgotten
    pub session_ttl: Duration,
    /// Most sessions kept in memory at once
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            catalog_path: PathBuf::from("data/skincare_products.csv"),
            models_dir: PathBuf::from("models"),
            recommendation_limit: pipeline::DEFAULT_LIMIT,
            session_cookie: "lumi_session".to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:5000");
        assert_eq!(config.recommendation_limit, 3);
        assert_eq!(config.session_cookie, "lumi_session");
        assert!(config.models_dir.ends_with("models"));
        assert_eq!(config.session_ttl, Duration::from_secs(30 * 60));
        assert_eq!(config.max_sessions, 10_000);
    }
}
