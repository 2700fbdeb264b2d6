use std::env;
use std::time::Duration;

use crate::domain::Roster;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Root URL of the remote job store
    /// Format: http://HOST:PORT (the `/jobs` path is appended)
    pub store_url: String,

    /// Full URL of the email dispatch endpoint
    /// Default: `{store_url}/api/email`
    pub email_url: String,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    pub port: u16,

    /// Maximum payload size for all requests (in bytes)
    /// Default: 1MB (1024 * 1024)
    pub max_payload_size: usize,

    /// Timeout applied to every outgoing request
    pub request_timeout: Duration,

    /// Directory for rolling log files
    pub log_dir: String,

    /// Team members jobs can be assigned to
    pub roster: Roster,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required environment variables:
    /// - JOB_STORE_URL: root URL of the remote job store
    ///
    /// Optional environment variables:
    /// - EMAIL_API_URL: email endpoint (default: JOB_STORE_URL + /api/email)
    /// - BIND_ADDR: listen address (default: 127.0.0.1)
    /// - PORT: listen port (default: 8080)
    /// - MAX_PAYLOAD_SIZE: maximum request payload size in bytes (default: 1048576 = 1MB)
    /// - REQUEST_TIMEOUT_SECS: outgoing request timeout (default: 10)
    /// - LOG_DIR: log directory (default: logs)
    /// - TEAM_MEMBERS: roster as `value:Label,...` (default: built-in team)
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_url = lookup("JOB_STORE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| "JOB_STORE_URL must be set in .env file or environment".to_string())?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let email_url = lookup("EMAIL_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| format!("{}/api/email", store_url));

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| format!("PORT '{}' is not a valid port", raw))?,
            None => 8080,
        };

        // Parse MAX_PAYLOAD_SIZE with default fallback
        let max_payload_size = lookup("MAX_PAYLOAD_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1024 * 1024); // Default: 1MB

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        let roster = match lookup("TEAM_MEMBERS") {
            Some(spec) => Roster::parse(&spec)?,
            None => Roster::default(),
        };

        Ok(Config {
            store_url,
            email_url,
            bind_addr,
            port,
            max_payload_size,
            request_timeout,
            log_dir,
            roster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn store_url_is_required() {
        assert!(load(&[]).is_err());
        assert!(load(&[("JOB_STORE_URL", "  ")]).is_err());
    }

    #[test]
    fn defaults_fill_everything_else() {
        let config = load(&[("JOB_STORE_URL", "http://localhost:3001/")]).unwrap();

        assert_eq!(config.store_url, "http://localhost:3001");
        assert_eq!(config.email_url, "http://localhost:3001/api/email");
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_payload_size, 1024 * 1024);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.log_dir, "logs");
        assert_eq!(config.roster, Roster::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("JOB_STORE_URL", "http://store:3001"),
            ("EMAIL_API_URL", "http://mail:9000/send"),
            ("PORT", "9090"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("TEAM_MEMBERS", "ana:Ana"),
        ])
        .unwrap();

        assert_eq!(config.email_url, "http://mail:9000/send");
        assert_eq!(config.port, 9090);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.roster.members().len(), 1);
    }

    #[test]
    fn bad_port_and_roster_are_errors() {
        assert!(load(&[("JOB_STORE_URL", "http://s"), ("PORT", "eighty")]).is_err());
        assert!(load(&[("JOB_STORE_URL", "http://s"), ("TEAM_MEMBERS", "broken")]).is_err());
    }
}
