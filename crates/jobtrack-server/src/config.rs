//! Server configuration from environment variables.

use std::env;

/// Default port, matching the original deployment.
const DEFAULT_PORT: u16 = 5000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Origin allowed to open the real-time notification channel.
    pub frontend_origin: String,
    /// Secret used to sign JWTs.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub jwt_expiry_hours: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: Secret used to sign tokens
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 5000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `FRONTEND_ORIGIN`: Origin allowed on the notification channel
    ///   (default: "http://localhost:5173")
    /// - `JWT_EXPIRY_HOURS`: Token lifetime (default: 24)
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let frontend_origin = env::var("FRONTEND_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        Ok(Self {
            port,
            log_level,
            frontend_origin,
            jwt_secret,
            jwt_expiry_hours,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // Single test owns these variables so parallel tests cannot race.
        // SAFETY: no other test in this binary touches these variables.
        unsafe { env::remove_var("PORT") };
        unsafe { env::remove_var("LOG_LEVEL") };
        unsafe { env::remove_var("FRONTEND_ORIGIN") };
        unsafe { env::remove_var("JWT_EXPIRY_HOURS") };
        unsafe { env::set_var("JWT_SECRET", "test-secret") };

        let config = ServerConfig::from_env().unwrap();

        // Missing PORT falls back to 5000.
        assert_eq!(config.port, 5000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.frontend_origin, "http://localhost:5173");
        assert_eq!(config.jwt_expiry_hours, 24);

        // SAFETY: see above.
        unsafe { env::set_var("PORT", "8080") };
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);

        // SAFETY: see above.
        unsafe { env::remove_var("PORT") };
        unsafe { env::remove_var("JWT_SECRET") };
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 5000,
            log_level: "info".to_string(),
            frontend_origin: "http://localhost:5173".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiry_hours: 24,
        };
        assert_eq!(config.socket_addr().port(), 5000);
    }
}
