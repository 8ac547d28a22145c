//! Application configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Login gate configuration.
    pub auth: AuthConfig,
    /// Notification submission configuration.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The single shared credential pair accepted by the login gate.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Accepted username.
    pub username: String,
    /// Accepted password.
    pub password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Notification submission configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Simulated gateway latency in milliseconds.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    /// Drop platform-scoped fields that the selected platform hides
    /// before dispatching.
    #[serde(default)]
    pub clear_hidden_fields: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            clear_hidden_fields: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_submit_delay_ms() -> u64 {
    2000
}

impl AuthConfig {
    /// Reject a credential pair that an empty login form would match.
    pub fn check(&self) -> Result<(), config::ConfigError> {
        if self.username.is_empty() {
            return Err(config::ConfigError::Message(
                "auth.username must not be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(config::ConfigError::Message(
                "auth.password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `PUSHBOARD_ENV`)
    /// 4. Environment variables with `PUSHBOARD__` prefix
    ///
    /// Blank login credentials are rejected.
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!(error = %e, "Failed to read .env file");
        }

        let env = std::env::var("PUSHBOARD_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PUSHBOARD")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_source(builder.build()?)
    }

    /// Deserialize and check an already-built configuration source.
    pub fn from_source(source: config::Config) -> Result<Self, config::ConfigError> {
        let config: Self = source.try_deserialize()?;
        config.auth.check()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(username: &str, password: &str) -> config::Config {
        config::Config::builder()
            .set_override("auth.username", username)
            .unwrap()
            .set_override("auth.password", password)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = Config::from_source(source("admin", "secret")).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.notifications.submit_delay_ms, 2000);
        assert!(!config.notifications.clear_hidden_fields);
        assert_eq!(config.auth.username, "admin");
    }

    #[test]
    fn test_blank_credentials_are_rejected() {
        for (username, password) in [("", ""), ("admin", ""), ("", "secret")] {
            let err = Config::from_source(source(username, password)).unwrap_err();
            assert!(err.to_string().contains("must not be empty"), "{err}");
        }
    }

    #[test]
    fn test_auth_debug_hides_password() {
        let auth = AuthConfig {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };

        let printed = format!("{auth:?}");
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
