//! API server configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use libris_shared_config::{CommonConfig, Environment};

/// Minimum required length for JWT_SECRET to be considered secure
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 4000)
    pub port: u16,

    /// JWT secret for signing and verifying tokens
    pub jwt_secret: String,

    /// JWT token expiry (default: 7d)
    pub jwt_expiry: String,

    /// Initial password credential seeded into newly created accounts
    pub bootstrap_password: String,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode, this function requires:
    /// - `JWT_SECRET`: Must be set and at least 32 characters long
    /// - `BOOTSTRAP_PASSWORD`: Must be explicitly set (no insecure defaults)
    /// - `DATABASE_URL`: Must be explicitly set (no insecure defaults)
    ///
    /// In development mode, sensible defaults are used for convenience.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        )
        .unwrap_or_default();
        let is_production = environment.is_production();

        let jwt_secret = Self::load_jwt_secret(is_production)?;
        let bootstrap_password = Self::load_bootstrap_password(is_production)?;

        if is_production {
            Self::validate_database_url()?;
        }

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT value")?,

            jwt_secret,

            jwt_expiry: env::var("JWT_EXPIRY").unwrap_or_else(|_| "7d".to_string()),

            bootstrap_password,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Load and validate JWT_SECRET
    ///
    /// In production:
    /// - JWT_SECRET must be explicitly set
    /// - Must be at least MIN_JWT_SECRET_LENGTH characters
    ///
    /// In development: uses a default value with a warning
    fn load_jwt_secret(is_production: bool) -> Result<String> {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                if is_production && secret.len() < MIN_JWT_SECRET_LENGTH {
                    bail!(
                        "JWT_SECRET must be at least {} characters in production (got {})",
                        MIN_JWT_SECRET_LENGTH,
                        secret.len()
                    );
                }
                Ok(secret)
            }
            _ if is_production => {
                bail!(
                    "JWT_SECRET environment variable is required in production. \
                     Please set a secure secret of at least {} characters.",
                    MIN_JWT_SECRET_LENGTH
                );
            }
            _ => {
                tracing::warn!(
                    "JWT_SECRET not set, using insecure default. \
                     This is only acceptable in development mode."
                );
                Ok("development-secret-change-in-production".to_string())
            }
        }
    }

    /// Load and validate BOOTSTRAP_PASSWORD
    ///
    /// In production: BOOTSTRAP_PASSWORD must be explicitly set
    /// In development: uses a default value
    fn load_bootstrap_password(is_production: bool) -> Result<String> {
        match env::var("BOOTSTRAP_PASSWORD") {
            Ok(password) if !password.is_empty() => Ok(password),
            _ if is_production => {
                bail!(
                    "BOOTSTRAP_PASSWORD environment variable is required in production. \
                     Please set the initial account password."
                );
            }
            _ => {
                tracing::warn!(
                    "BOOTSTRAP_PASSWORD not set, using insecure default. \
                     This is only acceptable in development mode."
                );
                Ok("secret".to_string())
            }
        }
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> Result<()> {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => Ok(()),
            _ => {
                bail!(
                    "DATABASE_URL environment variable is required in production. \
                     Please set your PostgreSQL connection string."
                );
            }
        }
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests that modify environment variables don't run in parallel
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to temporarily set environment variables for a test
    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[(&str, &str)]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|(k, v)| {
                    let old = env::var(*k).ok();
                    env::set_var(*k, *v);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }

        fn remove_vars(vars: &[&str]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|k| {
                    let old = env::var(*k).ok();
                    env::remove_var(*k);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in &self.vars {
                match v {
                    Some(val) => env::set_var(k, val),
                    None => env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn test_jwt_secret_required_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["JWT_SECRET"]);

        let result = Config::load_jwt_secret(true);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("JWT_SECRET"));
        assert!(err.contains("required in production"));
    }

    #[test]
    fn test_jwt_secret_minimum_length_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(&[("JWT_SECRET", "short")]);

        let result = Config::load_jwt_secret(true);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("at least 32 characters"));
    }

    #[test]
    fn test_jwt_secret_valid_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let secret = "a".repeat(MIN_JWT_SECRET_LENGTH);
        let _guard = EnvGuard::new(&[("JWT_SECRET", &secret)]);

        let result = Config::load_jwt_secret(true);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), secret);
    }

    #[test]
    fn test_jwt_secret_uses_default_in_development() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["JWT_SECRET"]);

        let result = Config::load_jwt_secret(false);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "development-secret-change-in-production");
    }

    #[test]
    fn test_bootstrap_password_required_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["BOOTSTRAP_PASSWORD"]);

        let result = Config::load_bootstrap_password(true);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("BOOTSTRAP_PASSWORD"));
        assert!(err.contains("required in production"));
    }

    #[test]
    fn test_bootstrap_password_uses_default_in_development() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["BOOTSTRAP_PASSWORD"]);

        let result = Config::load_bootstrap_password(false);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "secret");
    }

    #[test]
    fn test_database_url_required_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["DATABASE_URL"]);

        let result = Config::validate_database_url();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn test_empty_jwt_secret_fails_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(&[("JWT_SECRET", "")]);

        let result = Config::load_jwt_secret(true);
        assert!(result.is_err());
    }
}
