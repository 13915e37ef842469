//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `EXAMCTL_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `EXAMCTL_` override YAML values
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use examctl::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse CLI arguments
//! let args = Args::parse();
//!
//! // Load configuration from file and environment
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! EXAMCTL_PORT=8080
//!
//! # Set the session signing key (required)
//! EXAMCTL_SECRET_KEY="change-me"
//!
//! # Widen the bulk enrollment pipeline
//! EXAMCTL_BULK_ENROLL_CONCURRENCY=16
//! ```

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "EXAMCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Secret key for session token signing (required)
    pub secret_key: Option<String>,
    /// How long issued session tokens stay valid, in days
    pub session_expiry_days: i64,
    /// Email address for the initial admin user (created on first startup)
    pub admin_email: String,
    /// Display name for the initial admin user
    pub admin_name: String,
    /// Origins allowed by CORS. An empty list allows any origin.
    pub cors_origins: Vec<String>,
    /// How many registrations a bulk enrollment processes at once
    pub bulk_enroll_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            secret_key: None,
            session_expiry_days: 30,
            admin_email: "admin@examctl.local".to_string(),
            admin_name: "Administrator".to_string(),
            cors_origins: vec![],
            bulk_enroll_concurrency: 8,
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.secret_key.is_none() {
            return Err(Error::Internal {
                operation: "Config validation: secret_key is not configured. \
                     Please set EXAMCTL_SECRET_KEY environment variable or add secret_key to config file."
                    .to_string(),
            });
        }

        if self.session_expiry_days < 1 || self.session_expiry_days > 365 {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: session_expiry_days ({}) must be between 1 and 365",
                    self.session_expiry_days
                ),
            });
        }

        if self.bulk_enroll_concurrency < 1 {
            return Err(Error::Internal {
                operation: "Config validation: bulk_enroll_concurrency must be at least 1".to_string(),
            });
        }

        if self.admin_email.trim().is_empty() || !self.admin_email.contains('@') {
            return Err(Error::Internal {
                operation: format!("Config validation: admin_email ({}) is not a valid email address", self.admin_email),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("EXAMCTL_").split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_with_secret() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
secret_key: hello
"#,
            )?;

            let args = Args {
                config: "test.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;

            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8080);
            assert_eq!(config.session_expiry_days, 30);
            assert_eq!(config.admin_email, "admin@examctl.local");
            assert_eq!(config.bulk_enroll_concurrency, 8);
            assert!(config.cors_origins.is_empty());

            Ok(())
        });
    }

    #[test]
    fn test_yaml_values() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
secret_key: hello
port: 9090
admin_email: registrar@example.com
admin_name: Registrar
cors_origins:
  - https://exams.example.com
bulk_enroll_concurrency: 4
"#,
            )?;

            let args = Args {
                config: "test.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;

            assert_eq!(config.port, 9090);
            assert_eq!(config.admin_email, "registrar@example.com");
            assert_eq!(config.admin_name, "Registrar");
            assert_eq!(config.cors_origins, vec!["https://exams.example.com".to_string()]);
            assert_eq!(config.bulk_enroll_concurrency, 4);

            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
secret_key: hello
port: 9090
"#,
            )?;

            jail.set_env("EXAMCTL_HOST", "127.0.0.1");
            jail.set_env("EXAMCTL_PORT", "8081");
            jail.set_env("EXAMCTL_BULK_ENROLL_CONCURRENCY", "2");

            let args = Args {
                config: "test.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;

            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 8081);
            assert_eq!(config.bulk_enroll_concurrency, 2);

            Ok(())
        });
    }

    #[test]
    fn test_validate_requires_secret_key() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 9090
"#,
            )?;

            let args = Args {
                config: "test.yaml".to_string(),
                validate: false,
            };

            assert!(Config::load(&args).is_err());

            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for yaml in [
            "secret_key: hello\nbulk_enroll_concurrency: 0\n",
            "secret_key: hello\nsession_expiry_days: 0\n",
            "secret_key: hello\nsession_expiry_days: 9999\n",
            "secret_key: hello\nadmin_email: not-an-email\n",
        ] {
            Jail::expect_with(|jail| {
                jail.create_file("test.yaml", yaml)?;

                let args = Args {
                    config: "test.yaml".to_string(),
                    validate: false,
                };

                assert!(Config::load(&args).is_err());

                Ok(())
            });
        }
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:4000");
    }
}
