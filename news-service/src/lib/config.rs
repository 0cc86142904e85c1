use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Administrator created at startup when present.
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// HS256, HS384 or HS512.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    pub expiration_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, ADMIN__EMAIL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Config {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_apply() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/news"

            [server]
            http_port = 8000

            [jwt]
            secret = "secret"
            expiration_minutes = 30
            "#,
        );

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_admin_section() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/news"
            max_connections = 10

            [server]
            http_port = 8000

            [jwt]
            secret = "secret"
            algorithm = "HS512"
            expiration_minutes = 30

            [admin]
            username = "admin"
            email = "admin@example.com"
            password = "change-me"
            "#,
        );

        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.algorithm, "HS512");
        assert_eq!(config.admin.unwrap().email, "admin@example.com");
    }
}
