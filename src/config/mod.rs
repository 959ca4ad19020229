mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Loads configuration from the optional YAML file named by CONFIG_PATH,
/// then applies environment overrides. Fails if no API key is available,
/// so the process never serves a request without a credential.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(contents) => {
            debug!("Loading configuration from: {}", config_path);
            serde_yaml::from_str(&contents)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => return Err(e.into()),
    };

    if let Ok(key) = env::var("OPENAI_API_KEY") {
        config.openai.api_key = key;
    }
    if let Ok(port) = env::var("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.openai.api_key.is_empty() {
            return Err(Error::config("OPENAI_API_KEY not set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert!(config.openai.base_url.is_empty());
        assert!(config
            .cors
            .allowed_origins
            .contains(&"http://localhost:3000".to_string()));
    }

    #[test]
    fn parses_partial_yaml() {
        let yaml = r#"
server:
  port: 9000
openai:
  model: gpt-4o-mini
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.cors.allowed_origins.len(), 8);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn api_key_from_file_passes_validation() {
        let yaml = r#"
openai:
  api_key: sk-test
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
    }
}
