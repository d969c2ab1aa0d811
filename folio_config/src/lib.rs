use std::path::Path;

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, layered on top of the defaults.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Load the config from the files listed in `FOLIO_CONFIG_PATH`.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATH_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    load_with_override(&paths, &[])
}

/// Load only the default config.
pub fn load_dev_config() -> anyhow::Result<Config> {
    load_with_override::<&Path>(&[], &[])
}

/// Load the default config, then the given files in order, then the inline
/// TOML `overrides`. Later sources take precedence.
pub fn load_with_override<P: AsRef<Path>>(
    paths: &[P],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    overrides
        .iter()
        .fold(builder, |builder, o| {
            builder.add_source(File::from_str(o, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    pub url: Url,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub success_title: String,
    pub failure_title: String,
    pub failure_message: String,
    pub response_notice: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_dev_config().unwrap();
        assert_eq!(config.backend.url.as_str(), "http://localhost:8001/");
        assert_eq!(
            config.contact.failure_message,
            "Failed to send message. Please try again or use email directly."
        );
    }

    #[test]
    fn default_config_file_matches_embedded() {
        let on_disk = std::fs::read_to_string(DEFAULT_CONFIG_PATH).unwrap();
        assert_eq!(on_disk, DEFAULT_CONFIG);
    }

    #[test]
    fn override_values() {
        let config = load_with_override::<&Path>(
            &[],
            &[
                "backend.url = \"https://portfolio.example/backend\"",
                "contact.failure_title = \"Oops\"",
            ],
        )
        .unwrap();

        assert_eq!(
            config.backend.url.as_str(),
            "https://portfolio.example/backend"
        );
        assert_eq!(config.contact.failure_title, "Oops");
        assert_eq!(config.contact.success_title, "Message Sent!");
    }

    #[test]
    fn layer_files() {
        let path = std::env::temp_dir().join(format!("folio-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[backend]\nurl = \"http://127.0.0.1:9000\"\n").unwrap();

        let result = load_with_override(&[&path], &[]);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(result.unwrap().backend.url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn missing_file() {
        let result = load_with_override(&[Path::new("/nonexistent/folio.toml")], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_url() {
        let result = load_with_override::<&Path>(&[], &["backend.url = \"not a url\""]);
        assert!(result.is_err());
    }
}
