use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dna_client.toml";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    /// File dialog hint for the sequence file.
    pub primary_extensions: Vec<String>,
    /// File dialog hint for the reference list.
    pub reference_extensions: Vec<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            primary_extensions: vec!["txt".into()],
            reference_extensions: vec!["xlsx".into()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    primary_extensions: Option<Vec<String>>,
    reference_extensions: Option<Vec<String>>,
}

impl ClientSettings {
    pub fn apply_file_overrides(&mut self, raw: &str) -> Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw).context("invalid client settings")?;
        if let Some(v) = file_cfg.server_url {
            self.server_url = normalize_server_url(&v)?;
        }
        if let Some(v) = file_cfg.primary_extensions {
            self.primary_extensions = normalize_extensions(v);
        }
        if let Some(v) = file_cfg.reference_extensions {
            self.reference_extensions = normalize_extensions(v);
        }
        Ok(())
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        for key in ["DNA_CLIENT_SERVER_URL", "APP__SERVER_URL"] {
            if let Some(v) = lookup(key).filter(|v| !v.trim().is_empty()) {
                self.server_url =
                    normalize_server_url(&v).with_context(|| format!("invalid {key}"))?;
            }
        }
        Ok(())
    }

    pub fn with_server_url(mut self, server_url: Option<&str>) -> Result<Self> {
        if let Some(v) = server_url {
            self.server_url = normalize_server_url(v)?;
        }
        Ok(self)
    }
}

/// Defaults, then `dna_client.toml` from the working directory when present,
/// then environment overrides.
pub fn load_settings() -> Result<ClientSettings> {
    load_settings_from(None)
}

/// Like [`load_settings`], but an explicit `path` must exist.
pub fn load_settings_from(path: Option<&Path>) -> Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        settings
            .apply_file_overrides(&raw)
            .with_context(|| format!("failed to apply settings file '{}'", path.display()))?;
    }

    settings.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn normalize_server_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).with_context(|| format!("invalid server url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "unsupported server url scheme '{}' (expected http or https)",
            parsed.scheme()
        );
    }
    if parsed.host_str().is_none() {
        bail!("server url '{trimmed}' has no host");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn normalize_extensions(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
