//! Figment-backed configuration loader and path helpers.
//!
//! Merges built-in defaults, `recall.toml`, `recall.<env>.toml` and `APP_*`
//! env vars (`__` separates nested keys, e.g. `APP_RETRIEVAL__K=10`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::types::Strategy;
use crate::{Error, Result};

pub const DEFAULT_K: usize = 5;
pub const DEFAULT_LAMBDA: f32 = 0.7;
/// Lowest possible cosine similarity; admits every candidate.
pub const DEFAULT_THRESHOLD: f32 = -1.0;
pub const DEFAULT_DIM: usize = 768;
pub const DEFAULT_BATCH_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub strategy: Strategy,
    pub k: usize,
    pub lambda: f32,
    pub threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { strategy: Strategy::Mmr, k: DEFAULT_K, lambda: DEFAULT_LAMBDA, threshold: DEFAULT_THRESHOLD }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub dim: usize,
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { dim: DEFAULT_DIM, batch_size: DEFAULT_BATCH_SIZE }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    /// Load `recall.toml` and `recall.<env>.toml` from the working directory.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("recall.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("recall.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("recall.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("recall.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn retrieval(&self) -> Result<RetrievalConfig> { self.get("retrieval") }

    pub fn embedding(&self) -> Result<EmbeddingConfig> { self.get("embedding") }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        if settings.embedding.dim == 0 {
            return Err(Error::InvalidConfig("embedding.dim must be > 0".into()));
        }
        if settings.embedding.batch_size == 0 {
            return Err(Error::InvalidConfig("embedding.batch_size must be > 0".into()));
        }
        // Accepted as-is; MMR stays well-defined outside [0, 1].
        let lambda = settings.retrieval.lambda;
        if !(0.0..=1.0).contains(&lambda) {
            tracing::warn!(lambda, "retrieval.lambda outside [0, 1]; using it unclamped");
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
