//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lexigrade_core::model::{Direction, DEFAULT_PAGE_SIZE};
use lexigrade_core::quiz::PassPolicy;

use crate::http::HttpBackend;

/// Connection settings for the vocabulary service.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// User the scores are stored against.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("user_id", &self.user_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            user_id: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ServerConfig {
    /// Build an HTTP backend from these settings.
    pub fn backend(&self) -> Result<HttpBackend> {
        HttpBackend::new(&self.base_url, self.token.clone(), self.timeout_secs)
    }

    /// The configured user, or an error explaining how to set one.
    pub fn require_user(&self) -> Result<&str> {
        self.user_id.as_deref().filter(|u| !u.is_empty()).ok_or_else(|| {
            anyhow::anyhow!("no user configured: set server.user_id or LEXIGRADE_USER_ID")
        })
    }
}

/// Quiz defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Words per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Score a week must exceed to count as passed.
    #[serde(default = "default_pass_score")]
    pub pass_score: u8,
    /// Whether reaching `pass_score` exactly is enough.
    #[serde(default)]
    pub pass_inclusive: bool,
    /// Default question direction.
    #[serde(default)]
    pub direction: Direction,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            pass_score: default_pass_score(),
            pass_inclusive: false,
            direction: Direction::default(),
        }
    }
}

impl QuizConfig {
    pub fn pass_policy(&self) -> PassPolicy {
        PassPolicy {
            min_score: self.pass_score,
            inclusive: self.pass_inclusive,
        }
    }
}

/// Top-level lexigrade configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexigradeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    /// Output directory for attempt records and reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_pass_score() -> u8 {
    PassPolicy::default().min_score
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./lexigrade-results")
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_server_config(server: &ServerConfig) -> ServerConfig {
    let resolve_opt = |v: &Option<String>| {
        v.as_deref()
            .map(resolve_env_vars)
            .filter(|s| !s.is_empty())
    };
    ServerConfig {
        base_url: resolve_env_vars(&server.base_url),
        token: resolve_opt(&server.token),
        user_id: resolve_opt(&server.user_id),
        timeout_secs: server.timeout_secs,
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `lexigrade.toml` in the current directory
/// 2. `~/.config/lexigrade/config.toml`
///
/// Environment variable overrides: `LEXIGRADE_API_URL`, `LEXIGRADE_TOKEN`,
/// `LEXIGRADE_USER_ID`.
pub fn load_config_from(path: Option<&Path>) -> Result<LexigradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexigrade.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LexigradeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LexigradeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("LEXIGRADE_API_URL") {
        config.server.base_url = url;
    }
    if let Ok(token) = std::env::var("LEXIGRADE_TOKEN") {
        config.server.token = Some(token);
    }
    if let Ok(user) = std::env::var("LEXIGRADE_USER_ID") {
        config.server.user_id = Some(user);
    }

    config.server = resolve_server_config(&config.server);

    anyhow::ensure!(config.quiz.page_size >= 1, "quiz.page_size must be at least 1");
    anyhow::ensure!(
        config.quiz.pass_score <= 100,
        "quiz.pass_score must be between 0 and 100"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexigrade"))
}
