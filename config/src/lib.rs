//! Configuration for Valentine.
//!
//! Everything is optional. The config file lives at `~/.valentine/config.toml`
//! (or wherever `VALENTINE_CONFIG` points) and may set UI options and the Gemini
//! connection. The API key is normally taken from the environment; it is never
//! validated here, a bad or missing key only shows up when the request is made.

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use valentine_types::ui::UiOptions;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];
/// Overrides the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "VALENTINE_CONFIG";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValentineConfig {
    pub app: Option<AppConfig>,
    pub google: Option<GoogleConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Use emoji-free glyphs for hearts, confetti and button labels.
    #[serde(default)]
    pub ascii_only: bool,
    /// Hide the decorative and confetti particles.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// Supports `${VAR}` expansion.
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// Manual Debug impl to prevent leaking the API key in logs.
impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Settings for the text-generation client, with defaults applied.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSettings")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    "[REDACTED]"
                } else {
                    "None"
                },
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Expand `${VAR}` references using `lookup`. Unknown variables become empty.
pub fn expand_vars_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty()
                    && let Some(replacement) = lookup(var)
                {
                    out.push_str(&replacement);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn expand_env_vars(value: &str) -> String {
    expand_vars_with(value, |var| env::var(var).ok())
}

impl ValentineConfig {
    /// Load the config file. `Ok(None)` when there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::parse(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    /// Generation settings, reading the API key from the process environment.
    #[must_use]
    pub fn generation_settings(config: Option<&Self>) -> GenerationSettings {
        Self::generation_settings_with(config, |var| env::var(var).ok())
    }

    /// Generation settings with an explicit environment lookup.
    ///
    /// The key comes from the first non-blank of [`API_KEY_ENV_VARS`], then the
    /// config file's `google.api_key`.
    pub fn generation_settings_with(
        config: Option<&Self>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> GenerationSettings {
        let google = config.and_then(|cfg| cfg.google.as_ref());
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|var| lookup(var).and_then(non_blank))
            .or_else(|| {
                google
                    .and_then(|g| g.api_key.as_deref())
                    .map(|raw| expand_vars_with(raw, &lookup))
                    .and_then(non_blank)
            });

        let defaults = GenerationSettings::default();
        GenerationSettings {
            api_key,
            model: google
                .and_then(|g| g.model.clone())
                .and_then(non_blank)
                .unwrap_or(defaults.model),
            base_url: google
                .and_then(|g| g.base_url.clone())
                .and_then(non_blank)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout: google
                .and_then(|g| g.timeout_secs)
                .filter(|secs| *secs > 0)
                .map_or(defaults.timeout, Duration::from_secs),
        }
    }
}

/// `$VALENTINE_CONFIG`, else `~/.valentine/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".valentine").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_BASE_URL, DEFAULT_MODEL, GenerationSettings, ValentineConfig, expand_vars_with,
    };
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn expand_vars_no_vars() {
        assert_eq!(expand_vars_with("hello world", env_of(&[])), "hello world");
    }

    #[test]
    fn expand_vars_replaces_and_blanks() {
        let lookup = env_of(&[("A", "alpha"), ("B", "beta")]);
        assert_eq!(expand_vars_with("${A}-${B}", &lookup), "alpha-beta");
        assert_eq!(expand_vars_with("x ${MISSING} y", &lookup), "x  y");
        assert_eq!(expand_vars_with("${}", &lookup), "");
    }

    #[test]
    fn expand_vars_unterminated_is_literal() {
        assert_eq!(expand_vars_with("key ${OOPS", env_of(&[])), "key ${OOPS");
    }

    #[test]
    fn expand_vars_keeps_multibyte_text() {
        let lookup = env_of(&[("NOM", "Gina")]);
        assert_eq!(expand_vars_with("Hola ${NOM} ❤️", lookup), "Hola Gina ❤️");
    }

    #[test]
    fn defaults_without_config_or_env() {
        let settings = ValentineConfig::generation_settings_with(None, env_of(&[]));
        assert_eq!(settings, GenerationSettings::default());
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn env_key_precedence() {
        let config = ValentineConfig::parse("[google]\napi_key = \"from-file\"\n").unwrap();

        let both = env_of(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "secondary")]);
        let settings = ValentineConfig::generation_settings_with(Some(&config), both);
        assert_eq!(settings.api_key.as_deref(), Some("primary"));

        let secondary = env_of(&[("API_KEY", "   "), ("GEMINI_API_KEY", "secondary")]);
        let settings = ValentineConfig::generation_settings_with(Some(&config), secondary);
        assert_eq!(settings.api_key.as_deref(), Some("secondary"));

        let settings = ValentineConfig::generation_settings_with(Some(&config), env_of(&[]));
        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn file_key_expands_env_vars() {
        let config =
            ValentineConfig::parse("[google]\napi_key = \"${MY_SECRET}\"\n").unwrap();
        let settings = ValentineConfig::generation_settings_with(
            Some(&config),
            env_of(&[("MY_SECRET", "s3cret")]),
        );
        assert_eq!(settings.api_key.as_deref(), Some("s3cret"));

        let settings = ValentineConfig::generation_settings_with(Some(&config), env_of(&[]));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn google_overrides() {
        let config = ValentineConfig::parse(
            r#"
[google]
model = "gemini-2.5-flash"
base_url = "http://127.0.0.1:9999/v1beta/"
timeout_secs = 5
"#,
        )
        .unwrap();
        let settings = ValentineConfig::generation_settings_with(Some(&config), env_of(&[]));
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.base_url, "http://127.0.0.1:9999/v1beta");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = ValentineConfig::parse("[google]\ntimeout_secs = 0\n").unwrap();
        let settings = ValentineConfig::generation_settings_with(Some(&config), env_of(&[]));
        assert_eq!(settings.timeout, GenerationSettings::default().timeout);
    }

    #[test]
    fn ui_options_from_app_section() {
        let config =
            ValentineConfig::parse("[app]\nascii_only = true\nreduced_motion = true\n").unwrap();
        let options = config.ui_options();
        assert!(options.ascii_only);
        assert!(options.reduced_motion);
        assert_eq!(ValentineConfig::default().ui_options(), Default::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ValentineConfig::parse("[app]\nbogus = 1\n").is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ValentineConfig::parse("[google]\napi_key = \"hunter2\"\n").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));

        let settings = GenerationSettings {
            api_key: Some("hunter2".to_string()),
            ..GenerationSettings::default()
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ValentineConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[app]\nascii_only = true").unwrap();
        let loaded = ValentineConfig::load_from(file.path()).unwrap().unwrap();
        assert!(loaded.ui_options().ascii_only);
    }

    #[test]
    fn load_from_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml = = =").unwrap();
        let err = ValentineConfig::load_from(file.path()).unwrap_err();
        assert_eq!(err.path(), file.path());
        assert!(err.to_string().contains("failed to parse config"));
    }
}
