use std::path::{Path, PathBuf};

use anyhow::Context;

/// Model artifact path, relative to the base path.
pub const DEFAULT_MODEL_PATH: &str = "models/best_model_XGBoost.json";

/// Feedback log path, relative to the base path.
pub const DEFAULT_FEEDBACK_PATH: &str = "data/feedback.csv";

/// Returns the base path the default artifact and log paths hang off.
///
/// Uses `SHELTER_BASE_PATH` when set. Otherwise walks up from the
/// executable's directory to the first one holding the default model
/// artifact, and falls back to the current directory if there is none.
#[must_use]
pub fn get_base_path() -> PathBuf {
    dotenvy::dotenv().ok();

    if let Ok(path) = std::env::var("SHELTER_BASE_PATH")
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(find_install_base))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Finds the nearest ancestor of `start` (itself included) that contains
/// the default model artifact.
#[must_use]
pub fn find_install_base(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(DEFAULT_MODEL_PATH).is_file())
        .map(Path::to_path_buf)
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory relative paths are resolved against
    pub base_path: PathBuf,

    /// Serialized model artifact
    pub model_path: PathBuf,

    /// Append-only feedback CSV
    pub feedback_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SHELTER_BASE_PATH`: base directory (default: the nearest ancestor of
    ///   the executable holding the default model, else the current directory)
    /// - `SHELTER_MODEL_PATH`: model artifact (default: `models/best_model_XGBoost.json`)
    /// - `SHELTER_FEEDBACK_PATH`: feedback log (default: `data/feedback.csv`)
    ///
    /// Relative paths are resolved against the base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but not valid unicode.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        let base_path = get_base_path();
        let model_path = optional_var("SHELTER_MODEL_PATH")?
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let feedback_path = optional_var("SHELTER_FEEDBACK_PATH")?
            .unwrap_or_else(|| DEFAULT_FEEDBACK_PATH.to_string());

        Ok(Self::with_base(base_path, model_path, feedback_path))
    }

    /// Builds a configuration, resolving relative paths against `base_path`.
    #[must_use]
    pub fn with_base(
        base_path: impl Into<PathBuf>,
        model_path: impl AsRef<Path>,
        feedback_path: impl AsRef<Path>,
    ) -> Self {
        let base_path = base_path.into();
        Self {
            model_path: resolve(&base_path, model_path.as_ref()),
            feedback_path: resolve(&base_path, feedback_path.as_ref()),
            base_path,
        }
    }

    /// Replaces the model path, e.g. from a command line flag.
    #[must_use]
    pub fn with_model_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.model_path = resolve(&self.base_path, &path);
        }
        self
    }

    /// Replaces the feedback path, e.g. from a command line flag.
    #[must_use]
    pub fn with_feedback_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.feedback_path = resolve(&self.base_path, &path);
        }
        self
    }
}

fn optional_var(name: &str) -> anyhow::Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{name} environment variable is invalid")),
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
