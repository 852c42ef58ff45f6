//! Run settings resolved from the environment.

use std::env;
use std::path::PathBuf;

/// Dataset path used when neither `--dataset` nor `PARES_DATASET` is set.
pub(crate) const DEFAULT_DATASET: &str = "final_df";

/// Settings read once at startup.
#[derive(Debug, Clone, Default)]
pub(crate) struct Settings {
    dataset: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the environment, loading `.env` if present.
    pub(crate) fn from_env() -> Self {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self {
            dataset: env::var_os("PARES_DATASET")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Dataset path: the CLI flag wins over the environment.
    pub(crate) fn dataset_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.dataset.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
    }
}
