use std::path::PathBuf;

use anyhow::Context;

/// Everything the loader needs to run, resolved from the environment.
///
/// A `.env` file next to the binary is picked up as well, see `.env.example`.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key used for the initial credential exchange
    pub api_key: String,
    /// Example: `mycompany.onpbx.ru`
    pub domain: String,
    /// Folder downloaded recording archives are saved to
    pub records_path: PathBuf,
    /// Folder the daily journal files are written to
    pub logs_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        fn resolve_var(key: &str) -> anyhow::Result<String> {
            dotenv::var(key).with_context(|| format!("couldn't find env var {}", key))
        }

        Ok(Config {
            api_key: resolve_var("ONPBX_API_KEY")?,
            domain: resolve_var("ONPBX_DOMAIN")?,
            records_path: PathBuf::from(resolve_var("ONPBX_RECORDS_PATH")?),
            logs_path: PathBuf::from(resolve_var("ONPBX_LOGS_PATH")?),
        })
    }
}
