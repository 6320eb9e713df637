use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "mealmate").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("mealmate.db");

        Ok(Config { db_path, data_dir })
    }

    /// Load the Spoonacular API key. The key is an injected secret: the
    /// `SPOONACULAR_API_KEY` env var wins, then an `api_key` file in the
    /// data dir. There is no compiled-in default.
    pub fn spoonacular_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("SPOONACULAR_API_KEY") {
            let key = key.trim().to_string();
            if !key.is_empty() {
                return Ok(key);
            }
        }

        let path = self.data_dir.join("api_key");
        if path.exists() {
            let key = std::fs::read_to_string(&path).context("Failed to read API key file")?;
            let key = key.trim().to_string();
            if !key.is_empty() {
                return Ok(key);
            }
        }

        bail!(
            "No Spoonacular API key configured. Set SPOONACULAR_API_KEY or write the key to {}",
            path.display()
        )
    }

    /// Write the API key to the data dir so future runs pick it up.
    pub fn store_api_key(&self, key: &str) -> Result<()> {
        let path = self.data_dir.join("api_key");
        std::fs::write(&path, key.trim()).context("Failed to write API key file")?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .context("Failed to set API key file permissions")?;
        }
        Ok(())
    }
}
