use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    /// Plain variable names read as defaults for config keys, e.g.
    /// `("DB_HOST", "database.host")`. Prefixed variables take precedence.
    /// Values are taken verbatim, so `007` stays `007`.
    const FALLBACK_VARS: &'static [(&'static str, &'static str)] = &[];

    fn load_dotenv() {
        // Load .env from crate root (falls back to current dir if missing)
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();

        let mut builder = config_rs::Config::builder();
        for (var, key) in Self::FALLBACK_VARS {
            let Ok(value) = std::env::var(var) else {
                continue;
            };
            // Kept as text; numeric fields are converted on deserialize.
            builder = builder
                .set_default(*key, value)
                .with_context(|| format!("failed to apply {var}"))?;
        }

        let settings = builder
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(false),
            )
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
