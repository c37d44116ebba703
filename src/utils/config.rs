use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<String>,
    pub currency_symbol: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            currency_symbol: "$".to_string(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            catalog_path: env::var("CART_CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or("$".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or("info".to_string()),
            environment: env::var("APP_ENV").unwrap_or("development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Replaces the catalog path, e.g. from a `--catalog` flag.
    pub fn with_catalog_path(mut self, path: Option<String>) -> anyhow::Result<Self> {
        if path.is_some() {
            self.catalog_path = path;
            self.validate()?;
        }
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(path) = &self.catalog_path {
            if !path.ends_with(".json") {
                return Err(anyhow::anyhow!(
                    "CART_CATALOG_PATH must point to a .json file, got '{}'",
                    path
                ));
            }
        }

        if self.currency_symbol.is_empty() {
            return Err(anyhow::anyhow!("CURRENCY_SYMBOL must not be empty"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
