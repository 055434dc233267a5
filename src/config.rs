use serde::Deserialize;

/// Credentials and endpoint for the payment provider.
///
/// Immutable after startup; every field is required and absence is a fatal
/// configuration error.
#[derive(Debug, Clone, Deserialize)]
pub struct BuckarooConfig {
    pub website_key: String,
    pub private_key: String,
    pub base_url: String,
    pub configuration_code: String,
}

impl BuckarooConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            website_key: std::env::var("BUCKAROO_WEBSITE_KEY")
                .map_err(|_| {
                    anyhow::anyhow!("BUCKAROO_WEBSITE_KEY environment variable required")
                })
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("BUCKAROO_WEBSITE_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            private_key: std::env::var("BUCKAROO_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("BUCKAROO_SECRET_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("BUCKAROO_SECRET_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            base_url: std::env::var("BUCKAROO_BASE_URL")
                .map_err(|_| anyhow::anyhow!("BUCKAROO_BASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("BUCKAROO_BASE_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("BUCKAROO_BASE_URL must start with http:// or https://");
                    }
                    // Endpoint slugs are appended directly.
                    if url.ends_with('/') {
                        Ok(url)
                    } else {
                        Ok(format!("{}/", url))
                    }
                })?,
            configuration_code: std::env::var("BUCKAROO_CONFIGURATION_CODE")
                .map_err(|_| {
                    anyhow::anyhow!("BUCKAROO_CONFIGURATION_CODE environment variable required")
                })
                .and_then(|code| {
                    if code.trim().is_empty() {
                        anyhow::bail!("BUCKAROO_CONFIGURATION_CODE cannot be empty");
                    }
                    Ok(code)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Buckaroo configuration loaded successfully");
        tracing::debug!("Buckaroo base URL: {}", config.base_url);

        Ok(config)
    }
}
