use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Multipart field name shared by every file of a batch.
    pub field_name: String,
    pub auto_close_delay_ms: u64,
    /// Size of the chunks a part body is streamed in; each chunk is one progress step.
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    pub directory: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => panic!("Failed to deserialize default config: {}", e),
            },
            Err(e) => panic!("Failed to parse default config: {}", e),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        // Mirror defaults from config/default.toml
        Self { field_name: "file".to_string(), auto_close_delay_ms: 1200, chunk_size: 64 * 1024 }
    }
}

impl UploadConfig {
    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_millis(self.auto_close_delay_ms)
    }
}

/// Loads the layered configuration: embedded defaults, `gallery-client.toml`,
/// the file named by `GALLERY_CLIENT_CONFIG` (or `explicit`), then the environment.
pub fn load(explicit: Option<&str>) -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        .add_source(::config::File::with_name("gallery-client").required(false));

    if let Ok(custom_path) = std::env::var("GALLERY_CLIENT_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    if let Some(path) = explicit {
        builder = builder.add_source(::config::File::with_name(path).required(true));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("GALLERY_CLIENT").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    let base = cfg.api.base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(anyhow::anyhow!("api.base_url must start with http:// or https://: {}", base));
    }
    if cfg.upload.field_name.trim().is_empty() {
        return Err(anyhow::anyhow!("upload.field_name must not be empty"));
    }
    if cfg.upload.chunk_size == 0 {
        return Err(anyhow::anyhow!("upload.chunk_size must be > 0"));
    }
    if cfg.upload.auto_close_delay_ms > 60_000 {
        tracing::warn!("upload.auto_close_delay_ms is {} ms; the dialog will linger", cfg.upload.auto_close_delay_ms);
    }
    Ok(())
}
