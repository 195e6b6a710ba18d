use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub waybill: ServiceConfig,
    pub customs: ServiceConfig,
    pub invoice: ServiceConfig,
}

/// Параметры подключения к одному сервису RS.ge
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `false` отключает проверку TLS-сертификата (тестовые стенды)
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_verify_ssl() -> bool {
    true
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            verify_ssl: default_verify_ssl(),
        }
    }

    pub fn waybill() -> Self {
        Self::new(WAYBILL_URL)
    }

    pub fn customs() -> Self {
        Self::new(CUSTOMS_URL)
    }

    pub fn invoice() -> Self {
        Self::new(INVOICE_URL)
    }
}

pub const WAYBILL_URL: &str = "https://services.rs.ge/WayBillService/WayBillService.asmx";
pub const CUSTOMS_URL: &str = "https://services.rs.ge";
pub const INVOICE_URL: &str = "https://eapi.rs.ge";

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[waybill]
base_url = "https://services.rs.ge/WayBillService/WayBillService.asmx"
timeout_secs = 30
verify_ssl = true

[customs]
base_url = "https://services.rs.ge"
timeout_secs = 30
verify_ssl = true

[invoice]
base_url = "https://eapi.rs.ge"
timeout_secs = 30
verify_ssl = true
"#;

impl Default for Config {
    fn default() -> Self {
        Self {
            waybill: ServiceConfig::waybill(),
            customs: ServiceConfig::customs(),
            invoice: ServiceConfig::invoice(),
        }
    }
}

/// Загрузка конфигурации из rsge.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом
/// 2. Иначе встроенная конфигурация по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("rsge.toml");

            if config_path.exists() {
                return load_config_from(&config_path);
            } else {
                tracing::debug!("rsge.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Загрузка конфигурации из указанного файла
pub fn load_config_from(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    tracing::info!("Loading config from: {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}
