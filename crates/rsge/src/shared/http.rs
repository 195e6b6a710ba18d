use std::time::Duration;

use super::config::ServiceConfig;
use super::error::{Result, RsGeError};

/// HTTP-клиент с таймаутом и проверкой TLS из конфигурации сервиса
pub fn build_client(config: &ServiceConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

    if !config.verify_ssl {
        tracing::warn!("TLS certificate verification disabled for {}", config.base_url);
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| RsGeError::Connection(format!("Failed to create HTTP client: {}", e)))
}

/// Базовый URL без завершающего слэша
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Первые `limit` символов тела ответа для логов
pub fn preview(body: &str, limit: usize) -> String {
    let head: String = body.chars().take(limit).collect();
    if head.len() < body.len() {
        format!("{}...", head)
    } else {
        head
    }
}
