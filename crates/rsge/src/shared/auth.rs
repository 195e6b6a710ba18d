use async_trait::async_trait;
use contracts::domain::a002_customs_declaration::CustomsAuthResponse;
use contracts::domain::a003_tax_invoice::InvoiceAuthResponse;

use super::error::{Result, RsGeError};

const NOT_AUTHENTICATED: &str = "Not authenticated. Call authenticate() first.";

/// Bearer-токен REST-сервисов
#[derive(Debug, Clone, Default)]
pub struct TokenSession {
    token: Option<String>,
}

impl TokenSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Пустой токен не меняет состояние сессии
    pub fn set(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        self.token = Some(token.to_string());
        tracing::info!("Access token stored");
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Токен или ошибка аутентификации, если вход не выполнен
    pub fn require(&self) -> Result<&str> {
        self.token()
            .ok_or_else(|| RsGeError::authentication(NOT_AUTHENTICATED))
    }

    /// Значение заголовка `Authorization`
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("bearer {}", token))
    }

    pub fn clear(&mut self) {
        if self.token.take().is_some() {
            tracing::info!("Access token cleared");
        }
    }
}

/// Данные устройства для второго шага аутентификации
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    pub device_code: String,
    /// IP-адрес клиента
    pub address: String,
    pub browser: String,
    pub oper_system: String,
}

/// Ответ шага аутентификации
pub trait AuthStep {
    fn access_token(&self) -> &str;
    fn pin_token(&self) -> &str;
    fn masked_mobile(&self) -> &str;

    fn needs_pin(&self) -> bool {
        !self.pin_token().is_empty() && self.access_token().is_empty()
    }
}

impl AuthStep for CustomsAuthResponse {
    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn pin_token(&self) -> &str {
        &self.pin_token
    }

    fn masked_mobile(&self) -> &str {
        &self.masked_mobile
    }
}

impl AuthStep for InvoiceAuthResponse {
    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn pin_token(&self) -> &str {
        &self.pin_token
    }

    fn masked_mobile(&self) -> &str {
        &self.masked_mobile
    }
}

/// Двухшаговый вход: логин/пароль, затем PIN из SMS
#[async_trait]
pub trait TwoFactorAuth: Send {
    type Response: AuthStep + Send + Sync;

    /// Первый шаг
    async fn sign_in(&mut self, username: &str, password: &str) -> Result<Self::Response>;

    /// Второй шаг
    async fn submit_pin(&mut self, pin_token: &str, pin: &str) -> Result<Self::Response>;

    fn is_authenticated(&self) -> bool;

    /// Полный вход. `pin_source` получает замаскированный номер телефона
    /// и возвращает PIN; вызывается только если сервис его запросил.
    async fn login<F>(&mut self, username: &str, password: &str, pin_source: F) -> Result<Self::Response>
    where
        F: FnOnce(&str) -> String + Send,
    {
        let first = self.sign_in(username, password).await?;
        if !first.needs_pin() {
            return Ok(first);
        }

        tracing::info!("PIN requested, sent to {}", first.masked_mobile());
        let pin = pin_source(first.masked_mobile());
        let second = self.submit_pin(first.pin_token(), &pin).await?;

        if second.access_token().is_empty() {
            return Err(RsGeError::authentication("Two-factor authentication did not return an access token"));
        }
        Ok(second)
    }
}
