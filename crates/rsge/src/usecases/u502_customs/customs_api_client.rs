use async_trait::async_trait;
use contracts::domain::a002_customs_declaration::{CustomsAuthResponse, CustomsDeclaration};
use contracts::shared::lenient;
use serde_json::{json, Map, Value};

use crate::shared::auth::{DeviceInfo, TokenSession, TwoFactorAuth};
use crate::shared::config::ServiceConfig;
use crate::shared::error::{Result, RsGeError};
use crate::shared::http::{build_client, normalize_base_url, preview};

/// Клиент REST API таможенных деклараций (ASYCUDA)
pub struct CustomsClient {
    client: reqwest::Client,
    base_url: String,
    session: TokenSession,
}

impl CustomsClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&ServiceConfig::customs())
    }

    pub fn with_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: normalize_base_url(&config.base_url),
            session: TokenSession::new(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Вход по логину и паролю. При двухфакторной аутентификации токена
    /// в ответе нет, нужен [`Self::authenticate_pin`].
    pub async fn authenticate(&mut self, username: &str, password: &str, device_code: &str) -> Result<CustomsAuthResponse> {
        let mut payload = Map::new();
        payload.insert("USERNAME".into(), Value::from(username));
        payload.insert("PASSWORD".into(), Value::from(password));
        if !device_code.is_empty() {
            payload.insert("DEVICE_CODE".into(), Value::from(device_code));
        }

        let data = self.post("/Authenticate", &Value::Object(payload)).await?;
        let response = CustomsAuthResponse::from_json(data);
        self.session.set(&response.access_token);
        Ok(response)
    }

    /// Второй шаг: PIN из SMS
    pub async fn authenticate_pin(&mut self, pin_token: &str, pin: &str, device: &DeviceInfo) -> Result<CustomsAuthResponse> {
        let payload = json!({
            "PIN_TOKEN": pin_token,
            "PIN": pin,
            "DEVICE_CODE": device.device_code,
            "ADDRESS": device.address,
            "BROWSER": device.browser,
            "OPER_SYSTEM": device.oper_system,
        });

        let data = self.post("/AuthenticatePin", &payload).await?;
        let response = CustomsAuthResponse::from_json(data);
        self.session.set(&response.access_token);
        Ok(response)
    }

    /// Завершить сессию. Ошибка API при выходе не мешает сбросить токен.
    pub async fn sign_out(&mut self) -> Result<bool> {
        if !self.session.is_authenticated() {
            return Ok(true);
        }

        match self.post("/SignOut", &json!({})).await {
            Ok(_) => {}
            Err(RsGeError::Api { message, .. }) => {
                tracing::warn!("Customs sign-out failed: {}", message);
            }
            Err(e) => return Err(e),
        }

        self.session.clear();
        Ok(true)
    }

    /// Оформленные декларации за период (даты в формате ISO)
    pub async fn get_declarations(&self, date_from: &str, date_to: &str) -> Result<Vec<CustomsDeclaration>> {
        self.session.require()?;

        let url = format!("{}/GetAsycudaDeclarations", self.base_url);
        tracing::debug!("GET {} ({} - {})", url, date_from, date_to);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("dateFrom", date_from), ("dateTo", date_to)])
            .send()
            .await?;

        let data = read_json(response, "/GetAsycudaDeclarations").await?;

        let status = &data["STATUS"];
        // Без CODE ответ не считается успешным
        let code = lenient::value_to_opt_int(&status["CODE"]);
        if code != Some(0) {
            let message = match lenient::value_to_string(&status["MESSAGE"]) {
                text if text.is_empty() => "Unknown error".to_string(),
                text => text,
            };
            return Err(RsGeError::api(format!("API error: {}", message), code));
        }

        let declarations = CustomsDeclaration::list_from_json(&data["DATA"]);
        tracing::info!("Received {} customs declarations", declarations.len());
        Ok(declarations)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Content-Type", "application/json");
        match self.session.bearer() {
            Some(bearer) => request.header("Authorization", bearer),
            None => request,
        }
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .authorized(self.client.post(&url))
            .body(serde_json::to_string(payload)?)
            .send()
            .await?;

        read_json(response, path).await
    }
}

#[async_trait]
impl TwoFactorAuth for CustomsClient {
    type Response = CustomsAuthResponse;

    async fn sign_in(&mut self, username: &str, password: &str) -> Result<CustomsAuthResponse> {
        self.authenticate(username, password, "").await
    }

    async fn submit_pin(&mut self, pin_token: &str, pin: &str) -> Result<CustomsAuthResponse> {
        self.authenticate_pin(pin_token, pin, &DeviceInfo::default()).await
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// HTTP-ошибка → ошибка API с кодом статуса
async fn read_json(response: reqwest::Response, path: &str) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!("Customs API {} failed with status {}: {}", path, status, preview(&body, 500));
        return Err(RsGeError::api(
            format!("HTTP error: {}", status.as_u16()),
            Some(i64::from(status.as_u16())),
        ));
    }

    tracing::debug!("Customs API {} response: {}", path, preview(&body, 500));
    Ok(serde_json::from_str(&body)?)
}
