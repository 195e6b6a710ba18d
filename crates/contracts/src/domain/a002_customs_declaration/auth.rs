use serde::Deserialize;
use serde_json::Value;

use crate::shared::lenient;

/// Ответ `/Authenticate` и `/AuthenticatePin` таможенного API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomsAuthResponse {
    pub access_token: String,
    /// Промежуточный токен двухфакторной аутентификации
    pub pin_token: String,
    /// Номер телефона, на который отправлен PIN (замаскирован)
    pub masked_mobile: String,
    pub status: i64,
    pub message: String,
    pub raw: Value,
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(rename = "DATA", default, deserialize_with = "lenient::section")]
    data: TokenData,
    #[serde(rename = "STATUS", default, deserialize_with = "lenient::section")]
    status: StatusData,
}

#[derive(Debug, Default, Deserialize)]
struct TokenData {
    #[serde(rename = "ACCESS_TOKEN", default, deserialize_with = "lenient::string")]
    access_token: String,
    #[serde(rename = "PIN_TOKEN", default, deserialize_with = "lenient::string")]
    pin_token: String,
    #[serde(rename = "MASKED_MOBILE", default, deserialize_with = "lenient::string")]
    masked_mobile: String,
}

#[derive(Debug, Default, Deserialize)]
struct StatusData {
    #[serde(rename = "CODE", default, deserialize_with = "lenient::int")]
    code: i64,
    #[serde(rename = "MESSAGE", default, deserialize_with = "lenient::string")]
    message: String,
}

impl CustomsAuthResponse {
    pub fn from_json(value: Value) -> Self {
        let envelope: Envelope = lenient::decode(&value);
        let data = envelope.data;
        let status = envelope.status;

        Self {
            access_token: data.access_token,
            pin_token: data.pin_token,
            masked_mobile: data.masked_mobile,
            status: status.code,
            message: status.message,
            raw: value,
        }
    }

    /// Первый шаг прошёл, но для токена нужен PIN
    pub fn needs_pin(&self) -> bool {
        !self.pin_token.is_empty() && self.access_token.is_empty()
    }
}
