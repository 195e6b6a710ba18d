use serde::Deserialize;
use serde_json::Value;

use crate::shared::lenient;

/// Ответ `/Users/Authenticate` и `/Users/AuthenticatePin`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceAuthResponse {
    pub access_token: String,
    /// Пусто при однофакторной аутентификации
    pub pin_token: String,
    pub masked_mobile: String,
    /// Время жизни токена, секунды
    pub expires_in: i64,
    /// 0 - успех
    pub status_id: i64,
    pub status_text: String,
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
    #[serde(rename = "EXPIRES_IN", default, deserialize_with = "lenient::int")]
    expires_in: i64,
}

#[derive(Debug, Default, Deserialize)]
struct StatusData {
    #[serde(rename = "ID", default, deserialize_with = "lenient::int")]
    id: i64,
    #[serde(rename = "TEXT", default, deserialize_with = "lenient::string")]
    text: String,
}

impl InvoiceAuthResponse {
    pub fn from_json(value: Value) -> Self {
        let envelope: Envelope = lenient::decode(&value);
        let data = envelope.data;
        let status = envelope.status;

        Self {
            access_token: data.access_token,
            pin_token: data.pin_token,
            masked_mobile: data.masked_mobile,
            expires_in: data.expires_in,
            status_id: status.id,
            status_text: status.text,
            raw: value,
        }
    }

    /// Нужен второй шаг с PIN-кодом из SMS
    pub fn needs_pin(&self) -> bool {
        !self.pin_token.is_empty() && self.access_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_response() {
        let response = InvoiceAuthResponse::from_json(json!({
            "DATA": {"ACCESS_TOKEN": "tok", "EXPIRES_IN": "3600"},
            "STATUS": {"ID": 0, "TEXT": null}
        }));
        assert_eq!(response.access_token, "tok");
        assert_eq!(response.expires_in, 3600);
        assert_eq!(response.status_text, "");
        assert!(!response.needs_pin());
    }

    #[test]
    fn test_pin_required() {
        let response = InvoiceAuthResponse::from_json(json!({
            "DATA": {"PIN_TOKEN": "pt", "MASKED_MOBILE": "5*****789"},
            "STATUS": {"ID": 0}
        }));
        assert!(response.needs_pin());
        assert_eq!(response.masked_mobile, "5*****789");
    }

    #[test]
    fn test_pin_and_access_token_means_done() {
        let response = InvoiceAuthResponse::from_json(json!({
            "DATA": {"PIN_TOKEN": "pt", "ACCESS_TOKEN": "tok"}
        }));
        assert!(!response.needs_pin());
    }

    #[test]
    fn test_error_status() {
        let response = InvoiceAuthResponse::from_json(json!({
            "DATA": null,
            "STATUS": {"ID": "-1", "TEXT": "არასწორი პაროლი"}
        }));
        assert_eq!(response.status_id, -1);
        assert_eq!(response.status_text, "არასწორი პაროლი");
    }

    #[test]
    fn test_non_object_data_keeps_status() {
        let response = InvoiceAuthResponse::from_json(json!({
            "DATA": "",
            "STATUS": {"ID": -1021, "TEXT": "მომხმარებელი ვერ მოიძებნა"}
        }));
        assert!(response.access_token.is_empty());
        assert_eq!(response.status_id, -1021);
        assert_eq!(response.status_text, "მომხმარებელი ვერ მოიძებნა");
    }
}
