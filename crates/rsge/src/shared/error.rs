use contracts::shared::XmlError;
use thiserror::Error;

/// Ошибки SDK
///
/// Варианты, связанные с ответом сервиса, хранят числовой код RS.ge
/// (или HTTP-статус), если он известен.
#[derive(Debug, Error)]
pub enum RsGeError {
    #[error("Authentication error: {message}")]
    Authentication { message: String, code: Option<i64> },

    #[error("Permission denied: {message}")]
    Permission { message: String, code: Option<i64> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error: {message}")]
    Api { message: String, code: Option<i64> },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, RsGeError>;

impl RsGeError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: None,
        }
    }

    pub fn authentication_with_code(message: impl Into<String>, code: i64) -> Self {
        Self::Authentication {
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn permission(message: impl Into<String>, code: i64) -> Self {
        Self::Permission {
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn api(message: impl Into<String>, code: Option<i64>) -> Self {
        Self::Api {
            message: message.into(),
            code,
        }
    }

    /// Код ошибки RS.ge или HTTP-статус
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Authentication { code, .. } | Self::Permission { code, .. } | Self::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// Текст без префикса варианта
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. } | Self::Permission { message, .. } | Self::Api { message, .. } => {
                message.as_str()
            }
            Self::Validation(message) | Self::Connection(message) | Self::InvalidResponse(message) => message.as_str(),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

impl From<reqwest::Error> for RsGeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else if error.is_timeout() {
            Self::Connection(format!("Request to RS.ge timed out: {}", error))
        } else {
            Self::Connection(format!("Failed to connect to RS.ge service: {}", error))
        }
    }
}

impl From<serde_json::Error> for RsGeError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse(format!("Malformed JSON: {}", error))
    }
}

impl From<XmlError> for RsGeError {
    fn from(error: XmlError) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_accessor() {
        assert_eq!(RsGeError::permission("nope", -101).code(), Some(-101));
        assert_eq!(RsGeError::api("boom", None).code(), None);
        assert_eq!(RsGeError::Connection("down".into()).code(), None);
    }

    #[test]
    fn test_display_and_message() {
        let error = RsGeError::authentication_with_code("Invalid service credentials.", -100);
        assert_eq!(error.to_string(), "Authentication error: Invalid service credentials.");
        assert_eq!(error.message(), "Invalid service credentials.");
        assert!(error.is_authentication());
    }

    #[test]
    fn test_xml_error_is_invalid_response() {
        let error: RsGeError = XmlError::EmptyDocument.into();
        assert!(matches!(error, RsGeError::InvalidResponse(_)));
    }
}
