//! SOAP 1.1 транспорт сервиса WayBill (ASMX, `http://tempuri.org/`).

use contracts::shared::xml::{self, escape};
use contracts::shared::XmlElement;

use super::config::ServiceConfig;
use super::error::{Result, RsGeError};
use super::http::{build_client, normalize_base_url, preview};

const NAMESPACE: &str = "http://tempuri.org/";

const ENVELOPE_HEAD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
"#;

const ENVELOPE_TAIL: &str = r#"
  </soap:Body>
</soap:Envelope>"#;

/// Параметр SOAP-метода
#[derive(Debug, Clone, PartialEq)]
pub enum SoapParam {
    /// Текст, экранируется
    Text(&'static str, String),
    /// Готовый XML, вставляется как есть
    Xml(&'static str, String),
}

impl SoapParam {
    pub fn text(name: &'static str, value: impl ToString) -> Self {
        Self::Text(name, value.to_string())
    }

    pub fn xml(name: &'static str, value: impl Into<String>) -> Self {
        Self::Xml(name, value.into())
    }

    fn write_to(&self, out: &mut String) {
        let (name, value) = match self {
            Self::Text(name, value) => (name, escape(value)),
            Self::Xml(name, value) => (name, value.clone()),
        };
        out.push_str(&format!("<{name}>{value}</{name}>"));
    }
}

/// Разобранный ответ метода.
///
/// `result` - элемент `{method}Result`; `response` - охватывающий его
/// `{method}Response`, где ASMX кладёт out-параметры (`un_id`,
/// `out_inv_id`, `waybill_number`, ...) рядом с результатом.
#[derive(Debug, Clone, PartialEq)]
pub struct SoapResponse {
    pub response: XmlElement,
    pub result: XmlElement,
}

impl SoapResponse {
    /// Текст результата
    pub fn text(&self) -> &str {
        self.result.text()
    }

    /// `"true"` без учёта регистра
    pub fn is_true(&self) -> bool {
        self.text().eq_ignore_ascii_case("true")
    }

    /// Числовой результат; пустой ответ считается `-1`
    pub fn code(&self) -> Result<i64> {
        let text = self.text();
        if text.is_empty() {
            return Ok(-1);
        }
        text.parse::<i64>()
            .map_err(|_| RsGeError::InvalidResponse(format!("Expected an integer result, got '{}'", text)))
    }

    /// Out-параметр: ищется среди соседей результата, затем внутри него
    pub fn out_text(&self, name: &str) -> String {
        let value = self.response.get_text(name, "");
        if value.is_empty() {
            self.result.get_text(name, "")
        } else {
            value
        }
    }

    pub fn out_int(&self, name: &str) -> i64 {
        self.out_text(name).parse().unwrap_or(0)
    }
}

/// Разбор конверта: `Body` → `{method}Response` → `{method}Result`
pub fn parse_response(text: &str, method: &str) -> Result<SoapResponse> {
    let root = xml::parse(text)?;

    let body = root
        .iter("Body")
        .into_iter()
        .next()
        .cloned()
        .ok_or_else(|| RsGeError::InvalidResponse("Invalid SOAP response: missing Body element".into()))?;

    let response_tag = format!("{}Response", method);
    let Some(response) = body.find(&response_tag).cloned() else {
        return Ok(SoapResponse {
            response: body.clone(),
            result: body,
        });
    };

    let result_tag = format!("{}Result", method);
    let result = response.find(&result_tag).cloned().unwrap_or_else(|| response.clone());

    Ok(SoapResponse { response, result })
}

/// Тело запроса: `<method xmlns="http://tempuri.org/">` с параметрами
pub fn build_envelope(method: &str, params: &[SoapParam]) -> String {
    let mut body = String::new();
    body.push_str(ENVELOPE_HEAD);
    body.push_str(&format!("<{} xmlns=\"{}\">", method, NAMESPACE));
    for param in params {
        body.push('\n');
        param.write_to(&mut body);
    }
    body.push_str(&format!("\n</{}>", method));
    body.push_str(ENVELOPE_TAIL);
    body
}

/// HTTP-транспорт SOAP-вызовов
pub struct SoapTransport {
    client: reqwest::Client,
    base_url: String,
}

impl SoapTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: normalize_base_url(&config.base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Вызвать метод сервиса и вернуть разобранный ответ
    pub async fn call(&self, method: &str, params: &[SoapParam]) -> Result<SoapResponse> {
        let envelope = build_envelope(method, params);
        tracing::debug!("SOAP {} -> {}", method, self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("{}{}", NAMESPACE, method))
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("SOAP {} failed with status {}: {}", method, status, preview(&body, 500));
            return Err(RsGeError::Connection(format!(
                "HTTP error from RS.ge: {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        tracing::debug!("SOAP {} response: {}", method, preview(&body, 500));

        parse_response(&body, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(inner: &str) -> String {
        format!(
            "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body>{}</soap:Body></soap:Envelope>",
            inner
        )
    }

    #[test]
    fn test_envelope_escapes_text_and_keeps_xml() {
        let body = build_envelope(
            "save_waybill",
            &[
                SoapParam::text("su", "user&co"),
                SoapParam::xml("waybill", "<WAYBILL><ID>0</ID></WAYBILL>"),
            ],
        );
        assert!(body.contains("<save_waybill xmlns=\"http://tempuri.org/\">"));
        assert!(body.contains("<su>user&amp;co</su>"));
        assert!(body.contains("<waybill><WAYBILL><ID>0</ID></WAYBILL></waybill>"));
        assert!(xml::parse(&body).is_ok());
    }

    #[test]
    fn test_parse_extracts_result_and_out_params() {
        let text = envelope(
            "<chek_service_userResponse xmlns=\"http://tempuri.org/\">\
               <chek_service_userResult>true</chek_service_userResult>\
               <un_id>731937</un_id><s_user_id>1042</s_user_id>\
             </chek_service_userResponse>",
        );
        let response = parse_response(&text, "chek_service_user").unwrap();
        assert!(response.is_true());
        assert_eq!(response.out_int("un_id"), 731937);
        assert_eq!(response.out_int("s_user_id"), 1042);
    }

    #[test]
    fn test_missing_result_falls_back_to_response() {
        let text = envelope("<del_waybillResponse xmlns=\"http://tempuri.org/\"><X>1</X></del_waybillResponse>");
        let response = parse_response(&text, "del_waybill").unwrap();
        assert_eq!(response.result.name, "del_waybillResponse");
    }

    #[test]
    fn test_missing_response_falls_back_to_body() {
        let text = envelope("<Other>1</Other>");
        let response = parse_response(&text, "del_waybill").unwrap();
        assert_eq!(response.result.name, "Body");
    }

    #[test]
    fn test_missing_body_is_error() {
        let err = parse_response("<Envelope><Header /></Envelope>", "x").unwrap_err();
        assert!(matches!(err, RsGeError::InvalidResponse(_)));
    }

    #[test]
    fn test_code_parsing() {
        let ok = parse_response(&envelope("<aResponse><aResult>1</aResult></aResponse>"), "a").unwrap();
        assert_eq!(ok.code().unwrap(), 1);

        let empty = parse_response(&envelope("<aResponse><aResult></aResult></aResponse>"), "a").unwrap();
        assert_eq!(empty.code().unwrap(), -1);

        let bad = parse_response(&envelope("<aResponse><aResult>oops</aResult></aResponse>"), "a").unwrap();
        assert!(matches!(bad.code(), Err(RsGeError::InvalidResponse(_))));
    }
}
