use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::lenient;

/// Оформленная таможенная декларация (ASYCUDA)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomsDeclaration {
    #[serde(rename = "DECLARATION_NUMBER", default, deserialize_with = "lenient::string")]
    pub declaration_number: String,
    #[serde(rename = "ASSESSMENT_DATE", default, deserialize_with = "lenient::string")]
    pub assessment_date: String,
    /// Код ТН ВЭД (HS)
    #[serde(rename = "COMMODITY_CODE", default, deserialize_with = "lenient::string")]
    pub commodity_code: String,
    #[serde(rename = "DESCRIPTION", default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(rename = "QUANTITY", default, deserialize_with = "lenient::float")]
    pub quantity: f64,
    /// кг
    #[serde(rename = "NET_WEIGHT", default, deserialize_with = "lenient::float")]
    pub net_weight: f64,
    #[serde(rename = "GROSS_WEIGHT", default, deserialize_with = "lenient::float")]
    pub gross_weight: f64,
    #[serde(rename = "STATISTICAL_VALUE", default, deserialize_with = "lenient::float")]
    pub statistical_value: f64,
    #[serde(rename = "CUSTOMS_VALUE", default, deserialize_with = "lenient::float")]
    pub customs_value: f64,
    #[serde(rename = "DUTY_AMOUNT", default, deserialize_with = "lenient::float")]
    pub duty_amount: f64,
    #[serde(rename = "VAT_AMOUNT", default, deserialize_with = "lenient::float")]
    pub vat_amount: f64,
    #[serde(rename = "EXCISE_AMOUNT", default, deserialize_with = "lenient::float")]
    pub excise_amount: f64,
    #[serde(rename = "COUNTRY_OF_ORIGIN", default, deserialize_with = "lenient::string")]
    pub country_of_origin: String,
    #[serde(rename = "COUNTRY_OF_DISPATCH", default, deserialize_with = "lenient::string")]
    pub country_of_dispatch: String,

    /// Исходный объект со всеми полями, включая не отображённые
    #[serde(skip)]
    pub raw: Value,
}

impl CustomsDeclaration {
    pub fn from_json(value: Value) -> Self {
        let mut declaration: Self = lenient::decode(&value);
        declaration.raw = value;
        declaration
    }

    /// Декларации из поля `DATA`; не-массив даёт пустой список
    pub fn list_from_json(data: &Value) -> Vec<Self> {
        match data {
            Value::Array(items) => items.iter().cloned().map(Self::from_json).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_raw_and_coerces() {
        let value = json!({
            "DECLARATION_NUMBER": 10012,
            "ASSESSMENT_DATE": "2024-03-01",
            "QUANTITY": "12.5",
            "VAT_AMOUNT": null,
            "COUNTRY_OF_ORIGIN": "CN",
            "EXTRA_FIELD": "kept"
        });
        let declaration = CustomsDeclaration::from_json(value.clone());

        assert_eq!(declaration.declaration_number, "10012");
        assert_eq!(declaration.quantity, 12.5);
        assert_eq!(declaration.vat_amount, 0.0);
        assert_eq!(declaration.country_of_origin, "CN");
        assert_eq!(declaration.raw["EXTRA_FIELD"], json!("kept"));
        assert_eq!(declaration.raw, value);
    }

    #[test]
    fn test_list_from_non_array() {
        assert!(CustomsDeclaration::list_from_json(&json!({"foo": 1})).is_empty());
        assert!(CustomsDeclaration::list_from_json(&Value::Null).is_empty());
        assert_eq!(CustomsDeclaration::list_from_json(&json!([{}, {}])).len(), 2);
    }
}
