use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::enums::InvoiceListType;

/// Значение `MAXIMUM_ROWS`, которое сервис подставляет сам
pub const DEFAULT_MAXIMUM_ROWS: i64 = 10;

/// Отчётный период декларации: `YYYY` или `YYYYMM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationPeriod {
    pub year: i32,
    pub month: Option<u32>,
}

impl OperationPeriod {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self { year, month: Some(month) }
    }

    pub fn new(year: i32, month: Option<u32>) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for OperationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(month) => write!(f, "{}{:02}", self.year, month),
            None => write!(f, "{}", self.year),
        }
    }
}

impl Serialize for OperationPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Фильтры `ListInvoices`. Незаданные поля не отправляются.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct InvoiceListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_inv_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_category: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refuse_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_cancel_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agree_cancel_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_car_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_car_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_trailer_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_cost_payer: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_action_txt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_action_txt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tin_buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decl_operation_period: Option<OperationPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_rows: Option<i64>,
    /// Какие документы выбирать (`TYPE`)
    #[serde(rename = "TYPE", skip_serializing_if = "Option::is_none")]
    pub list_type: Option<InvoiceListType>,
}

impl InvoiceListFilter {
    pub fn of_type(list_type: InvoiceListType) -> Self {
        Self {
            list_type: Some(list_type),
            ..Default::default()
        }
    }

    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

/// Фильтры `ListBarCodes`
#[derive(Debug, Clone, PartialEq)]
pub struct BarCodeFilter {
    pub barcode: String,
    pub goods_name: String,
    pub unit_txt: String,
    pub vat_type_txt: String,
    pub unit_price: Option<f64>,
    /// 0 - все строки
    pub maximum_rows: i64,
}

impl Default for BarCodeFilter {
    fn default() -> Self {
        Self {
            barcode: String::new(),
            goods_name: String::new(),
            unit_txt: String::new(),
            vat_type_txt: String::new(),
            unit_price: None,
            maximum_rows: DEFAULT_MAXIMUM_ROWS,
        }
    }
}

impl BarCodeFilter {
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        insert_non_empty(&mut payload, "BARCODE", &self.barcode);
        insert_non_empty(&mut payload, "GOODS_NAME", &self.goods_name);
        insert_non_empty(&mut payload, "UNIT_TXT", &self.unit_txt);
        insert_non_empty(&mut payload, "VAT_TYPE_TXT", &self.vat_type_txt);
        if let Some(price) = self.unit_price {
            payload.insert("UNIT_PRICE".into(), Value::from(price));
        }
        if self.maximum_rows != DEFAULT_MAXIMUM_ROWS {
            payload.insert("MAXIMUM_ROWS".into(), Value::from(self.maximum_rows));
        }
        Value::Object(payload)
    }
}

/// Фильтры `ListExcise`. Диапазоны дат: `DD-MM-YYYY:DD-MM-YYYY`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExciseFilter {
    pub product_name: String,
    pub effect_date: String,
    pub end_date: String,
    pub maximum_rows: i64,
}

impl Default for ExciseFilter {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            effect_date: String::new(),
            end_date: String::new(),
            maximum_rows: DEFAULT_MAXIMUM_ROWS,
        }
    }
}

impl ExciseFilter {
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        insert_non_empty(&mut payload, "PRODUCT_NAME", &self.product_name);
        insert_non_empty(&mut payload, "EFFECT_DATE", &self.effect_date);
        insert_non_empty(&mut payload, "END_DATE", &self.end_date);
        if self.maximum_rows != DEFAULT_MAXIMUM_ROWS {
            payload.insert("MAXIMUM_ROWS".into(), Value::from(self.maximum_rows));
        }
        Value::Object(payload)
    }
}

fn insert_non_empty(payload: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        payload.insert(key.to_string(), Value::from(value));
    }
}
