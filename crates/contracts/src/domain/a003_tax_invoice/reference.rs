use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::lenient;

/// Статус документа из `GetActions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceAction {
    #[serde(rename = "ID", default, deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(rename = "NAME", default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "SELLER_ACTION", default, deserialize_with = "lenient::int32")]
    pub seller_action: i32,
    #[serde(rename = "BUYER_ACTION", default, deserialize_with = "lenient::int32")]
    pub buyer_action: i32,

    #[serde(skip)]
    pub raw: Value,
}

/// Единица измерения из `GetUnits`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, deserialize_with = "lenient::string")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,

    #[serde(skip)]
    pub raw: Value,
}

/// Сведения об организации по ИНН
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgInfo {
    #[serde(rename = "Tin", default, deserialize_with = "lenient::string")]
    pub tin: String,
    #[serde(rename = "Address", default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(rename = "IsVatPayer", default, deserialize_with = "lenient::flag")]
    pub is_vat_payer: bool,
    #[serde(rename = "IsDiplomat", default, deserialize_with = "lenient::flag")]
    pub is_diplomat: bool,
    #[serde(rename = "Name", default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(skip)]
    pub raw: Value,
}

/// Запись каталога штрихкодов eAPI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarCode {
    #[serde(rename = "BARCODE", default, deserialize_with = "lenient::string")]
    pub barcode: String,
    #[serde(rename = "GOODS_NAME", default, deserialize_with = "lenient::string")]
    pub goods_name: String,
    #[serde(rename = "UNIT_ID", default, deserialize_with = "lenient::int")]
    pub unit_id: i64,
    #[serde(rename = "UNIT_TXT", default, deserialize_with = "lenient::string")]
    pub unit_txt: String,
    #[serde(rename = "VAT_TYPE", default, deserialize_with = "lenient::int32")]
    pub vat_type: i32,
    #[serde(rename = "VAT_TYPE_TXT", default, deserialize_with = "lenient::string")]
    pub vat_type_txt: String,
    #[serde(rename = "UNIT_PRICE", default, deserialize_with = "lenient::float")]
    pub unit_price: f64,

    #[serde(skip)]
    pub raw: Value,
}

/// Результат асинхронного сохранения (`GetTransactionResult`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    #[serde(rename = "INVOICE_ID", default, deserialize_with = "lenient::int")]
    pub invoice_id: i64,

    #[serde(skip)]
    pub raw: Value,
}

macro_rules! impl_from_json {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $model {
                pub fn from_json(value: Value) -> Self {
                    let mut model: Self = lenient::decode(&value);
                    model.raw = value;
                    model
                }

                /// Каждый элемент JSON-массива; не-массив даёт пустой список
                pub fn list_from_json(data: &Value) -> Vec<Self> {
                    data.as_array()
                        .map(|items| items.iter().cloned().map(Self::from_json).collect())
                        .unwrap_or_default()
                }
            }
        )+
    };
}

impl_from_json!(InvoiceAction, Unit, OrgInfo, BarCode, TransactionResult);

/// Строка справочника акцизных товаров (`ListExcise`).
///
/// Набор колонок задаётся сервером в `Fields`, поэтому строка хранится
/// как объект с доступом по имени колонки.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExciseRow {
    pub raw: Value,
}

impl ExciseRow {
    pub fn from_json(value: Value) -> Self {
        Self { raw: value }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.raw.get(field)
    }

    pub fn text(&self, field: &str) -> String {
        self.get(field).map(lenient::value_to_string).unwrap_or_default()
    }

    pub fn number(&self, field: &str) -> f64 {
        self.get(field).map(lenient::value_to_float).unwrap_or_default()
    }

    /// Имена колонок в этой строке
    pub fn fields(&self) -> Vec<&str> {
        self.raw
            .as_object()
            .map(|object| object.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
