use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{CorrectReason, InvoiceCategory, InvoiceType, InvoiceVatType};
use crate::shared::lenient;

/// Исходный JSON каждой строки массива `source` в поле `raw` разобранной строки.
/// Строки, пропущенные при разборе, пропускаются и здесь.
fn attach_raw<T: DeserializeOwned>(items: &mut [T], source: &Value, set: impl Fn(&mut T, Value)) {
    let sources = lenient::decodable::<T>(source).map(|(_, raw)| raw);
    for (item, value) in items.iter_mut().zip(sources) {
        set(item, value.clone());
    }
}

// ============================================================================
// Товары
// ============================================================================

/// Строка товаров / услуг налогового документа
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGoods {
    #[serde(rename = "ID", default, deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(rename = "INVOICE_ID", default, deserialize_with = "lenient::int")]
    pub invoice_id: i64,
    #[serde(rename = "GOODS_NAME", default, deserialize_with = "lenient::string")]
    pub goods_name: String,
    #[serde(rename = "BARCODE", default, deserialize_with = "lenient::string")]
    pub barcode: String,
    #[serde(rename = "UNIT_ID", default, deserialize_with = "lenient::int")]
    pub unit_id: i64,
    /// Когда `unit_id == 99` («სხვა»)
    #[serde(rename = "UNIT_TXT", default, deserialize_with = "lenient::string")]
    pub unit_txt: String,
    #[serde(rename = "QUANTITY", default, deserialize_with = "lenient::float")]
    pub quantity: f64,
    #[serde(rename = "QUANTITY_EXT", default, deserialize_with = "lenient::string")]
    pub quantity_ext: String,
    #[serde(rename = "UNIT_PRICE", default, deserialize_with = "lenient::float")]
    pub unit_price: f64,
    #[serde(rename = "AMOUNT", default, deserialize_with = "lenient::float")]
    pub amount: f64,
    #[serde(rename = "VAT_AMOUNT", default, deserialize_with = "lenient::float")]
    pub vat_amount: f64,
    #[serde(rename = "EXCISE_AMOUNT", default, deserialize_with = "lenient::float")]
    pub excise_amount: f64,
    #[serde(rename = "EXCISE_ID", default, deserialize_with = "lenient::int")]
    pub excise_id: i64,
    #[serde(rename = "VAT_TYPE", default, deserialize_with = "lenient::int32")]
    pub vat_type: i32,
    #[serde(rename = "EXCISE_UNIT_PRICE", default, deserialize_with = "lenient::float")]
    pub excise_unit_price: f64,

    // OUT
    #[serde(rename = "QUANTITY_STOCK", default, deserialize_with = "lenient::float", skip_serializing)]
    pub quantity_stock: f64,
    #[serde(rename = "VAT_TYPE_TXT", default, deserialize_with = "lenient::string", skip_serializing)]
    pub vat_type_txt: String,
    #[serde(rename = "INV_TYPE", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub inv_type: i32,
    #[serde(rename = "INV_CATEGORY", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub inv_category: i32,

    #[serde(skip)]
    pub raw: Value,
}

impl InvoiceGoods {
    pub fn from_json(value: Value) -> Self {
        let mut goods: Self = lenient::decode(&value);
        goods.raw = value;
        goods
    }

    pub fn vat_type(&self) -> InvoiceVatType {
        InvoiceVatType::from_code_lossy(self.vat_type)
    }
}

// ============================================================================
// Возвраты, авансы, дистрибуция
// ============================================================================

/// Ссылка на возвращаемый документ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceReturn {
    #[serde(rename = "RETURN_INVOICE_ID", default, deserialize_with = "lenient::int")]
    pub return_invoice_id: i64,

    #[serde(rename = "CORRECTED_INVOICE_ID", default, deserialize_with = "lenient::int", skip_serializing)]
    pub corrected_invoice_id: i64,
    #[serde(rename = "INV_NUMBER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub inv_number: String,
    #[serde(rename = "INV_SERIE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub inv_serie: String,
    #[serde(rename = "BUYER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub buyer: String,
    #[serde(rename = "OPERATION_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub operation_date: String,

    #[serde(skip)]
    pub raw: Value,
}

/// Зачёт аванса
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceAdvance {
    #[serde(rename = "ID", default, deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(rename = "AMOUNT", default, deserialize_with = "lenient::float")]
    pub amount: f64,
    #[serde(
        rename = "OPERATION_DATE",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub operation_date: String,

    #[serde(rename = "PARENT_INVOICE_ID", default, deserialize_with = "lenient::int", skip_serializing)]
    pub parent_invoice_id: i64,
    #[serde(rename = "INV_NUMBER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub inv_number: String,
    #[serde(rename = "INV_SERIE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub inv_serie: String,
    #[serde(rename = "BUYER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub buyer: String,
    #[serde(rename = "SELLER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub seller: String,
    #[serde(rename = "INV_CATEGORY", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub inv_category: i32,
    #[serde(rename = "INV_TYPE", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub inv_type: i32,
    #[serde(rename = "AMOUNT_FULL", default, deserialize_with = "lenient::float", skip_serializing)]
    pub amount_full: f64,
    #[serde(rename = "AMOUNT_MAX", default, deserialize_with = "lenient::float", skip_serializing)]
    pub amount_max: f64,
    #[serde(rename = "ACTIVATE_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub activate_date: String,

    #[serde(skip)]
    pub raw: Value,
}

/// Под-документ дистрибуции (только чтение)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubInvoiceDistribution {
    #[serde(rename = "PARENT_INVOICE_ID", default, deserialize_with = "lenient::int")]
    pub parent_invoice_id: i64,
    #[serde(rename = "SUB_INVOICE_ID", default, deserialize_with = "lenient::int")]
    pub sub_invoice_id: i64,
    #[serde(rename = "INV_NUMBER", default, deserialize_with = "lenient::string")]
    pub inv_number: String,
    #[serde(rename = "INV_SERIE", default, deserialize_with = "lenient::string")]
    pub inv_serie: String,
    #[serde(rename = "BUYER", default, deserialize_with = "lenient::string")]
    pub buyer: String,
    #[serde(rename = "SELLER", default, deserialize_with = "lenient::string")]
    pub seller: String,
    #[serde(rename = "INV_CATEGORY", default, deserialize_with = "lenient::int32")]
    pub inv_category: i32,
    #[serde(rename = "INV_TYPE", default, deserialize_with = "lenient::int32")]
    pub inv_type: i32,
    #[serde(rename = "AMOUNT_FULL", default, deserialize_with = "lenient::float")]
    pub amount_full: f64,
    #[serde(rename = "GOODS_AMOUNT_SUM", default, deserialize_with = "lenient::float")]
    pub goods_amount_sum: f64,
    #[serde(rename = "GOODS_SUM", default, deserialize_with = "lenient::float")]
    pub goods_sum: f64,
    #[serde(rename = "AMOUNT_MAX", default, deserialize_with = "lenient::float")]
    pub amount_max: f64,
    #[serde(rename = "ACTIVATE_DATE", default, deserialize_with = "lenient::string")]
    pub activate_date: String,
    #[serde(rename = "OPERATION_DATE", default, deserialize_with = "lenient::string")]
    pub operation_date: String,

    #[serde(skip)]
    pub raw: Value,
}

// ============================================================================
// Налоговый документ
// ============================================================================

/// Налоговый документ (საგადასახადო დოკუმენტი).
///
/// Сериализуются только поля, которые сервис принимает на запись;
/// поля, заполняемые сервером, только читаются.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// 0 для нового документа
    #[serde(rename = "ID", default, deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(rename = "INV_SERIE", default, deserialize_with = "lenient::string")]
    pub inv_serie: String,
    #[serde(rename = "INV_NUMBER", default, deserialize_with = "lenient::string")]
    pub inv_number: String,
    #[serde(rename = "INV_CATEGORY", default, deserialize_with = "lenient::int32")]
    pub inv_category: i32,
    #[serde(rename = "INV_TYPE", default, deserialize_with = "lenient::int32")]
    pub inv_type: i32,
    #[serde(rename = "SELLER_ACTION", default, deserialize_with = "lenient::int32")]
    pub seller_action: i32,
    #[serde(rename = "BUYER_ACTION", default, deserialize_with = "lenient::int32")]
    pub buyer_action: i32,
    #[serde(rename = "OPERATION_DATE", default, deserialize_with = "lenient::string")]
    pub operation_date: String,
    #[serde(rename = "TRANS_START_DATE", default, deserialize_with = "lenient::string")]
    pub trans_start_date: String,
    #[serde(rename = "CORRECT_REASON_ID", default, deserialize_with = "lenient::int32")]
    pub correct_reason_id: i32,
    #[serde(rename = "TIN_SELLER", default, deserialize_with = "lenient::string")]
    pub tin_seller: String,
    #[serde(rename = "TIN_BUYER", default, deserialize_with = "lenient::string")]
    pub tin_buyer: String,
    #[serde(
        rename = "FOREIGN_BUYER",
        default,
        deserialize_with = "lenient::flag",
        serialize_with = "lenient::flag_as_string"
    )]
    pub foreign_buyer: bool,
    #[serde(rename = "AMOUNT_FULL", default, deserialize_with = "lenient::float")]
    pub amount_full: f64,
    #[serde(rename = "AMOUNT_EXCISE", default, deserialize_with = "lenient::float")]
    pub amount_excise: f64,
    #[serde(rename = "AMOUNT_VAT", default, deserialize_with = "lenient::float")]
    pub amount_vat: f64,
    #[serde(rename = "TRANS_START_ADDRESS", default, deserialize_with = "lenient::string")]
    pub trans_start_address: String,
    #[serde(rename = "TRANS_END_ADDRESS", default, deserialize_with = "lenient::string")]
    pub trans_end_address: String,
    #[serde(rename = "TRANS_START_ADDRESS_NO", default, deserialize_with = "lenient::string")]
    pub trans_start_address_no: String,
    #[serde(rename = "TRANS_END_ADDRESS_NO", default, deserialize_with = "lenient::string")]
    pub trans_end_address_no: String,
    #[serde(rename = "TRANS_TYPE", default, deserialize_with = "lenient::int32")]
    pub trans_type: i32,
    #[serde(rename = "TRANS_TYPE_TXT", default, deserialize_with = "lenient::string")]
    pub trans_type_txt: String,
    #[serde(rename = "TRANS_COMPANY_TIN", default, deserialize_with = "lenient::string")]
    pub trans_company_tin: String,
    #[serde(rename = "TRANS_DRIVER_TIN", default, deserialize_with = "lenient::string")]
    pub trans_driver_tin: String,
    #[serde(
        rename = "TRANS_DRIVER_FOREIGN",
        default,
        deserialize_with = "lenient::flag",
        serialize_with = "lenient::flag_as_string"
    )]
    pub trans_driver_foreign: bool,
    #[serde(rename = "TRANS_DRIVER_COUNTRY", default, deserialize_with = "lenient::string")]
    pub trans_driver_country: String,
    #[serde(rename = "TRANS_CAR_MODEL", default, deserialize_with = "lenient::string")]
    pub trans_car_model: String,
    #[serde(rename = "TRANS_CAR_NO", default, deserialize_with = "lenient::string")]
    pub trans_car_no: String,
    #[serde(rename = "TRANS_TRAILER_NO", default, deserialize_with = "lenient::string")]
    pub trans_trailer_no: String,
    /// Сервис хранит стоимость перевозки строкой
    #[serde(rename = "TRANS_COST", default, deserialize_with = "lenient::string")]
    pub trans_cost: String,
    /// 1 - покупатель, 2 - продавец
    #[serde(rename = "TRANS_COST_PAYER", default, deserialize_with = "lenient::int32")]
    pub trans_cost_payer: i32,
    #[serde(rename = "INV_COMMENT", default, deserialize_with = "lenient::string")]
    pub inv_comment: String,
    /// Для корректировки: ID исправляемого документа
    #[serde(rename = "PREV_CORRECTION_ID", default, deserialize_with = "lenient::int")]
    pub prev_correction_id: i64,
    #[serde(rename = "TEMPLATE_NAME", default, deserialize_with = "lenient::string")]
    pub template_name: String,

    #[serde(rename = "INVOICE_GOODS", default, deserialize_with = "lenient::list")]
    pub invoice_goods: Vec<InvoiceGoods>,
    #[serde(
        rename = "INVOICE_PARENT_GOODS",
        default,
        deserialize_with = "lenient::list",
        serialize_with = "lenient::empty_list"
    )]
    pub invoice_parent_goods: Vec<InvoiceGoods>,
    #[serde(rename = "INVOICE_RETURN", default, deserialize_with = "lenient::list")]
    pub invoice_return: Vec<InvoiceReturn>,
    #[serde(
        rename = "SUB_INVOICES_DISTRIBUTION",
        default,
        deserialize_with = "lenient::list",
        serialize_with = "lenient::empty_list"
    )]
    pub sub_invoices_distribution: Vec<SubInvoiceDistribution>,
    #[serde(rename = "INVOICE_ADVANCE", default, deserialize_with = "lenient::list")]
    pub invoice_advance: Vec<InvoiceAdvance>,
    #[serde(rename = "INVOICE_OIL_DOCS", default, deserialize_with = "lenient::list")]
    pub invoice_oil_docs: Vec<Value>,

    // OUT
    #[serde(rename = "ACTIVATE_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub activate_date: String,
    #[serde(rename = "CREATE_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub create_date: String,
    #[serde(rename = "CONFIRM_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub confirm_date: String,
    #[serde(rename = "REFUSE_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub refuse_date: String,
    #[serde(rename = "REQUEST_CANCEL_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub request_cancel_date: String,
    #[serde(rename = "DELIVERY_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub delivery_date: String,
    #[serde(rename = "AGREE_CANCEL_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub agree_cancel_date: String,
    #[serde(rename = "CORRECT_DATE", default, deserialize_with = "lenient::string", skip_serializing)]
    pub correct_date: String,
    #[serde(rename = "NAME_SELLER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub name_seller: String,
    #[serde(rename = "NAME_BUYER", default, deserialize_with = "lenient::string", skip_serializing)]
    pub name_buyer: String,
    /// Номер декларации продавца, к которой привязан документ
    #[serde(rename = "SEQNUM_SELLER", default, deserialize_with = "lenient::opt_int", skip_serializing)]
    pub seqnum_seller: Option<i64>,
    #[serde(rename = "SEQNUM_BUYER", default, deserialize_with = "lenient::opt_int", skip_serializing)]
    pub seqnum_buyer: Option<i64>,
    #[serde(rename = "SELLER_STATUS", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub seller_status: i32,
    #[serde(rename = "BUYER_STATUS", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub buyer_status: i32,
    #[serde(rename = "STATUS_TXT_GEO", default, deserialize_with = "lenient::string", skip_serializing)]
    pub status_txt_geo: String,
    #[serde(rename = "STATUS_TXT_ENG", default, deserialize_with = "lenient::string", skip_serializing)]
    pub status_txt_eng: String,
    #[serde(rename = "AMOUNT_MAX", default, deserialize_with = "lenient::float", skip_serializing)]
    pub amount_max: f64,
    #[serde(rename = "TRANS_COMPANY_NAME", default, deserialize_with = "lenient::string", skip_serializing)]
    pub trans_company_name: String,
    #[serde(rename = "TRANS_DRIVER_NAME", default, deserialize_with = "lenient::string", skip_serializing)]
    pub trans_driver_name: String,
    /// Родительский документ дистрибуции; сервис задаёт его сам
    #[serde(rename = "PARENT_ID", default, deserialize_with = "lenient::opt_int", skip_serializing)]
    pub parent_id: Option<i64>,
    #[serde(rename = "NEXT_CORRECTION_ID", default, deserialize_with = "lenient::opt_int", skip_serializing)]
    pub next_correction_id: Option<i64>,
    /// 1 - продавец, 2 - покупатель, 3 - перевозчик
    #[serde(rename = "USER_ROLE", default, deserialize_with = "lenient::int32", skip_serializing)]
    pub user_role: i32,

    #[serde(skip)]
    pub raw: Value,
}

impl Invoice {
    pub fn new(category: InvoiceCategory, invoice_type: InvoiceType) -> Self {
        Self {
            inv_category: category.code(),
            inv_type: invoice_type.code(),
            ..Default::default()
        }
    }

    /// Разбор объекта `INVOICE`; исходный JSON сохраняется в `raw`
    /// у документа и у каждой вложенной строки
    pub fn from_json(value: Value) -> Self {
        let mut invoice: Self = lenient::decode(&value);

        attach_raw(&mut invoice.invoice_goods, &value["INVOICE_GOODS"], |g, raw| g.raw = raw);
        attach_raw(&mut invoice.invoice_parent_goods, &value["INVOICE_PARENT_GOODS"], |g, raw| g.raw = raw);
        attach_raw(&mut invoice.invoice_return, &value["INVOICE_RETURN"], |r, raw| r.raw = raw);
        attach_raw(&mut invoice.sub_invoices_distribution, &value["SUB_INVOICES_DISTRIBUTION"], |s, raw| {
            s.raw = raw
        });
        attach_raw(&mut invoice.invoice_advance, &value["INVOICE_ADVANCE"], |a, raw| a.raw = raw);

        invoice.raw = value;
        invoice
    }

    /// JSON для `SaveInvoice` / `ActivateInvoice`
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Добавить строку; `amount = quantity × unit_price` без округления.
    /// Остальные поля заполняются через возвращённую ссылку.
    pub fn add_goods(&mut self, goods_name: impl Into<String>, quantity: f64, unit_price: f64) -> &mut InvoiceGoods {
        self.invoice_goods.push(InvoiceGoods {
            goods_name: goods_name.into(),
            quantity,
            unit_price,
            amount: quantity * unit_price,
            unit_id: 1,
            ..Default::default()
        });

        let last = self.invoice_goods.len() - 1;
        &mut self.invoice_goods[last]
    }

    pub fn category(&self) -> InvoiceCategory {
        InvoiceCategory::from_code_lossy(self.inv_category)
    }

    pub fn invoice_type(&self) -> InvoiceType {
        InvoiceType::from_code_lossy(self.inv_type)
    }

    pub fn correct_reason(&self) -> CorrectReason {
        CorrectReason::from_code_lossy(self.correct_reason_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "ID": 1001,
            "INV_SERIE": "ეა",
            "INV_NUMBER": "0123456",
            "INV_CATEGORY": 1,
            "INV_TYPE": "2",
            "FOREIGN_BUYER": "true",
            "TRANS_DRIVER_FOREIGN": false,
            "AMOUNT_FULL": "118.0",
            "TRANS_COST": 25,
            "NAME_SELLER": "შპს გამყიდველი",
            "SEQNUM_SELLER": null,
            "SEQNUM_BUYER": "77",
            "PARENT_ID": 55,
            "CREATE_DATE": "2024-01-10T12:00:00",
            "INVOICE_GOODS": [
                {"ID": 1, "GOODS_NAME": "ფქვილი", "QUANTITY": 2, "UNIT_PRICE": 59, "AMOUNT": 118,
                 "VAT_TYPE": 0, "VAT_TYPE_TXT": "ჩვეულებრივი", "EXTRA": "x"}
            ],
            "INVOICE_PARENT_GOODS": [{"ID": 9}],
            "SUB_INVOICES_DISTRIBUTION": [{"SUB_INVOICE_ID": 3}],
            "INVOICE_RETURN": null,
            "INVOICE_ADVANCE": [{"ID": 4, "AMOUNT": 10, "INV_NUMBER": "A-1"}]
        })
    }

    #[test]
    fn test_from_json_maps_all_sections() {
        let invoice = Invoice::from_json(sample_json());

        assert_eq!(invoice.id, 1001);
        assert_eq!(invoice.invoice_type(), InvoiceType::WithTransport);
        assert_eq!(invoice.category(), InvoiceCategory::GoodsService);
        assert!(invoice.foreign_buyer);
        assert!(!invoice.trans_driver_foreign);
        assert_eq!(invoice.amount_full, 118.0);
        assert_eq!(invoice.trans_cost, "25");
        assert_eq!(invoice.seqnum_seller, None);
        assert_eq!(invoice.seqnum_buyer, Some(77));
        assert_eq!(invoice.parent_id, Some(55));
        assert!(invoice.invoice_return.is_empty());
        assert_eq!(invoice.invoice_goods[0].vat_type_txt, "ჩვეულებრივი");
        assert_eq!(invoice.invoice_goods[0].raw["EXTRA"], json!("x"));
        assert_eq!(invoice.sub_invoices_distribution[0].sub_invoice_id, 3);
        assert_eq!(invoice.invoice_advance[0].inv_number, "A-1");
        assert_eq!(invoice.raw["NAME_SELLER"], json!("შპს გამყიდველი"));
    }

    #[test]
    fn test_null_goods_row_does_not_wipe_invoice() {
        let invoice = Invoice::from_json(json!({
            "ID": 777,
            "INV_SERIE": "ეა",
            "INV_NUMBER": 42,
            "INVOICE_GOODS": [null, {"GOODS_NAME": "a", "QUANTITY": 1, "EXTRA": "kept"}, "junk"],
            "INVOICE_ADVANCE": ""
        }));

        assert_eq!(invoice.id, 777);
        assert_eq!(invoice.inv_serie, "ეა");
        assert_eq!(invoice.inv_number, "42");
        assert_eq!(invoice.invoice_goods.len(), 1);
        assert_eq!(invoice.invoice_goods[0].goods_name, "a");
        assert_eq!(invoice.invoice_goods[0].raw["EXTRA"], json!("kept"));
        assert!(invoice.invoice_advance.is_empty());
    }

    #[test]
    fn test_to_json_writes_only_writable_fields() {
        let invoice = Invoice::from_json(sample_json());
        let out = invoice.to_json();

        assert_eq!(out["FOREIGN_BUYER"], json!("true"));
        assert_eq!(out["TRANS_DRIVER_FOREIGN"], json!("false"));
        assert_eq!(out["INVOICE_PARENT_GOODS"], json!([]));
        assert_eq!(out["SUB_INVOICES_DISTRIBUTION"], json!([]));
        assert_eq!(out["INVOICE_RETURN"], json!([]));
        assert_eq!(out["INV_TYPE"], json!(2));

        for out_field in ["CREATE_DATE", "NAME_SELLER", "SEQNUM_BUYER", "PARENT_ID", "USER_ROLE"] {
            assert!(out.get(out_field).is_none(), "{} must not be sent", out_field);
        }

        let goods = &out["INVOICE_GOODS"][0];
        assert_eq!(goods["GOODS_NAME"], json!("ფქვილი"));
        assert!(goods.get("VAT_TYPE_TXT").is_none());
        assert!(goods.get("QUANTITY_STOCK").is_none());

        let advance = &out["INVOICE_ADVANCE"][0];
        assert_eq!(advance, &json!({"ID": 4, "AMOUNT": 10.0}));
    }

    #[test]
    fn test_advance_operation_date_when_set() {
        let advance = InvoiceAdvance {
            id: 1,
            amount: 5.0,
            operation_date: "2024-02-01".into(),
            ..Default::default()
        };
        let out = serde_json::to_value(&advance).unwrap();
        assert_eq!(out["OPERATION_DATE"], json!("2024-02-01"));
    }

    #[test]
    fn test_return_serializes_only_id() {
        let ret = InvoiceReturn {
            return_invoice_id: 12,
            inv_number: "X".into(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&ret).unwrap(), json!({"RETURN_INVOICE_ID": 12}));
    }

    #[test]
    fn test_add_goods_amount_is_not_rounded() {
        let mut invoice = Invoice::new(InvoiceCategory::GoodsService, InvoiceType::WithoutTransport);
        let goods = invoice.add_goods("თხილი", 3.0, 0.1);
        goods.vat_type = InvoiceVatType::Exempt.code();

        assert_eq!(invoice.invoice_goods[0].amount, 3.0 * 0.1);
        assert_eq!(invoice.invoice_goods[0].unit_id, 1);
        assert_eq!(invoice.invoice_goods[0].vat_type(), InvoiceVatType::Exempt);
    }

    #[test]
    fn test_new_invoice_defaults() {
        let invoice = Invoice::new(InvoiceCategory::Advance, InvoiceType::Advance);
        let out = invoice.to_json();
        assert_eq!(out["ID"], json!(0));
        assert_eq!(out["INV_CATEGORY"], json!(4));
        assert_eq!(out["FOREIGN_BUYER"], json!("false"));
        assert_eq!(invoice.correct_reason(), CorrectReason::None);
    }
}
