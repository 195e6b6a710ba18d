use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::enums::{CategoryType, TransportCostPayer, VatType, WayBillStatus, WayBillType};
use crate::shared::XmlElement;

/// Формат дат, который принимает сервис
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Округление до копеек; ровно половина округляется к чётному
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Разбор даты в одном из ISO-вариантов, которые возвращает сервис
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

// ============================================================================
// Товары
// ============================================================================

/// Товарная позиция накладной
#[derive(Debug, Clone, PartialEq)]
pub struct GoodsItem {
    /// 0 для новой позиции
    pub id: i64,
    pub name: String,
    pub unit_id: i64,
    /// Обязателен, когда `unit_id == 99`
    pub unit_txt: String,
    pub quantity: f64,
    pub price: f64,
    /// 1 - активна, -1 - удалить позицию при сохранении
    pub status: i32,
    pub amount: f64,
    /// Штрихкод или регистрационный номер лекарства
    pub bar_code: String,
    pub akciz_id: i64,
    pub vat_type: VatType,
    pub quantity_ext: f64,
    pub wood_label: String,
    pub wood_type_id: i64,
}

impl Default for GoodsItem {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            unit_id: 1,
            unit_txt: String::new(),
            quantity: 0.0,
            price: 0.0,
            status: 1,
            amount: 0.0,
            bar_code: String::new(),
            akciz_id: 0,
            vat_type: VatType::Regular,
            quantity_ext: 0.0,
            wood_label: String::new(),
            wood_type_id: 0,
        }
    }
}

impl GoodsItem {
    pub fn to_xml(&self) -> XmlElement {
        let mut goods = XmlElement::new("GOODS");
        goods.add_child("ID", self.id);
        goods.add_child("W_NAME", &self.name);
        goods.add_child("UNIT_ID", self.unit_id);
        goods.add_child("UNIT_TXT", &self.unit_txt);
        goods.add_child("QUANTITY", self.quantity);
        goods.add_child("PRICE", self.price);
        goods.add_child("STATUS", self.status);
        goods.add_child("AMOUNT", self.amount);
        goods.add_child("BAR_CODE", &self.bar_code);
        goods.add_child("A_ID", self.akciz_id);
        goods.add_child("VAT_TYPE", self.vat_type.code());
        goods.add_child("QUANTITY_EXT", self.quantity_ext);
        goods.add_child("WOOD_LABEL", &self.wood_label);
        goods.add_child("W_ID", self.wood_type_id);
        goods
    }

    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            name: element.get_text("W_NAME", ""),
            unit_id: element.get_int("UNIT_ID", 0),
            unit_txt: element.get_text("UNIT_TXT", ""),
            quantity: element.get_decimal("QUANTITY", 0.0),
            price: element.get_decimal("PRICE", 0.0),
            status: element.get_i32("STATUS", 1),
            amount: element.get_decimal("AMOUNT", 0.0),
            bar_code: element.get_text("BAR_CODE", ""),
            akciz_id: element.get_int("A_ID", 0),
            vat_type: VatType::from_code_lossy(element.get_i32("VAT_TYPE", 0)),
            quantity_ext: element.get_decimal("QUANTITY_EXT", 0.0),
            wood_label: element.get_text("WOOD_LABEL", ""),
            wood_type_id: element.get_int("W_ID", 0),
        }
    }
}

// ============================================================================
// Документы на древесину и дочерние накладные
// ============================================================================

/// Документ происхождения древесины
#[derive(Debug, Clone, PartialEq)]
pub struct WoodDocument {
    pub id: i64,
    pub doc_number: String,
    pub doc_date: Option<NaiveDateTime>,
    pub doc_description: String,
    pub status: i32,
}

impl Default for WoodDocument {
    fn default() -> Self {
        Self {
            id: 0,
            doc_number: String::new(),
            doc_date: None,
            doc_description: String::new(),
            status: 1,
        }
    }
}

impl WoodDocument {
    pub fn to_xml(&self) -> XmlElement {
        let mut doc = XmlElement::new("WOODDOCUMENT");
        doc.add_child("ID", self.id);
        doc.add_child("DOC_N", &self.doc_number);
        if let Some(date) = self.doc_date {
            doc.add_child("DOC_DATE", date.format(DATE_TIME_FORMAT));
        }
        doc.add_child("DOC_DESC", &self.doc_description);
        doc.add_child("STATUS", self.status);
        doc
    }

    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            doc_number: element.get_text("DOC_N", ""),
            doc_date: parse_date_time(&element.get_text("DOC_DATE", "")),
            doc_description: element.get_text("DOC_DESC", ""),
            status: element.get_i32("STATUS", 1),
        }
    }
}

/// Ссылка на под-накладную дистрибуции
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubWayBill {
    pub id: i64,
    pub waybill_number: String,
}

impl SubWayBill {
    pub fn to_xml(&self) -> XmlElement {
        let mut sub = XmlElement::new("SUB_WAYBILL");
        sub.add_child("ID", self.id);
        sub.add_child("WAYBILL_NUMBER", &self.waybill_number);
        sub
    }

    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            waybill_number: element.get_text("WAYBILL_NUMBER", ""),
        }
    }
}

// ============================================================================
// Накладная
// ============================================================================

/// Электронная товарно-транспортная накладная (ზედნადები)
#[derive(Debug, Clone, PartialEq)]
pub struct WayBill {
    /// 0 для новой накладной
    pub id: i64,
    pub waybill_type: WayBillType,
    pub buyer_tin: String,
    /// 1 - гражданин Грузии, 0 - иностранец
    pub check_buyer_tin: i32,
    pub buyer_name: String,
    pub start_address: String,
    pub end_address: String,
    pub driver_tin: String,
    pub check_driver_tin: i32,
    pub driver_name: String,
    pub transport_cost: f64,
    pub reception_info: String,
    pub receiver_info: String,
    pub delivery_date: String,
    pub status: WayBillStatus,
    pub seller_un_id: i64,
    pub parent_id: String,
    pub full_amount: f64,
    pub car_number: String,
    pub waybill_number: String,
    pub s_user_id: i64,
    pub begin_date: String,
    pub transport_cost_payer: TransportCostPayer,
    pub transport_type_id: i64,
    /// Заполняется, когда тип транспорта «სხვა»
    pub transport_type_txt: String,
    pub comment: String,
    pub category: CategoryType,
    pub is_medicine: i32,
    pub wood_labels: String,
    /// ИНН перевозчика; отправляется только если задан
    pub transporter_tin: String,
    pub goods_list: Vec<GoodsItem>,
    pub wood_docs_list: Vec<WoodDocument>,
    pub sub_waybills: Vec<SubWayBill>,

    // Поля только для чтения (заполняет сервер)
    pub create_date: String,
    pub activate_date: String,
    pub close_date: String,
    pub customs_status: String,
    pub customs_name: String,
}

impl Default for WayBill {
    fn default() -> Self {
        Self {
            id: 0,
            waybill_type: WayBillType::Transportation,
            buyer_tin: String::new(),
            check_buyer_tin: 1,
            buyer_name: String::new(),
            start_address: String::new(),
            end_address: String::new(),
            driver_tin: String::new(),
            check_driver_tin: 1,
            driver_name: String::new(),
            transport_cost: 0.0,
            reception_info: String::new(),
            receiver_info: String::new(),
            delivery_date: String::new(),
            status: WayBillStatus::Saved,
            seller_un_id: 0,
            parent_id: String::new(),
            full_amount: 0.0,
            car_number: String::new(),
            waybill_number: String::new(),
            s_user_id: 0,
            begin_date: String::new(),
            transport_cost_payer: TransportCostPayer::Seller,
            transport_type_id: 1,
            transport_type_txt: String::new(),
            comment: String::new(),
            category: CategoryType::Regular,
            is_medicine: 0,
            wood_labels: String::new(),
            transporter_tin: String::new(),
            goods_list: Vec::new(),
            wood_docs_list: Vec::new(),
            sub_waybills: Vec::new(),
            create_date: String::new(),
            activate_date: String::new(),
            close_date: String::new(),
            customs_status: String::new(),
            customs_name: String::new(),
        }
    }
}

impl WayBill {
    /// Новая накладная в памяти; на сервер не отправляется
    pub fn new(
        waybill_type: WayBillType,
        buyer_tin: impl Into<String>,
        buyer_name: impl Into<String>,
        start_address: impl Into<String>,
        end_address: impl Into<String>,
    ) -> Self {
        Self {
            waybill_type,
            buyer_tin: buyer_tin.into(),
            buyer_name: buyer_name.into(),
            start_address: start_address.into(),
            end_address: end_address.into(),
            ..Default::default()
        }
    }

    /// Добавить товарную позицию и пересчитать итог.
    ///
    /// `amount` округляется до тетри; необязательные поля (`unit_txt`,
    /// `akciz_id`, `vat_type`, ...) можно заполнить через возвращённую ссылку.
    pub fn add_goods(
        &mut self,
        name: impl Into<String>,
        unit_id: i64,
        quantity: f64,
        price: f64,
        bar_code: impl Into<String>,
    ) -> &mut GoodsItem {
        self.goods_list.push(GoodsItem {
            name: name.into(),
            unit_id,
            quantity,
            price,
            amount: round2(quantity * price),
            bar_code: bar_code.into(),
            ..Default::default()
        });
        self.recalculate_total();

        let last = self.goods_list.len() - 1;
        &mut self.goods_list[last]
    }

    pub fn add_wood_document(
        &mut self,
        doc_number: impl Into<String>,
        doc_date: NaiveDateTime,
        doc_description: impl Into<String>,
    ) -> &mut WoodDocument {
        self.wood_docs_list.push(WoodDocument {
            doc_number: doc_number.into(),
            doc_date: Some(doc_date),
            doc_description: doc_description.into(),
            ..Default::default()
        });

        let last = self.wood_docs_list.len() - 1;
        &mut self.wood_docs_list[last]
    }

    /// Итог по активным позициям (status == 1)
    pub fn recalculate_total(&mut self) {
        let total: f64 = self
            .goods_list
            .iter()
            .filter(|goods| goods.status == 1)
            .map(|goods| goods.amount)
            .sum();
        self.full_amount = round2(total);
    }

    /// Элемент `<WAYBILL>` для параметра `waybill` метода `save_waybill`
    pub fn to_xml(&self) -> XmlElement {
        let mut wb = XmlElement::new("WAYBILL");

        let subs = wb.add_container("SUB_WAYBILLS");
        for sub in &self.sub_waybills {
            subs.push_child(sub.to_xml());
        }

        let goods = wb.add_container("GOODS_LIST");
        for item in &self.goods_list {
            goods.push_child(item.to_xml());
        }

        let wood_docs = wb.add_container("WOOD_DOCS_LIST");
        for doc in &self.wood_docs_list {
            wood_docs.push_child(doc.to_xml());
        }

        wb.add_child("ID", self.id);
        wb.add_child("TYPE", self.waybill_type.code());
        wb.add_child("BUYER_TIN", &self.buyer_tin);
        wb.add_child("CHEK_BUYER_TIN", self.check_buyer_tin);
        wb.add_child("BUYER_NAME", &self.buyer_name);
        wb.add_child("START_ADDRESS", &self.start_address);
        wb.add_child("END_ADDRESS", &self.end_address);
        wb.add_child("DRIVER_TIN", &self.driver_tin);
        wb.add_child("CHEK_DRIVER_TIN", self.check_driver_tin);
        wb.add_child("DRIVER_NAME", &self.driver_name);
        wb.add_child("TRANSPORT_COAST", self.transport_cost);
        wb.add_child("RECEPTION_INFO", &self.reception_info);
        wb.add_child("RECEIVER_INFO", &self.receiver_info);
        wb.add_child("DELIVERY_DATE", &self.delivery_date);
        wb.add_child("STATUS", self.status.code());
        wb.add_child("SELER_UN_ID", self.seller_un_id);
        wb.add_child("PAR_ID", &self.parent_id);
        wb.add_child("FULL_AMOUNT", self.full_amount);
        wb.add_child("CAR_NUMBER", &self.car_number);
        wb.add_child("WAYBILL_NUMBER", &self.waybill_number);
        wb.add_child("S_USER_ID", self.s_user_id);
        wb.add_child("BEGIN_DATE", &self.begin_date);
        wb.add_child("TRAN_COST_PAYER", self.transport_cost_payer.code());
        wb.add_child("TRANS_ID", self.transport_type_id);
        wb.add_child("TRANS_TXT", &self.transport_type_txt);
        wb.add_child("COMMENT", &self.comment);
        wb.add_child("CATEGORY", self.category.code());
        wb.add_child("IS_MED", self.is_medicine);
        wb.add_child("WOOD_LABELS", &self.wood_labels);

        if !self.transporter_tin.is_empty() {
            wb.add_child("TRANSPORTER_TIN", &self.transporter_tin);
        }

        wb
    }

    pub fn from_xml(element: &XmlElement) -> Self {
        let goods_list = element
            .find("GOODS_LIST")
            .map(|list| list.find_all("GOODS").map(GoodsItem::from_xml).collect())
            .unwrap_or_default();

        let wood_docs_list = element
            .find("WOOD_DOCS_LIST")
            .map(|list| list.find_all("WOODDOCUMENT").map(WoodDocument::from_xml).collect())
            .unwrap_or_default();

        let sub_waybills = element
            .find("SUB_WAYBILLS")
            .map(|list| list.find_all("SUB_WAYBILL").map(SubWayBill::from_xml).collect())
            .unwrap_or_default();

        Self {
            id: element.get_int("ID", 0),
            waybill_type: WayBillType::from_code_lossy(element.get_i32("TYPE", 0)),
            buyer_tin: element.get_text("BUYER_TIN", ""),
            check_buyer_tin: element.get_i32("CHEK_BUYER_TIN", 0),
            buyer_name: element.get_text("BUYER_NAME", ""),
            start_address: element.get_text("START_ADDRESS", ""),
            end_address: element.get_text("END_ADDRESS", ""),
            driver_tin: element.get_text("DRIVER_TIN", ""),
            check_driver_tin: element.get_i32("CHEK_DRIVER_TIN", 0),
            driver_name: element.get_text("DRIVER_NAME", ""),
            transport_cost: element.get_decimal("TRANSPORT_COAST", 0.0),
            reception_info: element.get_text("RECEPTION_INFO", ""),
            receiver_info: element.get_text("RECEIVER_INFO", ""),
            delivery_date: element.get_text("DELIVERY_DATE", ""),
            status: WayBillStatus::from_code_lossy(element.get_i32("STATUS", 0)),
            seller_un_id: element.get_int("SELER_UN_ID", 0),
            parent_id: element.get_text("PAR_ID", ""),
            full_amount: element.get_decimal("FULL_AMOUNT", 0.0),
            car_number: element.get_text("CAR_NUMBER", ""),
            waybill_number: element.get_text("WAYBILL_NUMBER", ""),
            s_user_id: element.get_int("S_USER_ID", 0),
            begin_date: element.get_text("BEGIN_DATE", ""),
            transport_cost_payer: TransportCostPayer::from_code_lossy(element.get_i32("TRAN_COST_PAYER", 2)),
            transport_type_id: element.get_int("TRANS_ID", 0),
            transport_type_txt: element.get_text("TRANS_TXT", ""),
            comment: element.get_text("COMMENT", ""),
            category: CategoryType::from_code_lossy(element.get_i32("CATEGORY", 0)),
            is_medicine: element.get_i32("IS_MED", 0),
            wood_labels: element.get_text("WOOD_LABELS", ""),
            transporter_tin: element.get_text("TRANSPORTER_TIN", ""),
            goods_list,
            wood_docs_list,
            sub_waybills,
            create_date: element.get_text("CREATE_DATE", ""),
            activate_date: element.get_text("ACTIVATE_DATE", ""),
            close_date: element.get_text("CLOSE_DATE", ""),
            customs_status: element.get_text("CUST_STATUS", ""),
            customs_name: element.get_text("CUST_NAME", ""),
        }
    }
}

// ============================================================================
// Результат сохранения
// ============================================================================

/// Результат по одной товарной позиции после сохранения
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoodsSaveResult {
    pub id: i64,
    /// Отрицательный код ошибки или 0
    pub error: i64,
    pub name: String,
    pub status: i32,
}

/// Ответ `save_waybill`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayBillSaveResult {
    /// 0 - успех, отрицательное значение - код ошибки
    pub status: i64,
    pub waybill_id: i64,
    pub goods_results: Vec<GoodsSaveResult>,
}

impl WayBillSaveResult {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    pub fn from_xml(element: &XmlElement) -> Self {
        let goods_results = element
            .find("GOODS_LIST")
            .map(|list| {
                list.find_all("GOODS")
                    .map(|goods| GoodsSaveResult {
                        id: goods.get_int("ID", 0),
                        error: goods.get_int("ERROR", 0),
                        name: goods.get_text("W_NAME", ""),
                        status: goods.get_i32("STATUS", 0),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            status: element.get_int("STATUS", 0),
            waybill_id: element.get_int("ID", 0),
            goods_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::xml::parse;

    fn sample_waybill() -> WayBill {
        let mut waybill = WayBill::new(
            WayBillType::Transportation,
            "206322102",
            "შპს ტესტი",
            "თბილისი, ვაჟა-ფშაველას 1",
            "ბათუმი, რუსთაველის 5",
        );
        waybill.driver_tin = "01001000001".into();
        waybill.car_number = "AA-123-BB".into();
        waybill
    }

    #[test]
    fn test_add_goods_rounds_amount_and_total() {
        let mut waybill = sample_waybill();
        waybill.add_goods("Cola", 1, 3.0, 0.333, "123");
        waybill.add_goods("Water", 1, 2.0, 0.5, "456");

        assert_eq!(waybill.goods_list[0].amount, 1.0);
        assert_eq!(waybill.full_amount, 2.0);
    }

    #[test]
    fn test_half_tetri_rounds_to_even() {
        let mut waybill = sample_waybill();
        waybill.add_goods("Half", 1, 1.0, 0.125, "1");
        assert_eq!(waybill.goods_list[0].amount, 0.12);
        assert_eq!(waybill.full_amount, 0.12);

        waybill.add_goods("Odd", 1, 1.0, 0.135, "2");
        assert_eq!(waybill.goods_list[1].amount, 0.14);
    }

    #[test]
    fn test_total_ignores_deleted_goods() {
        let mut waybill = sample_waybill();
        waybill.add_goods("Old", 1, 1.0, 10.0, "1").status = -1;
        waybill.add_goods("New", 1, 2.0, 2.5, "2");
        assert_eq!(waybill.full_amount, 5.0);
    }

    #[test]
    fn test_to_xml_field_order() {
        let mut waybill = sample_waybill();
        waybill.add_goods("Cola", 1, 2.0, 1.5, "123");

        let xml = waybill.to_xml();
        let names: Vec<&str> = xml.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(&names[..4], &["SUB_WAYBILLS", "GOODS_LIST", "WOOD_DOCS_LIST", "ID"]);
        assert_eq!(names.last(), Some(&"WOOD_LABELS"));
        assert!(!names.contains(&"TRANSPORTER_TIN"));
        assert!(!names.contains(&"CREATE_DATE"));

        let goods = xml.find("GOODS_LIST").and_then(|l| l.find("GOODS")).unwrap();
        let goods_names: Vec<&str> = goods.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            goods_names,
            vec![
                "ID", "W_NAME", "UNIT_ID", "UNIT_TXT", "QUANTITY", "PRICE", "STATUS", "AMOUNT",
                "BAR_CODE", "A_ID", "VAT_TYPE", "QUANTITY_EXT", "WOOD_LABEL", "W_ID",
            ]
        );
        assert_eq!(goods.get_decimal("AMOUNT", 0.0), 3.0);
    }

    #[test]
    fn test_transporter_tin_written_when_set() {
        let mut waybill = sample_waybill();
        waybill.transporter_tin = "400012345".into();
        let xml = waybill.to_xml();
        assert_eq!(xml.children.last().map(|c| c.name.as_str()), Some("TRANSPORTER_TIN"));
    }

    #[test]
    fn test_round_trip_through_xml() {
        let mut waybill = sample_waybill();
        waybill.add_goods("Cola", 1, 2.0, 1.5, "123");
        waybill.add_wood_document(
            "WD-1",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(10, 30, 0).unwrap(),
            "certificate",
        );

        let text = waybill.to_xml().to_xml_string();
        let parsed = WayBill::from_xml(&parse(&text).unwrap());
        assert_eq!(parsed, waybill);
    }

    #[test]
    fn test_from_xml_defaults_and_unknown_codes() {
        let element = parse(
            "<WAYBILL><ID>77</ID><TYPE>9</TYPE><STATUS>-2</STATUS>\
             <GOODS_LIST><GOODS><ID>1</ID><W_NAME>X</W_NAME></GOODS></GOODS_LIST>\
             <CREATE_DATE>2024-01-01T10:00:00</CREATE_DATE><CUST_NAME>Sarpi</CUST_NAME></WAYBILL>",
        )
        .unwrap();
        let waybill = WayBill::from_xml(&element);

        assert_eq!(waybill.id, 77);
        assert_eq!(waybill.waybill_type, WayBillType::Unknown(9));
        assert_eq!(waybill.status, WayBillStatus::Cancelled);
        assert_eq!(waybill.transport_cost_payer, TransportCostPayer::Seller);
        assert_eq!(waybill.goods_list[0].status, 1);
        assert_eq!(waybill.create_date, "2024-01-01T10:00:00");
        assert_eq!(waybill.customs_name, "Sarpi");
        // значения только для чтения на сервер не уходят
        let xml = waybill.to_xml();
        assert!(xml.find("CREATE_DATE").is_none());
        assert_eq!(xml.get_int("TYPE", 0), 9);
    }

    #[test]
    fn test_wood_document_dates() {
        let doc = WoodDocument {
            doc_number: "1".into(),
            ..Default::default()
        };
        assert!(doc.to_xml().find("DOC_DATE").is_none());

        let element = parse("<WOODDOCUMENT><DOC_DATE>not a date</DOC_DATE></WOODDOCUMENT>").unwrap();
        assert_eq!(WoodDocument::from_xml(&element).doc_date, None);

        let element = parse("<WOODDOCUMENT><DOC_DATE>2023-05-04T08:09:10.123</DOC_DATE></WOODDOCUMENT>").unwrap();
        let date = WoodDocument::from_xml(&element).doc_date.unwrap();
        assert_eq!(date.format(DATE_TIME_FORMAT).to_string(), "2023-05-04T08:09:10");
    }

    #[test]
    fn test_parse_date_time_variants() {
        assert!(parse_date_time("2024-02-29").is_some());
        assert!(parse_date_time("2024-02-29T12:00:00+04:00").is_some());
        assert!(parse_date_time("").is_none());
    }

    #[test]
    fn test_save_result() {
        let element = parse(
            "<RESULT><STATUS>0</STATUS><ID>555</ID><GOODS_LIST>\
             <GOODS><ID>10</ID><ERROR>0</ERROR><W_NAME>Cola</W_NAME><STATUS>1</STATUS></GOODS>\
             <GOODS><ID>0</ID><ERROR>-1001</ERROR><W_NAME>Bad</W_NAME><STATUS>1</STATUS></GOODS>\
             </GOODS_LIST></RESULT>",
        )
        .unwrap();
        let result = WayBillSaveResult::from_xml(&element);
        assert!(result.is_success());
        assert_eq!(result.waybill_id, 555);
        assert_eq!(result.goods_results.len(), 2);
        assert_eq!(result.goods_results[1].error, -1001);

        let failed = WayBillSaveResult::from_xml(&parse("<RESULT><STATUS>-1</STATUS></RESULT>").unwrap());
        assert!(!failed.is_success());
    }
}
