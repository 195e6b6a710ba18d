use crate::enums::ConfirmationStatus;
use crate::shared::XmlElement;

/// Строка списка накладных (`get_waybills*`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayBillListItem {
    pub id: i64,
    pub waybill_type: i32,
    pub create_date: String,
    pub buyer_tin: String,
    pub buyer_name: String,
    pub seller_tin: String,
    pub seller_name: String,
    pub start_address: String,
    pub end_address: String,
    pub driver_tin: String,
    pub transport_cost: f64,
    pub reception_info: String,
    pub receiver_info: String,
    pub delivery_date: String,
    pub status: i32,
    pub activate_date: String,
    pub parent_id: String,
    pub full_amount: f64,
    pub car_number: String,
    pub waybill_number: String,
    pub close_date: String,
    pub s_user_id: i64,
    pub begin_date: String,
    pub comment: String,
    pub buyer_status: i32,
    pub seller_status: i32,
    pub is_confirmed: i32,
}

impl WayBillListItem {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            waybill_type: element.get_i32("TYPE", 0),
            create_date: element.get_text("CREATE_DATE", ""),
            buyer_tin: element.get_text("BUYER_TIN", ""),
            buyer_name: element.get_text("BUYER_NAME", ""),
            seller_tin: element.get_text("SELLER_TIN", ""),
            seller_name: element.get_text("SELLER_NAME", ""),
            start_address: element.get_text("START_ADDRESS", ""),
            end_address: element.get_text("END_ADDRESS", ""),
            driver_tin: element.get_text("DRIVER_TIN", ""),
            transport_cost: element.get_decimal("TRANSPORT_COAST", 0.0),
            reception_info: element.get_text("RECEPTION_INFO", ""),
            receiver_info: element.get_text("RECEIVER_INFO", ""),
            delivery_date: element.get_text("DELIVERY_DATE", ""),
            status: element.get_i32("STATUS", 0),
            activate_date: element.get_text("ACTIVATE_DATE", ""),
            parent_id: element.get_text("PAR_ID", ""),
            full_amount: element.get_decimal("FULL_AMOUNT", 0.0),
            car_number: element.get_text("CAR_NUMBER", ""),
            waybill_number: element.get_text("WAYBILL_NUMBER", ""),
            close_date: element.get_text("CLOSE_DATE", ""),
            s_user_id: element.get_int("S_USER_ID", 0),
            begin_date: element.get_text("BEGIN_DATE", ""),
            comment: element.get_text("WAYBILL_COMMENT", ""),
            buyer_status: element.get_i32("BUYER_ST", 0),
            seller_status: element.get_i32("SELLER_ST", 0),
            is_confirmed: element.get_i32("IS_CONFIRMED", 0),
        }
    }

    /// Все строки `<WAYBILL>` списочного ответа
    pub fn list_from_xml(result: &XmlElement) -> Vec<Self> {
        result.iter("WAYBILL").into_iter().map(Self::from_xml).collect()
    }
}

/// Фильтры списков накладных.
///
/// Пустая строка означает «без фильтра». Типы и статусы передаются списком
/// через запятую (`"1,2"`), даты в формате `YYYY-MM-DDTHH:MM:SS`.
/// `counterparty_tin` уходит как `buyer_tin` в списках продавца и как
/// `seller_tin` в списках покупателя.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayBillFilter {
    pub types: String,
    pub counterparty_tin: String,
    pub statuses: String,
    pub car_number: String,
    pub begin_date_s: String,
    pub begin_date_e: String,
    pub create_date_s: String,
    pub create_date_e: String,
    pub driver_tin: String,
    pub delivery_date_s: String,
    pub delivery_date_e: String,
    pub full_amount: String,
    pub waybill_number: String,
    pub close_date_s: String,
    pub close_date_e: String,
    pub s_user_ids: String,
    pub comment: String,
    /// Используется только методами `*_ex`
    pub is_confirmed: ConfirmationStatus,
}

impl WayBillFilter {
    /// Общие параметры SOAP-запроса (без ИНН контрагента и `is_confirmed`)
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("itypes", self.types.clone()),
            ("statuses", self.statuses.clone()),
            ("car_number", self.car_number.clone()),
            ("begin_date_s", self.begin_date_s.clone()),
            ("begin_date_e", self.begin_date_e.clone()),
            ("create_date_s", self.create_date_s.clone()),
            ("create_date_e", self.create_date_e.clone()),
            ("driver_tin", self.driver_tin.clone()),
            ("delivery_date_s", self.delivery_date_s.clone()),
            ("delivery_date_e", self.delivery_date_e.clone()),
            ("full_amount", self.full_amount.clone()),
            ("waybill_number", self.waybill_number.clone()),
            ("close_date_s", self.close_date_s.clone()),
            ("close_date_e", self.close_date_e.clone()),
            ("s_user_ids", self.s_user_ids.clone()),
            ("comment", self.comment.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::xml::parse;

    #[test]
    fn test_list_item_reads_comment_and_confirmation() {
        let result = parse(
            "<WAYBILL_LIST>\
               <WAYBILL><ID>1</ID><TYPE>2</TYPE><WAYBILL_COMMENT>urgent</WAYBILL_COMMENT>\
                 <BUYER_ST>1</BUYER_ST><IS_CONFIRMED>-1</IS_CONFIRMED><FULL_AMOUNT>10.5</FULL_AMOUNT></WAYBILL>\
               <WAYBILL><ID>2</ID></WAYBILL>\
             </WAYBILL_LIST>",
        )
        .unwrap();
        let items = WayBillListItem::list_from_xml(&result);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].comment, "urgent");
        assert_eq!(items[0].buyer_status, 1);
        assert_eq!(items[0].is_confirmed, -1);
        assert_eq!(items[0].full_amount, 10.5);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_default_filter_is_empty() {
        let filter = WayBillFilter::default();
        assert!(filter.to_params().iter().all(|(_, value)| value.is_empty()));
        assert_eq!(filter.is_confirmed.code(), 0);
    }

    #[test]
    fn test_filter_param_names() {
        let filter = WayBillFilter {
            types: "2,3".into(),
            statuses: "1".into(),
            ..Default::default()
        };
        let params = filter.to_params();
        assert_eq!(params[0], ("itypes", "2,3".to_string()));
        assert_eq!(params[1], ("statuses", "1".to_string()));
        assert_eq!(params.len(), 16);
    }
}
