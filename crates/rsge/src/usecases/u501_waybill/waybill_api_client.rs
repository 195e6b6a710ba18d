use chrono::NaiveDateTime;
use contracts::domain::a001_waybill::{
    AkcizCode, BarCodeEntry, ErrorCode, ServiceUser, TransportType, WayBill, WayBillFilter, WayBillListItem,
    WayBillSaveResult, WayBillTemplate, WayBillTypeInfo, WayBillUnit, WoodType, DATE_TIME_FORMAT,
};
use contracts::enums::WayBillType;
use contracts::shared::XmlElement;

use crate::shared::config::ServiceConfig;
use crate::shared::error::{Result, RsGeError};
use crate::shared::soap::{SoapParam, SoapResponse, SoapTransport};

/// Данные перевозчика для `save_waybill_transporter`
#[derive(Debug, Clone, PartialEq)]
pub struct TransporterInfo {
    pub car_number: String,
    pub driver_tin: String,
    /// 1 - проверять ИНН водителя (гражданин Грузии)
    pub check_driver_tin: i32,
    pub driver_name: String,
    pub transport_type_id: i32,
    pub transport_type_txt: String,
    pub reception_info: String,
    pub receiver_info: String,
}

impl Default for TransporterInfo {
    fn default() -> Self {
        Self {
            car_number: String::new(),
            driver_tin: String::new(),
            check_driver_tin: 1,
            driver_name: String::new(),
            transport_type_id: 1,
            transport_type_txt: String::new(),
            reception_info: String::new(),
            receiver_info: String::new(),
        }
    }
}

/// Клиент SOAP-сервиса электронных накладных RS.ge
pub struct WayBillClient {
    transport: SoapTransport,
    service_user: String,
    service_password: String,
}

impl WayBillClient {
    /// Клиент с адресом сервиса по умолчанию
    pub fn new(service_user: impl Into<String>, service_password: impl Into<String>) -> Result<Self> {
        Self::with_config(service_user, service_password, &ServiceConfig::waybill())
    }

    pub fn with_config(
        service_user: impl Into<String>,
        service_password: impl Into<String>,
        config: &ServiceConfig,
    ) -> Result<Self> {
        Ok(Self {
            transport: SoapTransport::new(config)?,
            service_user: service_user.into(),
            service_password: service_password.into(),
        })
    }

    /// Вызов с `su`/`sp` перед остальными параметрами
    async fn call(&self, method: &str, params: Vec<SoapParam>) -> Result<SoapResponse> {
        let mut all = Vec::with_capacity(params.len() + 2);
        all.push(SoapParam::text("su", &self.service_user));
        all.push(SoapParam::text("sp", &self.service_password));
        all.extend(params);
        self.transport.call(method, &all).await
    }

    /// Вызов, возвращающий числовой код
    async fn call_code(&self, method: &str, params: Vec<SoapParam>) -> Result<i64> {
        self.call(method, params).await?.code()
    }

    /// Вызов с проверкой кода ошибки
    async fn call_checked(&self, method: &str, params: Vec<SoapParam>) -> Result<i64> {
        let code = self.call_code(method, params).await?;
        check_error_code(code, method)?;
        Ok(code)
    }

    // ========================================================================
    // Сервисные пользователи
    // ========================================================================

    /// Изменить регистрацию сервисного пользователя
    pub async fn update_service_user(&self, user_name: &str, user_password: &str, ip: &str, name: &str) -> Result<bool> {
        let response = self
            .call(
                "update_service_user",
                vec![
                    SoapParam::text("user_name", user_name),
                    SoapParam::text("user_password", user_password),
                    SoapParam::text("ip", ip),
                    SoapParam::text("name", name),
                ],
            )
            .await?;
        Ok(response.is_true())
    }

    /// Сервисные пользователи декларанта. Вызывается с учётными данными
    /// портала, без `su`/`sp`.
    pub async fn get_service_users(&self, user_name: &str, user_password: &str) -> Result<Vec<ServiceUser>> {
        let response = self
            .transport
            .call(
                "get_service_users",
                &[
                    SoapParam::text("user_name", user_name),
                    SoapParam::text("user_password", user_password),
                ],
            )
            .await?;
        Ok(collect(&response.result, "ServiceUser", ServiceUser::from_xml))
    }

    /// Проверить `su`/`sp`; возвращает `(un_id, s_user_id)`
    pub async fn check_service_user(&self) -> Result<(i64, i64)> {
        let response = self.call("chek_service_user", Vec::new()).await?;
        let un_id = response.out_int("un_id");
        let s_user_id = response.out_int("s_user_id");

        if un_id == 0 && s_user_id == 0 && response.text().eq_ignore_ascii_case("false") {
            tracing::warn!("Service user check failed");
            return Err(RsGeError::authentication("Invalid service credentials"));
        }
        Ok((un_id, s_user_id))
    }

    // ========================================================================
    // Справочники
    // ========================================================================

    pub async fn get_akciz_codes(&self) -> Result<Vec<AkcizCode>> {
        let response = self.call("get_akciz_codes", Vec::new()).await?;
        Ok(collect(&response.result, "AKCIZ_CODE", AkcizCode::from_xml))
    }

    pub async fn get_waybill_types(&self) -> Result<Vec<WayBillTypeInfo>> {
        let response = self.call("get_waybill_types", Vec::new()).await?;
        Ok(collect(&response.result, "WAYBILL_TYPE", WayBillTypeInfo::from_xml))
    }

    pub async fn get_waybill_units(&self) -> Result<Vec<WayBillUnit>> {
        let response = self.call("get_waybill_units", Vec::new()).await?;
        Ok(collect(&response.result, "WAYBILL_UNIT", WayBillUnit::from_xml))
    }

    pub async fn get_transport_types(&self) -> Result<Vec<TransportType>> {
        let response = self.call("get_trans_types", Vec::new()).await?;
        Ok(collect(&response.result, "TRANSPORT_TYPE", TransportType::from_xml))
    }

    pub async fn get_wood_types(&self) -> Result<Vec<WoodType>> {
        let response = self.call("get_wood_types", Vec::new()).await?;
        Ok(collect(&response.result, "WOOD_TYPES", WoodType::from_xml))
    }

    /// Коды ошибок сервиса (строки приходят в элементах `WAYBILL_TYPE`)
    pub async fn get_error_codes(&self) -> Result<Vec<ErrorCode>> {
        let response = self.call("get_error_codes", Vec::new()).await?;
        Ok(collect(&response.result, "WAYBILL_TYPE", ErrorCode::from_xml))
    }

    /// Наименование налогоплательщика по ИНН или личному номеру
    pub async fn get_name_from_tin(&self, tin: &str) -> Result<String> {
        let response = self.call("get_name_from_tin", vec![SoapParam::text("tin", tin)]).await?;
        Ok(response.text().to_string())
    }

    // ========================================================================
    // Накладные
    // ========================================================================

    /// Новая накладная в памяти, на сервер не отправляется
    pub fn create_waybill(
        &self,
        waybill_type: WayBillType,
        buyer_tin: &str,
        buyer_name: &str,
        start_address: &str,
        end_address: &str,
    ) -> WayBill {
        WayBill::new(waybill_type, buyer_tin, buyer_name, start_address, end_address)
    }

    /// Сохранить накладную (`id = 0` - новая)
    pub async fn save_waybill(&self, waybill: &WayBill) -> Result<WayBillSaveResult> {
        let xml = waybill.to_xml().to_xml_string();
        let response = self.call("save_waybill", vec![SoapParam::xml("waybill", xml)]).await?;
        let result = WayBillSaveResult::from_xml(unwrap_element(&response.result, "RESULT"));

        if result.is_success() {
            tracing::info!("Waybill saved, id {}", result.waybill_id);
        } else {
            tracing::warn!("Waybill save returned status {}", result.status);
        }
        Ok(result)
    }

    pub async fn get_waybill(&self, waybill_id: i64) -> Result<WayBill> {
        let response = self
            .call("get_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await?;
        Ok(WayBill::from_xml(unwrap_element(&response.result, "WAYBILL")))
    }

    /// Накладные продавца; `counterparty_tin` - ИНН покупателя
    pub async fn get_waybills(&self, filter: &WayBillFilter) -> Result<Vec<WayBillListItem>> {
        let params = filter_params(filter, "buyer_tin", false);
        self.list("get_waybills", params).await
    }

    /// Накладные покупателя; `counterparty_tin` - ИНН продавца
    pub async fn get_buyer_waybills(&self, filter: &WayBillFilter) -> Result<Vec<WayBillListItem>> {
        let params = filter_params(filter, "seller_tin", false);
        self.list("get_buyer_waybills", params).await
    }

    pub async fn get_waybills_ex(&self, filter: &WayBillFilter) -> Result<Vec<WayBillListItem>> {
        let params = filter_params(filter, "buyer_tin", true);
        self.list("get_waybills_ex", params).await
    }

    pub async fn get_buyer_waybills_ex(&self, filter: &WayBillFilter) -> Result<Vec<WayBillListItem>> {
        let params = filter_params(filter, "seller_tin", true);
        self.list("get_buyer_waybills_ex", params).await
    }

    /// Накладные по дате последнего изменения (диапазон не больше 3 дней)
    pub async fn get_waybills_v1(
        &self,
        last_update_date_s: &str,
        last_update_date_e: &str,
        buyer_tin: &str,
    ) -> Result<Vec<WayBillListItem>> {
        let params = vec![
            SoapParam::text("buyer_tin", buyer_tin),
            SoapParam::text("last_update_date_s", last_update_date_s),
            SoapParam::text("last_update_date_e", last_update_date_e),
        ];
        self.list("get_waybills_v1", params).await
    }

    async fn list(&self, method: &str, params: Vec<SoapParam>) -> Result<Vec<WayBillListItem>> {
        let response = self.call(method, params).await?;
        let items = WayBillListItem::list_from_xml(&response.result);
        tracing::debug!("{} returned {} waybills", method, items.len());
        Ok(items)
    }

    /// Активировать накладную; возвращает номер накладной
    pub async fn activate_waybill(&self, waybill_id: i64) -> Result<String> {
        let response = self
            .call("send_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await?;
        Ok(response.text().to_string())
    }

    /// Активировать с датой начала перевозки
    pub async fn activate_waybill_with_date(&self, waybill_id: i64, begin_date: NaiveDateTime) -> Result<String> {
        let response = self
            .call(
                "send_waybill_vd",
                vec![
                    SoapParam::text("begin_date", format_date(begin_date)),
                    SoapParam::text("waybill_id", waybill_id),
                ],
            )
            .await?;
        Ok(response.text().to_string())
    }

    pub async fn close_waybill(&self, waybill_id: i64) -> Result<i64> {
        self.call_checked("close_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await
    }

    pub async fn close_waybill_with_date(&self, waybill_id: i64, delivery_date: NaiveDateTime) -> Result<i64> {
        self.call_checked(
            "close_waybill_vd",
            vec![
                SoapParam::text("delivery_date", format_date(delivery_date)),
                SoapParam::text("waybill_id", waybill_id),
            ],
        )
        .await
    }

    /// Удалить сохранённую (не активированную) накладную
    pub async fn delete_waybill(&self, waybill_id: i64) -> Result<i64> {
        self.call_checked("del_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await
    }

    /// Аннулировать активированную накладную
    pub async fn cancel_waybill(&self, waybill_id: i64) -> Result<i64> {
        self.call_checked("ref_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await
    }

    /// Подтверждение покупателем
    pub async fn confirm_waybill(&self, waybill_id: i64) -> Result<bool> {
        let response = self
            .call("confirm_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await?;
        Ok(response.is_true())
    }

    pub async fn reject_waybill(&self, waybill_id: i64) -> Result<bool> {
        let response = self
            .call("reject_waybill", vec![SoapParam::text("waybill_id", waybill_id)])
            .await?;
        Ok(response.is_true())
    }

    // ========================================================================
    // Перевозчик
    // ========================================================================

    pub async fn save_waybill_transporter(&self, waybill_id: i64, info: &TransporterInfo) -> Result<i64> {
        self.call_code(
            "save_waybill_transporter",
            vec![
                SoapParam::text("waybill_id", waybill_id),
                SoapParam::text("car_number", &info.car_number),
                SoapParam::text("driver_tin", &info.driver_tin),
                SoapParam::text("chek_driver_tin", info.check_driver_tin),
                SoapParam::text("driver_name", &info.driver_name),
                SoapParam::text("trans_id", info.transport_type_id),
                SoapParam::text("trans_txt", &info.transport_type_txt),
                SoapParam::text("reception_info", &info.reception_info),
                SoapParam::text("receiver_info", &info.receiver_info),
            ],
        )
        .await
    }

    /// Активация перевозчиком; возвращает `(код, номер накладной)`
    pub async fn activate_waybill_transporter(&self, waybill_id: i64, begin_date: NaiveDateTime) -> Result<(i64, String)> {
        let response = self
            .call(
                "send_waybill_transporter",
                vec![
                    SoapParam::text("waybill_id", waybill_id),
                    SoapParam::text("begin_date", format_date(begin_date)),
                ],
            )
            .await?;
        Ok((response.code()?, response.out_text("waybill_number")))
    }

    pub async fn close_waybill_transporter(
        &self,
        waybill_id: i64,
        delivery_date: NaiveDateTime,
        reception_info: &str,
        receiver_info: &str,
    ) -> Result<i64> {
        self.call_code(
            "close_waybill_transporter",
            vec![
                SoapParam::text("waybill_id", waybill_id),
                SoapParam::text("reception_info", reception_info),
                SoapParam::text("receiver_info", receiver_info),
                SoapParam::text("delivery_date", format_date(delivery_date)),
            ],
        )
        .await
    }

    // ========================================================================
    // Счёт-фактура по накладной
    // ========================================================================

    /// Выписать счёт-фактуру по накладной; возвращает `(код, id счёта)`
    pub async fn save_invoice(&self, waybill_id: i64, invoice_id: i64) -> Result<(i64, i64)> {
        let response = self
            .call(
                "save_invoice",
                vec![
                    SoapParam::text("waybill_id", waybill_id),
                    SoapParam::text("in_inv_id", invoice_id),
                ],
            )
            .await?;
        let code = response.code()?;
        let out_id = response.out_int("out_inv_id");
        check_error_code(code, "save_invoice")?;
        Ok((code, out_id))
    }

    // ========================================================================
    // Шаблоны
    // ========================================================================

    pub async fn save_waybill_template(&self, name: &str, waybill: &WayBill) -> Result<i64> {
        let xml = waybill.to_xml().to_xml_string();
        self.call_code(
            "save_waybill_tamplate",
            vec![SoapParam::text("v_name", name), SoapParam::xml("waybill", xml)],
        )
        .await
    }

    pub async fn get_waybill_templates(&self) -> Result<Vec<WayBillTemplate>> {
        let response = self.call("get_waybill_tamplates", Vec::new()).await?;
        Ok(WayBillTemplate::list_from_xml(&response.result))
    }

    pub async fn get_waybill_template(&self, template_id: i64) -> Result<WayBill> {
        let response = self
            .call("get_waybill_tamplate", vec![SoapParam::text("id", template_id)])
            .await?;
        Ok(WayBill::from_xml(unwrap_element(&response.result, "WAYBILL")))
    }

    pub async fn delete_waybill_template(&self, template_id: i64) -> Result<i64> {
        self.call_code("delete_waybill_tamplate", vec![SoapParam::text("id", template_id)])
            .await
    }

    // ========================================================================
    // Штрихкоды и номера машин
    // ========================================================================

    pub async fn save_bar_code(
        &self,
        bar_code: &str,
        goods_name: &str,
        unit_id: i64,
        unit_txt: &str,
        akciz_id: i64,
    ) -> Result<i64> {
        self.call_code(
            "save_bar_code",
            vec![
                SoapParam::text("bar_code", bar_code),
                SoapParam::text("goods_name", goods_name),
                SoapParam::text("unit_id", unit_id),
                SoapParam::text("unit_txt", unit_txt),
                SoapParam::text("a_id", akciz_id),
            ],
        )
        .await
    }

    pub async fn delete_bar_code(&self, bar_code: &str) -> Result<i64> {
        self.call_code("delete_bar_code", vec![SoapParam::text("bar_code", bar_code)])
            .await
    }

    /// Штрихкоды личного каталога; пустой `bar_code` - все
    pub async fn get_bar_codes(&self, bar_code: &str) -> Result<Vec<BarCodeEntry>> {
        let response = self
            .call("get_bar_codes", vec![SoapParam::text("bar_code", bar_code)])
            .await?;
        Ok(BarCodeEntry::list_from_xml(&response.result))
    }

    /// Зарегистрировать автомобиль для дистрибуции
    pub async fn save_car_number(&self, car_number: &str) -> Result<i64> {
        self.call_code("save_car_numbers", vec![SoapParam::text("car_number", car_number)])
            .await
    }

    pub async fn delete_car_number(&self, car_number: &str) -> Result<i64> {
        self.call_code("delete_car_numbers", vec![SoapParam::text("car_number", car_number)])
            .await
    }

    pub async fn get_car_numbers(&self) -> Result<Vec<String>> {
        let response = self.call("get_car_numbers", Vec::new()).await?;
        Ok(response
            .result
            .descendants()
            .into_iter()
            .map(XmlElement::text)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// -100 → неверные `su`/`sp`, -101 → чужая накладная, прочие отрицательные → ошибка API
fn check_error_code(code: i64, context: &str) -> Result<()> {
    match code {
        -100 => Err(RsGeError::authentication_with_code(
            format!("Invalid service credentials. {}", context),
            code,
        )),
        -101 => Err(RsGeError::permission(
            format!("Permission denied: cannot modify another user's waybill. {}", context),
            code,
        )),
        code if code < 0 => Err(RsGeError::api(format!("API error {}. {}", code, context), Some(code))),
        _ => Ok(()),
    }
}

fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_TIME_FORMAT).to_string()
}

fn filter_params(filter: &WayBillFilter, tin_param: &'static str, with_confirmation: bool) -> Vec<SoapParam> {
    let mut params: Vec<SoapParam> = filter
        .to_params()
        .into_iter()
        .map(|(name, value)| SoapParam::Text(name, value))
        .collect();
    params.push(SoapParam::text(tin_param, &filter.counterparty_tin));
    if with_confirmation {
        params.push(SoapParam::text("is_confirmed", i32::from(filter.is_confirmed)));
    }
    params
}

fn collect<T>(result: &XmlElement, tag: &str, parse: fn(&XmlElement) -> T) -> Vec<T> {
    result.iter(tag).into_iter().map(parse).collect()
}

/// Документ внутри результата (`<WAYBILL>`, `<RESULT>`), либо сам результат
fn unwrap_element<'a>(result: &'a XmlElement, tag: &str) -> &'a XmlElement {
    if result.name == tag {
        return result;
    }
    result.find(tag).unwrap_or(result)
}
