use async_trait::async_trait;
use contracts::domain::a003_tax_invoice::{
    BarCode, BarCodeFilter, ExciseFilter, ExciseRow, Invoice, InvoiceAction, InvoiceAuthResponse, InvoiceListFilter,
    OperationPeriod, OrgInfo, TransactionResult, Unit,
};
use contracts::shared::{lenient, tabular};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::shared::auth::{DeviceInfo, TokenSession, TwoFactorAuth};
use crate::shared::config::ServiceConfig;
use crate::shared::error::{Result, RsGeError};
use crate::shared::http::{build_client, normalize_base_url, preview};

/// Клиент eAPI налоговых счетов-фактур (`https://eapi.rs.ge`)
pub struct InvoiceClient {
    client: reqwest::Client,
    base_url: String,
    session: TokenSession,
}

impl InvoiceClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&ServiceConfig::invoice())
    }

    pub fn with_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: normalize_base_url(&config.base_url),
            session: TokenSession::new(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // ========================================================================
    // Аутентификация
    // ========================================================================

    /// Первый (или единственный) шаг входа; при 2FA проверьте `needs_pin()`
    pub async fn authenticate(&mut self, username: &str, password: &str, device_code: &str) -> Result<InvoiceAuthResponse> {
        let mut payload = Map::new();
        payload.insert("USERNAME".into(), Value::from(username));
        payload.insert("PASSWORD".into(), Value::from(password));
        if !device_code.is_empty() {
            payload.insert("DEVICE_CODE".into(), Value::from(device_code));
        }

        let data = self.auth_post("/Users/Authenticate", &Value::Object(payload)).await?;
        let response = InvoiceAuthResponse::from_json(data);
        self.session.set(&response.access_token);
        Ok(response)
    }

    pub async fn authenticate_pin(&mut self, pin_token: &str, pin: &str, device: &DeviceInfo) -> Result<InvoiceAuthResponse> {
        let payload = json!({
            "PIN_TOKEN": pin_token,
            "PIN": pin,
            "DEVICE_CODE": non_empty(&device.device_code),
            "ADDRESS": non_empty(&device.address),
            "BROWSER": non_empty(&device.browser),
            "OPER_SYSTEM": non_empty(&device.oper_system),
        });

        let data = self.auth_post("/Users/AuthenticatePin", &payload).await?;
        let response = InvoiceAuthResponse::from_json(data);
        self.session.set(&response.access_token);
        Ok(response)
    }

    /// Выход; ошибки API и сети игнорируются, токен сбрасывается всегда
    pub async fn sign_out(&mut self) -> Result<bool> {
        if !self.session.is_authenticated() {
            return Ok(true);
        }

        match self.auth_post("/Users/SignOut", &json!({})).await {
            Ok(_) => {}
            Err(e @ (RsGeError::Api { .. } | RsGeError::Connection(_))) => {
                tracing::warn!("eAPI sign-out failed: {}", e);
            }
            Err(e) => return Err(e),
        }

        self.session.clear();
        Ok(true)
    }

    // ========================================================================
    // Организации и справочники
    // ========================================================================

    /// Плательщик НДС. На тестовом контуре RS.ge метод отвечает 500,
    /// там используйте `get_org_info(tin)?.is_vat_payer`.
    pub async fn get_vat_payer_status(&self, tin: &str, vat_date: &str) -> Result<bool> {
        let mut payload = Map::new();
        payload.insert("Tin".into(), Value::from(tin));
        if !vat_date.is_empty() {
            payload.insert("VatDate".into(), Value::from(vat_date));
        }

        let data = self.post("/Org/GetVatPayerStatus", &Value::Object(payload)).await?;
        Ok(lenient::value_to_flag(&data["DATA"]["IsVatPayer"]))
    }

    pub async fn get_org_info(&self, tin: &str) -> Result<OrgInfo> {
        let data = self.post("/Org/GetOrgInfoByTin", &json!({ "Tin": tin })).await?;
        Ok(OrgInfo::from_json(data_of(data)))
    }

    pub async fn get_units(&self) -> Result<Vec<Unit>> {
        let data = self.post("/Common/GetUnits", &json!({})).await?;
        Ok(Unit::list_from_json(&data["DATA"]))
    }

    /// Результат асинхронного сохранения
    pub async fn get_transaction_result(&self, transaction_id: &str) -> Result<TransactionResult> {
        let data = self
            .post("/Common/GetTransactionResult", &json!({ "TransactionId": transaction_id }))
            .await?;
        Ok(TransactionResult::from_json(data_of(data)))
    }

    // ========================================================================
    // Налоговые документы
    // ========================================================================

    /// Статусы документов
    pub async fn get_actions(&self) -> Result<Vec<InvoiceAction>> {
        let data = self.post("/Invoice/GetActions", &json!({})).await?;
        Ok(InvoiceAction::list_from_json(&data["DATA"]))
    }

    /// Документ по ID или номеру; `parent_invoice_id` - для документов дистрибуции
    pub async fn get_invoice(&self, invoice_id: i64, invoice_number: i64, parent_invoice_id: i64) -> Result<Invoice> {
        let payload = json!({
            "InvoiceID": invoice_id,
            "InvoiceNumber": invoice_number,
            "parentInvoiceID": parent_invoice_id,
        });
        let data = self.post("/Invoice/GetInvoice", &payload).await?;
        Ok(Invoice::from_json(data["DATA"]["INVOICE"].clone()))
    }

    /// Сохранить документ (`ID = 0` - новый). Возвращает ID транзакции
    /// для `get_transaction_result`; пустой `transaction_id` генерируется.
    pub async fn save_invoice(&self, invoice: &Invoice, transaction_id: &str) -> Result<String> {
        self.send_invoice("/Invoice/SaveInvoice", invoice, transaction_id).await
    }

    /// Активировать документ (достаточно заполненного `ID`)
    pub async fn activate_invoice(&self, invoice: &Invoice, transaction_id: &str) -> Result<String> {
        self.send_invoice("/Invoice/ActivateInvoice", invoice, transaction_id).await
    }

    async fn send_invoice(&self, path: &str, invoice: &Invoice, transaction_id: &str) -> Result<String> {
        let transaction_id = if transaction_id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            transaction_id.to_string()
        };

        let payload = json!({
            "INVOICE": invoice.to_json(),
            "TransactionId": transaction_id,
        });
        self.post(path, &payload).await?;
        tracing::info!("{} accepted, transaction {}", path, transaction_id);
        Ok(transaction_id)
    }

    pub async fn activate_invoices(&self, invoice_ids: &[i64]) -> Result<bool> {
        self.post_batch("/Invoice/ActivateInvoices", invoice_ids).await
    }

    /// Удалить сохранённый (черновой) документ
    pub async fn delete_invoice(&self, invoice_id: i64) -> Result<bool> {
        self.post_single("/Invoice/DeleteInvoice", invoice_id).await
    }

    /// Запросить отмену активного документа
    pub async fn cancel_invoice(&self, invoice_id: i64) -> Result<bool> {
        self.post_single("/Invoice/CancelInvoice", invoice_id).await
    }

    /// Отказ покупателя
    pub async fn refuse_invoice(&self, invoice_id: i64) -> Result<bool> {
        self.post_single("/Invoice/RefuseInvoice", invoice_id).await
    }

    pub async fn refuse_invoices(&self, invoice_ids: &[i64]) -> Result<bool> {
        self.post_batch("/Invoice/RefuseInvoices", invoice_ids).await
    }

    /// Подтверждение покупателем
    pub async fn confirm_invoice(&self, invoice_id: i64) -> Result<bool> {
        self.post_single("/Invoice/ConfirmInvoice", invoice_id).await
    }

    pub async fn confirm_invoices(&self, invoice_ids: &[i64]) -> Result<bool> {
        self.post_batch("/Invoice/ConfirmInvoices", invoice_ids).await
    }

    /// Список документов (ответ `Fields`/`Rows`)
    pub async fn list_invoices(&self, filter: &InvoiceListFilter) -> Result<Vec<Invoice>> {
        let data = self.post("/Invoice/ListInvoices", &filter.to_payload()).await?;
        let invoices: Vec<Invoice> = tabular::table_rows(&data).into_iter().map(Invoice::from_json).collect();
        tracing::debug!("ListInvoices returned {} rows", invoices.len());
        Ok(invoices)
    }

    /// Товары документов; каждый элемент - документ с заполненным `invoice_goods`
    pub async fn list_goods(&self, invoice_ids: &[i64]) -> Result<Vec<Invoice>> {
        let data = self
            .post("/Invoice/ListGoods", &json!({ "Invoices": id_list(invoice_ids) }))
            .await?;

        Ok(data["DATA"]["INVOICES"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|item| Invoice::from_json(item["INVOICE"].clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Справочник акцизных товаров
    pub async fn list_excise(&self, filter: &ExciseFilter) -> Result<Vec<ExciseRow>> {
        let data = self.post("/Invoice/ListExcise", &filter.to_payload()).await?;
        Ok(tabular::table_rows(&data).into_iter().map(ExciseRow::from_json).collect())
    }

    /// Каталог штрихкодов
    pub async fn list_bar_codes(&self, filter: &BarCodeFilter) -> Result<Vec<BarCode>> {
        let data = self.post("/Invoice/ListBarCodes", &filter.to_payload()).await?;
        Ok(tabular::table_rows(&data).into_iter().map(BarCode::from_json).collect())
    }

    pub async fn get_bar_code(&self, bar_code: &str) -> Result<BarCode> {
        let data = self.post("/Invoice/GetBarCode", &json!({ "barCode": bar_code })).await?;
        Ok(BarCode::from_json(data["DATA"]["RESULT"].clone()))
    }

    /// Очистить кэш каталога штрихкодов
    pub async fn clear_bar_codes(&self) -> Result<bool> {
        self.post("/Invoice/ClearBarCodes", &json!({})).await?;
        Ok(true)
    }

    // ========================================================================
    // Декларации
    // ========================================================================

    /// Номер декларации за период (`month = None` - годовой)
    pub async fn get_seq_num(&self, year: i32, month: Option<u32>) -> Result<String> {
        let period = OperationPeriod::new(year, month);
        let data = self
            .post("/Invoice/GetSeqNum", &json!({ "OperationPeriod": period.to_string() }))
            .await?;
        Ok(lenient::value_to_string(&data["DATA"]["SeqNum"]))
    }

    /// Привязать документы к декларации за период
    pub async fn create_decl(&self, invoice_ids: &[i64], year: i32, month: Option<u32>) -> Result<bool> {
        let period = OperationPeriod::new(year, month);
        let payload = json!({
            "Invoices": id_list(invoice_ids),
            "OperationPeriod": period.to_string(),
        });
        self.post("/Invoice/CreateDecl", &payload).await?;
        Ok(true)
    }

    // ========================================================================
    // Транспорт
    // ========================================================================

    async fn post_single(&self, path: &str, invoice_id: i64) -> Result<bool> {
        self.post(path, &json!({ "INVOICE": { "ID": invoice_id } })).await?;
        Ok(true)
    }

    async fn post_batch(&self, path: &str, invoice_ids: &[i64]) -> Result<bool> {
        self.post(path, &json!({ "Invoices": id_list(invoice_ids) })).await?;
        Ok(true)
    }

    /// Запрос с токеном; `STATUS.ID < 0` → ошибка API
    async fn post(&self, path: &str, payload: &Value) -> Result<Value> {
        self.session.require()?;
        let data = self.raw_post(path, payload).await?;

        let (status_id, text) = status_of(&data);
        if status_id < 0 {
            let message = text.unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!("eAPI {} returned status {}: {}", path, status_id, message);
            return Err(RsGeError::api(message, Some(status_id)));
        }
        Ok(data)
    }

    /// Запрос аутентификации; `STATUS.ID < 0` → ошибка аутентификации
    async fn auth_post(&self, path: &str, payload: &Value) -> Result<Value> {
        let data = self.raw_post(path, payload).await?;

        let (status_id, text) = status_of(&data);
        if status_id < 0 {
            let message = text.unwrap_or_else(|| "Authentication failed".to_string());
            return Err(RsGeError::authentication_with_code(message, status_id));
        }
        Ok(data)
    }

    async fn raw_post(&self, path: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(payload)?);
        if let Some(bearer) = self.session.bearer() {
            request = request.header("Authorization", bearer);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("eAPI {} failed with status {}: {}", path, status, preview(&body, 500));
            return Err(http_error(status.as_u16(), &body));
        }

        tracing::debug!("eAPI {} response: {}", path, preview(&body, 500));
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TwoFactorAuth for InvoiceClient {
    type Response = InvoiceAuthResponse;

    async fn sign_in(&mut self, username: &str, password: &str) -> Result<InvoiceAuthResponse> {
        self.authenticate(username, password, "").await
    }

    async fn submit_pin(&mut self, pin_token: &str, pin: &str) -> Result<InvoiceAuthResponse> {
        self.authenticate_pin(pin_token, pin, &DeviceInfo::default()).await
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// 401 → истёкший токен; иначе текст `STATUS.TEXT` из тела, если он есть
fn http_error(status: u16, body: &str) -> RsGeError {
    let code = i64::from(status);
    if status == 401 {
        return RsGeError::authentication_with_code("Unauthorized. Token may be expired.", code);
    }

    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| status_of(&value).1)
        .unwrap_or_else(|| format!("HTTP error: {}", status));
    RsGeError::api(message, Some(code))
}

/// `STATUS.ID` и непустой `STATUS.TEXT`
fn status_of(data: &Value) -> (i64, Option<String>) {
    let status = &data["STATUS"];
    let text = lenient::value_to_string(&status["TEXT"]);
    let text = if text.is_empty() { None } else { Some(text) };
    (lenient::value_to_int(&status["ID"]), text)
}

fn data_of(mut data: Value) -> Value {
    data.get_mut("DATA").map(Value::take).unwrap_or(Value::Null)
}

fn id_list(invoice_ids: &[i64]) -> Vec<Value> {
    invoice_ids.iter().map(|id| json!({ "ID": id })).collect()
}

fn non_empty(value: &str) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::from(value)
    }
}
