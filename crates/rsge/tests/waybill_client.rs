use chrono::NaiveDate;
use rsge::models::domain::a001_waybill::{WayBill, WayBillFilter};
use rsge::models::enums::{WayBillStatus, WayBillType};
use rsge::{RsGeError, ServiceConfig, TransporterInfo, WayBillClient};
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(method_name: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Body>
    <{m}Response xmlns="http://tempuri.org/">{inner}</{m}Response>
  </soap:Body>
</soap:Envelope>"#,
        m = method_name,
        inner = inner
    )
}

fn result(method_name: &str, content: &str) -> String {
    envelope(method_name, &format!("<{m}Result>{c}</{m}Result>", m = method_name, c = content))
}

async fn mock_method(server: &MockServer, method_name: &str, body: String) {
    Mock::given(method("POST"))
        .and(header("SOAPAction", format!("http://tempuri.org/{}", method_name).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> WayBillClient {
    WayBillClient::with_config("tbilisi:206322102", "secret", &ServiceConfig::new(server.uri())).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(10, 0, 0)).unwrap()
}

#[tokio::test]
async fn test_check_service_user_reads_out_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "http://tempuri.org/chek_service_user"))
        .and(header("Content-Type", "text/xml; charset=utf-8"))
        .and(body_string_contains("<su>tbilisi:206322102</su>"))
        .and(body_string_contains("<sp>secret</sp>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            "chek_service_user",
            "<chek_service_userResult>true</chek_service_userResult><un_id>731937</un_id><s_user_id>1042</s_user_id>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let (un_id, s_user_id) = client(&server).check_service_user().await.unwrap();
    assert_eq!(un_id, 731937);
    assert_eq!(s_user_id, 1042);
}

#[tokio::test]
async fn test_check_service_user_false_is_auth_error() {
    let server = MockServer::start().await;
    mock_method(&server, "chek_service_user", result("chek_service_user", "false")).await;

    let err = client(&server).check_service_user().await.unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
async fn test_get_service_users_skips_su_sp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "http://tempuri.org/get_service_users"))
        .and(body_string_contains("<user_name>portal</user_name>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result(
            "get_service_users",
            "<ServiceUsers><ServiceUser><ID>1</ID><USER_NAME>shop1</USER_NAME><UN_ID>731937</UN_ID><IP>1.2.3.4</IP><NAME>მაღაზია</NAME></ServiceUser>\
             <ServiceUser><ID>2</ID><USER_NAME>shop2</USER_NAME></ServiceUser></ServiceUsers>",
        )))
        .mount(&server)
        .await;

    let users = client(&server).get_service_users("portal", "pass").await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].user_name, "shop1");
    assert_eq!(users[0].name, "მაღაზია");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(!body.contains("<su>"));
}

#[tokio::test]
async fn test_save_waybill_sends_raw_xml_and_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "http://tempuri.org/save_waybill"))
        .and(body_string_contains("<waybill><WAYBILL>"))
        .and(body_string_contains("<W_NAME>ცემენტი</W_NAME>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result(
            "save_waybill",
            "<RESULT><STATUS>0</STATUS><ID>905003</ID><GOODS_LIST><GOODS><ID>1</ID><ERROR>0</ERROR></GOODS></GOODS_LIST></RESULT>",
        )))
        .mount(&server)
        .await;

    let client = client(&server);
    let mut waybill = client.create_waybill(WayBillType::Transportation, "12345678910", "შპს ტესტი", "თბილისი", "ბათუმი");
    waybill.add_goods("ცემენტი", 1, 10.0, 12.5, "4860001");

    let result = client.save_waybill(&waybill).await.unwrap();
    assert!(result.is_success());
    assert_eq!(result.waybill_id, 905003);
    assert_eq!(result.goods_results.len(), 1);
}

#[tokio::test]
async fn test_get_waybill_parses_document() {
    let server = MockServer::start().await;
    mock_method(
        &server,
        "get_waybill",
        result(
            "get_waybill",
            "<WAYBILL><ID>905003</ID><TYPE>2</TYPE><STATUS>1</STATUS><BUYER_TIN>12345678910</BUYER_TIN>\
             <WAYBILL_NUMBER>0123456789</WAYBILL_NUMBER>\
             <GOODS_LIST><GOODS><ID>7</ID><W_NAME>ცემენტი</W_NAME><QUANTITY>10</QUANTITY><PRICE>12.5</PRICE><AMOUNT>125</AMOUNT></GOODS></GOODS_LIST></WAYBILL>",
        ),
    )
    .await;

    let waybill: WayBill = client(&server).get_waybill(905003).await.unwrap();
    assert_eq!(waybill.id, 905003);
    assert_eq!(waybill.waybill_type, WayBillType::Transportation);
    assert_eq!(waybill.status, WayBillStatus::Active);
    assert_eq!(waybill.waybill_number, "0123456789");
    assert_eq!(waybill.goods_list.len(), 1);
}

#[tokio::test]
async fn test_buyer_waybills_ex_sends_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "http://tempuri.org/get_buyer_waybills_ex"))
        .and(body_string_contains("<itypes>2,3</itypes>"))
        .and(body_string_contains("<seller_tin>206322102</seller_tin>"))
        .and(body_string_contains("<is_confirmed>1</is_confirmed>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result(
            "get_buyer_waybills_ex",
            "<WAYBILL_LIST><WAYBILL><ID>1</ID><STATUS>1</STATUS><FULL_AMOUNT>125.5</FULL_AMOUNT></WAYBILL>\
             <WAYBILL><ID>2</ID><STATUS>2</STATUS></WAYBILL></WAYBILL_LIST>",
        )))
        .mount(&server)
        .await;

    let filter = WayBillFilter {
        types: "2,3".into(),
        counterparty_tin: "206322102".into(),
        is_confirmed: rsge::models::enums::ConfirmationStatus::Confirmed,
        ..Default::default()
    };
    let items = client(&server).get_buyer_waybills_ex(&filter).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].full_amount, 125.5);
    assert_eq!(items[1].status, 2);
}

#[tokio::test]
async fn test_error_codes_map_to_errors() {
    let server = MockServer::start().await;
    mock_method(&server, "del_waybill", result("del_waybill", "-101")).await;
    mock_method(&server, "ref_waybill", result("ref_waybill", "-100")).await;
    mock_method(&server, "close_waybill", result("close_waybill", "-1003")).await;

    let client = client(&server);

    let err = client.delete_waybill(1).await.unwrap_err();
    assert!(matches!(err, RsGeError::Permission { code: Some(-101), .. }));

    let err = client.cancel_waybill(1).await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(err.code(), Some(-100));

    let err = client.close_waybill(1).await.unwrap_err();
    assert!(matches!(err, RsGeError::Api { code: Some(-1003), .. }));
}

#[tokio::test]
async fn test_non_numeric_code_is_invalid_response() {
    let server = MockServer::start().await;
    mock_method(&server, "del_waybill", result("del_waybill", "oops")).await;

    let err = client(&server).delete_waybill(1).await.unwrap_err();
    assert!(matches!(err, RsGeError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_activate_with_date_formats_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "http://tempuri.org/send_waybill_vd"))
        .and(body_string_contains("<begin_date>2024-05-01T10:00:00</begin_date>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result("send_waybill_vd", "0123456789")))
        .mount(&server)
        .await;

    let number = client(&server)
        .activate_waybill_with_date(905003, date(2024, 5, 1))
        .await
        .unwrap();
    assert_eq!(number, "0123456789");
}

#[tokio::test]
async fn test_transporter_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "http://tempuri.org/save_waybill_transporter"))
        .and(body_string_contains("<chek_driver_tin>1</chek_driver_tin>"))
        .and(body_string_contains("<car_number>AA123BB</car_number>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result("save_waybill_transporter", "1")))
        .mount(&server)
        .await;
    mock_method(
        &server,
        "send_waybill_transporter",
        envelope(
            "send_waybill_transporter",
            "<send_waybill_transporterResult>1</send_waybill_transporterResult><waybill_number>0987654321</waybill_number>",
        ),
    )
    .await;

    let client = client(&server);
    let info = TransporterInfo {
        car_number: "AA123BB".into(),
        driver_tin: "01001012345".into(),
        driver_name: "გიორგი".into(),
        ..Default::default()
    };
    assert_eq!(client.save_waybill_transporter(905003, &info).await.unwrap(), 1);

    let (code, number) = client
        .activate_waybill_transporter(905003, date(2024, 5, 2))
        .await
        .unwrap();
    assert_eq!(code, 1);
    assert_eq!(number, "0987654321");
}

#[tokio::test]
async fn test_save_invoice_returns_out_id() {
    let server = MockServer::start().await;
    mock_method(
        &server,
        "save_invoice",
        envelope(
            "save_invoice",
            "<save_invoiceResult>1</save_invoiceResult><out_inv_id>55501</out_inv_id>",
        ),
    )
    .await;

    let (code, invoice_id) = client(&server).save_invoice(905003, 0).await.unwrap();
    assert_eq!(code, 1);
    assert_eq!(invoice_id, 55501);
}

#[tokio::test]
async fn test_reference_lists_and_car_numbers() {
    let server = MockServer::start().await;
    mock_method(
        &server,
        "get_trans_types",
        result(
            "get_trans_types",
            "<TRANSPORT_TYPES><TRANSPORT_TYPE><ID>1</ID><NAME>საავტომობილო</NAME></TRANSPORT_TYPE>\
             <TRANSPORT_TYPE><ID>4</ID><NAME>სხვა</NAME></TRANSPORT_TYPE></TRANSPORT_TYPES>",
        ),
    )
    .await;
    mock_method(
        &server,
        "get_car_numbers",
        result("get_car_numbers", "<CAR_NUMBERS><string>AA123BB</string><string>BB456CC</string></CAR_NUMBERS>"),
    )
    .await;
    mock_method(&server, "get_name_from_tin", result("get_name_from_tin", "შპს რს")).await;

    let client = client(&server);

    let types = client.get_transport_types().await.unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[1].id, 4);

    let cars = client.get_car_numbers().await.unwrap();
    assert_eq!(cars, vec!["AA123BB".to_string(), "BB456CC".to_string()]);

    assert_eq!(client.get_name_from_tin("206322102").await.unwrap(), "შპს რს");
}

#[tokio::test]
async fn test_http_failure_is_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Server Error</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get_waybill_units().await.unwrap_err();
    assert!(matches!(err, RsGeError::Connection(_)));
}
