//! Жизненный цикл накладной: создание, товары, сохранение, активация, закрытие.
//!
//! `cargo run -p rsge --example basic_waybill`

use rsge::models::enums::{TransportCostPayer, VatType, WayBillType};
use rsge::{load_config, WayBillClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,rsge=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let client = WayBillClient::with_config("tbilisi", "123456", &config.waybill)?;

    let (un_id, user_id) = client.check_service_user().await?;
    println!("Authenticated: un_id {}, user id {}", un_id, user_id);

    let mut waybill = client.create_waybill(
        WayBillType::Transportation,
        "12345678910",
        "შპს ტესტი",
        "თბილისი, რუსთაველის გამზ. 12",
        "ბათუმი, გორგილაძის ქ. 5",
    );
    waybill.driver_tin = "01234567890".into();
    waybill.driver_name = "გიორგი გიორგაძე".into();
    waybill.car_number = "AA123BB".into();
    waybill.transport_cost_payer = TransportCostPayer::Seller;
    waybill.comment = "სატესტო ზედნადები".into();

    waybill.add_goods("შაქარი", 2, 500.0, 2.50, "4860001000001").vat_type = VatType::Regular;
    waybill.add_goods("ფქვილი", 2, 300.0, 1.80, "4860001000002").vat_type = VatType::Regular;

    println!("Goods: {} items, total {} GEL", waybill.goods_list.len(), waybill.full_amount);

    let result = client.save_waybill(&waybill).await?;
    if !result.is_success() {
        println!("Save failed: status {}", result.status);
        for goods in result.goods_results.iter().filter(|g| g.error < 0) {
            println!("  {}: error {}", goods.name, goods.error);
        }
        return Ok(());
    }
    println!("Saved: waybill id {}", result.waybill_id);

    let number = client.activate_waybill(result.waybill_id).await?;
    println!("Activated: number {}", number);

    client.close_waybill(result.waybill_id).await?;
    println!("Closed");

    Ok(())
}
