//! Продавец передаёт накладную перевозчику, перевозчик активирует и закрывает её.

use chrono::Local;
use rsge::models::enums::WayBillType;
use rsge::{TransporterInfo, WayBillClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seller = WayBillClient::new("tbilisi", "123456")?;

    let mut waybill = seller.create_waybill(
        WayBillType::Transportation,
        "12345678910",
        "შპს მყიდველი",
        "თბილისი",
        "ქუთაისი",
    );
    waybill.transporter_tin = "99999999999".into();
    waybill.add_goods("ტვირთი", 2, 1000.0, 5.0, "001");

    let result = seller.save_waybill(&waybill).await?;
    let waybill_id = result.waybill_id;
    println!("Seller saved waybill {}", waybill_id);

    seller.activate_waybill(waybill_id).await?;
    println!("Sent to transporter");

    let transporter = WayBillClient::new("satesto2", "123456")?;
    let info = TransporterInfo {
        car_number: "TT999GG".into(),
        driver_tin: "01234567890".into(),
        driver_name: "მძღოლი მძღოლაშვილი".into(),
        ..Default::default()
    };
    transporter.save_waybill_transporter(waybill_id, &info).await?;
    println!("Transporter saved details");

    let (code, number) = transporter
        .activate_waybill_transporter(waybill_id, Local::now().naive_local())
        .await?;
    println!("Transporter activated: code {}, number {}", code, number);

    transporter
        .close_waybill_transporter(waybill_id, Local::now().naive_local(), "", "")
        .await?;
    println!("Transporter closed");

    Ok(())
}
