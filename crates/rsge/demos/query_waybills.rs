//! Списки накладных продавца и покупателя, детали одной накладной.

use rsge::models::domain::a001_waybill::WayBillFilter;
use rsge::models::enums::WayBillType;
use rsge::WayBillClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = WayBillClient::new("tbilisi", "123456")?;

    let filter = WayBillFilter {
        statuses: ",1,".into(),
        create_date_s: "2024-01-01T00:00:00".into(),
        create_date_e: "2024-01-31T23:59:59".into(),
        ..Default::default()
    };

    let waybills = client.get_waybills(&filter).await?;
    println!("Seller waybills: {}", waybills.len());
    for item in waybills.iter().take(5) {
        println!(
            "  #{} | {} | {} | {} GEL",
            item.id, item.waybill_number, item.buyer_name, item.full_amount
        );
    }

    let buyer_filter = WayBillFilter {
        statuses: String::new(),
        ..filter
    };
    let incoming = client.get_buyer_waybills(&buyer_filter).await?;
    println!("Buyer waybills: {}", incoming.len());

    if let Some(first) = waybills.first() {
        let full = client.get_waybill(first.id).await?;
        println!("\nWaybill #{}", full.id);
        println!("  Type: {}", full.waybill_type);
        println!("  From: {}", full.start_address);
        println!("  To:   {}", full.end_address);
        for goods in &full.goods_list {
            println!("  - {}: {} x {} = {}", goods.name, goods.quantity, goods.price, goods.amount);
        }
        if full.waybill_type == WayBillType::Distribution {
            println!("  Sub-waybills: {}", full.sub_waybills.len());
        }
    }

    Ok(())
}
