//! Справочники eAPI: организация, единицы, штрихкоды, акцизы, номер декларации.

use rsge::models::domain::a003_tax_invoice::{BarCodeFilter, ExciseFilter};
use rsge::InvoiceClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut client = InvoiceClient::new()?;
    client.authenticate("your_username", "your_password", "").await?;

    let org = client.get_org_info("206322102").await?;
    println!("Organization: {}", org.name);
    println!("  TIN: {}", org.tin);
    println!("  Address: {}", org.address);
    println!("  VAT payer: {}", org.is_vat_payer);
    println!("  Diplomat: {}", org.is_diplomat);

    match client.get_vat_payer_status("206322102", "").await {
        Ok(is_vat) => println!("\nVAT payer status: {}", is_vat),
        Err(e) => println!("\nVAT payer status unavailable: {}", e),
    }

    let units = client.get_units().await?;
    println!("\nMeasurement units: {}", units.len());
    for unit in &units {
        println!("  {}: {}", unit.value, unit.label);
    }

    let bar_codes = client
        .list_bar_codes(&BarCodeFilter {
            maximum_rows: 5,
            ..Default::default()
        })
        .await?;
    println!("\nBarcode catalog: {} entries", bar_codes.len());
    for bar_code in &bar_codes {
        println!("  {}: {} @ {}", bar_code.barcode, bar_code.goods_name, bar_code.unit_price);
    }

    let excise = client
        .list_excise(&ExciseFilter {
            maximum_rows: 5,
            ..Default::default()
        })
        .await?;
    println!("\nExcise products: {} entries", excise.len());
    for row in &excise {
        let columns: Vec<String> = row
            .fields()
            .into_iter()
            .map(|field| format!("{}={}", field, row.text(field)))
            .collect();
        println!("  {}", columns.join(", "));
    }

    println!("\nDeclaration sequence (2025): {}", client.get_seq_num(2025, None).await?);
    println!("Declaration sequence (2025/04): {}", client.get_seq_num(2025, Some(4)).await?);

    client.sign_out().await?;
    Ok(())
}
