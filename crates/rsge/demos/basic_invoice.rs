//! Налоговый документ: вход (с PIN при 2FA), создание, сохранение, активация.
//!
//! На тестовом контуре допустимы только ИНН 206322102 и 12345678910.

use std::io::{self, BufRead, Write};

use rsge::models::domain::a003_tax_invoice::Invoice;
use rsge::models::enums::{InvoiceCategory, InvoiceType, InvoiceVatType};
use rsge::{load_config, InvoiceClient, TwoFactorAuth};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn read_pin(masked_mobile: &str) -> String {
    print!("Enter PIN sent to {}: ", masked_mobile);
    let _ = io::stdout().flush();
    let mut pin = String::new();
    let _ = io::stdin().lock().read_line(&mut pin);
    pin.trim().to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let mut client = InvoiceClient::with_config(&config.invoice)?;

    client.login("satesto2", "123456", read_pin).await?;
    println!("Authenticated");

    let mut invoice = Invoice::new(InvoiceCategory::GoodsService, InvoiceType::WithTransport);
    invoice.operation_date = "10-02-2025 10:00:00".into();
    invoice.tin_seller = "12345678910".into();
    invoice.tin_buyer = "206322102".into();
    invoice.trans_start_address = "თბილისი, რუსთაველის გამზ. 12".into();
    invoice.trans_end_address = "რუსთავი, მშვიდობის ქ. 5".into();
    invoice.trans_type = 1;
    invoice.trans_car_no = "AB-123-CD".into();
    invoice.trans_driver_tin = "206322102".into();
    invoice.trans_cost_payer = 2;

    let fridge = invoice.add_goods("მაცივარი", 2.0, 900.0);
    fridge.barcode = "0001".into();
    fridge.vat_type = InvoiceVatType::Standard.code();

    invoice.add_goods("ტელევიზორი", 1.0, 1500.0).barcode = "0002".into();

    println!("Goods: {} items", invoice.invoice_goods.len());
    for item in &invoice.invoice_goods {
        println!("  {}: {} x {} = {}", item.goods_name, item.quantity, item.unit_price, item.amount);
    }

    let transaction_id = client.save_invoice(&invoice, "").await?;
    println!("Save submitted, transaction {}", transaction_id);

    let result = client.get_transaction_result(&transaction_id).await?;
    println!("Saved: invoice id {}", result.invoice_id);

    let saved = client.get_invoice(result.invoice_id, 0, 0).await?;
    client.activate_invoice(&saved, "").await?;
    println!("Activated invoice {}", saved.id);

    client.sign_out().await?;
    println!("Signed out");

    Ok(())
}
