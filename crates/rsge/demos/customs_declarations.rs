//! Таможенные декларации за период.

use rsge::CustomsClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut client = CustomsClient::new()?;
    let auth = client.authenticate("your_username", "your_password", "").await?;
    if auth.needs_pin() {
        println!("Two-factor authentication required, PIN sent to {}", auth.masked_mobile);
        return Ok(());
    }

    let declarations = client.get_declarations("2024-01-01", "2024-03-31").await?;
    println!("Declarations: {}", declarations.len());

    for d in &declarations {
        let description: String = d.description.chars().take(40).collect();
        println!(
            "  {} | {} | {} | Value: {} | Duty: {}",
            d.declaration_number, d.commodity_code, description, d.customs_value, d.duty_amount
        );
    }

    client.sign_out().await?;
    println!("Signed out");
    Ok(())
}
