//! Разбор ошибок SDK по вариантам `RsGeError`.

use rsge::{RsGeError, WayBillClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = WayBillClient::new("wrong_user", "wrong_pass")?;

    match client.check_service_user().await {
        Ok((un_id, _)) => println!("Unexpectedly authenticated as {}", un_id),
        Err(RsGeError::Authentication { message, .. }) => println!("Auth failed: {}", message),
        Err(RsGeError::Permission { message, code }) => println!("Permission denied (code {:?}): {}", code, message),
        Err(RsGeError::Api { message, code }) => println!("API error (code {:?}): {}", code, message),
        Err(RsGeError::Connection(message)) => println!("Service unreachable: {}", message),
        Err(e) => println!("Unexpected error: {}", e),
    }

    // удаление чужой накладной
    if let Err(e) = client.delete_waybill(1).await {
        println!("delete_waybill: {} (code {:?})", e, e.code());
    }

    Ok(())
}
