pub mod invoice_api_client;

pub use invoice_api_client::InvoiceClient;
