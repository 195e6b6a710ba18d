pub mod customs_api_client;

pub use customs_api_client::CustomsClient;
