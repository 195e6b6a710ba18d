pub mod waybill_api_client;

pub use waybill_api_client::{TransporterInfo, WayBillClient};
