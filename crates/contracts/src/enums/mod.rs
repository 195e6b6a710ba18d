mod coded_enum;
pub mod invoice;
pub mod waybill;

pub use invoice::*;
pub use waybill::*;
