pub mod aggregate;
pub mod list;
pub mod reference;

pub use aggregate::{
    parse_date_time, GoodsItem, GoodsSaveResult, SubWayBill, WayBill, WayBillSaveResult, WoodDocument,
    DATE_TIME_FORMAT,
};
pub use list::{WayBillFilter, WayBillListItem};
pub use reference::{
    AkcizCode, BarCodeEntry, ErrorCode, ServiceUser, TransportType, WayBillTemplate, WayBillTypeInfo, WayBillUnit,
    WoodType,
};
