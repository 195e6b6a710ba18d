pub mod u501_waybill;
pub mod u502_customs;
pub mod u503_invoice;
