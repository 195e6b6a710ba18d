pub mod a001_waybill;
pub mod a002_customs_declaration;
pub mod a003_tax_invoice;
