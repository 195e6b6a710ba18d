pub mod aggregate;
pub mod auth;
pub mod filter;
pub mod reference;

pub use aggregate::{Invoice, InvoiceAdvance, InvoiceGoods, InvoiceReturn, SubInvoiceDistribution};
pub use auth::InvoiceAuthResponse;
pub use filter::{BarCodeFilter, ExciseFilter, InvoiceListFilter, OperationPeriod, DEFAULT_MAXIMUM_ROWS};
pub use reference::{BarCode, ExciseRow, InvoiceAction, OrgInfo, TransactionResult, Unit};
