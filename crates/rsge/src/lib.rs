//! Клиенты сервисов Налоговой службы Грузии (RS.ge):
//! SOAP-сервис электронных накладных, REST API таможенных деклараций
//! и eAPI налоговых счетов-фактур.

pub mod shared;
pub mod usecases;

/// Модели запросов и ответов
pub use contracts as models;

pub use shared::auth::{AuthStep, DeviceInfo, TokenSession, TwoFactorAuth};
pub use shared::config::{load_config, load_config_from, Config, ServiceConfig};
pub use shared::error::{Result, RsGeError};
pub use usecases::u501_waybill::{TransporterInfo, WayBillClient};
pub use usecases::u502_customs::CustomsClient;
pub use usecases::u503_invoice::InvoiceClient;
