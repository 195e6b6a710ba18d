//! Модели и числовые коды веб-сервисов RS.ge (налоговая служба Грузии).
//!
//! * [`domain::a001_waybill`] - записи SOAP-сервиса WayBill и их XML-представление
//! * [`domain::a002_customs_declaration`] - REST API таможенных деклараций
//! * [`domain::a003_tax_invoice`] - налоговые документы eAPI
//!
//! Крейт не выполняет ввод-вывод; клиенты находятся в крейте `rsge`.

pub mod domain;
pub mod enums;
pub mod shared;
