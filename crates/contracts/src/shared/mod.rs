pub mod lenient;
pub mod tabular;
pub mod xml;

pub use xml::{XmlElement, XmlError};
