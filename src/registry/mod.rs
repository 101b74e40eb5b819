//! Registry model and access.
//!
//! This module provides:
//! - Unit categories and the per-category operation table
//! - Record kinds and operation handles
//! - Flat detail records
//! - The [`RegistryClient`] interface and its SOAP implementation

mod category;
mod client;
mod operation;
mod record;
mod soap;

// Re-export public API
pub use category::{UnitCategory, UnknownCategory};
pub use client::{RegistryClient, SoapClient};
pub use operation::{Operation, OperationKind, OperationSet};
pub use record::Record;
pub use soap::{build_envelope, parse_response, soap_action};
