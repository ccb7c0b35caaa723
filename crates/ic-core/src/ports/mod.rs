//! Collaborator contracts.
//!
//! Implementations are provided by the infrastructure layer (HTTP adapter,
//! platform capture adapters) or by tests.

pub mod access_token;
pub mod errors;
pub mod image_acquisition;
pub mod invoice_service;

pub use access_token::AccessTokenPort;
pub use errors::{AcquisitionError, ServiceError};
pub use image_acquisition::{CaptureRequest, ImageAcquisitionPort};
pub use invoice_service::{AgreementPreview, InvoiceServicePort};
