//! # ic-core
//!
//! Core domain models and business logic for the invcap capture workflow.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the entity models, the per-entry cascade state machine,
//! the workflow session aggregate, the submission assembler, the document
//! reconciliation policy, and the ports describing external collaborators.

// Public module exports
pub mod document;
pub mod ids;
pub mod image;
pub mod invoice;
pub mod ports;
pub mod product;
pub mod session;
pub mod submission;

// Re-export commonly used types at the crate root
pub use document::{DocumentPair, DocumentSide, ExistingDocuments, ReconcileDecision};
pub use ids::{CustomerId, EntryId, FetchToken};
pub use image::ImageDescriptor;
pub use invoice::{InvoiceContext, InvoiceDetails, StepProgress};
pub use product::{CatalogProduct, EntryEvent, MetalType, ProductEntry, SaleModule};
pub use session::{SessionError, WorkflowSession};
pub use submission::{ProductRecord, SubmissionError, SubmissionRequest};
