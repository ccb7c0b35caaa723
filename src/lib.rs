//! # invcap
//!
//! Point-of-sale capture workflow engine.
//!
//! A customer's invoice is identified, an agreement is signed, identity
//! documents are captured (or reconciled against what the server already
//! has), and each purchased product is classified (metal type, catalog
//! product, sale module) and photographed before one structured
//! submission.
//!
//! The workspace is layered:
//! - [`ic_core`]: pure domain. Entity models, the per-entry cascade state
//!   machine, the session aggregate, the submission assembler and the
//!   collaborator ports.
//! - [`ic_app`]: use cases and the workflow orchestrator.
//! - [`ic_infra`]: reqwest HTTP adapter, token store, configuration.

pub use ic_app as app;
pub use ic_core as core;
pub use ic_infra as infra;

// Re-export the surface a consumer wires together.
pub use ic_app::{
    CaptureWorkflow, DocumentOutcome, EngineDeps, LookupInvoice, PreviewAgreement, SignAgreement,
    WorkflowError,
};
pub use ic_core::{InvoiceContext, WorkflowSession};
pub use ic_infra::{ApiConfig, HttpInvoiceService, InMemoryTokenStore};
