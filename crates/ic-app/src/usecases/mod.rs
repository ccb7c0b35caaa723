//! Business logic use cases.
//!
//! The capture workflow itself is long-lived and stateful (one orchestrator
//! per flow); invoice lookup and the agreement steps are one-shot use cases
//! that need no session of their own.

pub mod lookup_invoice;
pub mod preview_agreement;
pub mod sign_agreement;
pub mod workflow;

pub use lookup_invoice::LookupInvoice;
pub use preview_agreement::PreviewAgreement;
pub use sign_agreement::SignAgreement;
pub use workflow::{CaptureWorkflow, DocumentOutcome};
