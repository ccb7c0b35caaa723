//! Failure taxonomy for workflow operations.
//!
//! Every remote failure is caught at the port boundary and folded into one
//! of these variants with a message fit to show the user; nothing here can
//! crash the engine.

use thiserror::Error;

use ic_core::session::SessionError;
use ic_core::submission::SubmissionError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The customer could not be determined. Terminal for the document
    /// step; the user must navigate back.
    #[error("Could not determine customer. Please go back and try again.")]
    MissingCustomer,

    /// No invoice number was supplied for a lookup or signature.
    #[error("Invoice number is missing.")]
    InvalidInvoiceNumber,

    /// A catalog or document fetch failed. State rolled back to its
    /// pre-fetch values; the user may retry.
    #[error("{message}")]
    Fetch { message: String },

    /// Both sides of the document are required before proceeding.
    #[error("Please upload both front and back of the document to continue.")]
    DocumentsIncomplete,

    /// The document upload failed. Local captures are kept for retry.
    #[error("{message}")]
    Upload { message: String },

    /// The product submission failed. Entries and images are kept so the
    /// user can retry without re-entering data.
    #[error("{message}")]
    Submission { message: String },

    /// The camera/gallery adapter failed (not a user cancellation).
    #[error("{message}")]
    Acquisition { message: String },

    /// Locally rejected transition; no network call was issued.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Submission gating: not ready, or already in flight.
    #[error(transparent)]
    Gate(#[from] SubmissionError),
}
