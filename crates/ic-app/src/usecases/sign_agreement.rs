//! Agreement signing.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use ic_core::ports::InvoiceServicePort;
use ic_core::ImageDescriptor;

use crate::errors::WorkflowError;

/// Submits the customer's captured signature accepting the agreement.
///
/// The signature arrives as a normalized image descriptor (the capture
/// surface renders the pad and exports the image); success moves the flow
/// on to the document step.
pub struct SignAgreement {
    service: Arc<dyn InvoiceServicePort>,
}

impl SignAgreement {
    pub fn new(service: Arc<dyn InvoiceServicePort>) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        invoice_number: &str,
        signature: &ImageDescriptor,
    ) -> Result<(), WorkflowError> {
        if invoice_number.trim().is_empty() {
            return Err(WorkflowError::InvalidInvoiceNumber);
        }

        let span = info_span!("agreement.sign", invoice = %invoice_number);
        async {
            self.service
                .sign_agreement(invoice_number, signature)
                .await
                .map_err(|err| WorkflowError::Submission {
                    message: err.message().to_string(),
                })
        }
        .instrument(span)
        .await
    }
}
