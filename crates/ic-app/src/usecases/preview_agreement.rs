//! Agreement preview ahead of signing.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use ic_core::ports::{AgreementPreview, InvoiceServicePort};

use crate::errors::WorkflowError;

/// Fetches the rendered agreement for an invoice so the customer can read
/// it before signing.
pub struct PreviewAgreement {
    service: Arc<dyn InvoiceServicePort>,
}

impl PreviewAgreement {
    pub fn new(service: Arc<dyn InvoiceServicePort>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, invoice_number: &str) -> Result<AgreementPreview, WorkflowError> {
        if invoice_number.trim().is_empty() {
            return Err(WorkflowError::InvalidInvoiceNumber);
        }

        let span = info_span!("agreement.preview", invoice = %invoice_number);
        async {
            self.service
                .get_agreement_preview(invoice_number)
                .await
                .map_err(|err| WorkflowError::Fetch {
                    message: err.message().to_string(),
                })
        }
        .instrument(span)
        .await
    }
}
