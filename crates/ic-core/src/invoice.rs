//! Invoice identity and the summary record returned by the service.

use serde::{Deserialize, Serialize};

use crate::ids::CustomerId;

/// Identity of the invoice a capture flow is running for.
///
/// Immutable once the flow begins; only the customer id may arrive later,
/// resolved from the invoice itself when it was not supplied directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceContext {
    invoice_number: String,
    customer_id: Option<CustomerId>,
}

impl InvoiceContext {
    pub fn new(invoice_number: impl Into<String>) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            customer_id: None,
        }
    }

    pub fn with_customer(invoice_number: impl Into<String>, customer_id: CustomerId) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            customer_id: Some(customer_id),
        }
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    /// Records a lazily resolved customer id. The first resolution wins;
    /// the context never changes identity mid-flow.
    pub fn resolve_customer(&mut self, customer_id: CustomerId) {
        if self.customer_id.is_none() {
            self.customer_id = Some(customer_id);
        }
    }
}

/// Step progress reported alongside the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepProgress {
    pub current_step: u32,
    pub is_completed: bool,
}

/// Invoice summary returned by `resolve_invoice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetails {
    pub invoice_number: String,
    pub customer_id: Option<CustomerId>,
    pub status_label: Option<String>,
    pub steps: Option<StepProgress>,
    pub pdf_url: Option<String>,
}
