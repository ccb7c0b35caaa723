//! Wire DTOs for the invoice service.
//!
//! The service is loose about types (numeric or string ids, optional
//! fields appearing and disappearing), so everything here is tolerant and
//! normalization into domain types happens in one place.

use serde::Deserialize;
use serde_json::Value;

use ic_core::document::{ExistingDocument, ExistingDocuments};
use ic_core::{CatalogProduct, CustomerId, InvoiceDetails, StepProgress};

/// Common response envelope: `{status, message|error, data}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Failure message for a non-success response: `message` wins over
/// `error`, falling back to a status-code line.
pub(crate) fn failure_message(body: &Value, status: u16) -> String {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    field("message")
        .or_else(|| field("error"))
        .unwrap_or_else(|| format!("Request failed ({status})"))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InvoiceDetailsDto {
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub customer_id: Option<Value>,
    #[serde(default)]
    pub customer: Option<CustomerRefDto>,
    #[serde(default)]
    pub status_label: Option<String>,
    #[serde(default)]
    pub steps: Option<StepsDto>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CustomerRefDto {
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StepsDto {
    #[serde(default)]
    pub current_step: Option<u32>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

fn customer_id_from_value(value: &Value) -> Option<CustomerId> {
    match value {
        Value::Number(n) => n.as_i64().map(CustomerId::from),
        Value::String(s) if !s.is_empty() => Some(CustomerId::from(s.as_str())),
        _ => None,
    }
}

impl InvoiceDetailsDto {
    /// Top-level `customer_id` wins; the nested `customer.id` is the
    /// fallback.
    pub fn into_domain(self, requested_number: &str) -> InvoiceDetails {
        let customer_id = self
            .customer_id
            .as_ref()
            .and_then(customer_id_from_value)
            .or_else(|| {
                self.customer
                    .as_ref()
                    .and_then(|customer| customer.id.as_ref())
                    .and_then(customer_id_from_value)
            });

        InvoiceDetails {
            invoice_number: self
                .invoice_number
                .unwrap_or_else(|| requested_number.to_string()),
            customer_id,
            status_label: self.status_label,
            steps: self.steps.and_then(|steps| {
                steps.current_step.map(|current_step| StepProgress {
                    current_step,
                    is_completed: steps.is_completed.unwrap_or(false),
                })
            }),
            pdf_url: self.pdf_url.or(self.qr_code),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DocumentsDataDto {
    #[serde(default)]
    pub front: Option<DocumentFileDto>,
    #[serde(default)]
    pub back: Option<DocumentFileDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentFileDto {
    pub file_url: String,
}

impl DocumentsDataDto {
    pub fn into_domain(self, present: bool) -> ExistingDocuments {
        ExistingDocuments {
            present,
            front: self.front.map(|file| ExistingDocument {
                file_url: file.file_url,
            }),
            back: self.back.map(|file| ExistingDocument {
                file_url: file.file_url,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogItemDto {
    pub product_id: i64,
    pub product_name: String,
}

impl From<CatalogItemDto> for CatalogProduct {
    fn from(item: CatalogItemDto) -> Self {
        CatalogProduct::new(item.product_id, item.product_name)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AgreementPreviewDto {
    #[serde(default)]
    pub agreement_html: Option<String>,
}
