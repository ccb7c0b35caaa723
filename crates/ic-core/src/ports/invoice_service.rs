//! Remote invoice/document service port.
//!
//! The engine only depends on this contract; the HTTP shape lives in the
//! infrastructure adapter.

use async_trait::async_trait;

use super::errors::ServiceError;
use crate::document::ExistingDocuments;
use crate::ids::CustomerId;
use crate::image::ImageDescriptor;
use crate::invoice::InvoiceDetails;
use crate::product::{CatalogProduct, MetalType};
use crate::submission::SubmissionRequest;

/// Agreement document rendered by the service, base64-encoded HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementPreview {
    pub agreement_html: String,
}

#[async_trait]
pub trait InvoiceServicePort: Send + Sync {
    /// Fetch the invoice summary. Also used to lazily resolve the customer
    /// id when it was not supplied at flow entry.
    async fn resolve_invoice(&self, invoice_number: &str)
        -> Result<InvoiceDetails, ServiceError>;

    /// Server-side document existence report for a customer.
    async fn get_existing_documents(
        &self,
        customer_id: &CustomerId,
    ) -> Result<ExistingDocuments, ServiceError>;

    /// Upload both document sides together. Partial uploads are never sent.
    async fn upload_document_pair(
        &self,
        customer_id: &CustomerId,
        invoice_number: &str,
        front: &ImageDescriptor,
        back: &ImageDescriptor,
    ) -> Result<(), ServiceError>;

    async fn get_agreement_preview(
        &self,
        invoice_number: &str,
    ) -> Result<AgreementPreview, ServiceError>;

    /// Submit the customer's signature accepting the agreement.
    async fn sign_agreement(
        &self,
        invoice_number: &str,
        signature: &ImageDescriptor,
    ) -> Result<(), ServiceError>;

    /// Ordered product catalog for a metal type, scoped to the invoice.
    async fn get_catalog(
        &self,
        invoice_number: &str,
        metal_type: MetalType,
    ) -> Result<Vec<CatalogProduct>, ServiceError>;

    /// Final multi-entry submission; records and image groups are paired
    /// by index on the wire.
    async fn submit_products(&self, request: &SubmissionRequest) -> Result<(), ServiceError>;
}
