//! Invoice lookup by scanned or typed invoice number.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use ic_core::ports::InvoiceServicePort;
use ic_core::InvoiceDetails;

use crate::errors::WorkflowError;

/// Resolves a scanned code into the invoice summary that seeds the flow.
pub struct LookupInvoice {
    service: Arc<dyn InvoiceServicePort>,
}

impl LookupInvoice {
    pub fn new(service: Arc<dyn InvoiceServicePort>) -> Self {
        Self { service }
    }

    /// Scanned codes arrive untrimmed; a blank number is rejected locally
    /// without a network call.
    pub async fn execute(&self, raw_invoice_number: &str) -> Result<InvoiceDetails, WorkflowError> {
        let invoice_number = raw_invoice_number.trim();
        if invoice_number.is_empty() {
            return Err(WorkflowError::InvalidInvoiceNumber);
        }

        let span = info_span!("invoice.lookup", invoice = %invoice_number);
        async {
            self.service
                .resolve_invoice(invoice_number)
                .await
                .map_err(|err| WorkflowError::Fetch {
                    message: err.message().to_string(),
                })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use ic_core::document::ExistingDocuments;
    use ic_core::ports::{AgreementPreview, ServiceError};
    use ic_core::submission::SubmissionRequest;
    use ic_core::{CatalogProduct, CustomerId, ImageDescriptor, MetalType};

    struct MockService {
        result: Mutex<Result<InvoiceDetails, ServiceError>>,
        seen: Mutex<Vec<String>>,
    }

    impl MockService {
        fn new(result: Result<InvoiceDetails, ServiceError>) -> Self {
            Self {
                result: Mutex::new(result),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl InvoiceServicePort for MockService {
        async fn resolve_invoice(
            &self,
            invoice_number: &str,
        ) -> Result<InvoiceDetails, ServiceError> {
            self.seen.lock().unwrap().push(invoice_number.to_string());
            self.result.lock().unwrap().clone()
        }

        async fn get_existing_documents(
            &self,
            _customer_id: &CustomerId,
        ) -> Result<ExistingDocuments, ServiceError> {
            unreachable!()
        }

        async fn upload_document_pair(
            &self,
            _customer_id: &CustomerId,
            _invoice_number: &str,
            _front: &ImageDescriptor,
            _back: &ImageDescriptor,
        ) -> Result<(), ServiceError> {
            unreachable!()
        }

        async fn get_agreement_preview(
            &self,
            _invoice_number: &str,
        ) -> Result<AgreementPreview, ServiceError> {
            unreachable!()
        }

        async fn sign_agreement(
            &self,
            _invoice_number: &str,
            _signature: &ImageDescriptor,
        ) -> Result<(), ServiceError> {
            unreachable!()
        }

        async fn get_catalog(
            &self,
            _invoice_number: &str,
            _metal_type: MetalType,
        ) -> Result<Vec<CatalogProduct>, ServiceError> {
            unreachable!()
        }

        async fn submit_products(&self, _request: &SubmissionRequest) -> Result<(), ServiceError> {
            unreachable!()
        }
    }

    fn details() -> InvoiceDetails {
        InvoiceDetails {
            invoice_number: "INV-5".into(),
            customer_id: Some(CustomerId::from(3)),
            status_label: Some("Offen".into()),
            steps: None,
            pdf_url: None,
        }
    }

    #[tokio::test]
    async fn test_execute_trims_scanned_number() {
        let service = Arc::new(MockService::new(Ok(details())));
        let lookup = LookupInvoice::new(service.clone());

        let result = lookup.execute("  INV-5\n").await.unwrap();
        assert_eq!(result.invoice_number, "INV-5");
        assert_eq!(service.seen.lock().unwrap().as_slice(), ["INV-5"]);
    }

    #[tokio::test]
    async fn test_blank_number_is_rejected_without_network() {
        let service = Arc::new(MockService::new(Ok(details())));
        let lookup = LookupInvoice::new(service.clone());

        let err = lookup.execute("   ").await.unwrap_err();
        assert_eq!(err, WorkflowError::InvalidInvoiceNumber);
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_surfaces_its_message() {
        let service = Arc::new(MockService::new(Err(ServiceError::api(
            Some(404),
            "Invoice not found",
        ))));
        let lookup = LookupInvoice::new(service);

        let err = lookup.execute("INV-404").await.unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Fetch {
                message: "Invoice not found".into()
            }
        );
    }
}
