//! Capture workflow orchestrator.
//!
//! Converts user actions into state machine events, executes the actions
//! the machine requests against the service port, and folds completions
//! back into the session under its lock.
//!
//! # Architecture
//!
//! ```text
//! user action
//!   ↓
//! WorkflowSession (pure transitions)
//!   ↓ EntryAction::FetchCatalog
//! InvoiceServicePort (async call, lock released)
//!   ↓ completion
//! WorkflowSession (token-checked fold, under the lock)
//! ```
//!
//! The session is only ever mutated under its mutex, one completion at a
//! time; superseded catalog results are dropped by token identity, never
//! by cancelling the underlying call.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info_span, warn, Instrument};

use ic_core::image::DEFAULT_IMAGE_MIME;
use ic_core::ports::{CaptureRequest, ImageAcquisitionPort, InvoiceServicePort};
use ic_core::product::EntryAction;
use ic_core::{
    CatalogProduct, CustomerId, DocumentPair, DocumentSide, EntryEvent, EntryId, ImageDescriptor,
    InvoiceContext, MetalType, SaleModule, SessionError, WorkflowSession,
};

use crate::deps::EngineDeps;
use crate::errors::WorkflowError;
use crate::models::{DocumentStepView, EntryView};

/// How the document step was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// A fresh pair (or replace pair) was uploaded.
    Uploaded,
    /// The server copies are kept; no network call was made.
    UsingExisting,
}

/// Drives one capture flow for one invoice.
///
/// Construct one orchestrator per flow; the session it owns is discarded
/// with it. There is deliberately no global instance, so concurrent flows
/// (and tests) never collide.
pub struct CaptureWorkflow {
    session: Arc<Mutex<WorkflowSession>>,
    service: Arc<dyn InvoiceServicePort>,
    images: Arc<dyn ImageAcquisitionPort>,
}

impl CaptureWorkflow {
    pub fn new(invoice: InvoiceContext, deps: EngineDeps) -> Self {
        Self {
            session: Arc::new(Mutex::new(WorkflowSession::new(invoice))),
            service: deps.service,
            images: deps.images,
        }
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    pub async fn is_submission_ready(&self) -> bool {
        self.session.lock().await.is_submission_ready()
    }

    pub async fn entries(&self) -> Vec<EntryView> {
        self.session
            .lock()
            .await
            .entries_in_order()
            .map(EntryView::from)
            .collect()
    }

    pub async fn entry(&self, id: EntryId) -> Option<EntryView> {
        self.session.lock().await.entry(id).map(EntryView::from)
    }

    /// `None` until `load_documents` has completed at least once.
    pub async fn document_step(&self) -> Option<DocumentStepView> {
        self.session
            .lock()
            .await
            .documents()
            .map(DocumentStepView::from)
    }

    // -------------------------------------------------------------------
    // Document step
    // -------------------------------------------------------------------

    /// Loads the document step: resolves the customer id if needed, then
    /// fetches the server's existence report.
    ///
    /// No capture or upload is offered before this resolves. A fetch
    /// failure leaves the step unloaded and may be retried.
    pub async fn load_documents(&self) -> Result<DocumentStepView, WorkflowError> {
        let span = info_span!("documents.load");
        async {
            let customer_id = self.ensure_customer_id().await?;
            let existing = self
                .service
                .get_existing_documents(&customer_id)
                .await
                .map_err(|err| WorkflowError::Fetch {
                    message: err.message().to_string(),
                })?;

            let pair = DocumentPair::from_existing(existing);
            let view = DocumentStepView::from(&pair);
            let mut session = self.session.lock().await;
            session.install_documents(pair);
            Ok(view)
        }
        .instrument(span)
        .await
    }

    /// Captures one document side. Returns `false` when the user cancels;
    /// cancellation changes nothing.
    pub async fn capture_document_side(&self, side: DocumentSide) -> Result<bool, WorkflowError> {
        {
            let session = self.session.lock().await;
            if session.documents().is_none() {
                return Err(SessionError::DocumentsNotLoaded.into());
            }
        }

        let captured = self
            .images
            .acquire(CaptureRequest::Document(side))
            .await
            .map_err(|err| WorkflowError::Acquisition { message: err.0 })?;
        let Some(image) = captured else {
            return Ok(false);
        };

        let mut session = self.session.lock().await;
        session.set_local_document(side, with_document_defaults(side, image))?;
        Ok(true)
    }

    /// Leaves the document step according to the reconciliation policy.
    ///
    /// An upload is attempted only when both sides have local captures; a
    /// failed upload blocks, whether it was mandatory or an opt-in replace.
    /// With server copies and no new captures the network is skipped.
    pub async fn proceed_from_documents(&self) -> Result<DocumentOutcome, WorkflowError> {
        let span = info_span!("documents.proceed");
        async {
            let (can_proceed, upload) = {
                let session = self.session.lock().await;
                let Some(pair) = session.documents() else {
                    return Err(SessionError::DocumentsNotLoaded.into());
                };
                let upload = pair
                    .local_files()
                    .map(|(front, back)| (front.clone(), back.clone()));
                (pair.reconcile().can_proceed, upload)
            };

            if let Some((front, back)) = upload {
                let customer_id = self.ensure_customer_id().await?;
                let invoice_number = self.invoice_number().await;
                self.service
                    .upload_document_pair(&customer_id, &invoice_number, &front, &back)
                    .await
                    .map_err(|err| {
                        warn!(error = %err, "document upload failed");
                        WorkflowError::Upload {
                            message: err.message().to_string(),
                        }
                    })?;
                return Ok(DocumentOutcome::Uploaded);
            }

            if can_proceed {
                return Ok(DocumentOutcome::UsingExisting);
            }
            Err(WorkflowError::DocumentsIncomplete)
        }
        .instrument(span)
        .await
    }

    // -------------------------------------------------------------------
    // Product entries
    // -------------------------------------------------------------------

    pub async fn add_entry(&self) -> EntryId {
        self.session.lock().await.add_entry()
    }

    /// Always legal, even while a catalog fetch for the entry is still
    /// outstanding; the late completion is dropped when it arrives.
    pub async fn remove_entry(&self, id: EntryId) -> bool {
        self.session.lock().await.remove_entry(id)
    }

    /// Sets the metal type, clearing the dependent selections, and runs
    /// the catalog fetch the state machine schedules.
    pub async fn set_metal_type(
        &self,
        id: EntryId,
        metal_type: Option<MetalType>,
    ) -> Result<(), WorkflowError> {
        let span = info_span!("entry.metal_type", entry = %id);
        async {
            let (invoice_number, actions) = {
                let mut session = self.session.lock().await;
                let actions =
                    session.apply_entry_event(id, EntryEvent::MetalTypeChanged(metal_type))?;
                (session.invoice().invoice_number().to_string(), actions)
            };

            for action in actions {
                self.execute_entry_action(id, &invoice_number, action)
                    .await?;
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    pub async fn select_product(
        &self,
        id: EntryId,
        product: CatalogProduct,
    ) -> Result<(), WorkflowError> {
        self.session
            .lock()
            .await
            .apply_entry_event(id, EntryEvent::ProductSelected(product))?;
        Ok(())
    }

    pub async fn set_module(&self, id: EntryId, module: SaleModule) -> Result<(), WorkflowError> {
        self.session
            .lock()
            .await
            .apply_entry_event(id, EntryEvent::ModuleChanged(module))?;
        Ok(())
    }

    /// Captures one product photo. Returns `false` when the user cancels,
    /// or when the entry was removed while the picker was open; in both
    /// cases nothing changes.
    pub async fn capture_product_image(&self, id: EntryId) -> Result<bool, WorkflowError> {
        {
            let session = self.session.lock().await;
            if session.entry(id).is_none() {
                return Err(SessionError::UnknownEntry(id).into());
            }
        }

        let captured = self
            .images
            .acquire(CaptureRequest::Product(id))
            .await
            .map_err(|err| WorkflowError::Acquisition { message: err.0 })?;
        let Some(image) = captured else {
            return Ok(false);
        };

        let mut session = self.session.lock().await;
        if session.entry(id).is_none() {
            return Ok(false);
        }
        session.apply_entry_event(id, EntryEvent::ImageCaptured(image))?;
        Ok(true)
    }

    // -------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------

    /// Builds and dispatches the final submission.
    ///
    /// The in-flight flag is set before dispatch and always cleared after
    /// the call resolves; a failure keeps every entry and image so the
    /// user can retry without re-entering data.
    pub async fn submit(&self) -> Result<(), WorkflowError> {
        let span = info_span!("products.submit");
        async {
            let request = { self.session.lock().await.begin_submission()? };
            let result = self.service.submit_products(&request).await;

            let mut session = self.session.lock().await;
            session.finish_submission();
            result.map_err(|err| {
                warn!(error = %err, "product submission failed");
                WorkflowError::Submission {
                    message: err.message().to_string(),
                }
            })
        }
        .instrument(span)
        .await
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    async fn invoice_number(&self) -> String {
        self.session
            .lock()
            .await
            .invoice()
            .invoice_number()
            .to_string()
    }

    /// Returns the resolved customer id, looking the invoice up when it
    /// was not supplied at flow entry. Failure here is terminal for the
    /// document step.
    async fn ensure_customer_id(&self) -> Result<CustomerId, WorkflowError> {
        let invoice_number = {
            let session = self.session.lock().await;
            if let Some(id) = session.invoice().customer_id() {
                return Ok(id.clone());
            }
            session.invoice().invoice_number().to_string()
        };

        let details = self
            .service
            .resolve_invoice(&invoice_number)
            .await
            .map_err(|err| {
                warn!(error = %err, "invoice lookup for customer resolution failed");
                WorkflowError::MissingCustomer
            })?;
        let customer_id = details.customer_id.ok_or(WorkflowError::MissingCustomer)?;

        let mut session = self.session.lock().await;
        session.resolve_customer(customer_id.clone());
        Ok(customer_id)
    }

    async fn execute_entry_action(
        &self,
        id: EntryId,
        invoice_number: &str,
        action: EntryAction,
    ) -> Result<(), WorkflowError> {
        match action {
            EntryAction::FetchCatalog { token, metal_type } => {
                let result = self.service.get_catalog(invoice_number, metal_type).await;

                let mut session = self.session.lock().await;
                match result {
                    Ok(products) => {
                        session.apply_entry_event(id, EntryEvent::CatalogLoaded { token, products })?;
                        Ok(())
                    }
                    Err(err) => {
                        session.apply_entry_event(id, EntryEvent::CatalogFailed { token })?;
                        warn!(entry = %id, error = %err, "catalog fetch failed");
                        Err(WorkflowError::Fetch {
                            message: err.message().to_string(),
                        })
                    }
                }
            }
        }
    }
}

/// Fills in the side-specific file name and jpeg mime when the adapter
/// reported neither.
fn with_document_defaults(side: DocumentSide, mut image: ImageDescriptor) -> ImageDescriptor {
    if image.file_name.is_empty() {
        image.file_name = side.default_file_name().to_string();
    }
    if image.mime_type.is_empty() {
        image.mime_type = DEFAULT_IMAGE_MIME.to_string();
    }
    image
}
