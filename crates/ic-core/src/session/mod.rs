//! Workflow session aggregate.
//!
//! One session per run of the capture flow. Entries live in an arena keyed
//! by [`EntryId`] with a separate ordered id list for display order, so
//! removal or reordering can never misattribute an in-flight fetch.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::document::{DocumentPair, DocumentSide};
use crate::ids::{CustomerId, EntryId, FetchTokenMinter};
use crate::image::ImageDescriptor;
use crate::invoice::InvoiceContext;
use crate::product::{EntryAction, EntryEvent, ProductEntry, TransitionError};
use crate::submission::{SubmissionError, SubmissionRequest};

/// Locally rejected session operations: no network call is issued and no
/// state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown entry {0}")]
    UnknownEntry(EntryId),
    #[error("document step has not loaded yet")]
    DocumentsNotLoaded,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// In-memory state for one run of the capture flow.
///
/// Single-owner: created when the user enters the flow, dropped on leaving
/// or after a successful submission. Nothing here survives a process
/// restart, and nothing here is shared between concurrent flows; callers
/// construct one session per flow instead of going through a singleton.
#[derive(Debug)]
pub struct WorkflowSession {
    invoice: InvoiceContext,
    documents: Option<DocumentPair>,
    entries: HashMap<EntryId, ProductEntry>,
    order: Vec<EntryId>,
    next_entry_id: u64,
    tokens: FetchTokenMinter,
    submission_in_flight: bool,
}

impl WorkflowSession {
    pub fn new(invoice: InvoiceContext) -> Self {
        Self {
            invoice,
            documents: None,
            entries: HashMap::new(),
            order: Vec::new(),
            next_entry_id: 0,
            tokens: FetchTokenMinter::new(),
            submission_in_flight: false,
        }
    }

    pub fn invoice(&self) -> &InvoiceContext {
        &self.invoice
    }

    pub fn resolve_customer(&mut self, customer_id: CustomerId) {
        self.invoice.resolve_customer(customer_id);
    }

    // -------------------------------------------------------------------
    // Document step
    // -------------------------------------------------------------------

    /// `None` until the existence fetch has completed.
    pub fn documents(&self) -> Option<&DocumentPair> {
        self.documents.as_ref()
    }

    /// Installs the pair built from the server's existence report. The
    /// document step counts as loaded from this point on.
    pub fn install_documents(&mut self, pair: DocumentPair) {
        self.documents = Some(pair);
    }

    pub fn set_local_document(
        &mut self,
        side: DocumentSide,
        image: ImageDescriptor,
    ) -> Result<(), SessionError> {
        let pair = self
            .documents
            .as_mut()
            .ok_or(SessionError::DocumentsNotLoaded)?;
        pair.set_local(side, image);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Product entries
    // -------------------------------------------------------------------

    pub fn add_entry(&mut self) -> EntryId {
        let id = EntryId::new(self.next_entry_id);
        self.next_entry_id += 1;
        self.entries.insert(id, ProductEntry::new(id));
        self.order.push(id);
        debug!(entry = %id, "product entry added");
        id
    }

    /// Always legal, even mid-fetch; a late completion for the removed id
    /// is dropped when it arrives. Returns whether the entry existed.
    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        self.order.retain(|other| *other != id);
        let removed = self.entries.remove(&id).is_some();
        if removed {
            debug!(entry = %id, "product entry removed");
        }
        removed
    }

    pub fn entry(&self, id: EntryId) -> Option<&ProductEntry> {
        self.entries.get(&id)
    }

    pub fn entry_count(&self) -> usize {
        self.order.len()
    }

    /// Entries in display order (creation order, stable across removals).
    pub fn entries_in_order(&self) -> impl Iterator<Item = &ProductEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Routes an event to one entry's state machine.
    ///
    /// Fetch completions may outlive their entry (removal is always legal
    /// mid-fetch) and are dropped silently; user events on a missing entry
    /// are rejected.
    pub fn apply_entry_event(
        &mut self,
        id: EntryId,
        event: EntryEvent,
    ) -> Result<Vec<EntryAction>, SessionError> {
        let Some(entry) = self.entries.get_mut(&id) else {
            if event.is_fetch_completion() {
                debug!(entry = %id, "dropping fetch completion for removed entry");
                return Ok(Vec::new());
            }
            return Err(SessionError::UnknownEntry(id));
        };
        Ok(entry.apply(event, &mut self.tokens)?)
    }

    // -------------------------------------------------------------------
    // Validation gate and submission
    // -------------------------------------------------------------------

    /// Pure readiness check: at least one entry, and every entry complete.
    pub fn is_submission_ready(&self) -> bool {
        !self.order.is_empty() && self.entries_in_order().all(ProductEntry::is_complete)
    }

    pub fn submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    /// Builds the submission and marks it in flight. A second attempt
    /// while one is outstanding is rejected, not queued.
    pub fn begin_submission(&mut self) -> Result<SubmissionRequest, SubmissionError> {
        if self.submission_in_flight {
            return Err(SubmissionError::AlreadyInFlight);
        }
        if !self.is_submission_ready() {
            return Err(SubmissionError::NotReady);
        }
        let request =
            SubmissionRequest::assemble(self.invoice.invoice_number(), self.entries_in_order())?;
        self.submission_in_flight = true;
        Ok(request)
    }

    /// Clears the in-flight flag, success or failure, so a retry stays
    /// possible. Entries and images are never touched here.
    pub fn finish_submission(&mut self) {
        self.submission_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ExistingDocuments;
    use crate::product::{CatalogProduct, EntryAction, MetalType, SaleModule};

    fn session() -> WorkflowSession {
        WorkflowSession::new(InvoiceContext::new("INV-2024-0042"))
    }

    fn ring() -> CatalogProduct {
        CatalogProduct::new(1, "Ring")
    }

    fn photo() -> ImageDescriptor {
        ImageDescriptor::jpeg("file:///tmp/p.jpg", "p.jpg")
    }

    fn fetch_token(actions: &[EntryAction]) -> crate::ids::FetchToken {
        match actions {
            [EntryAction::FetchCatalog { token, .. }] => *token,
            other => panic!("expected exactly one FetchCatalog, got {other:?}"),
        }
    }

    /// Drives one entry through the full cascade to completion.
    fn complete_entry(session: &mut WorkflowSession) -> EntryId {
        let id = session.add_entry();
        let actions = session
            .apply_entry_event(id, EntryEvent::MetalTypeChanged(Some(MetalType::Gold)))
            .unwrap();
        let token = fetch_token(&actions);
        session
            .apply_entry_event(
                id,
                EntryEvent::CatalogLoaded {
                    token,
                    products: vec![ring()],
                },
            )
            .unwrap();
        session
            .apply_entry_event(id, EntryEvent::ProductSelected(ring()))
            .unwrap();
        session
            .apply_entry_event(id, EntryEvent::ModuleChanged(SaleModule::Gram))
            .unwrap();
        session
            .apply_entry_event(id, EntryEvent::ImageCaptured(photo()))
            .unwrap();
        id
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut session = session();
        let first = session.add_entry();
        session.remove_entry(first);
        let second = session.add_entry();
        assert_ne!(first, second);
    }

    #[test]
    fn test_not_ready_with_no_entries() {
        assert!(!session().is_submission_ready());
    }

    #[test]
    fn test_ready_only_when_every_entry_is_complete() {
        let mut session = session();
        complete_entry(&mut session);
        assert!(session.is_submission_ready());

        // Second entry missing its photos.
        let id = session.add_entry();
        let actions = session
            .apply_entry_event(id, EntryEvent::MetalTypeChanged(Some(MetalType::Silver)))
            .unwrap();
        let token = fetch_token(&actions);
        session
            .apply_entry_event(
                id,
                EntryEvent::CatalogLoaded {
                    token,
                    products: vec![ring()],
                },
            )
            .unwrap();
        session
            .apply_entry_event(id, EntryEvent::ProductSelected(ring()))
            .unwrap();
        session
            .apply_entry_event(id, EntryEvent::ModuleChanged(SaleModule::Piece))
            .unwrap();
        assert!(!session.is_submission_ready());

        session
            .apply_entry_event(id, EntryEvent::ImageCaptured(photo()))
            .unwrap();
        assert!(session.is_submission_ready());
    }

    #[test]
    fn test_removed_entry_swallows_late_completion_without_side_effects() {
        let mut session = session();
        let keeper = complete_entry(&mut session);

        let doomed = session.add_entry();
        let actions = session
            .apply_entry_event(doomed, EntryEvent::MetalTypeChanged(Some(MetalType::Gold)))
            .unwrap();
        let token = fetch_token(&actions);
        assert!(session.remove_entry(doomed));

        // The in-flight fetch resolves after removal.
        let actions = session
            .apply_entry_event(
                doomed,
                EntryEvent::CatalogLoaded {
                    token,
                    products: vec![CatalogProduct::new(99, "Ghost")],
                },
            )
            .unwrap();
        assert!(actions.is_empty());
        assert!(session.entry(doomed).is_none());

        // The surviving entry is untouched and the session is still ready.
        let kept = session.entry(keeper).unwrap();
        assert_eq!(kept.catalog(), &[ring()]);
        assert!(session.is_submission_ready());
    }

    #[test]
    fn test_user_event_on_removed_entry_is_rejected() {
        let mut session = session();
        let id = session.add_entry();
        session.remove_entry(id);

        let err = session
            .apply_entry_event(id, EntryEvent::ImageCaptured(photo()))
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownEntry(id));
    }

    #[test]
    fn test_display_order_survives_removal_in_the_middle() {
        let mut session = session();
        let a = session.add_entry();
        let b = session.add_entry();
        let c = session.add_entry();
        session.remove_entry(b);

        let order: Vec<EntryId> = session.entries_in_order().map(ProductEntry::id).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn test_begin_submission_gates_and_sets_in_flight() {
        let mut session = session();
        assert_eq!(
            session.begin_submission().unwrap_err(),
            SubmissionError::NotReady
        );

        complete_entry(&mut session);
        let request = session.begin_submission().unwrap();
        assert_eq!(request.entry_count(), 1);
        assert_eq!(request.invoice_number(), "INV-2024-0042");
        assert!(session.submission_in_flight());

        // Re-entrant attempt while in flight is rejected, not queued.
        assert_eq!(
            session.begin_submission().unwrap_err(),
            SubmissionError::AlreadyInFlight
        );

        // After completion (success or failure) a retry is possible and
        // the entries are still there.
        session.finish_submission();
        assert!(!session.submission_in_flight());
        assert!(session.is_submission_ready());
        assert!(session.begin_submission().is_ok());
    }

    #[test]
    fn test_submission_pairs_records_with_image_groups_in_order() {
        let mut session = session();
        let first = complete_entry(&mut session);
        let second = complete_entry(&mut session);
        session
            .apply_entry_event(
                second,
                EntryEvent::ImageCaptured(ImageDescriptor::jpeg("file:///tmp/q.jpg", "q.jpg")),
            )
            .unwrap();
        let _ = first;

        let request = session.begin_submission().unwrap();
        assert_eq!(request.records().len(), 2);
        assert_eq!(request.image_groups().len(), 2);
        assert_eq!(request.image_groups()[0].len(), 1);
        assert_eq!(request.image_groups()[1].len(), 2);
        assert_eq!(request.records()[1].product_name, "Ring");
    }

    #[test]
    fn test_document_capture_requires_loaded_step() {
        let mut session = session();
        let err = session
            .set_local_document(DocumentSide::Front, photo())
            .unwrap_err();
        assert_eq!(err, SessionError::DocumentsNotLoaded);

        session.install_documents(DocumentPair::from_existing(ExistingDocuments::default()));
        assert!(session
            .set_local_document(DocumentSide::Front, photo())
            .is_ok());
    }
}
