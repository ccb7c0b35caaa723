//! Cascade state machine for a product entry.
//!
//! metal type → catalog → product → module form a chain of dependent
//! selections: changing a level invalidates everything below it. The
//! reducer is pure; catalog fetches surface as actions the caller executes
//! and later folds back in as `CatalogLoaded`/`CatalogFailed` events.

use thiserror::Error;

use super::entry::ProductEntry;
use super::event::EntryEvent;
use super::types::MetalType;
use crate::ids::{FetchToken, FetchTokenMinter};

/// Side effects requested by a transition, executed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Issue a catalog request for this metal type. The completion must
    /// carry the token back so superseded requests can be dropped.
    FetchCatalog {
        token: FetchToken,
        metal_type: MetalType,
    },
}

/// Locally rejected transitions. No network call is issued and no state
/// changes when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("product is not part of the current catalog")]
    ProductNotInCatalog,
    #[error("a sale module requires a selected product")]
    ModuleWithoutProduct,
}

impl ProductEntry {
    /// Applies one event and returns the actions the caller must execute.
    ///
    /// Stale `Catalog*` completions (token mismatch) are ignored rather
    /// than rejected: a superseded request is expected to resolve late.
    pub fn apply(
        &mut self,
        event: EntryEvent,
        tokens: &mut FetchTokenMinter,
    ) -> Result<Vec<EntryAction>, TransitionError> {
        match event {
            EntryEvent::MetalTypeChanged(metal) => {
                self.metal_type = metal;
                self.selected = None;
                self.module = None;
                self.catalog.clear();
                self.pending_fetch = None;

                let mut actions = Vec::new();
                if let Some(metal_type) = metal {
                    let token = tokens.next();
                    self.pending_fetch = Some(token);
                    actions.push(EntryAction::FetchCatalog { token, metal_type });
                }
                Ok(actions)
            }

            EntryEvent::CatalogLoaded { token, products } => {
                if self.pending_fetch == Some(token) {
                    self.catalog = products;
                    self.pending_fetch = None;
                }
                Ok(Vec::new())
            }

            EntryEvent::CatalogFailed { token } => {
                // Catalog stays empty; the entry rolls back to its
                // pre-fetch shape and the caller surfaces the failure.
                if self.pending_fetch == Some(token) {
                    self.pending_fetch = None;
                }
                Ok(Vec::new())
            }

            EntryEvent::ProductSelected(product) => {
                if !self.catalog.contains(&product) {
                    return Err(TransitionError::ProductNotInCatalog);
                }
                self.selected = Some(product);
                // Module semantics can depend on the product; force re-selection.
                self.module = None;
                Ok(Vec::new())
            }

            EntryEvent::ModuleChanged(module) => {
                if self.selected.is_none() {
                    return Err(TransitionError::ModuleWithoutProduct);
                }
                self.module = Some(module);
                Ok(Vec::new())
            }

            EntryEvent::ImageCaptured(image) => {
                self.images.push(image);
                Ok(Vec::new())
            }
        }
    }
}
