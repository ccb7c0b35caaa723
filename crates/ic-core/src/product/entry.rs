use serde::{Deserialize, Serialize};

use super::types::{CatalogProduct, MetalType, SaleModule};
use crate::ids::{EntryId, FetchToken};
use crate::image::ImageDescriptor;

/// One purchased item moving through classification and photography.
///
/// Owned exclusively by the workflow session and dropped with it; entries
/// are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    id: EntryId,
    pub(crate) metal_type: Option<MetalType>,
    pub(crate) catalog: Vec<CatalogProduct>,
    pub(crate) selected: Option<CatalogProduct>,
    pub(crate) module: Option<SaleModule>,
    pub(crate) images: Vec<ImageDescriptor>,
    /// Token of the outstanding catalog fetch, if any. Only a completion
    /// carrying this exact token is applied.
    pub(crate) pending_fetch: Option<FetchToken>,
}

impl ProductEntry {
    pub(crate) fn new(id: EntryId) -> Self {
        Self {
            id,
            metal_type: None,
            catalog: Vec::new(),
            selected: None,
            module: None,
            images: Vec::new(),
            pending_fetch: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn metal_type(&self) -> Option<MetalType> {
        self.metal_type
    }

    /// Candidates for the current metal type, in service order.
    pub fn catalog(&self) -> &[CatalogProduct] {
        &self.catalog
    }

    pub fn selected_product(&self) -> Option<&CatalogProduct> {
        self.selected.as_ref()
    }

    pub fn module(&self) -> Option<SaleModule> {
        self.module
    }

    /// Captured photos in display order; duplicates are kept as captured.
    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn is_fetching_catalog(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// A complete entry carries the full classification and at least one photo.
    pub fn is_complete(&self) -> bool {
        self.metal_type.is_some()
            && self.selected.is_some()
            && self.module.is_some()
            && !self.images.is_empty()
    }
}
