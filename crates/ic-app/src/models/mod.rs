//! Read-side projections handed to a UI layer.

use serde::Serialize;

use ic_core::{DocumentPair, DocumentSide, EntryId, MetalType, ProductEntry, SaleModule};

/// Flat view of one product entry for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub id: EntryId,
    pub metal_type: Option<MetalType>,
    pub product_name: Option<String>,
    pub module: Option<SaleModule>,
    pub image_count: usize,
    pub is_fetching_catalog: bool,
    pub is_complete: bool,
}

impl From<&ProductEntry> for EntryView {
    fn from(entry: &ProductEntry) -> Self {
        Self {
            id: entry.id(),
            metal_type: entry.metal_type(),
            product_name: entry
                .selected_product()
                .map(|product| product.product_name.clone()),
            module: entry.module(),
            image_count: entry.images().len(),
            is_fetching_catalog: entry.is_fetching_catalog(),
            is_complete: entry.is_complete(),
        }
    }
}

/// The document step as the screen sees it once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStepView {
    pub has_existing: bool,
    pub front_url: Option<String>,
    pub back_url: Option<String>,
    pub front_captured: bool,
    pub back_captured: bool,
    pub can_proceed: bool,
}

impl From<&DocumentPair> for DocumentStepView {
    fn from(pair: &DocumentPair) -> Self {
        let front = pair.slot(DocumentSide::Front);
        let back = pair.slot(DocumentSide::Back);
        Self {
            has_existing: pair.has_existing(),
            front_url: front.existing.as_ref().map(|doc| doc.file_url.clone()),
            back_url: back.existing.as_ref().map(|doc| doc.file_url.clone()),
            front_captured: front.local.is_some(),
            back_captured: back.local.is_some(),
            can_proceed: pair.reconcile().can_proceed,
        }
    }
}
