use super::types::{CatalogProduct, MetalType, SaleModule};
use crate::ids::FetchToken;
use crate::image::ImageDescriptor;

/// Events driving one entry's cascade state machine.
///
/// User-driven events come from the screens; the `Catalog*` events are
/// fetch completions folded back in by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryEvent {
    /// User picked (or cleared) the metal classification.
    MetalTypeChanged(Option<MetalType>),

    /// Catalog request resolved.
    CatalogLoaded {
        token: FetchToken,
        products: Vec<CatalogProduct>,
    },

    /// Catalog request failed.
    CatalogFailed { token: FetchToken },

    /// User picked a product out of the current catalog.
    ProductSelected(CatalogProduct),

    /// User picked the sale module.
    ModuleChanged(SaleModule),

    /// A photo of the item was captured.
    ImageCaptured(ImageDescriptor),
}

impl EntryEvent {
    /// Completions may arrive after their entry is gone; user events may not.
    pub fn is_fetch_completion(&self) -> bool {
        matches!(
            self,
            Self::CatalogLoaded { .. } | Self::CatalogFailed { .. }
        )
    }
}
