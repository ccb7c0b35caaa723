//! Camera/gallery collaborator port.

use async_trait::async_trait;

use super::errors::AcquisitionError;
use crate::document::DocumentSide;
use crate::ids::EntryId;
use crate::image::ImageDescriptor;

/// What a capture is for; adapters use it to label files and pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    Document(DocumentSide),
    Product(EntryId),
}

/// Returns `None` when the user cancels, which the engine treats as a
/// no-op rather than an error.
#[async_trait]
pub trait ImageAcquisitionPort: Send + Sync {
    async fn acquire(
        &self,
        request: CaptureRequest,
    ) -> Result<Option<ImageDescriptor>, AcquisitionError>;
}
