//! Identity document pair captured or reconciled during the document step.

mod reconcile;

pub use reconcile::ReconcileDecision;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::image::ImageDescriptor;

/// Which side of the identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSide {
    Front,
    Back,
}

impl DocumentSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }

    /// File name used when the acquisition adapter does not report one.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Front => "doc_front.jpg",
            Self::Back => "doc_back.jpg",
        }
    }
}

impl Display for DocumentSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Server-side reference to an already uploaded document image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDocument {
    pub file_url: String,
}

/// What the service reports for a customer when the document step loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingDocuments {
    pub present: bool,
    pub front: Option<ExistingDocument>,
    pub back: Option<ExistingDocument>,
}

/// One side of the pair: a server copy, a local capture, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSlot {
    pub existing: Option<ExistingDocument>,
    pub local: Option<ImageDescriptor>,
}

impl DocumentSlot {
    /// A side is satisfied by either a server copy or a local capture.
    pub fn is_satisfied(&self) -> bool {
        self.existing.is_some() || self.local.is_some()
    }
}

/// The document pair as loaded from the server and amended locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPair {
    has_existing: bool,
    front: DocumentSlot,
    back: DocumentSlot,
}

impl DocumentPair {
    pub fn from_existing(existing: ExistingDocuments) -> Self {
        let present = existing.present;
        Self {
            has_existing: present,
            front: DocumentSlot {
                existing: existing.front.filter(|_| present),
                local: None,
            },
            back: DocumentSlot {
                existing: existing.back.filter(|_| present),
                local: None,
            },
        }
    }

    /// Server-reported flag that switches the mandatoriness policy.
    pub fn has_existing(&self) -> bool {
        self.has_existing
    }

    pub fn slot(&self, side: DocumentSide) -> &DocumentSlot {
        match side {
            DocumentSide::Front => &self.front,
            DocumentSide::Back => &self.back,
        }
    }

    /// Replaces the local capture for one side. The server copy, if any,
    /// stays visible until an upload succeeds.
    pub fn set_local(&mut self, side: DocumentSide, image: ImageDescriptor) {
        match side {
            DocumentSide::Front => self.front.local = Some(image),
            DocumentSide::Back => self.back.local = Some(image),
        }
    }

    /// Both local captures, or nothing. Uploads always carry the full pair.
    pub fn local_files(&self) -> Option<(&ImageDescriptor, &ImageDescriptor)> {
        match (&self.front.local, &self.back.local) {
            (Some(front), Some(back)) => Some((front, back)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageDescriptor {
        ImageDescriptor::jpeg(format!("file:///tmp/{name}"), name)
    }

    #[test]
    fn test_from_existing_keeps_urls_when_present() {
        let pair = DocumentPair::from_existing(ExistingDocuments {
            present: true,
            front: Some(ExistingDocument {
                file_url: "https://cdn/front.jpg".into(),
            }),
            back: None,
        });

        assert!(pair.has_existing());
        assert!(pair.slot(DocumentSide::Front).is_satisfied());
        assert!(!pair.slot(DocumentSide::Back).is_satisfied());
    }

    #[test]
    fn test_from_existing_ignores_urls_when_absent_flag() {
        let pair = DocumentPair::from_existing(ExistingDocuments {
            present: false,
            front: Some(ExistingDocument {
                file_url: "https://cdn/stale.jpg".into(),
            }),
            back: None,
        });

        assert!(!pair.has_existing());
        assert!(pair.slot(DocumentSide::Front).existing.is_none());
    }

    #[test]
    fn test_local_files_requires_both_sides() {
        let mut pair = DocumentPair::default();
        pair.set_local(DocumentSide::Front, image("front.jpg"));
        assert!(pair.local_files().is_none());

        pair.set_local(DocumentSide::Back, image("back.jpg"));
        let (front, back) = pair.local_files().expect("both sides present");
        assert_eq!(front.file_name, "front.jpg");
        assert_eq!(back.file_name, "back.jpg");
    }

    #[test]
    fn test_set_local_replaces_previous_capture() {
        let mut pair = DocumentPair::default();
        pair.set_local(DocumentSide::Front, image("one.jpg"));
        pair.set_local(DocumentSide::Front, image("two.jpg"));
        assert_eq!(
            pair.slot(DocumentSide::Front)
                .local
                .as_ref()
                .map(|i| i.file_name.as_str()),
            Some("two.jpg")
        );
    }
}
