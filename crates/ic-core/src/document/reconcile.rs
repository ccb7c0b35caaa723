//! Mandatoriness policy for the document step.

use super::DocumentPair;

/// Outcome of reconciling server-reported documents against local captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileDecision {
    /// No server copy exists, so a fresh upload is required.
    pub must_upload: bool,
    /// The step can be left, possibly after an upload.
    pub can_proceed: bool,
}

impl DocumentPair {
    /// Policy table over (existing docs present, both local files present):
    ///
    /// | existing | both local | must_upload | can_proceed |
    /// |----------|------------|-------------|-------------|
    /// | no       | no         | true        | false       |
    /// | no       | yes        | true        | true        |
    /// | yes      | no         | false       | true        |
    /// | yes      | yes        | false       | true        |
    ///
    /// Uploads only ever carry both sides; a partial pair with no server
    /// copy blocks progress. With a server copy and both new captures, the
    /// upload is an opt-in replace whose failure still blocks.
    pub fn reconcile(&self) -> ReconcileDecision {
        let both_local = self.local_files().is_some();
        ReconcileDecision {
            must_upload: !self.has_existing(),
            can_proceed: self.has_existing() || both_local,
        }
    }

    /// Whether leaving the step should attempt an upload right now.
    pub fn wants_upload(&self) -> bool {
        self.local_files().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{DocumentSide, ExistingDocument, ExistingDocuments};
    use super::*;
    use crate::image::ImageDescriptor;

    fn pair(existing: bool, front_local: bool, back_local: bool) -> DocumentPair {
        let mut pair = DocumentPair::from_existing(ExistingDocuments {
            present: existing,
            front: existing.then(|| ExistingDocument {
                file_url: "https://cdn/front.jpg".into(),
            }),
            back: existing.then(|| ExistingDocument {
                file_url: "https://cdn/back.jpg".into(),
            }),
        });
        if front_local {
            pair.set_local(
                DocumentSide::Front,
                ImageDescriptor::jpeg("file:///tmp/f.jpg", "doc_front.jpg"),
            );
        }
        if back_local {
            pair.set_local(
                DocumentSide::Back,
                ImageDescriptor::jpeg("file:///tmp/b.jpg", "doc_back.jpg"),
            );
        }
        pair
    }

    #[test]
    fn test_no_existing_no_local_blocks() {
        let decision = pair(false, false, false).reconcile();
        assert!(decision.must_upload);
        assert!(!decision.can_proceed);
    }

    #[test]
    fn test_no_existing_both_local_proceeds_via_upload() {
        let p = pair(false, true, true);
        let decision = p.reconcile();
        assert!(decision.must_upload);
        assert!(decision.can_proceed);
        assert!(p.wants_upload());
    }

    #[test]
    fn test_existing_no_local_proceeds_without_upload() {
        let p = pair(true, false, false);
        let decision = p.reconcile();
        assert!(!decision.must_upload);
        assert!(decision.can_proceed);
        assert!(!p.wants_upload());
    }

    #[test]
    fn test_existing_both_local_is_optional_replace() {
        let p = pair(true, true, true);
        let decision = p.reconcile();
        assert!(!decision.must_upload);
        assert!(decision.can_proceed);
        assert!(p.wants_upload());
    }

    #[test]
    fn test_partial_pair_never_uploads() {
        // Front only, nothing on the server: blocked until back arrives.
        let p = pair(false, true, false);
        let decision = p.reconcile();
        assert!(decision.must_upload);
        assert!(!decision.can_proceed);
        assert!(!p.wants_upload());

        // Front only over existing docs: proceed skips the upload entirely.
        let p = pair(true, true, false);
        assert!(p.reconcile().can_proceed);
        assert!(!p.wants_upload());
    }
}
