//! Assembly of the final multi-entry submission.

use serde::Serialize;
use thiserror::Error;

use crate::ids::EntryId;
use crate::image::ImageDescriptor;
use crate::product::{MetalType, ProductEntry, SaleModule};

/// Why a submission could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("not every entry is complete")]
    NotReady,
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("entry {0} is missing classification data")]
    IncompleteEntry(EntryId),
}

/// Wire record for one classified product. Field names are fixed by the
/// service contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub product_id: i64,
    pub product_name: String,
    #[serde(rename = "type")]
    pub module: SaleModule,
    pub metal_name: MetalType,
}

/// The assembled request: the invoice number once, then per-entry records
/// and image groups positionally paired so that `records()[i]` describes
/// `image_groups()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    invoice_number: String,
    records: Vec<ProductRecord>,
    image_groups: Vec<Vec<ImageDescriptor>>,
}

impl SubmissionRequest {
    /// Pairs each entry's record with its images, preserving display order.
    pub fn assemble<'a>(
        invoice_number: &str,
        entries: impl Iterator<Item = &'a ProductEntry>,
    ) -> Result<Self, SubmissionError> {
        let mut records = Vec::new();
        let mut image_groups = Vec::new();

        for entry in entries {
            let (Some(metal_name), Some(product), Some(module)) = (
                entry.metal_type(),
                entry.selected_product(),
                entry.module(),
            ) else {
                return Err(SubmissionError::IncompleteEntry(entry.id()));
            };
            if entry.images().is_empty() {
                return Err(SubmissionError::IncompleteEntry(entry.id()));
            }

            records.push(ProductRecord {
                product_id: product.product_id,
                product_name: product.product_name.clone(),
                module,
                metal_name,
            });
            image_groups.push(entry.images().to_vec());
        }

        if records.is_empty() {
            return Err(SubmissionError::NotReady);
        }

        Ok(Self {
            invoice_number: invoice_number.to_string(),
            records,
            image_groups,
        })
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn image_groups(&self) -> &[Vec<ImageDescriptor>] {
        &self.image_groups
    }

    pub fn entry_count(&self) -> usize {
        self.records.len()
    }
}
