use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Metal classification a purchased item is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    Gold,
    Silver,
}

impl MetalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
        }
    }
}

impl Display for MetalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sale unit for a product: priced by weight or by piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleModule {
    Gram,
    Piece,
}

impl SaleModule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gram => "gram",
            Self::Piece => "piece",
        }
    }
}

impl Display for SaleModule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Candidate product from the per-metal catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub product_id: i64,
    pub product_name: String,
}

impl CatalogProduct {
    pub fn new(product_id: i64, product_name: impl Into<String>) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
        }
    }
}
