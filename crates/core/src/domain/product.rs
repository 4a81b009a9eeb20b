use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

/// Catalog bucket selected by the temperature classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Cold,
    Mild,
    Hot,
}

impl ProductCategory {
    pub const ALL: [Self; 3] = [Self::Cold, Self::Mild, Self::Hot];

    /// Stable key stored in `product_type.category`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Mild => "mild",
            Self::Hot => "hot",
        }
    }

    /// Display name of the garment family sold in this bucket.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cold => "Pull",
            Self::Mild => "Sweat",
            Self::Hot => "T-Shirt",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cold" => Some(Self::Cold),
            "mild" => Some(Self::Mild),
            "hot" => Some(Self::Hot),
            _ => None,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: ProductCategory,
}

#[cfg(test)]
mod tests {
    use super::ProductCategory;

    #[test]
    fn category_keys_parse_back() {
        for category in ProductCategory::ALL {
            assert_eq!(ProductCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ProductCategory::parse(" HOT "), Some(ProductCategory::Hot));
        assert_eq!(ProductCategory::parse("tepid"), None);
    }

    #[test]
    fn labels_follow_catalog_product_types() {
        assert_eq!(ProductCategory::Cold.label(), "Pull");
        assert_eq!(ProductCategory::Mild.label(), "Sweat");
        assert_eq!(ProductCategory::Hot.label(), "T-Shirt");
    }
}
