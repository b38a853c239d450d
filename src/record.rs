//! Product records
//!
//! One record per processed identifier, in exactly one of two shapes: the
//! error shape when the page was the error interstitial, or the full shape
//! with all extracted fields. The shape is fixed by the page classification
//! alone; the two never mix. [`ProductRecord::to_fields`] flattens a record
//! into the ordered column-name/value map the tabular export writes.

use crate::extract::ProductFields;
use indexmap::IndexMap;
use serde::Serialize;

/// Issue text recorded for an error-interstitial page
pub const INTERSTITIAL_ISSUE: &str = "Unknown issue occurred on flipkart";

/// One extracted product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductRecord {
    /// The page was the error interstitial; no fields were extracted
    Issue { fsn: String, issue: String },
    /// A normal product page with all fields (sentinels included)
    Product {
        fsn: String,
        title: String,
        reviews: u64,
        ratings: u64,
        highlights: String,
        description: String,
        other_features: String,
        images: Vec<String>,
        sold_out: bool,
    },
}

impl ProductRecord {
    /// The error shape for an interstitial page
    pub fn issue(identifier: &str) -> Self {
        ProductRecord::Issue {
            fsn: identifier.to_string(),
            issue: INTERSTITIAL_ISSUE.to_string(),
        }
    }

    /// The full shape from extracted fields
    pub fn from_fields(identifier: &str, fields: ProductFields) -> Self {
        ProductRecord::Product {
            fsn: identifier.to_string(),
            title: fields.title,
            reviews: fields.reviews,
            ratings: fields.ratings,
            highlights: fields.highlights,
            description: fields.description,
            other_features: fields.other_features,
            images: fields.image_urls,
            sold_out: fields.sold_out,
        }
    }

    /// The identifier this record belongs to
    pub fn identifier(&self) -> &str {
        match self {
            ProductRecord::Issue { fsn, .. } => fsn,
            ProductRecord::Product { fsn, .. } => fsn,
        }
    }

    /// Flatten into the ordered export columns. Images become `image_1`,
    /// `image_2`, ... in page order; a record without images contributes no
    /// image columns at all.
    pub fn to_fields(&self) -> IndexMap<String, String> {
        let mut fields = IndexMap::new();
        match self {
            ProductRecord::Issue { fsn, issue } => {
                fields.insert("fsn".to_string(), fsn.clone());
                fields.insert("issue".to_string(), issue.clone());
            }
            ProductRecord::Product {
                fsn,
                title,
                reviews,
                ratings,
                highlights,
                description,
                other_features,
                images,
                sold_out,
            } => {
                fields.insert("fsn".to_string(), fsn.clone());
                fields.insert("Product Title".to_string(), title.clone());
                fields.insert("Reviews".to_string(), reviews.to_string());
                fields.insert("Ratings".to_string(), ratings.to_string());
                fields.insert("Highlights".to_string(), highlights.clone());
                fields.insert("Descriptions".to_string(), description.clone());
                fields.insert("Other Features".to_string(), other_features.clone());
                fields.insert("Sold Out".to_string(), sold_out.to_string());
                for (i, url) in images.iter().enumerate() {
                    fields.insert(format!("image_{}", i + 1), url.clone());
                }
            }
        }
        fields
    }
}
