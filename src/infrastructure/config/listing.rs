//! Listing configuration.

use serde::{Deserialize, Serialize};

use crate::application::catalog::CatalogConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Largest `pageSize` a listing accepts.
    pub max_page_size: i64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_page_size: CatalogConfig::default().max_page_size,
        }
    }
}

impl From<ListingConfig> for CatalogConfig {
    fn from(listing: ListingConfig) -> Self {
        Self {
            max_page_size: listing.max_page_size,
        }
    }
}
