//! Boundaries to the REST backend and the media CDN.
//!
//! Both collaborators are traits so screens can be driven by [`InMemoryBackend`] /
//! [`InMemoryUploader`] in tests and by the blocking HTTP clients (feature `http`) in the
//! app. Every call returns `Result<_, ErrorMessage>`; nothing is retried.

pub mod config;
#[cfg(feature = "http")]
pub mod http;
pub mod load;
pub mod mock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorMessage, ViewResult};
use crate::ingestion::json::ingest_json_values;
use crate::types::{DataSet, Schema};

pub use config::{BackendConfig, CdnConfig};
#[cfg(feature = "http")]
pub use http::{CdnUploader, RestBackend};
pub use load::LoadState;
pub use mock::{InMemoryBackend, InMemoryUploader};

/// Backend collections the front-end lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Expenses,
    Budgets,
    Categories,
    Stories,
    Reports,
    Notifications,
}

impl Resource {
    /// URL path segment of the collection.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Expenses => "expenses",
            Resource::Budgets => "budgets",
            Resource::Categories => "categories",
            Resource::Stories => "stories",
            Resource::Reports => "reports",
            Resource::Notifications => "notifications",
        }
    }
}

/// Query parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// 0-based page index.
    pub page: usize,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// e.g. `active`, `inactive`, `archived`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 20,
            search: None,
            status: None,
        }
    }
}

/// One page of a server-side list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Items across all pages.
    pub total: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        crate::processing::total_pages(self.total, self.page_size)
    }
}

impl Page<serde_json::Value> {
    /// Decode every item into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Page<T>, ErrorMessage> {
        let items = self
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        Ok(Page {
            items,
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        })
    }

    /// Load the items into a typed [`DataSet`] for a table.
    pub fn to_dataset(&self, schema: &Schema) -> ViewResult<DataSet> {
        ingest_json_values(&self.items, schema)
    }
}

/// The REST backend, as far as list screens and admin actions need it.
pub trait ResourceBackend {
    fn fetch_list(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<Page<serde_json::Value>, ErrorMessage>;

    fn activate(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage>;

    fn deactivate(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage>;

    fn archive(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage>;
}

/// A file picked for upload (story media, receipts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a CDN upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
    /// Present for audio/video.
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

/// The media CDN.
pub trait MediaUploader {
    fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, ErrorMessage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Value};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Budget {
        id: String,
        limit: f64,
    }

    fn page() -> Page<serde_json::Value> {
        serde_json::from_str(
            r#"{"items":[{"id":"b1","limit":300.0},{"id":"b2","limit":50}],"total":7,"page":0,"page_size":2}"#,
        )
        .unwrap()
    }

    #[test]
    fn page_decodes_items() {
        let typed: Page<Budget> = page().decode().unwrap();
        assert_eq!(typed.items[1], Budget { id: "b2".to_string(), limit: 50.0 });
        assert_eq!(typed.total_pages(), 4);
    }

    #[test]
    fn page_decode_errors_become_messages() {
        let err = page().decode::<u32>().unwrap_err();
        assert!(err.message.starts_with("unexpected response body"));
    }

    #[test]
    fn page_loads_into_dataset() {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Utf8),
            Field::new("limit", DataType::Float64),
        ]);
        let ds = page().to_dataset(&schema).unwrap();
        assert_eq!(ds.rows[1], vec![Value::from("b2"), Value::Float64(50.0)]);
    }

    #[test]
    fn list_params_skip_empty_filters() {
        let json = serde_json::to_string(&ListParams::default()).unwrap();
        assert_eq!(json, r#"{"page":0,"page_size":20}"#);
    }
}
