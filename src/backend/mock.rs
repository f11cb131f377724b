//! In-memory collaborators for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use serde_json::Value as JsonValue;

use super::{ListParams, MediaFile, MediaUploader, Page, Resource, ResourceBackend, UploadedMedia};
use crate::error::ErrorMessage;
use crate::types::ID_FIELD;

const STATUS_FIELD: &str = "status";

fn poisoned() -> ErrorMessage {
    ErrorMessage::new("backend state lock poisoned")
}

/// Backend over JSON objects kept in memory.
///
/// Listing pages, searches every string field case-insensitively and filters on `status`.
/// Admin actions rewrite `status` on the item whose `id` matches.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    items: RwLock<HashMap<Resource, Vec<JsonValue>>>,
    next_failure: Mutex<Option<String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InMemoryBackend::insert`].
    pub fn with_items(self, resource: Resource, items: Vec<JsonValue>) -> Self {
        if let Ok(mut map) = self.items.write() {
            map.entry(resource).or_default().extend(items);
        }
        self
    }

    pub fn insert(&self, resource: Resource, item: JsonValue) -> Result<(), ErrorMessage> {
        let mut map = self.items.write().map_err(|_| poisoned())?;
        map.entry(resource).or_default().push(item);
        Ok(())
    }

    /// Make the next call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut slot) = self.next_failure.lock() {
            *slot = Some(message.into());
        }
    }

    /// Snapshot of one item, looked up by id.
    pub fn get(&self, resource: Resource, id: &str) -> Option<JsonValue> {
        let map = self.items.read().ok()?;
        map.get(&resource)?
            .iter()
            .find(|item| item_id(item).as_deref() == Some(id))
            .cloned()
    }

    fn take_failure(&self) -> Result<(), ErrorMessage> {
        let mut slot = self.next_failure.lock().map_err(|_| poisoned())?;
        match slot.take() {
            Some(message) => Err(ErrorMessage::new(message)),
            None => Ok(()),
        }
    }

    fn set_status(&self, resource: Resource, id: &str, status: &str) -> Result<(), ErrorMessage> {
        self.take_failure()?;
        let mut map = self.items.write().map_err(|_| poisoned())?;
        let item = map
            .get_mut(&resource)
            .and_then(|items| {
                items
                    .iter_mut()
                    .find(|item| item_id(item).as_deref() == Some(id))
            })
            .ok_or_else(|| ErrorMessage::new(format!("{} '{id}' not found", resource.path())))?;

        match item.as_object_mut() {
            Some(object) => {
                object.insert(STATUS_FIELD.to_string(), JsonValue::from(status));
                Ok(())
            }
            None => Err(ErrorMessage::new(format!(
                "{} '{id}' is not an object",
                resource.path()
            ))),
        }
    }
}

fn item_id(item: &JsonValue) -> Option<String> {
    match item.get(ID_FIELD)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn matches_search(item: &JsonValue, needle: &str) -> bool {
    match item {
        JsonValue::Object(object) => object.values().any(|v| matches_search(v, needle)),
        JsonValue::String(s) => s.to_lowercase().contains(needle),
        _ => false,
    }
}

impl ResourceBackend for InMemoryBackend {
    fn fetch_list(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<Page<JsonValue>, ErrorMessage> {
        self.take_failure()?;
        if params.page_size == 0 {
            return Err(ErrorMessage::new("page_size must be greater than zero"));
        }

        let map = self.items.read().map_err(|_| poisoned())?;
        let needle = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<&JsonValue> = map
            .get(&resource)
            .into_iter()
            .flatten()
            .filter(|item| needle.as_deref().map_or(true, |n| matches_search(item, n)))
            .filter(|item| match params.status.as_deref() {
                Some(status) => item.get(STATUS_FIELD).and_then(JsonValue::as_str) == Some(status),
                None => true,
            })
            .collect();

        let items = matching
            .iter()
            .skip(params.page.saturating_mul(params.page_size))
            .take(params.page_size)
            .map(|item| (*item).clone())
            .collect();

        Ok(Page {
            items,
            total: matching.len(),
            page: params.page,
            page_size: params.page_size,
        })
    }

    fn activate(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage> {
        self.set_status(resource, id, "active")
    }

    fn deactivate(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage> {
        self.set_status(resource, id, "inactive")
    }

    fn archive(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage> {
        self.set_status(resource, id, "archived")
    }
}

/// Uploader that hands back `memory://` URLs and never touches the network.
#[derive(Debug, Default)]
pub struct InMemoryUploader {
    uploads: AtomicUsize,
    duration_seconds: Option<f64>,
}

impl InMemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report this duration for every upload (audio/video stand-in).
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

impl MediaUploader for InMemoryUploader {
    fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, ErrorMessage> {
        if file.bytes.is_empty() {
            return Err(ErrorMessage::new(format!("{} is empty", file.file_name)));
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UploadedMedia {
            url: format!("memory://media/{n}/{}", file.file_name),
            duration_seconds: self.duration_seconds,
        })
    }
}
