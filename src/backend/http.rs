//! Blocking HTTP implementations of the backend and CDN traits.

use reqwest::blocking::{multipart, Client, Response};
use serde::Deserialize;

use crate::error::{ErrorMessage, ViewError, ViewResult};

use super::config::{BackendConfig, CdnConfig};
use super::{ListParams, MediaFile, MediaUploader, Page, Resource, ResourceBackend, UploadedMedia};

impl From<reqwest::Error> for ErrorMessage {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ErrorMessage::new("the server took too long to respond")
        } else if err.is_connect() {
            ErrorMessage::new("could not reach the server")
        } else {
            ErrorMessage::new(format!("request failed: {err}"))
        }
    }
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// Turn a non-2xx response into the message the user sees.
fn check_status(response: Response) -> Result<Response, ErrorMessage> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    Err(match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => ErrorMessage::new(body.message),
        Err(_) => ErrorMessage::new(format!("request failed with status {}", status.as_u16())),
    })
}

/// [`ResourceBackend`] over the REST API.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    config: BackendConfig,
}

impl RestBackend {
    pub fn new(config: BackendConfig) -> ViewResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ViewError::InvalidOption {
                message: format!("cannot build http client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn put_action(&self, resource: Resource, id: &str, action: &str) -> Result<(), ErrorMessage> {
        let url = self.config.url(&format!("{}/{id}/{action}", resource.path()));
        let response = self.client.put(url).send()?;
        check_status(response)?;
        Ok(())
    }
}

impl ResourceBackend for RestBackend {
    fn fetch_list(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> Result<Page<serde_json::Value>, ErrorMessage> {
        let response = self
            .client
            .get(self.config.url(resource.path()))
            .query(params)
            .send()?;
        let text = check_status(response)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn activate(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage> {
        self.put_action(resource, id, "activate")
    }

    fn deactivate(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage> {
        self.put_action(resource, id, "deactivate")
    }

    fn archive(&self, resource: Resource, id: &str) -> Result<(), ErrorMessage> {
        self.put_action(resource, id, "archive")
    }
}

/// What the CDN answers after an upload.
#[derive(Debug, Deserialize)]
struct CdnUploadResponse {
    #[serde(alias = "url")]
    secure_url: String,
    #[serde(default)]
    duration: Option<f64>,
}

/// [`MediaUploader`] posting multipart forms to the CDN.
#[derive(Debug, Clone)]
pub struct CdnUploader {
    client: Client,
    config: CdnConfig,
}

impl CdnUploader {
    pub fn new(config: CdnConfig) -> ViewResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ViewError::InvalidOption {
                message: format!("cannot build http client: {e}"),
            })?;
        Ok(Self { client, config })
    }
}

impl MediaUploader for CdnUploader {
    fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, ErrorMessage> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let mut form = multipart::Form::new().part("file", part);
        if let Some(preset) = &self.config.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()?;
        let text = check_status(response)?.text()?;
        let body: CdnUploadResponse = serde_json::from_str(&text)?;
        Ok(UploadedMedia {
            url: body.secure_url,
            duration_seconds: body.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected_before_any_request() {
        let err = RestBackend::new(BackendConfig {
            base_url: "localhost".to_string(),
            timeout_ms: 100,
        })
        .unwrap_err();
        assert!(err.to_string().contains("base_url must be an http(s) URL"));
    }

    #[test]
    fn cdn_response_accepts_url_alias() {
        let body: CdnUploadResponse =
            serde_json::from_str(r#"{"url":"https://cdn/x.mp4","duration":12.5}"#).unwrap();
        assert_eq!(body.secure_url, "https://cdn/x.mp4");
        assert_eq!(body.duration, Some(12.5));
    }

    #[test]
    fn error_body_accepts_error_alias() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"budget not found"}"#).unwrap();
        assert_eq!(body.message, "budget not found");
    }
}
