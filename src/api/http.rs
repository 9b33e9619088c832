//! HTTP implementation of [`PackageApi`] against the travel backend.
//!
//! Resources live under `{server}/api/v1`; liveness at `{server}/health`.
//! Any non-2xx answer becomes `ApiError::RequestFailed`, carrying the
//! server's `detail` field when the body has one.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::backend::{ApiError, PackageApi};
use super::types::{
    Itinerary, NewImage, NewItinerary, NewPackage, Package, PackageFilter, PackageImage,
    PackagePatch,
};

const API_PREFIX: &str = "/api/v1";

pub struct HttpPackageApi {
    server_url: String,
    client: reqwest::Client,
}

impl HttpPackageApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        info!("Package API at {}{}", server_url, API_PREFIX);
        Self {
            server_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.server_url, API_PREFIX, path)
    }
}

/// Sends the request and turns non-2xx answers into `RequestFailed`.
/// `failure` is the message used when the server gives no detail.
async fn send(request: RequestBuilder, failure: &str) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(|e| {
        warn!("{}: {}", failure, e);
        ApiError::NetworkUnreachable(e.to_string())
    })?;

    let status = response.status();
    debug!("Response status: {}", status);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = server_detail(&body).unwrap_or_else(|| failure.to_string());
    warn!("{} (HTTP {}): {}", failure, status.as_u16(), body);
    Err(ApiError::RequestFailed {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pulls `detail` out of an error body.
///
/// A string detail is returned as-is. A validation error list (422) becomes
/// `"<field>: <msg>"` per entry, joined with `"; "`, where the field is the
/// last `loc` segment.
fn server_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items.iter().filter_map(validation_message).collect();
            if messages.is_empty() {
                Some(Value::Array(items.clone()).to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

fn validation_message(item: &Value) -> Option<String> {
    let msg = item.get("msg").and_then(Value::as_str)?;
    let field = match item.get("loc").and_then(Value::as_array).and_then(|loc| loc.last()) {
        Some(Value::String(name)) => Some(name.clone()),
        Some(Value::Number(index)) => Some(index.to_string()),
        _ => None,
    };
    Some(match field {
        Some(field) => format!("{field}: {msg}"),
        None => msg.to_string(),
    })
}

#[async_trait]
impl PackageApi for HttpPackageApi {
    async fn list_packages(&self, filter: &PackageFilter) -> Result<Vec<Package>, ApiError> {
        debug!("GET packages filter={:?}", filter);
        let request = self
            .client
            .get(self.url("/packages/"))
            .query(&filter.query_pairs());
        let response = send(request, "Failed to fetch packages").await?;
        decode(response).await
    }

    async fn get_package(&self, id: &str) -> Result<Package, ApiError> {
        let request = self.client.get(self.url(&format!("/packages/{id}")));
        let response = send(request, "Failed to fetch package").await?;
        decode(response).await
    }

    async fn create_package(&self, data: &NewPackage) -> Result<Package, ApiError> {
        info!("Creating package '{}'", data.title);
        let request = self.client.post(self.url("/packages/")).json(data);
        let response = send(request, "Failed to create package").await?;
        decode(response).await
    }

    async fn update_package(&self, id: &str, patch: &PackagePatch) -> Result<Package, ApiError> {
        info!("Updating package {}", id);
        let request = self
            .client
            .put(self.url(&format!("/packages/{id}")))
            .json(patch);
        let response = send(request, "Failed to update package").await?;
        decode(response).await
    }

    async fn delete_package(&self, id: &str) -> Result<(), ApiError> {
        info!("Deleting package {}", id);
        let request = self.client.delete(self.url(&format!("/packages/{id}")));
        send(request, "Failed to delete package").await?;
        Ok(())
    }

    async fn add_itinerary(
        &self,
        package_id: &str,
        item: &NewItinerary,
    ) -> Result<Itinerary, ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/packages/{package_id}/itinerary")))
            .json(item);
        let response = send(request, "Failed to add itinerary item").await?;
        decode(response).await
    }

    async fn delete_itinerary(
        &self,
        package_id: &str,
        itinerary_id: &str,
    ) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&format!(
            "/packages/{package_id}/itinerary/{itinerary_id}"
        )));
        send(request, "Failed to delete itinerary item").await?;
        Ok(())
    }

    async fn add_image(
        &self,
        package_id: &str,
        image: &NewImage,
    ) -> Result<PackageImage, ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/packages/{package_id}/images")))
            .json(image);
        let response = send(request, "Failed to add image").await?;
        decode(response).await
    }

    async fn delete_image(&self, package_id: &str, image_id: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.url(&format!("/packages/{package_id}/images/{image_id}")));
        send(request, "Failed to delete image").await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.server_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_prefix_and_strips_trailing_slash() {
        let api = HttpPackageApi::new("http://localhost:8000/");
        assert_eq!(api.server_url(), "http://localhost:8000");
        assert_eq!(api.url("/packages/"), "http://localhost:8000/api/v1/packages/");
    }

    #[test]
    fn test_server_detail_string() {
        let body = r#"{"detail":"Package not found"}"#;
        assert_eq!(server_detail(body).as_deref(), Some("Package not found"));
    }

    #[test]
    fn test_server_detail_validation_list() {
        let body = r#"{"detail":[
            {"loc":["body","duration_days"],"msg":"Field required","type":"missing"},
            {"loc":["body","price"],"msg":"Field required","type":"missing"}
        ]}"#;
        assert_eq!(
            server_detail(body).as_deref(),
            Some("duration_days: Field required; price: Field required")
        );
    }

    #[test]
    fn test_server_detail_validation_without_loc() {
        let body = r#"{"detail":[{"msg":"Invalid date","type":"value_error"}]}"#;
        assert_eq!(server_detail(body).as_deref(), Some("Invalid date"));
    }

    #[test]
    fn test_server_detail_absent() {
        assert_eq!(server_detail("Internal Server Error"), None);
        assert_eq!(server_detail(r#"{"error":"x"}"#), None);
        assert_eq!(server_detail(r#"{"detail":null}"#), None);
    }
}
