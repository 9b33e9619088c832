use std::fmt;

use async_trait::async_trait;

use super::types::{
    Itinerary, NewImage, NewItinerary, NewPackage, Package, PackageFilter, PackageImage,
    PackagePatch,
};

/// Errors from package API calls.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Server answered with a non-2xx status. `message` is the server's
    /// detail when it sent one, otherwise a generic message for the call.
    RequestFailed { status: u16, message: String },
    /// No response at all (connection refused, DNS, timeout).
    NetworkUnreachable(String),
    /// 2xx response whose body did not match the expected shape.
    Decode(String),
}

impl ApiError {
    /// Text for the error banner. Server detail is shown verbatim.
    pub fn message(&self) -> String {
        match self {
            ApiError::RequestFailed { message, .. } => message.clone(),
            ApiError::NetworkUnreachable(_) => "Cannot reach the server".to_string(),
            ApiError::Decode(msg) => format!("Unexpected response: {msg}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { status, message } => {
                write!(f, "request failed (HTTP {status}): {message}")
            }
            ApiError::NetworkUnreachable(msg) => write!(f, "network unreachable: {msg}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// CRUD access to the package resource tree.
#[async_trait]
pub trait PackageApi: Send + Sync {
    async fn list_packages(&self, filter: &PackageFilter) -> Result<Vec<Package>, ApiError>;

    async fn get_package(&self, id: &str) -> Result<Package, ApiError>;

    async fn create_package(&self, data: &NewPackage) -> Result<Package, ApiError>;

    async fn update_package(&self, id: &str, patch: &PackagePatch) -> Result<Package, ApiError>;

    /// The server archives rather than removes.
    async fn delete_package(&self, id: &str) -> Result<(), ApiError>;

    async fn add_itinerary(
        &self,
        package_id: &str,
        item: &NewItinerary,
    ) -> Result<Itinerary, ApiError>;

    async fn delete_itinerary(&self, package_id: &str, itinerary_id: &str)
    -> Result<(), ApiError>;

    async fn add_image(&self, package_id: &str, image: &NewImage)
    -> Result<PackageImage, ApiError>;

    async fn delete_image(&self, package_id: &str, image_id: &str) -> Result<(), ApiError>;

    /// Liveness probe. Never errors: any failure is `false`.
    async fn health_check(&self) -> bool;
}
