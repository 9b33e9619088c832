//! # Package API
//!
//! Typed access to the travel backend's package resource tree:
//! packages, their itinerary entries, and their gallery images.
//!
//! - [`backend`]: the `PackageApi` trait and `ApiError`
//! - [`http`]: the `reqwest` implementation
//! - [`types`]: wire types (`Package`, `NewPackage`, `PackagePatch`, ...)
//! - [`patch`]: `Patch<T>`, the tri-state field used by update payloads

pub mod backend;
pub mod http;
pub mod patch;
pub mod types;

pub use backend::{ApiError, PackageApi};
pub use http::HttpPackageApi;
pub use patch::Patch;
pub use types::{
    Itinerary, NewImage, NewItinerary, NewPackage, Package, PackageFilter, PackageImage,
    PackagePatch, PackageStatus,
};
