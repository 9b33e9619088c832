//! # Requests
//!
//! The dashboard reducer never calls the network. It returns
//! `Effect::Request(request)`; the event loop spawns `execute()` and feeds
//! the resulting action back into `update()`.
//!
//! ```text
//! update() → Effect::Request ─┐
//!                             ▼
//!                    execute(api, request)  (async, I/O)
//!                             │
//! update() ◄── DashboardAction┘
//! ```

use log::debug;

use crate::api::{
    Itinerary, NewImage, NewItinerary, NewPackage, Package, PackageApi, PackageFilter,
    PackageImage, PackagePatch,
};
use crate::core::dashboard::DashboardAction;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    HealthCheck,
    LoadPackages(PackageFilter),
    LoadPackage(String),
    CreatePackage(NewPackage),
    UpdatePackage { id: String, patch: PackagePatch },
    DeletePackage(String),
    AddItinerary { package_id: String, item: NewItinerary },
    DeleteItinerary { package_id: String, itinerary_id: String },
    AddImage { package_id: String, image: NewImage },
    DeleteImage { package_id: String, image_id: String },
}

/// A write that succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    PackageSaved(Package),
    PackageDeleted(String),
    ItineraryAdded(Itinerary),
    ItineraryDeleted { package_id: String },
    ImageAdded(PackageImage),
    ImageDeleted { package_id: String },
}

impl Mutation {
    /// Status line text after the write.
    pub fn describe(&self) -> String {
        match self {
            Mutation::PackageSaved(package) => format!("Saved \"{}\"", package.title),
            Mutation::PackageDeleted(_) => "Package archived".to_string(),
            Mutation::ItineraryAdded(item) => format!("Added day {}", item.day_number),
            Mutation::ItineraryDeleted { .. } => "Itinerary entry removed".to_string(),
            Mutation::ImageAdded(_) => "Image added".to_string(),
            Mutation::ImageDeleted { .. } => "Image removed".to_string(),
        }
    }

    /// The package whose detail must be reloaded, for child-resource writes.
    pub fn child_of(&self) -> Option<&str> {
        match self {
            Mutation::ItineraryAdded(item) => Some(&item.package_id),
            Mutation::ImageAdded(image) => Some(&image.package_id),
            Mutation::ItineraryDeleted { package_id } | Mutation::ImageDeleted { package_id } => {
                Some(package_id)
            }
            Mutation::PackageSaved(_) | Mutation::PackageDeleted(_) => None,
        }
    }
}

/// Performs one request and maps the outcome into an action.
pub async fn execute(api: &dyn PackageApi, request: Request) -> DashboardAction {
    debug!("Executing {:?}", request);
    let result = match request {
        Request::HealthCheck => return DashboardAction::HealthChecked(api.health_check().await),
        Request::LoadPackages(filter) => api
            .list_packages(&filter)
            .await
            .map(DashboardAction::PackagesLoaded),
        Request::LoadPackage(id) => api
            .get_package(&id)
            .await
            .map(DashboardAction::PackageLoaded),
        Request::CreatePackage(data) => api
            .create_package(&data)
            .await
            .map(|package| DashboardAction::Mutated(Mutation::PackageSaved(package))),
        Request::UpdatePackage { id, patch } => api
            .update_package(&id, &patch)
            .await
            .map(|package| DashboardAction::Mutated(Mutation::PackageSaved(package))),
        Request::DeletePackage(id) => api
            .delete_package(&id)
            .await
            .map(|()| DashboardAction::Mutated(Mutation::PackageDeleted(id))),
        Request::AddItinerary { package_id, item } => api
            .add_itinerary(&package_id, &item)
            .await
            .map(|entry| DashboardAction::Mutated(Mutation::ItineraryAdded(entry))),
        Request::DeleteItinerary {
            package_id,
            itinerary_id,
        } => api
            .delete_itinerary(&package_id, &itinerary_id)
            .await
            .map(|()| DashboardAction::Mutated(Mutation::ItineraryDeleted { package_id })),
        Request::AddImage { package_id, image } => api
            .add_image(&package_id, &image)
            .await
            .map(|image| DashboardAction::Mutated(Mutation::ImageAdded(image))),
        Request::DeleteImage {
            package_id,
            image_id,
        } => api
            .delete_image(&package_id, &image_id)
            .await
            .map(|()| DashboardAction::Mutated(Mutation::ImageDeleted { package_id })),
    };
    result.unwrap_or_else(DashboardAction::RequestFailed)
}
