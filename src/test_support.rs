//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::api::{
    ApiError, Itinerary, NewImage, NewItinerary, NewPackage, Package, PackageApi, PackageFilter,
    PackageImage, PackagePatch, PackageStatus, Patch,
};

/// An in-memory backend for tests that don't need real HTTP calls.
///
/// Mirrors the server's behavior closely enough for controller tests:
/// deletes archive, unknown ids are 404, filters apply to the list.
pub struct MemoryPackageApi {
    packages: Mutex<Vec<Package>>,
    healthy: AtomicBool,
    next_id: AtomicUsize,
}

impl Default for MemoryPackageApi {
    fn default() -> Self {
        Self::with_packages(Vec::new())
    }
}

impl MemoryPackageApi {
    pub fn with_packages(packages: Vec<Package>) -> Self {
        Self {
            packages: Mutex::new(packages),
            healthy: AtomicBool::new(true),
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn with_package<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Package) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut packages = self.packages.lock().unwrap();
        match packages.iter_mut().find(|p| p.id == id) {
            Some(package) => f(package),
            None => Err(not_found("Package not found")),
        }
    }
}

fn not_found(message: &str) -> ApiError {
    ApiError::RequestFailed {
        status: 404,
        message: message.to_string(),
    }
}

/// `null` fields are dropped on update, as the backend does.
fn apply<T: Clone>(field: &mut Option<T>, patch: &Patch<T>) {
    if let Patch::Set(value) = patch {
        *field = Some(value.clone());
    }
}

fn apply_required<T: Clone>(field: &mut T, patch: &Patch<T>) {
    if let Patch::Set(value) = patch {
        *field = value.clone();
    }
}

#[async_trait]
impl PackageApi for MemoryPackageApi {
    async fn list_packages(&self, filter: &PackageFilter) -> Result<Vec<Package>, ApiError> {
        let packages = self.packages.lock().unwrap();
        Ok(packages
            .iter()
            .filter(|p| filter.status.is_none_or(|status| p.status == status))
            .filter(|p| filter.featured.is_none_or(|featured| p.is_featured == featured))
            .cloned()
            .collect())
    }

    async fn get_package(&self, id: &str) -> Result<Package, ApiError> {
        self.with_package(id, |package| Ok(package.clone()))
    }

    async fn create_package(&self, data: &NewPackage) -> Result<Package, ApiError> {
        let (Some(duration_days), Some(price)) = (data.duration_days, data.price) else {
            return Err(ApiError::RequestFailed {
                status: 422,
                message: "duration_days: Field required; price: Field required".to_string(),
            });
        };
        let package = Package {
            id: self.fresh_id("pkg"),
            title: data.title.clone(),
            description: data.description.clone(),
            duration_days,
            price,
            max_guests: data.max_guests.unwrap_or(20),
            status: data.status.unwrap_or_default(),
            cover_image: data.cover_image.clone(),
            start_date: data.start_date,
            end_date: data.end_date,
            location: data.location.clone(),
            is_featured: data.is_featured.unwrap_or(false),
            created_at: None,
            updated_at: None,
            itinerary: Vec::new(),
            images: Vec::new(),
        };
        self.packages.lock().unwrap().push(package.clone());
        Ok(package)
    }

    async fn update_package(&self, id: &str, patch: &PackagePatch) -> Result<Package, ApiError> {
        let body = serde_json::to_value(patch).unwrap_or_default();
        let sets_any = body
            .as_object()
            .is_some_and(|fields| fields.values().any(|v| !v.is_null()));
        if !sets_any {
            return Err(ApiError::RequestFailed {
                status: 400,
                message: "No fields to update".to_string(),
            });
        }
        self.with_package(id, |package| {
            apply_required(&mut package.title, &patch.title);
            apply(&mut package.description, &patch.description);
            apply_required(&mut package.duration_days, &patch.duration_days);
            apply_required(&mut package.price, &patch.price);
            apply_required(&mut package.max_guests, &patch.max_guests);
            apply_required(&mut package.status, &patch.status);
            apply(&mut package.cover_image, &patch.cover_image);
            apply(&mut package.start_date, &patch.start_date);
            apply(&mut package.end_date, &patch.end_date);
            apply(&mut package.location, &patch.location);
            apply_required(&mut package.is_featured, &patch.is_featured);
            Ok(package.clone())
        })
    }

    async fn delete_package(&self, id: &str) -> Result<(), ApiError> {
        self.with_package(id, |package| {
            package.status = PackageStatus::Archived;
            Ok(())
        })
    }

    async fn add_itinerary(
        &self,
        package_id: &str,
        item: &NewItinerary,
    ) -> Result<Itinerary, ApiError> {
        let id = self.fresh_id("day");
        self.with_package(package_id, |package| {
            let entry = Itinerary {
                id,
                package_id: package.id.clone(),
                day_number: item.day_number,
                title: item.title.clone(),
                description: item.description.clone(),
                created_at: None,
                updated_at: None,
            };
            package.itinerary.push(entry.clone());
            Ok(entry)
        })
    }

    async fn delete_itinerary(
        &self,
        package_id: &str,
        itinerary_id: &str,
    ) -> Result<(), ApiError> {
        self.with_package(package_id, |package| {
            let before = package.itinerary.len();
            package.itinerary.retain(|entry| entry.id != itinerary_id);
            if package.itinerary.len() == before {
                return Err(not_found("Itinerary item not found"));
            }
            Ok(())
        })
    }

    async fn add_image(
        &self,
        package_id: &str,
        image: &NewImage,
    ) -> Result<PackageImage, ApiError> {
        let id = self.fresh_id("img");
        self.with_package(package_id, |package| {
            let entry = PackageImage {
                id,
                package_id: package.id.clone(),
                image_url: image.image_url.clone(),
                caption: image.caption.clone(),
                display_order: image.display_order.unwrap_or(0),
                created_at: None,
            };
            package.images.push(entry.clone());
            Ok(entry)
        })
    }

    async fn delete_image(&self, package_id: &str, image_id: &str) -> Result<(), ApiError> {
        self.with_package(package_id, |package| {
            let before = package.images.len();
            package.images.retain(|image| image.id != image_id);
            if package.images.len() == before {
                return Err(not_found("Image not found"));
            }
            Ok(())
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// An active, featured five-day package with two itinerary days and one image.
pub fn sample_package(id: &str, title: &str) -> Package {
    Package {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        duration_days: 5,
        price: 1200.0,
        max_guests: 12,
        status: PackageStatus::Active,
        cover_image: Some("https://img.example/cover.jpg".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 5),
        location: Some("Inverness".to_string()),
        is_featured: true,
        created_at: None,
        updated_at: None,
        itinerary: vec![
            Itinerary {
                id: format!("{id}-day-1"),
                package_id: id.to_string(),
                day_number: 1,
                title: "Arrival".to_string(),
                description: None,
                created_at: None,
                updated_at: None,
            },
            Itinerary {
                id: format!("{id}-day-2"),
                package_id: id.to_string(),
                day_number: 2,
                title: "Loch walk".to_string(),
                description: Some("Six miles along the shore".to_string()),
                created_at: None,
                updated_at: None,
            },
        ],
        images: vec![PackageImage {
            id: format!("{id}-img-1"),
            package_id: id.to_string(),
            image_url: "https://img.example/loch.jpg".to_string(),
            caption: Some("Loch at dawn".to_string()),
            display_order: 0,
            created_at: None,
        }],
    }
}
