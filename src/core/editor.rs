//! # Editors
//!
//! Forms behind the dashboard's create/edit pages and the itinerary and
//! image sub-forms. Each one turns its string fields into a typed payload.
//!
//! Local checks are limited to "is this a number / date". Missing required
//! fields are passed to the server, which owns validation and answers with
//! a detail message.

use crate::api::{
    NewImage, NewItinerary, NewPackage, Package, PackagePatch, PackageStatus, Patch,
};
use crate::core::form::{
    Form, FormError, optional_date, optional_flag, optional_number, optional_text,
};

const TITLE: &str = "Title";
const DESCRIPTION: &str = "Description";
const DURATION: &str = "Duration (days)";
const PRICE: &str = "Price";
const MAX_GUESTS: &str = "Max guests";
const STATUS: &str = "Status";
const LOCATION: &str = "Location";
const COVER_IMAGE: &str = "Cover image URL";
const START_DATE: &str = "Start date";
const END_DATE: &str = "End date";
const FEATURED: &str = "Featured";

const PACKAGE_FIELDS: [&str; 11] = [
    TITLE,
    DESCRIPTION,
    DURATION,
    PRICE,
    MAX_GUESTS,
    STATUS,
    LOCATION,
    COVER_IMAGE,
    START_DATE,
    END_DATE,
    FEATURED,
];

/// What submitting a package form should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewPackage),
    Update { id: String, patch: PackagePatch },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageForm {
    pub form: Form,
    /// The package being edited; `None` for a new one.
    pub original: Option<Package>,
}

impl PackageForm {
    pub fn blank() -> Self {
        Self {
            form: Form::new(&PACKAGE_FIELDS),
            original: None,
        }
    }

    pub fn edit(package: &Package) -> Self {
        let mut form = Form::new(&PACKAGE_FIELDS);
        form.set(TITLE, package.title.as_str());
        form.set(DESCRIPTION, package.description.clone().unwrap_or_default());
        form.set(DURATION, package.duration_days.to_string());
        form.set(PRICE, package.price.to_string());
        form.set(MAX_GUESTS, package.max_guests.to_string());
        form.set(STATUS, package.status.as_str());
        form.set(LOCATION, package.location.clone().unwrap_or_default());
        form.set(COVER_IMAGE, package.cover_image.clone().unwrap_or_default());
        form.set(
            START_DATE,
            package.start_date.map(|d| d.to_string()).unwrap_or_default(),
        );
        form.set(
            END_DATE,
            package.end_date.map(|d| d.to_string()).unwrap_or_default(),
        );
        form.set(FEATURED, if package.is_featured { "yes" } else { "no" });
        Self {
            form,
            original: Some(package.clone()),
        }
    }

    pub fn title(&self) -> &str {
        if self.original.is_some() {
            "Edit package"
        } else {
            "New package"
        }
    }

    fn status(&self) -> Result<Option<PackageStatus>, FormError> {
        match optional_text(self.form.value(STATUS)) {
            None => Ok(None),
            Some(raw) => PackageStatus::parse(&raw).map(Some).ok_or_else(|| {
                FormError("Status must be active, draft, sold_out or archived".to_string())
            }),
        }
    }

    pub fn to_new_package(&self) -> Result<NewPackage, FormError> {
        let f = &self.form;
        Ok(NewPackage {
            title: f.value(TITLE).trim().to_string(),
            description: optional_text(f.value(DESCRIPTION)),
            duration_days: optional_number(DURATION, f.value(DURATION))?,
            price: optional_number(PRICE, f.value(PRICE))?,
            max_guests: optional_number(MAX_GUESTS, f.value(MAX_GUESTS))?,
            status: self.status()?,
            cover_image: optional_text(f.value(COVER_IMAGE)),
            start_date: optional_date(START_DATE, f.value(START_DATE))?,
            end_date: optional_date(END_DATE, f.value(END_DATE))?,
            location: optional_text(f.value(LOCATION)),
            is_featured: optional_flag(FEATURED, f.value(FEATURED))?,
        })
    }

    /// Diffs the form against `original`. Emptied required fields are left
    /// unchanged. Emptying an optional field that has a value is a form
    /// error: the server keeps the old value when sent `null`.
    pub fn to_patch(&self, original: &Package) -> Result<PackagePatch, FormError> {
        let f = &self.form;
        Ok(PackagePatch {
            title: required(&original.title, optional_text(f.value(TITLE))),
            description: optional(
                DESCRIPTION,
                original.description.as_ref(),
                optional_text(f.value(DESCRIPTION)),
            )?,
            duration_days: required(
                &original.duration_days,
                optional_number(DURATION, f.value(DURATION))?,
            ),
            price: required(&original.price, optional_number(PRICE, f.value(PRICE))?),
            max_guests: required(
                &original.max_guests,
                optional_number(MAX_GUESTS, f.value(MAX_GUESTS))?,
            ),
            status: required(&original.status, self.status()?),
            cover_image: optional(
                COVER_IMAGE,
                original.cover_image.as_ref(),
                optional_text(f.value(COVER_IMAGE)),
            )?,
            start_date: optional(
                START_DATE,
                original.start_date.as_ref(),
                optional_date(START_DATE, f.value(START_DATE))?,
            )?,
            end_date: optional(
                END_DATE,
                original.end_date.as_ref(),
                optional_date(END_DATE, f.value(END_DATE))?,
            )?,
            location: optional(
                LOCATION,
                original.location.as_ref(),
                optional_text(f.value(LOCATION)),
            )?,
            is_featured: required(
                &original.is_featured,
                optional_flag(FEATURED, f.value(FEATURED))?,
            ),
        })
    }

    pub fn submission(&self) -> Result<Submission, FormError> {
        match &self.original {
            None => Ok(Submission::Create(self.to_new_package()?)),
            Some(original) => Ok(Submission::Update {
                id: original.id.clone(),
                patch: self.to_patch(original)?,
            }),
        }
    }
}

fn optional<T: PartialEq>(
    label: &str,
    current: Option<&T>,
    edited: Option<T>,
) -> Result<Patch<T>, FormError> {
    match Patch::diff(current, edited) {
        Patch::Clear => Err(FormError(format!("{label} cannot be cleared"))),
        patch => Ok(patch),
    }
}

fn required<T: PartialEq>(current: &T, edited: Option<T>) -> Patch<T> {
    match edited {
        Some(value) if value != *current => Patch::Set(value),
        _ => Patch::Keep,
    }
}

const DAY: &str = "Day";
const ENTRY_TITLE: &str = "Title";
const ENTRY_DESCRIPTION: &str = "Description";

#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryForm {
    pub package_id: String,
    pub form: Form,
}

impl ItineraryForm {
    /// Pre-fills the day after the last existing entry.
    pub fn for_package(package: &Package) -> Self {
        let mut form = Form::new(&[DAY, ENTRY_TITLE, ENTRY_DESCRIPTION]);
        let next_day = package
            .itinerary
            .iter()
            .map(|entry| entry.day_number)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        form.set(DAY, next_day.to_string());
        Self {
            package_id: package.id.clone(),
            form,
        }
    }

    pub fn to_new_itinerary(&self) -> Result<NewItinerary, FormError> {
        let day_number = optional_number(DAY, self.form.value(DAY))?
            .ok_or_else(|| FormError("Day is required".to_string()))?;
        Ok(NewItinerary {
            day_number,
            title: self.form.value(ENTRY_TITLE).trim().to_string(),
            description: optional_text(self.form.value(ENTRY_DESCRIPTION)),
        })
    }
}

const IMAGE_URL: &str = "Image URL";
const CAPTION: &str = "Caption";
const ORDER: &str = "Display order";

#[derive(Debug, Clone, PartialEq)]
pub struct ImageForm {
    pub package_id: String,
    pub form: Form,
}

impl ImageForm {
    pub fn for_package(package: &Package) -> Self {
        Self {
            package_id: package.id.clone(),
            form: Form::new(&[IMAGE_URL, CAPTION, ORDER]),
        }
    }

    pub fn to_new_image(&self) -> Result<NewImage, FormError> {
        let image_url = optional_text(self.form.value(IMAGE_URL))
            .ok_or_else(|| FormError("Image URL is required".to_string()))?;
        Ok(NewImage {
            image_url,
            caption: optional_text(self.form.value(CAPTION)),
            display_order: optional_number(ORDER, self.form.value(ORDER))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_package;
    use chrono::NaiveDate;

    #[test]
    fn test_title_only_form_creates_title_only_payload() {
        let mut form = PackageForm::blank();
        form.form.set(TITLE, "Orkney Escape");
        let submission = form.submission().unwrap();
        assert_eq!(
            submission,
            Submission::Create(NewPackage {
                title: "Orkney Escape".to_string(),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_non_numeric_price_is_form_error() {
        let mut form = PackageForm::blank();
        form.form.set(TITLE, "Orkney Escape");
        form.form.set(PRICE, "cheap");
        assert_eq!(
            form.to_new_package().unwrap_err(),
            FormError("Price must be a number".to_string())
        );
    }

    #[test]
    fn test_full_form_creates_typed_payload() {
        let mut form = PackageForm::blank();
        form.form.set(TITLE, "Glencoe Hike");
        form.form.set(DURATION, "4");
        form.form.set(PRICE, "899.5");
        form.form.set(STATUS, "active");
        form.form.set(START_DATE, "2025-07-01");
        form.form.set(FEATURED, "yes");
        let payload = form.to_new_package().unwrap();
        assert_eq!(payload.duration_days, Some(4));
        assert_eq!(payload.price, Some(899.5));
        assert_eq!(payload.status, Some(PackageStatus::Active));
        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(payload.is_featured, Some(true));
    }

    #[test]
    fn test_unchanged_edit_is_empty_patch() {
        let package = sample_package("p1", "Highlands Loop");
        let form = PackageForm::edit(&package);
        let patch = form.to_patch(&package).unwrap();
        assert!(patch.is_empty(), "unexpected patch: {:?}", patch);
    }

    #[test]
    fn test_edit_patch_sets_changed_and_keeps_emptied_required() {
        let package = sample_package("p1", "Highlands Loop");
        let mut form = PackageForm::edit(&package);
        form.form.set(PRICE, "1500");
        form.form.set(DESCRIPTION, "Lochs and glens");
        form.form.set(TITLE, "");

        let Submission::Update { id, patch } = form.submission().unwrap() else {
            panic!("expected update");
        };
        assert_eq!(id, "p1");
        assert_eq!(patch.price, Patch::Set(1500.0));
        assert_eq!(patch.description, Patch::Set("Lochs and glens".to_string()));
        assert_eq!(patch.location, Patch::Keep);
        assert_eq!(patch.title, Patch::Keep);
        assert_eq!(patch.duration_days, Patch::Keep);
    }

    #[test]
    fn test_emptied_optional_field_is_form_error() {
        let package = sample_package("p1", "Highlands Loop");
        let mut form = PackageForm::edit(&package);
        form.form.set(PRICE, "1500");
        form.form.set(LOCATION, "  ");
        assert_eq!(
            form.submission().unwrap_err(),
            FormError("Location cannot be cleared".to_string())
        );

        // Already empty stays empty without complaint
        let mut form = PackageForm::edit(&package);
        form.form.set(DESCRIPTION, "");
        assert!(form.to_patch(&package).unwrap().is_empty());
    }

    #[test]
    fn test_itinerary_next_day_saturates() {
        let mut package = sample_package("p1", "Highlands Loop");
        package.itinerary[1].day_number = u32::MAX;
        let form = ItineraryForm::for_package(&package);
        assert_eq!(form.form.value(DAY), u32::MAX.to_string());
    }

    #[test]
    fn test_itinerary_form_prefills_next_day() {
        let package = sample_package("p1", "Highlands Loop");
        let mut form = ItineraryForm::for_package(&package);
        assert_eq!(form.form.value(DAY), "3");
        form.form.set(ENTRY_TITLE, "Loch Ness");
        let entry = form.to_new_itinerary().unwrap();
        assert_eq!(entry.day_number, 3);
        assert_eq!(entry.title, "Loch Ness");
        assert_eq!(entry.description, None);
    }

    #[test]
    fn test_image_form_requires_url() {
        let package = sample_package("p1", "Highlands Loop");
        let mut form = ImageForm::for_package(&package);
        assert!(form.to_new_image().is_err());
        form.form.set(IMAGE_URL, "https://img.example/loch.jpg");
        form.form.set(ORDER, "2");
        let image = form.to_new_image().unwrap();
        assert_eq!(image.display_order, Some(2));
    }
}
