//! # Dashboard State
//!
//! The package admin dashboard as a reducer:
//!
//! ```text
//! DashboardState + DashboardAction  →  update()  →  Effect
//! ```
//!
//! ```text
//! DashboardState
//! ├── connection: Connection        // health-check gate
//! ├── packages: Vec<Package>        // list cache, replaced wholesale
//! ├── selected: usize               // list cursor
//! ├── filter: PackageFilter         // status / featured query
//! ├── open_package: Option<Package> // detail page subject
//! ├── child_selected: usize         // cursor over itinerary + images
//! ├── page: Page                    // which page is shown
//! ├── loading: bool                 // a request is in flight
//! ├── error: Option<String>         // dismissible banner
//! └── notice: Option<String>        // last success message
//! ```
//!
//! Nothing talks to the server until the health check passes. Requests
//! are strictly sequential: while one is in flight, new ones are refused.
//! Every package write is followed by a full list reload.

use log::{debug, info, warn};

use crate::api::{ApiError, Package, PackageFilter, PackageStatus};
use crate::core::editor::{ImageForm, ItineraryForm, PackageForm, Submission};
use crate::core::form::Form;
use crate::core::request::{Mutation, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Checking,
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    List,
    Detail,
    Editor(PackageForm),
    Itinerary(ItineraryForm),
    Image(ImageForm),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    Started,
    /// Re-run the health check after a failed connection.
    Retry,
    HealthChecked(bool),
    Refresh,
    PackagesLoaded(Vec<Package>),
    PackageLoaded(Package),
    Mutated(Mutation),
    RequestFailed(ApiError),
    DismissError,
    SelectNext,
    SelectPrev,
    OpenSelected,
    NewPackage,
    EditPackage,
    DeletePackage,
    SubmitForm,
    AddItinerary,
    AddImage,
    DeleteChild,
    CycleStatusFilter,
    CycleFeaturedFilter,
    Back,
    Quit,
}

impl DashboardAction {
    /// Actions that move between pages on their own, without a request.
    fn changes_page(&self) -> bool {
        matches!(
            self,
            DashboardAction::NewPackage
                | DashboardAction::EditPackage
                | DashboardAction::AddItinerary
                | DashboardAction::AddImage
                | DashboardAction::Back
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Request(Request),
}

/// What the list area should show.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Disconnected,
    Loading,
    Empty,
    Rows(&'a [Package]),
}

/// Headline figures for the overview strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    pub total: usize,
    pub active: usize,
    pub featured: usize,
}

/// A row on the detail page: itinerary entries first, then images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChildRow<'a> {
    Itinerary(&'a crate::api::Itinerary),
    Image(&'a crate::api::PackageImage),
}

pub struct DashboardState {
    pub connection: Connection,
    pub packages: Vec<Package>,
    pub selected: usize,
    pub filter: PackageFilter,
    pub open_package: Option<Package>,
    pub child_selected: usize,
    pub page: Page,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl DashboardState {
    pub fn new(filter: PackageFilter) -> Self {
        Self {
            connection: Connection::Checking,
            packages: Vec::new(),
            selected: 0,
            filter,
            open_package: None,
            child_selected: 0,
            page: Page::List,
            loading: false,
            error: None,
            notice: None,
        }
    }

    pub fn list_view(&self) -> ListView<'_> {
        match self.connection {
            Connection::Disconnected => ListView::Disconnected,
            Connection::Checking => ListView::Loading,
            Connection::Connected if self.loading && self.packages.is_empty() => ListView::Loading,
            Connection::Connected if self.packages.is_empty() => ListView::Empty,
            Connection::Connected => ListView::Rows(&self.packages),
        }
    }

    pub fn overview(&self) -> Overview {
        Overview {
            total: self.packages.len(),
            active: self
                .packages
                .iter()
                .filter(|p| p.status == PackageStatus::Active)
                .count(),
            featured: self.packages.iter().filter(|p| p.is_featured).count(),
        }
    }

    pub fn selected_package(&self) -> Option<&Package> {
        self.packages.get(self.selected)
    }

    /// The open package, while its detail page is showing.
    fn detail_package(&self) -> Option<&Package> {
        match self.page {
            Page::Detail => self.open_package.as_ref(),
            _ => None,
        }
    }

    pub fn child_rows(&self) -> Vec<ChildRow<'_>> {
        match &self.open_package {
            None => Vec::new(),
            Some(package) => package
                .itinerary
                .iter()
                .map(ChildRow::Itinerary)
                .chain(package.images.iter().map(ChildRow::Image))
                .collect(),
        }
    }

    /// The form on the current page, if any.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.page {
            Page::Editor(editor) => Some(&mut editor.form),
            Page::Itinerary(editor) => Some(&mut editor.form),
            Page::Image(editor) => Some(&mut editor.form),
            Page::List | Page::Detail => None,
        }
    }

    /// Starts a request if the gate and the sequencing allow it.
    fn begin(&mut self, request: Request) -> Effect {
        if self.loading {
            warn!("Request refused while another is in flight: {:?}", request);
            return Effect::None;
        }
        if self.connection != Connection::Connected && request != Request::HealthCheck {
            warn!("Request refused while not connected: {:?}", request);
            return Effect::None;
        }
        self.loading = true;
        Effect::Request(request)
    }

    fn reload_list(&mut self) -> Effect {
        self.begin(Request::LoadPackages(self.filter))
    }

    fn back_from_form(&mut self) {
        self.page = if self.open_package.is_some() {
            Page::Detail
        } else {
            Page::List
        };
    }
}

pub fn update(state: &mut DashboardState, action: DashboardAction) -> Effect {
    // The response in flight decides the next page
    if state.loading && action.changes_page() {
        debug!("Ignoring {:?} while a request is in flight", action);
        return Effect::None;
    }
    match action {
        DashboardAction::Started | DashboardAction::Retry => {
            state.connection = Connection::Checking;
            state.error = None;
            state.begin(Request::HealthCheck)
        }
        DashboardAction::HealthChecked(ok) => {
            state.loading = false;
            if ok {
                info!("Backend reachable");
                state.connection = Connection::Connected;
                state.reload_list()
            } else {
                warn!("Backend health check failed");
                state.connection = Connection::Disconnected;
                Effect::None
            }
        }
        DashboardAction::Refresh => state.reload_list(),
        DashboardAction::PackagesLoaded(packages) => {
            state.loading = false;
            info!("Loaded {} packages", packages.len());
            state.packages = packages;
            state.selected = state.selected.min(state.packages.len().saturating_sub(1));
            Effect::None
        }
        DashboardAction::PackageLoaded(package) => {
            state.loading = false;
            let rows = package.itinerary.len() + package.images.len();
            let same = state.open_package.as_ref().map(|p| &p.id) == Some(&package.id);
            state.child_selected = if same {
                state.child_selected.min(rows.saturating_sub(1))
            } else {
                0
            };
            state.open_package = Some(package);
            state.page = Page::Detail;
            Effect::None
        }
        DashboardAction::Mutated(mutation) => {
            state.loading = false;
            state.notice = Some(mutation.describe());
            if let Some(package_id) = mutation.child_of() {
                let package_id = package_id.to_string();
                return state.begin(Request::LoadPackage(package_id));
            }
            match mutation {
                Mutation::PackageSaved(package) => {
                    state.page = Page::Detail;
                    state.child_selected = 0;
                    state.open_package = Some(package);
                }
                _ => {
                    state.page = Page::List;
                    state.open_package = None;
                }
            }
            state.reload_list()
        }
        DashboardAction::RequestFailed(err) => {
            state.loading = false;
            warn!("Request failed: {}", err);
            if matches!(err, ApiError::NetworkUnreachable(_)) {
                state.connection = Connection::Disconnected;
            } else {
                state.error = Some(err.message());
            }
            Effect::None
        }
        DashboardAction::DismissError => {
            state.error = None;
            Effect::None
        }
        DashboardAction::SelectNext => {
            match state.page {
                Page::List if !state.packages.is_empty() => {
                    state.selected = (state.selected + 1).min(state.packages.len() - 1);
                }
                Page::Detail => {
                    let rows = state.child_rows().len();
                    if rows > 0 {
                        state.child_selected = (state.child_selected + 1).min(rows - 1);
                    }
                }
                _ => {}
            }
            Effect::None
        }
        DashboardAction::SelectPrev => {
            match state.page {
                Page::List => state.selected = state.selected.saturating_sub(1),
                Page::Detail => state.child_selected = state.child_selected.saturating_sub(1),
                _ => {}
            }
            Effect::None
        }
        DashboardAction::OpenSelected => {
            let id = match state.page {
                Page::List => state.selected_package().map(|p| p.id.clone()),
                _ => None,
            };
            match id {
                Some(id) => state.begin(Request::LoadPackage(id)),
                None => Effect::None,
            }
        }
        DashboardAction::NewPackage => {
            if state.page == Page::List && state.connection == Connection::Connected {
                state.open_package = None;
                state.page = Page::Editor(PackageForm::blank());
            }
            Effect::None
        }
        DashboardAction::EditPackage => {
            let page = state
                .detail_package()
                .map(|p| Page::Editor(PackageForm::edit(p)));
            if let Some(page) = page {
                state.page = page;
            }
            Effect::None
        }
        DashboardAction::DeletePackage => {
            let id = match state.page {
                Page::List => state.selected_package().map(|p| p.id.clone()),
                Page::Detail => state.open_package.as_ref().map(|p| p.id.clone()),
                _ => None,
            };
            match id {
                Some(id) => state.begin(Request::DeletePackage(id)),
                None => Effect::None,
            }
        }
        DashboardAction::SubmitForm => submit_form(state),
        DashboardAction::AddItinerary => {
            let page = state
                .detail_package()
                .map(|p| Page::Itinerary(ItineraryForm::for_package(p)));
            if let Some(page) = page {
                state.page = page;
            }
            Effect::None
        }
        DashboardAction::AddImage => {
            let page = state
                .detail_package()
                .map(|p| Page::Image(ImageForm::for_package(p)));
            if let Some(page) = page {
                state.page = page;
            }
            Effect::None
        }
        DashboardAction::DeleteChild => {
            if state.page != Page::Detail {
                return Effect::None;
            }
            let request = state.open_package.as_ref().and_then(|package| {
                match state.child_rows().get(state.child_selected) {
                    Some(ChildRow::Itinerary(entry)) => Some(Request::DeleteItinerary {
                        package_id: package.id.clone(),
                        itinerary_id: entry.id.clone(),
                    }),
                    Some(ChildRow::Image(image)) => Some(Request::DeleteImage {
                        package_id: package.id.clone(),
                        image_id: image.id.clone(),
                    }),
                    None => None,
                }
            });
            match request {
                Some(request) => state.begin(request),
                None => Effect::None,
            }
        }
        DashboardAction::CycleStatusFilter => {
            state.filter.status = next_status_filter(state.filter.status);
            state.reload_list()
        }
        DashboardAction::CycleFeaturedFilter => {
            state.filter.featured = match state.filter.featured {
                None => Some(true),
                Some(true) => Some(false),
                Some(false) => None,
            };
            state.reload_list()
        }
        DashboardAction::Back => {
            match state.page {
                Page::Detail => {
                    state.open_package = None;
                    state.page = Page::List;
                }
                Page::Editor(_) | Page::Itinerary(_) | Page::Image(_) => state.back_from_form(),
                Page::List => {}
            }
            Effect::None
        }
        DashboardAction::Quit => Effect::Quit,
    }
}

fn submit_form(state: &mut DashboardState) -> Effect {
    // Ok(None) is an edit that changed nothing.
    let request = match &state.page {
        Page::Editor(editor) => editor.submission().map(|submission| match submission {
            Submission::Create(data) => Some(Request::CreatePackage(data)),
            Submission::Update { patch, .. } if patch.is_empty() => None,
            Submission::Update { id, patch } => Some(Request::UpdatePackage { id, patch }),
        }),
        Page::Itinerary(editor) => editor.to_new_itinerary().map(|item| {
            Some(Request::AddItinerary {
                package_id: editor.package_id.clone(),
                item,
            })
        }),
        Page::Image(editor) => editor.to_new_image().map(|image| {
            Some(Request::AddImage {
                package_id: editor.package_id.clone(),
                image,
            })
        }),
        Page::List | Page::Detail => return Effect::None,
    };
    match request {
        Ok(Some(request)) => state.begin(request),
        Ok(None) => {
            state.notice = Some("No changes".to_string());
            state.back_from_form();
            Effect::None
        }
        Err(e) => {
            state.error = Some(e.to_string());
            Effect::None
        }
    }
}

fn next_status_filter(current: Option<PackageStatus>) -> Option<PackageStatus> {
    match current {
        None => Some(PackageStatus::Active),
        Some(PackageStatus::Active) => Some(PackageStatus::Draft),
        Some(PackageStatus::Draft) => Some(PackageStatus::SoldOut),
        Some(PackageStatus::SoldOut) => Some(PackageStatus::Archived),
        Some(PackageStatus::Archived) => None,
    }
}
