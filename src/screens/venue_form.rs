use eframe::egui::{self, Color32};

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::models::{CachedUser, Venue};
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{
    error_banner, field_error, form_card, form_field, render_loading, secondary_button, submit_button,
};
use crate::utils::ownership::OwnershipVerdict;
use crate::utils::validation::{ValidationErrors, VenueForm, MEDIA_SLOTS};

const VENUE_FORM_WIDTH: f32 = 620.0;

/// Whether the form may be shown yet
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormAccess {
    #[default]
    Checking,
    Granted,
    Failed(String),
}

/// Result of the background access check
pub enum VenueGate {
    Manager(CachedUser),
    Ownership(OwnershipVerdict),
}

#[derive(Default)]
pub struct VenueFormState {
    /// Venue id in edit mode, `None` when creating
    pub editing: Option<String>,
    pub form: VenueForm,
    pub errors: ValidationErrors,
    pub access: FormAccess,
    pub gate_task: Option<Task<VenueGate>>,
    pub submit_task: Option<Task<Venue>>,
}

impl VenueFormState {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(venue_id: &str) -> Self {
        Self {
            editing: Some(venue_id.to_string()),
            ..Self::default()
        }
    }

    pub fn load_venue(&mut self, venue: &Venue) {
        self.form = VenueForm::from_venue(venue);
    }

    fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit venue"
        } else {
            "Create venue"
        }
    }
}

enum FormAction {
    Submit,
    Cancel,
}

pub fn render_venue_form_view(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    ui.add_space(30.0);

    match app.venue_form.access.clone() {
        FormAccess::Checking => {
            render_loading(ui, "Checking access...");
            return;
        }
        FormAccess::Failed(message) => {
            ui.vertical_centered(|ui| {
                ui.set_max_width(500.0);
                error_banner(ui, &message);
                ui.add_space(10.0);
                if secondary_button(ui, "Back to profile").clicked() {
                    app.navigate(Screen::Profile);
                }
            });
            return;
        }
        FormAccess::Granted => {}
    }

    let busy = app.venue_form.submit_task.is_some();
    let state = &mut app.venue_form;
    let title = state.title();
    let mut action = None;

    form_card(ui, VENUE_FORM_WIDTH, |ui| {
        ui.label(egui::RichText::new(title).size(26.0).color(Color32::WHITE).strong());
        ui.add_space(16.0);

        let form = &mut state.form;
        let errors = &state.errors;

        section(ui, "Details");
        form_field(ui, "Name", &mut form.name, "Cozy cabin by the lake", errors, "name");
        ui.label(egui::RichText::new("Description").size(13.0).color(TEXT_SECONDARY));
        ui.add(
            egui::TextEdit::multiline(&mut form.description)
                .hint_text("At least 10 characters")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        field_error(ui, errors, "description");
        ui.add_space(8.0);

        ui.columns(3, |cols| {
            form_field(&mut cols[0], "Price per night", &mut form.price, "100", errors, "price");
            form_field(&mut cols[1], "Max guests", &mut form.max_guests, "1-100", errors, "max_guests");
            form_field(&mut cols[2], "Rating", &mut form.rating, "0-5", errors, "rating");
        });

        section(ui, "Images");
        for i in 0..MEDIA_SLOTS {
            let slot = &mut form.media[i];
            let url_key = ["media_url_1", "media_url_2", "media_url_3"][i];
            let alt_key = ["media_alt_1", "media_alt_2", "media_alt_3"][i];
            ui.columns(2, |cols| {
                form_field(&mut cols[0], &format!("Image {} URL", i + 1), &mut slot.url, "https://...", errors, url_key);
                form_field(&mut cols[1], "Description", &mut slot.alt, "", errors, alt_key);
            });
        }

        section(ui, "Amenities");
        ui.horizontal_wrapped(|ui| {
            ui.checkbox(&mut form.meta.wifi, "Wifi");
            ui.checkbox(&mut form.meta.parking, "Parking");
            ui.checkbox(&mut form.meta.breakfast, "Breakfast");
            ui.checkbox(&mut form.meta.pets, "Pets allowed");
        });
        ui.add_space(8.0);

        section(ui, "Location");
        form_field(ui, "Address", &mut form.address, "", errors, "address");
        ui.columns(2, |cols| {
            form_field(&mut cols[0], "City", &mut form.city, "", errors, "city");
            form_field(&mut cols[1], "Zip", &mut form.zip, "", errors, "zip");
        });
        ui.columns(2, |cols| {
            form_field(&mut cols[0], "Country", &mut form.country, "", errors, "country");
            form_field(&mut cols[1], "Continent", &mut form.continent, "", errors, "continent");
        });
        ui.columns(2, |cols| {
            form_field(&mut cols[0], "Latitude", &mut form.lat, "-90 to 90", errors, "lat");
            form_field(&mut cols[1], "Longitude", &mut form.lng, "-180 to 180", errors, "lng");
        });

        ui.add_space(12.0);
        let (text, busy_text) = if state.editing.is_some() {
            ("Save changes", "Saving...")
        } else {
            ("Create venue", "Creating...")
        };
        if submit_button(ui, text, busy_text, busy) {
            action = Some(FormAction::Submit);
        }
        ui.add_space(8.0);
        if !busy && secondary_button(ui, "Cancel").clicked() {
            action = Some(FormAction::Cancel);
        }
    });
    ui.add_space(30.0);

    match action {
        Some(FormAction::Submit) => app.submit_venue_form(),
        Some(FormAction::Cancel) => match app.venue_form.editing.clone() {
            Some(id) => app.navigate(Screen::VenueDetail(id)),
            None => app.navigate(Screen::Profile),
        },
        None => {}
    }
}

fn section(ui: &mut egui::Ui, title: &str) {
    ui.add_space(6.0);
    ui.label(egui::RichText::new(title).size(16.0).color(ACCENT).strong());
    ui.separator();
    ui.add_space(4.0);
}
