use eframe::egui::{self, Color32};

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{
    error_banner, field_error, form_card, form_field, password_field, submit_button, FORM_WIDTH,
};
use crate::utils::session_store::Session;
use crate::utils::validation::{RegisterForm, ValidationErrors};

/// Registration finished; the automatic login may not have
pub enum RegisterOutcome {
    SignedIn(Session),
    RegisteredOnly { email: String },
}

#[derive(Default)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub errors: ValidationErrors,
    pub error: Option<String>,
    pub task: Option<Task<RegisterOutcome>>,
}

pub fn render_register_view(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    ui.add_space(40.0);
    let busy = app.register.task.is_some();

    form_card(ui, FORM_WIDTH, |ui| {
        ui.label(egui::RichText::new("Create account").size(26.0).color(Color32::WHITE).strong());
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Registration needs a @stud.noroff.no email address")
                .size(13.0)
                .color(TEXT_SECONDARY),
        );
        ui.add_space(18.0);

        if let Some(err) = &app.register.error {
            error_banner(ui, err);
            ui.add_space(12.0);
        }

        let state = &mut app.register;
        let form = &mut state.form;
        let errors = &state.errors;

        form_field(ui, "Username", &mut form.name, "letters, numbers and _", errors, "name");
        form_field(ui, "Email", &mut form.email, "name@stud.noroff.no", errors, "email");
        password_field(ui, "Password (min. 8 characters)", &mut form.password, errors, "password");

        ui.label(egui::RichText::new("Bio (optional)").size(13.0).color(TEXT_SECONDARY));
        ui.add(
            egui::TextEdit::multiline(&mut form.bio)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        field_error(ui, errors, "bio");
        ui.add_space(8.0);

        ui.collapsing(egui::RichText::new("Profile images (optional)").size(13.0).color(TEXT_SECONDARY), |ui| {
            form_field(ui, "Avatar URL", &mut form.avatar_url, "https://...", errors, "avatar_url");
            form_field(ui, "Avatar description", &mut form.avatar_alt, "", errors, "avatar_alt");
            form_field(ui, "Banner URL", &mut form.banner_url, "https://...", errors, "banner_url");
            form_field(ui, "Banner description", &mut form.banner_alt, "", errors, "banner_alt");
        });
        ui.add_space(8.0);

        ui.checkbox(
            &mut form.venue_manager,
            egui::RichText::new("Register as a venue manager").size(14.0),
        );
        ui.label(
            egui::RichText::new("Venue managers can list and manage their own venues")
                .size(12.0)
                .color(TEXT_TERTIARY),
        );

        ui.add_space(16.0);
        if submit_button(ui, "Register", "Creating account...", busy) {
            app.submit_register();
        }

        ui.add_space(14.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Already registered?").size(13.0).color(TEXT_SECONDARY));
            if ui.link(egui::RichText::new("Login").size(13.0).color(ACCENT)).clicked() {
                app.navigate(Screen::Login);
            }
        });
    });
}
