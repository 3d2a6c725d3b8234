use eframe::egui::{self, Color32};

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{error_banner, form_card, form_field, password_field, submit_button, FORM_WIDTH};
use crate::utils::session_store::Session;
use crate::utils::validation::{LoginForm, ValidationErrors};

#[derive(Default)]
pub struct LoginState {
    pub form: LoginForm,
    pub errors: ValidationErrors,
    /// Request failure shown above the form
    pub error: Option<String>,
    pub task: Option<Task<Session>>,
}

pub fn render_login_view(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    ui.add_space(40.0);
    let busy = app.login.task.is_some();

    form_card(ui, FORM_WIDTH, |ui| {
        ui.label(egui::RichText::new("Login").size(26.0).color(Color32::WHITE).strong());
        ui.add_space(4.0);
        ui.label(egui::RichText::new("Sign in to book stays and manage your venues").size(13.0).color(TEXT_SECONDARY));
        ui.add_space(18.0);

        if let Some(err) = &app.login.error {
            error_banner(ui, err);
            ui.add_space(12.0);
        }

        let state = &mut app.login;
        form_field(ui, "Email", &mut state.form.email, "name@stud.noroff.no", &state.errors, "email");
        let password = password_field(ui, "Password", &mut state.form.password, &state.errors, "password");
        let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(8.0);
        if (submit_button(ui, "Login", "Logging in...", busy) || enter) && !busy {
            app.submit_login();
        }

        ui.add_space(14.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Don't have an account?").size(13.0).color(TEXT_SECONDARY));
            if ui.link(egui::RichText::new("Register").size(13.0).color(ACCENT)).clicked() {
                app.navigate(Screen::Register);
            }
        });
    });
}
