use eframe::egui::{self, Color32, Sense};

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::models::Profile;
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{error_banner, form_card, form_field, secondary_button, submit_button, FORM_WIDTH};
use crate::ui_components::venue_card::paint_cover;
use crate::utils::validation::{is_valid_url, ProfileImagesForm, ValidationErrors};

#[derive(Default)]
pub struct EditImagesState {
    pub form: ProfileImagesForm,
    pub errors: ValidationErrors,
    pub error: Option<String>,
    pub task: Option<Task<Profile>>,
}

pub fn render_edit_images_view(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    ui.add_space(40.0);
    let busy = app.edit_images.task.is_some();
    let mut save = false;
    let mut cancel = false;

    let HolidazeApp { edit_images, media, .. } = &mut *app;
    form_card(ui, FORM_WIDTH, |ui| {
        ui.label(egui::RichText::new("Profile images").size(26.0).color(Color32::WHITE).strong());
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Use publicly accessible image URLs. Leave a field empty to keep the current image.")
                .size(13.0)
                .color(TEXT_SECONDARY),
        );
        ui.add_space(16.0);

        if let Some(err) = &edit_images.error {
            error_banner(ui, err);
            ui.add_space(12.0);
        }

        // Live preview of the entered URLs
        let width = ui.available_width();
        let (banner_rect, _) = ui.allocate_exact_size(egui::vec2(width, 110.0), Sense::hover());
        let banner = Some(edit_images.form.banner_url.trim()).filter(|u| is_valid_url(u));
        paint_cover(ui, media, banner, banner_rect);

        let avatar_rect = egui::Rect::from_center_size(banner_rect.left_bottom() + egui::vec2(60.0, 0.0), egui::vec2(72.0, 72.0));
        let avatar = Some(edit_images.form.avatar_url.trim()).filter(|u| is_valid_url(u));
        paint_cover(ui, media, avatar, avatar_rect);
        ui.add_space(46.0);

        let form = &mut edit_images.form;
        let errors = &edit_images.errors;
        form_field(ui, "Avatar URL", &mut form.avatar_url, "https://...", errors, "avatar_url");
        form_field(ui, "Avatar description", &mut form.avatar_alt, "", errors, "avatar_alt");
        form_field(ui, "Banner URL", &mut form.banner_url, "https://...", errors, "banner_url");
        form_field(ui, "Banner description", &mut form.banner_alt, "", errors, "banner_alt");

        ui.add_space(12.0);
        save = submit_button(ui, "Save images", "Saving...", busy);
        ui.add_space(8.0);
        cancel = !busy && secondary_button(ui, "Cancel").clicked();
    });

    if save {
        app.submit_profile_images();
    } else if cancel {
        app.navigate(Screen::Profile);
    }
}
