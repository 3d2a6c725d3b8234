use eframe::egui;

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::ui_components::colors::BG_HEADER;
use crate::ui_components::header::render_header;

/// Routes the current screen into the shared header + content layout
pub fn render_with_layout(app: &mut HolidazeApp, ctx: &egui::Context) {
    match app.screen.clone() {
        Screen::Home => render_layout_with_content(app, ctx, |app, ui, _ctx| {
            crate::screens::render_home_view(app, ui);
        }),
        Screen::Login => render_layout_with_content(app, ctx, |app, ui, _ctx| {
            crate::screens::render_login_view(app, ui);
        }),
        Screen::Register => render_layout_with_content(app, ctx, |app, ui, _ctx| {
            crate::screens::render_register_view(app, ui);
        }),
        Screen::VenueDetail(_) => render_layout_with_content(app, ctx, |app, ui, ctx| {
            crate::screens::render_venue_detail_view(app, ui, ctx);
        }),
        Screen::VenueEdit(_) | Screen::VenueCreate => render_layout_with_content(app, ctx, |app, ui, _ctx| {
            crate::screens::render_venue_form_view(app, ui);
        }),
        Screen::Profile => render_layout_with_content(app, ctx, |app, ui, _ctx| {
            crate::screens::render_profile_view(app, ui);
        }),
        Screen::EditImages => render_layout_with_content(app, ctx, |app, ui, _ctx| {
            crate::screens::render_edit_images_view(app, ui);
        }),
    }
}

/// Header bar on top, scrollable content below
fn render_layout_with_content<F>(app: &mut HolidazeApp, ctx: &egui::Context, render_content: F)
where
    F: FnOnce(&mut HolidazeApp, &mut egui::Ui, &egui::Context),
{
    egui::TopBottomPanel::top("header")
        .exact_height(50.0)
        .frame(egui::Frame::NONE.fill(BG_HEADER))
        .show(ctx, |ui| {
            render_header(app, ui);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
        .show(ctx, |ui| {
            // One scroll position per screen
            let id = egui::Id::new(("content_scroll", format!("{:?}", app.screen)));
            egui::ScrollArea::vertical()
                .id_salt(id)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    render_content(app, ui, ctx);
                });
        });
}
