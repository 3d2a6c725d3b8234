use eframe::egui;

use crate::ui_components::colors::*;
use crate::ui_components::helpers::{secondary_button, CORNER_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogChoice {
    Confirm,
    Cancel,
}

/// Modal confirmation window over a dimmed screen. `None` until the user picks.
pub fn render_confirm_dialog(
    ctx: &egui::Context,
    title: &str,
    message: &str,
    confirm_label: &str,
    busy: bool,
) -> Option<DialogChoice> {
    let screen = ctx.content_rect();
    egui::Area::new(egui::Id::new("confirm_dialog_backdrop"))
        .fixed_pos(screen.min)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            ui.painter().rect_filled(screen, 0.0, OVERLAY_DARK);
            ui.allocate_rect(screen, egui::Sense::click());
        });

    let mut choice = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .fixed_size(egui::vec2(380.0, 0.0))
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(message).size(14.0).color(TEXT_SECONDARY));
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                let confirm_text = if busy { "Deleting..." } else { confirm_label };
                let confirm = ui.add_enabled(
                    !busy,
                    egui::Button::new(egui::RichText::new(confirm_text).size(14.0).color(egui::Color32::WHITE))
                        .fill(ERROR)
                        .min_size(egui::vec2(110.0, 34.0))
                        .corner_radius(CORNER_RADIUS),
                );
                if confirm.clicked() {
                    choice = Some(DialogChoice::Confirm);
                }
                if !busy && secondary_button(ui, "Cancel").clicked() {
                    choice = Some(DialogChoice::Cancel);
                }
            });

            if !busy && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                choice = Some(DialogChoice::Cancel);
            }
        });

    choice
}
