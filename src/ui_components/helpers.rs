use eframe::egui;
use egui::Color32;

use crate::models::PageMeta;
use crate::ui_components::colors::*;
use crate::utils::validation::ValidationErrors;

pub const BUTTON_HEIGHT: f32 = 34.0;
pub const CORNER_RADIUS: f32 = 3.0;
pub const FORM_WIDTH: f32 = 460.0;

/// Render section header with title and optional action button
pub fn render_section_header(ui: &mut egui::Ui, title: &str, action_text: Option<&str>) -> bool {
    let mut clicked = false;

    ui.horizontal(|ui| {
        ui.add_space(20.0);
        ui.label(egui::RichText::new(title).size(24.0).color(Color32::WHITE).strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(20.0);
            if let Some(text) = action_text {
                if primary_button(ui, text).clicked() {
                    clicked = true;
                }
            }
        });
    });

    clicked
}

pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(text).size(14.0).color(Color32::WHITE))
            .fill(ACCENT)
            .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
            .corner_radius(CORNER_RADIUS),
    )
}

pub fn secondary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(text).size(14.0).color(LIGHT_GRAY))
            .fill(DARK_GRAY)
            .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
            .corner_radius(CORNER_RADIUS),
    )
}

/// Full-width submit button that turns into a spinner while busy
pub fn submit_button(ui: &mut egui::Ui, text: &str, busy_text: &str, busy: bool) -> bool {
    let label = if busy { busy_text } else { text };
    let response = ui.add_enabled(
        !busy,
        egui::Button::new(egui::RichText::new(label).size(15.0).color(Color32::WHITE))
            .fill(if busy { MID_GRAY } else { ACCENT })
            .min_size(egui::vec2(ui.available_width(), 40.0))
            .corner_radius(CORNER_RADIUS),
    );
    response.clicked()
}

/// Labelled single-line input with its validation message underneath
pub fn form_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
    errors: &ValidationErrors,
    field: &str,
) -> egui::Response {
    ui.label(egui::RichText::new(label).size(13.0).color(TEXT_SECONDARY));
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY)
            .font(egui::FontId::proportional(14.0)),
    );
    field_error(ui, errors, field);
    ui.add_space(8.0);
    response
}

pub fn password_field(ui: &mut egui::Ui, label: &str, value: &mut String, errors: &ValidationErrors, field: &str) -> egui::Response {
    ui.label(egui::RichText::new(label).size(13.0).color(TEXT_SECONDARY));
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .password(true)
            .desired_width(f32::INFINITY)
            .font(egui::FontId::proportional(14.0)),
    );
    field_error(ui, errors, field);
    ui.add_space(8.0);
    response
}

pub fn field_error(ui: &mut egui::Ui, errors: &ValidationErrors, field: &str) {
    if let Some(message) = errors.for_field(field) {
        ui.label(egui::RichText::new(message).size(12.0).color(ERROR));
    }
}

/// Boxed error line, used for request failures above forms
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(Color32::from_rgb(60, 24, 26))
        .stroke(egui::Stroke::new(1.0, ERROR))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).size(13.0).color(ERROR));
        });
}

pub fn success_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(Color32::from_rgb(22, 48, 26))
        .stroke(egui::Stroke::new(1.0, SUCCESS))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).size(13.0).color(SUCCESS));
        });
}

pub fn render_loading(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.spinner();
        ui.add_space(10.0);
        ui.label(egui::RichText::new(message).color(TEXT_SECONDARY));
    });
}

/// Render empty state with icon, title, and message
pub fn render_empty_state(ui: &mut egui::Ui, icon: &str, title: &str, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new(icon).size(48.0).color(Color32::GRAY));
        ui.add_space(15.0);
        ui.label(egui::RichText::new(title).size(20.0).color(Color32::GRAY));
        ui.add_space(10.0);
        ui.label(egui::RichText::new(message).size(14.0).color(Color32::DARK_GRAY));
    });
}

/// Centered card column for forms
pub fn form_card<R>(ui: &mut egui::Ui, width: f32, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let pad = ((ui.available_width() - width) / 2.0).max(0.0);
    ui.horizontal(|ui| {
        ui.add_space(pad);
        egui::Frame::NONE
            .fill(BG_CARD)
            .stroke(egui::Stroke::new(1.0, BORDER_DEFAULT))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_width(width);
                ui.vertical(add_contents).inner
            })
            .inner
    })
    .inner
}

/// Small pill, used for amenities and role labels
pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    egui::Frame::NONE
        .fill(DARK_GRAY)
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(12.0).color(color));
        });
}

/// Number of columns that fit, plus left padding
pub fn calculate_grid_layout(available_width: f32, item_size: f32, spacing: f32) -> (usize, f32) {
    let left_padding = 20.0;
    let usable_width = available_width - (left_padding * 2.0);
    let items_per_row = ((usable_width + spacing) / (item_size + spacing)).floor().max(1.0) as usize;

    (items_per_row, left_padding)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageChange {
    Previous,
    Next,
}

/// Prev/next controls driven by the API paging meta
pub fn render_pagination_controls(ui: &mut egui::Ui, meta: &PageMeta, current_page: u32) -> Option<PageChange> {
    let has_prev = meta.has_previous();
    let has_next = meta.has_next();
    if !has_prev && !has_next {
        return None;
    }

    let mut change = None;
    ui.horizontal(|ui| {
        let controls_width = 230.0;
        let pad = (ui.available_width() - controls_width).max(0.0) / 2.0;
        ui.add_space(pad);

        let arrow = |ui: &mut egui::Ui, text: &str, enabled: bool| {
            ui.add_enabled(
                enabled,
                egui::Button::new(
                    egui::RichText::new(text)
                        .size(18.0)
                        .color(if enabled { Color32::WHITE } else { Color32::DARK_GRAY }),
                )
                .fill(if enabled { MID_GRAY } else { Color32::from_rgb(25, 25, 30) })
                .min_size(egui::vec2(40.0, 40.0))
                .corner_radius(20.0),
            )
        };

        if arrow(ui, "←", has_prev).clicked() {
            change = Some(PageChange::Previous);
        }
        ui.add_space(15.0);

        let label = match meta.page_count {
            Some(total) => format!("Page {} of {}", current_page, total),
            None => format!("Page {}", current_page),
        };
        ui.label(egui::RichText::new(label).size(14.0).color(Color32::from_rgb(180, 180, 180)));

        ui.add_space(15.0);
        if arrow(ui, "→", has_next).clicked() {
            change = Some(PageChange::Next);
        }
    });

    change
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout_columns() {
        assert_eq!(calculate_grid_layout(1000.0, 220.0, 15.0), (4, 20.0));
        assert_eq!(calculate_grid_layout(100.0, 220.0, 15.0).0, 1);
    }
}
