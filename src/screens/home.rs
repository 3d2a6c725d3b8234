use eframe::egui::{self, Color32};

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::models::{PageMeta, Paged, Venue};
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{
    calculate_grid_layout, error_banner, primary_button, render_empty_state, render_loading,
    render_pagination_controls, render_section_header, secondary_button, BUTTON_HEIGHT, CORNER_RADIUS,
};
use crate::ui_components::venue_card::{render_venue_card, CARD_SIZE};

const SEARCH_WIDTH: f32 = 320.0;
const GRID_SPACING: f32 = 15.0;

pub struct HomeState {
    pub venues: Vec<Venue>,
    pub meta: PageMeta,
    pub page: u32,
    /// Text in the search box
    pub query: String,
    /// Query the current listing was fetched with
    pub active_query: String,
    pub error: Option<String>,
    pub task: Option<Task<Paged<Venue>>>,
    pub focus_search: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            venues: Vec::new(),
            meta: PageMeta::default(),
            page: 1,
            query: String::new(),
            active_query: String::new(),
            error: None,
            task: None,
            focus_search: false,
        }
    }
}

impl HomeState {
    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }

    fn title(&self) -> String {
        if self.active_query.is_empty() {
            "Venues".to_string()
        } else {
            format!("Results for \"{}\"", self.active_query)
        }
    }
}

/// Home tab - venue grid with search and paging
pub fn render_home_view(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    ui.add_space(20.0);
    render_search_bar(app, ui);
    ui.add_space(20.0);

    let title = app.home.title();
    render_section_header(ui, &title, None);
    ui.add_space(12.0);

    if let Some(err) = app.home.error.clone() {
        ui.horizontal(|ui| {
            ui.add_space(20.0);
            ui.vertical(|ui| {
                ui.set_max_width(600.0);
                error_banner(ui, &format!("Could not load venues: {}", err));
                ui.add_space(8.0);
                if secondary_button(ui, "Retry").clicked() {
                    app.fetch_venues();
                }
            });
        });
        return;
    }

    if app.home.is_loading() && app.home.venues.is_empty() {
        render_loading(ui, "Loading venues...");
        return;
    }

    if app.home.venues.is_empty() {
        let message = if app.home.active_query.is_empty() {
            "There are no venues to show yet"
        } else {
            "Try a different name or description"
        };
        render_empty_state(ui, "🏠", "No venues found", message);
        return;
    }

    if let Some(id) = render_venue_grid(app, ui) {
        app.navigate(Screen::VenueDetail(id));
        return;
    }

    ui.add_space(10.0);
    if let Some(change) = render_pagination_controls(ui, &app.home.meta, app.home.page) {
        app.change_page(change);
    }
    ui.add_space(30.0);
}

fn render_search_bar(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        ui.spacing_mut().item_spacing.x = 10.0;

        egui::Frame::NONE
            .fill(DARK_GRAY)
            .corner_radius(CORNER_RADIUS)
            .inner_margin(egui::Margin::symmetric(12, 0))
            .show(ui, |ui| {
                ui.set_height(BUTTON_HEIGHT);
                ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new("🔍").size(14.0));
                    let input = ui.add_sized(
                        egui::vec2(SEARCH_WIDTH, BUTTON_HEIGHT),
                        egui::TextEdit::singleline(&mut app.home.query)
                            .hint_text("Search venues...")
                            .font(egui::FontId::proportional(14.0))
                            .frame(false),
                    );

                    if app.home.focus_search {
                        input.request_focus();
                        app.home.focus_search = false;
                    }
                    if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        app.submit_search();
                    }
                });
            });

        if primary_button(ui, "Search").on_hover_text("Search (Ctrl+F)").clicked() {
            app.submit_search();
        }
        if !app.home.active_query.is_empty() && secondary_button(ui, "Clear").clicked() {
            app.clear_search();
        }
        if app.home.is_loading() && !app.home.venues.is_empty() {
            ui.spinner();
        }
    });
}

/// Returns the id of the clicked venue
fn render_venue_grid(app: &mut HolidazeApp, ui: &mut egui::Ui) -> Option<String> {
    let (items_per_row, left_padding) = calculate_grid_layout(ui.available_width(), CARD_SIZE, GRID_SPACING);
    let HolidazeApp { home, media, .. } = app;
    let mut clicked = None;

    for row in home.venues.chunks(items_per_row) {
        ui.horizontal(|ui| {
            ui.add_space(left_padding);
            ui.spacing_mut().item_spacing.x = GRID_SPACING;
            for venue in row {
                if render_venue_card(ui, media, venue) {
                    clicked = Some(venue.id.clone());
                }
            }
        });
        ui.add_space(GRID_SPACING);
    }

    if let Some(total) = home.meta.total_count {
        ui.horizontal(|ui| {
            ui.add_space(left_padding);
            ui.label(
                egui::RichText::new(format!("{} venues", total))
                    .size(12.0)
                    .color(Color32::from_rgb(120, 120, 120)),
            );
        });
    }

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_starts_on_first_page() {
        let home = HomeState::default();
        assert_eq!(home.page, 1);
        assert!(!home.is_loading());
        assert_eq!(home.title(), "Venues");
    }

    #[test]
    fn test_title_names_active_query() {
        let home = HomeState { query: "cab".into(), active_query: "cabin".into(), ..Default::default() };
        assert_eq!(home.title(), "Results for \"cabin\"");
    }
}
