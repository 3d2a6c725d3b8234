use chrono::NaiveDate;
use eframe::egui::{self, Color32, Sense};
use std::collections::BTreeSet;

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::models::{Booking, Venue};
use crate::ui_components::calendar::{first_of_month, render_calendar};
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{
    badge, error_banner, primary_button, render_loading, secondary_button, submit_button, success_banner,
    CORNER_RADIUS,
};
use crate::ui_components::venue_card::paint_cover;
use crate::utils::availability::{nights, total_price, RangeSelection};
use crate::utils::formatting::{format_long_date, format_price, map_url, pluralize, rating_stars};
use crate::utils::{copy_to_clipboard, open_in_browser};

pub const BOOKING_SUCCESS_MESSAGE: &str = "Booking successful! You can view your bookings in your profile.";

const CONTENT_WIDTH: f32 = 900.0;
const GALLERY_HEIGHT: f32 = 420.0;
const THUMB_SIZE: f32 = 72.0;
const BOOKING_WIDTH: f32 = 320.0;

pub struct VenueDetailState {
    pub venue_id: String,
    pub venue: Option<Venue>,
    pub error: Option<String>,
    pub task: Option<Task<Venue>>,

    // Booking form
    pub booked: BTreeSet<NaiveDate>,
    pub month: NaiveDate,
    pub selection: RangeSelection,
    pub guests: u32,
    pub booking_error: Option<String>,
    pub booking_success: Option<String>,
    pub booking_task: Option<Task<Booking>>,
    pub refresh_task: Option<Task<Vec<Booking>>>,

    /// Owner actions (edit/delete) are shown
    pub can_manage: bool,

    pub gallery_index: usize,
    pub viewer_open: bool,
}

impl Default for VenueDetailState {
    fn default() -> Self {
        Self::new("")
    }
}

impl VenueDetailState {
    pub fn new(venue_id: &str) -> Self {
        Self {
            venue_id: venue_id.to_string(),
            venue: None,
            error: None,
            task: None,
            booked: BTreeSet::new(),
            month: first_of_month(today()),
            selection: RangeSelection::new(),
            guests: 1,
            booking_error: None,
            booking_success: None,
            booking_task: None,
            refresh_task: None,
            can_manage: false,
            gallery_index: 0,
            viewer_open: false,
        }
    }
}

enum DetailAction {
    Back,
    Retry,
    Edit(String),
    Delete(String, String),
    Book,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Wrapping gallery step
fn gallery_step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Nights and total price of a complete selection
fn stay_summary(selection: &RangeSelection, price: f64) -> Option<(i64, f64)> {
    selection.range().map(|(from, to)| (nights(from, to), total_price(from, to, price)))
}

pub fn render_venue_detail_view(app: &mut HolidazeApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    let mut action = None;

    ui.add_space(16.0);
    centered_column(ui, |ui| {
        if ui.link(egui::RichText::new("← Back to venues").size(13.0).color(TEXT_SECONDARY)).clicked() {
            action = Some(DetailAction::Back);
        }
        ui.add_space(12.0);

        if let Some(err) = app.venue_detail.error.clone() {
            error_banner(ui, &err);
            ui.add_space(8.0);
            if secondary_button(ui, "Retry").clicked() {
                action = Some(DetailAction::Retry);
            }
            return;
        }

        let Some(venue) = app.venue_detail.venue.clone() else {
            render_loading(ui, "Loading venue...");
            return;
        };

        render_gallery(app, ui, &venue);
        ui.add_space(16.0);

        if let Some(a) = render_title_row(app, ui, &venue) {
            action = Some(a);
        }
        ui.add_space(16.0);

        ui.horizontal_top(|ui| {
            let info_width = (ui.available_width() - BOOKING_WIDTH - 24.0).max(260.0);
            ui.vertical(|ui| {
                ui.set_width(info_width);
                render_info(ui, &venue);
            });
            ui.add_space(24.0);
            ui.vertical(|ui| {
                ui.set_width(BOOKING_WIDTH);
                if render_booking_panel(app, ui, &venue) {
                    action = Some(DetailAction::Book);
                }
            });
        });
        ui.add_space(30.0);
    });

    render_viewer(app, ctx);

    match action {
        Some(DetailAction::Back) => app.navigate(Screen::Home),
        Some(DetailAction::Retry) => {
            let id = app.venue_detail.venue_id.clone();
            app.navigate(Screen::VenueDetail(id));
        }
        Some(DetailAction::Edit(id)) => app.navigate(Screen::VenueEdit(id)),
        Some(DetailAction::Delete(id, name)) => app.request_delete(&id, &name),
        Some(DetailAction::Book) => app.submit_booking(),
        None => {}
    }
}

fn centered_column(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    let width = ui.available_width().min(CONTENT_WIDTH);
    let pad = ((ui.available_width() - width) / 2.0).max(20.0);
    ui.horizontal(|ui| {
        ui.add_space(pad);
        ui.vertical(|ui| {
            ui.set_width(width - 20.0);
            add_contents(ui);
        });
    });
}

fn render_gallery(app: &mut HolidazeApp, ui: &mut egui::Ui, venue: &Venue) {
    let images: Vec<_> = venue.media.iter().filter(|m| !m.url.trim().is_empty()).collect();
    let detail = &mut app.venue_detail;
    if detail.gallery_index >= images.len() {
        detail.gallery_index = 0;
    }

    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), GALLERY_HEIGHT), Sense::click());
    let current = images.get(detail.gallery_index);
    paint_cover(ui, &mut app.media, current.map(|m| m.url.as_str()), rect);

    if current.is_some() && response.on_hover_text("Open full size").clicked() {
        app.venue_detail.viewer_open = true;
    }

    if images.len() > 1 {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;
            for (i, image) in images.iter().enumerate() {
                let (thumb, response) = ui.allocate_exact_size(egui::vec2(THUMB_SIZE, THUMB_SIZE), Sense::click());
                paint_cover(ui, &mut app.media, Some(image.url.as_str()), thumb);
                if i == app.venue_detail.gallery_index {
                    ui.painter().rect_stroke(
                        thumb,
                        4.0,
                        egui::Stroke::new(2.0, ACCENT),
                        egui::epaint::StrokeKind::Outside,
                    );
                }
                if response.clicked() {
                    app.venue_detail.gallery_index = i;
                }
            }
        });
    }
}

fn render_title_row(app: &mut HolidazeApp, ui: &mut egui::Ui, venue: &Venue) -> Option<DetailAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&venue.name).size(28.0).color(Color32::WHITE).strong());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(rating_stars(venue.rating)).size(14.0).color(WARNING));
                let place = venue.location.short_label();
                if !place.is_empty() {
                    ui.label(egui::RichText::new(format!("· {}", place)).size(14.0).color(TEXT_SECONDARY));
                }
            });
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if app.venue_detail.can_manage {
                let delete = ui.add(
                    egui::Button::new(egui::RichText::new("Delete").size(14.0).color(Color32::WHITE))
                        .fill(ERROR)
                        .min_size(egui::vec2(0.0, 34.0))
                        .corner_radius(CORNER_RADIUS),
                );
                if delete.clicked() {
                    action = Some(DetailAction::Delete(venue.id.clone(), venue.name.clone()));
                }
                if primary_button(ui, "Edit").clicked() {
                    action = Some(DetailAction::Edit(venue.id.clone()));
                }
            }

            if secondary_button(ui, "Copy link").on_hover_text("Copy venue link").clicked() {
                let link = app.config.url(&format!("/holidaze/venues/{}", venue.id));
                if copy_to_clipboard(&link, "venue link") {
                    app.toast_manager.show_success("Link copied to clipboard");
                } else {
                    app.toast_manager.show_error("Could not copy link");
                }
            }
        });
    });

    action
}

fn render_info(ui: &mut egui::Ui, venue: &Venue) {
    ui.label(
        egui::RichText::new(format!(
            "{} per night · up to {}",
            format_price(venue.price),
            pluralize(venue.max_guests as i64, "guest", "guests")
        ))
        .size(16.0)
        .color(ACCENT),
    );
    ui.add_space(12.0);

    ui.label(egui::RichText::new("About this place").size(18.0).color(Color32::WHITE).strong());
    ui.add_space(4.0);
    let description = venue.description_text();
    ui.label(
        egui::RichText::new(if description.is_empty() { "No description provided." } else { description })
            .size(14.0)
            .color(TEXT_SECONDARY),
    );
    ui.add_space(16.0);

    let amenities = venue.meta.amenities();
    ui.label(egui::RichText::new("Amenities").size(18.0).color(Color32::WHITE).strong());
    ui.add_space(6.0);
    if amenities.is_empty() {
        ui.label(egui::RichText::new("No amenities listed").size(13.0).color(TEXT_TERTIARY));
    } else {
        ui.horizontal_wrapped(|ui| {
            for amenity in amenities {
                badge(ui, amenity, SUCCESS);
            }
        });
    }
    ui.add_space(16.0);

    ui.label(egui::RichText::new("Location").size(18.0).color(Color32::WHITE).strong());
    ui.add_space(4.0);
    let location = &venue.location;
    let lines: Vec<String> = [&location.address, &location.zip, &location.city, &location.country, &location.continent]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .collect();
    if lines.is_empty() {
        ui.label(egui::RichText::new("Location not provided").size(13.0).color(TEXT_TERTIARY));
    } else {
        ui.label(egui::RichText::new(lines.join(", ")).size(14.0).color(TEXT_SECONDARY));
    }
    if let Some((lat, lng)) = location.coordinates() {
        ui.add_space(6.0);
        if secondary_button(ui, "View on map").clicked() {
            open_in_browser(&map_url(lat, lng));
        }
    }
    ui.add_space(16.0);

    if let Some(owner) = &venue.owner {
        ui.label(egui::RichText::new("Hosted by").size(18.0).color(Color32::WHITE).strong());
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&owner.name).size(14.0).color(TEXT_PRIMARY));
        ui.label(egui::RichText::new(&owner.email).size(12.0).color(TEXT_TERTIARY));
    }
}

/// Calendar, guests and the submit button. True when "Book" was pressed.
fn render_booking_panel(app: &mut HolidazeApp, ui: &mut egui::Ui, venue: &Venue) -> bool {
    let signed_in = app.app_state.is_authenticated();
    let detail = &mut app.venue_detail;
    let busy = detail.booking_task.is_some();
    let mut book = false;

    egui::Frame::NONE
        .fill(BG_CARD)
        .stroke(egui::Stroke::new(1.0, BORDER_DEFAULT))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Book your stay").size(18.0).color(Color32::WHITE).strong());
            ui.add_space(10.0);

            if render_calendar(ui, &mut detail.month, today(), &detail.booked, &mut detail.selection) {
                detail.booking_error = None;
                detail.booking_success = None;
            }
            if let Some(err) = detail.selection.error() {
                ui.label(egui::RichText::new(err).size(12.0).color(ERROR));
            }
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let label = match (detail.selection.from(), detail.selection.to()) {
                    (Some(from), Some(to)) => format!("{} → {}", format_long_date(from), format_long_date(to)),
                    (Some(from), None) => format!("{} → choose check-out", format_long_date(from)),
                    _ => "Choose check-in".to_string(),
                };
                ui.label(egui::RichText::new(label).size(13.0).color(TEXT_SECONDARY));
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Guests").size(13.0).color(TEXT_SECONDARY));
                ui.add(egui::DragValue::new(&mut detail.guests).range(1..=venue.max_guests.max(1)));
                ui.label(egui::RichText::new(format!("max {}", venue.max_guests)).size(12.0).color(TEXT_TERTIARY));
            });
            ui.add_space(8.0);

            if let Some((nights, total)) = stay_summary(&detail.selection, venue.price) {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} × {}",
                            format_price(venue.price),
                            pluralize(nights, "night", "nights")
                        ))
                        .size(13.0)
                        .color(TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(format_price(total)).size(15.0).color(Color32::WHITE).strong());
                    });
                });
                ui.add_space(8.0);
            }

            if let Some(err) = &detail.booking_error {
                error_banner(ui, err);
                ui.add_space(8.0);
            }
            if let Some(message) = &detail.booking_success {
                success_banner(ui, message);
                ui.add_space(8.0);
            }

            if !detail.selection.is_complete() {
                ui.label(egui::RichText::new("Pick check-in and check-out in the calendar").size(12.0).color(TEXT_TERTIARY));
                ui.add_space(6.0);
            }
            let text = if signed_in { "Book now" } else { "Log in to book" };
            if submit_button(ui, text, "Booking...", busy) {
                book = true;
            }
        });

    book
}

fn render_viewer(app: &mut HolidazeApp, ctx: &egui::Context) {
    if !app.venue_detail.viewer_open {
        return;
    }
    let Some(venue) = app.venue_detail.venue.as_ref() else {
        app.venue_detail.viewer_open = false;
        return;
    };
    let images: Vec<(String, String)> = venue
        .media
        .iter()
        .filter(|m| !m.url.trim().is_empty())
        .map(|m| (m.url.clone(), m.alt.clone()))
        .collect();
    if images.is_empty() {
        app.venue_detail.viewer_open = false;
        return;
    }

    let index = app.venue_detail.gallery_index.min(images.len() - 1);
    let (url, alt) = &images[index];
    let screen = ctx.content_rect();
    let mut open = true;

    egui::Window::new(venue.name.clone())
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let max = egui::vec2(screen.width() * 0.8, screen.height() * 0.75);
            match app.media.texture(ctx, url) {
                Some(texture) => {
                    ui.add(egui::Image::new(&texture).max_size(max).corner_radius(6.0));
                }
                None => {
                    ui.allocate_ui(egui::vec2(max.x.min(600.0), 300.0), |ui| {
                        ui.centered_and_justified(|ui| ui.spinner());
                    });
                }
            }
            if !alt.is_empty() {
                ui.label(egui::RichText::new(alt).size(12.0).color(TEXT_TERTIARY));
            }

            if images.len() > 1 {
                ui.horizontal(|ui| {
                    let step = ui.input(|i| {
                        (i.key_pressed(egui::Key::ArrowLeft), i.key_pressed(egui::Key::ArrowRight))
                    });
                    if secondary_button(ui, "‹ Previous").clicked() || step.0 {
                        app.venue_detail.gallery_index = gallery_step(index, images.len(), false);
                    }
                    ui.label(
                        egui::RichText::new(format!("{} / {}", index + 1, images.len()))
                            .size(13.0)
                            .color(TEXT_SECONDARY),
                    );
                    if secondary_button(ui, "Next ›").clicked() || step.1 {
                        app.venue_detail.gallery_index = gallery_step(index, images.len(), true);
                    }
                });
            }
        });

    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.venue_detail.viewer_open = false;
    }
}
