use chrono::NaiveDate;
use eframe::egui::{self, Color32, Sense};

use crate::api::profiles::{Dashboard, ManagedVenue};
use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::Task;
use crate::models::{Booking, Profile};
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{
    badge, error_banner, primary_button, render_empty_state, render_loading, render_section_header,
    secondary_button, CORNER_RADIUS,
};
use crate::ui_components::venue_card::paint_cover;
use crate::utils::availability::total_price;
use crate::utils::formatting::{format_price, format_stay, pluralize, truncate_text};
use crate::utils::media::MediaCache;

const BANNER_HEIGHT: f32 = 180.0;
const AVATAR_SIZE: f32 = 96.0;
const THUMB_SIZE: f32 = 64.0;

#[derive(Default)]
pub struct ProfileState {
    pub dashboard: Option<Dashboard>,
    pub error: Option<String>,
    pub task: Option<Task<Dashboard>>,
    /// Bookings list shows past stays instead of upcoming ones
    pub show_past: bool,
}

enum ProfileAction {
    Retry,
    EditImages,
    CreateVenue,
    OpenVenue(String),
    EditVenue(String),
    DeleteVenue(String, String),
}

/// Upcoming stays soonest first, past stays most recent first
fn split_bookings(bookings: &[Booking], today: NaiveDate) -> (Vec<&Booking>, Vec<&Booking>) {
    let (mut upcoming, mut past): (Vec<&Booking>, Vec<&Booking>) =
        bookings.iter().partition(|b| b.is_upcoming(today));
    upcoming.sort_by_key(|b| b.check_in());
    past.sort_by_key(|b| std::cmp::Reverse(b.check_in()));
    (upcoming, past)
}

pub fn render_profile_view(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    let mut action = None;

    {
        let HolidazeApp { profile, media, .. } = &mut *app;

        if let Some(err) = &profile.error {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.set_max_width(500.0);
                error_banner(ui, &format!("Could not load profile: {}", err));
                ui.add_space(10.0);
                if secondary_button(ui, "Retry").clicked() {
                    action = Some(ProfileAction::Retry);
                }
            });
        } else if let Some(dashboard) = &profile.dashboard {
            render_profile_card(ui, media, &dashboard.profile, &mut action);
            ui.add_space(24.0);
            render_bookings(ui, media, &dashboard.bookings, &mut profile.show_past, &mut action);

            if dashboard.profile.venue_manager {
                ui.add_space(24.0);
                render_managed_venues(ui, media, &dashboard.venues, &mut action);
            }
            ui.add_space(30.0);
        } else {
            render_loading(ui, "Loading profile...");
        }
    }

    match action {
        Some(ProfileAction::Retry) => app.navigate(Screen::Profile),
        Some(ProfileAction::EditImages) => app.navigate(Screen::EditImages),
        Some(ProfileAction::CreateVenue) => app.navigate(Screen::VenueCreate),
        Some(ProfileAction::OpenVenue(id)) => app.navigate(Screen::VenueDetail(id)),
        Some(ProfileAction::EditVenue(id)) => app.navigate(Screen::VenueEdit(id)),
        Some(ProfileAction::DeleteVenue(id, name)) => app.request_delete(&id, &name),
        None => {}
    }
}

fn render_profile_card(ui: &mut egui::Ui, media: &mut MediaCache, profile: &Profile, action: &mut Option<ProfileAction>) {
    let width = ui.available_width();
    let (banner_rect, _) = ui.allocate_exact_size(egui::vec2(width, BANNER_HEIGHT), Sense::hover());
    paint_cover(ui, media, profile.banner.as_ref().map(|m| m.url.as_str()), banner_rect);

    let avatar_rect = egui::Rect::from_min_size(
        egui::pos2(banner_rect.min.x + 30.0, banner_rect.max.y - AVATAR_SIZE / 2.0),
        egui::vec2(AVATAR_SIZE, AVATAR_SIZE),
    );
    ui.painter().rect_filled(avatar_rect.expand(3.0), AVATAR_SIZE, BG_MAIN);
    match profile.avatar.as_ref().and_then(|m| media.texture(ui.ctx(), &m.url)) {
        Some(texture) => {
            egui::Image::new(&texture)
                .corner_radius(AVATAR_SIZE / 2.0)
                .paint_at(ui, avatar_rect);
        }
        None => {
            ui.painter().rect_filled(avatar_rect, AVATAR_SIZE, MID_GRAY);
            let initial = profile.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
            ui.painter().text(
                avatar_rect.center(),
                egui::Align2::CENTER_CENTER,
                initial,
                egui::FontId::proportional(36.0),
                TEXT_PRIMARY,
            );
        }
    }

    ui.add_space(AVATAR_SIZE / 2.0 + 10.0);
    ui.horizontal(|ui| {
        ui.add_space(30.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&profile.name).size(26.0).color(Color32::WHITE).strong());
                if profile.venue_manager {
                    badge(ui, "Venue manager", ACCENT);
                } else {
                    badge(ui, "Customer", LIGHT_GRAY);
                }
            });
            ui.label(egui::RichText::new(&profile.email).size(13.0).color(TEXT_SECONDARY));
            if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(bio).size(14.0).color(TEXT_PRIMARY));
            }

            if let Some(count) = profile.count {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(pluralize(count.bookings as i64, "booking", "bookings"))
                            .size(13.0)
                            .color(TEXT_SECONDARY),
                    );
                    if profile.venue_manager {
                        ui.label(egui::RichText::new("·").color(TEXT_TERTIARY));
                        ui.label(
                            egui::RichText::new(pluralize(count.venues as i64, "venue", "venues"))
                                .size(13.0)
                                .color(TEXT_SECONDARY),
                        );
                    }
                });
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            ui.add_space(30.0);
            if profile.venue_manager && primary_button(ui, "Create venue").clicked() {
                *action = Some(ProfileAction::CreateVenue);
            }
            if secondary_button(ui, "Edit images").clicked() {
                *action = Some(ProfileAction::EditImages);
            }
        });
    });
}

fn render_bookings(
    ui: &mut egui::Ui,
    media: &mut MediaCache,
    bookings: &[Booking],
    show_past: &mut bool,
    action: &mut Option<ProfileAction>,
) {
    render_section_header(ui, "My bookings", None);
    ui.add_space(8.0);

    let today = chrono::Local::now().date_naive();
    let (upcoming, past) = split_bookings(bookings, today);

    ui.horizontal(|ui| {
        ui.add_space(20.0);
        for (label, past_tab) in [(format!("Upcoming ({})", upcoming.len()), false), (format!("Past ({})", past.len()), true)] {
            let active = *show_past == past_tab;
            let tab = ui.add_sized(
                egui::vec2(120.0, 30.0),
                egui::Button::new(egui::RichText::new(label).size(13.0).color(if active { ACCENT } else { LIGHT_GRAY }))
                    .fill(if active { MID_GRAY } else { DARK_GRAY })
                    .corner_radius(CORNER_RADIUS),
            );
            if tab.clicked() {
                *show_past = past_tab;
            }
        }
    });
    ui.add_space(10.0);

    let shown = if *show_past { past } else { upcoming };
    if shown.is_empty() {
        let (title, message) = if *show_past {
            ("No past stays", "Stays you have completed show up here")
        } else {
            ("No upcoming bookings", "Find a venue and book your next stay")
        };
        render_empty_state(ui, "📅", title, message);
        return;
    }

    for booking in shown {
        let venue = booking.venue.as_deref();
        let clicked = list_row(ui, media, venue.and_then(|v| v.cover_image()).map(|m| m.url.as_str()), |ui| {
            ui.label(egui::RichText::new(booking.venue_name()).size(15.0).color(Color32::WHITE).strong());
            if let (Some(from), Some(to)) = (booking.check_in(), booking.check_out()) {
                ui.label(egui::RichText::new(format_stay(from, to)).size(13.0).color(TEXT_SECONDARY));
                let mut details = pluralize(booking.guests as i64, "guest", "guests");
                if let Some(venue) = venue {
                    details.push_str(&format!(" · {}", format_price(total_price(from, to, venue.price))));
                }
                ui.label(egui::RichText::new(details).size(12.0).color(TEXT_TERTIARY));
            }
        });
        if clicked {
            if let Some(venue) = venue {
                *action = Some(ProfileAction::OpenVenue(venue.id.clone()));
            }
        }
    }
}

fn render_managed_venues(
    ui: &mut egui::Ui,
    media: &mut MediaCache,
    venues: &[ManagedVenue],
    action: &mut Option<ProfileAction>,
) {
    if render_section_header(ui, "My venues", Some("+ New venue")) {
        *action = Some(ProfileAction::CreateVenue);
    }
    ui.add_space(10.0);

    if venues.is_empty() {
        render_empty_state(ui, "🏠", "No venues yet", "Create your first venue to start hosting");
        return;
    }

    for managed in venues {
        let venue = &managed.venue;
        let clicked = list_row(ui, media, venue.cover_image().map(|m| m.url.as_str()), |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&venue.name).size(15.0).color(Color32::WHITE).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(10.0);
                    if ui.small_button("Delete").clicked() {
                        *action = Some(ProfileAction::DeleteVenue(venue.id.clone(), venue.name.clone()));
                    }
                    if ui.small_button("Edit").clicked() {
                        *action = Some(ProfileAction::EditVenue(venue.id.clone()));
                    }
                });
            });
            ui.label(
                egui::RichText::new(format!(
                    "{} per night · {}",
                    format_price(venue.price),
                    truncate_text(&venue.location.short_label(), 40)
                ))
                .size(13.0)
                .color(TEXT_SECONDARY),
            );

            match &managed.bookings {
                Ok(bookings) if bookings.is_empty() => {
                    ui.label(egui::RichText::new("No bookings yet").size(12.0).color(TEXT_TERTIARY));
                }
                Ok(bookings) => {
                    ui.label(
                        egui::RichText::new(pluralize(bookings.len() as i64, "booking", "bookings"))
                            .size(12.0)
                            .color(ACCENT),
                    );
                    for booking in bookings {
                        let Some((from, to)) = booking.check_in().zip(booking.check_out()) else {
                            continue;
                        };
                        let guest = booking.customer.as_ref().map(|c| c.name.as_str()).unwrap_or("Guest");
                        ui.label(
                            egui::RichText::new(format!(
                                "{} · {} · {}",
                                format_stay(from, to),
                                guest,
                                pluralize(booking.guests as i64, "guest", "guests")
                            ))
                            .size(12.0)
                            .color(TEXT_SECONDARY),
                        );
                    }
                }
                Err(err) => {
                    ui.label(egui::RichText::new(format!("Could not load bookings: {}", err)).size(12.0).color(ERROR));
                }
            }
        });
        if clicked && action.is_none() {
            *action = Some(ProfileAction::OpenVenue(venue.id.clone()));
        }
    }
}

/// Card row with a thumbnail; returns true when the thumbnail was clicked
fn list_row(ui: &mut egui::Ui, media: &mut MediaCache, thumb_url: Option<&str>, add_contents: impl FnOnce(&mut egui::Ui)) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        egui::Frame::NONE
            .fill(BG_CARD)
            .stroke(egui::Stroke::new(1.0, BORDER_DEFAULT))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width() - 20.0);
                ui.horizontal_top(|ui| {
                    let (rect, response) = ui.allocate_exact_size(egui::vec2(THUMB_SIZE, THUMB_SIZE), Sense::click());
                    paint_cover(ui, media, thumb_url, rect);
                    clicked = response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked();
                    ui.add_space(8.0);
                    ui.vertical(add_contents);
                });
            });
    });
    ui.add_space(8.0);
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: &str, from: &str, to: &str) -> Booking {
        Booking {
            id: id.into(),
            date_from: format!("{}T12:00:00.000Z", from),
            date_to: format!("{}T12:00:00.000Z", to),
            guests: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_split_bookings_orders_each_side() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let bookings = vec![
            booking("late", "2025-09-01", "2025-09-03"),
            booking("old", "2025-05-01", "2025-05-02"),
            booking("now", "2025-07-14", "2025-07-15"),
            booking("older", "2025-01-01", "2025-01-02"),
            booking("soon", "2025-08-01", "2025-08-02"),
        ];

        let (upcoming, past) = split_bookings(&bookings, today);
        let ids = |list: Vec<&Booking>| list.into_iter().map(|b| b.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(upcoming), vec!["now", "soon", "late"]);
        assert_eq!(ids(past), vec!["old", "older"]);
    }
}
