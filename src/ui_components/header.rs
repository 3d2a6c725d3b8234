use eframe::egui;

use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app_state::AppState;
use crate::ui_components::colors::*;
use crate::ui_components::helpers::{BUTTON_HEIGHT, CORNER_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    CreateVenue,
    Profile,
    Login,
    Register,
    Logout,
}

impl NavTarget {
    fn label(self) -> &'static str {
        match self {
            NavTarget::Home => "Venues",
            NavTarget::CreateVenue => "Create venue",
            NavTarget::Profile => "Profile",
            NavTarget::Login => "Login",
            NavTarget::Register => "Register",
            NavTarget::Logout => "Logout",
        }
    }

    fn width(self) -> f32 {
        match self {
            NavTarget::CreateVenue => 110.0,
            NavTarget::Register => 85.0,
            _ => 75.0,
        }
    }

    fn hint(self) -> Option<&'static str> {
        match self {
            NavTarget::Home => Some("Venues (Ctrl+H)"),
            NavTarget::Profile => Some("Profile (Ctrl+P)"),
            _ => None,
        }
    }

    fn is_active(self, screen: &Screen) -> bool {
        match self {
            NavTarget::Home => matches!(screen, Screen::Home | Screen::VenueDetail(_)),
            NavTarget::CreateVenue => *screen == Screen::VenueCreate,
            NavTarget::Profile => matches!(screen, Screen::Profile | Screen::EditImages | Screen::VenueEdit(_)),
            NavTarget::Login => *screen == Screen::Login,
            NavTarget::Register => *screen == Screen::Register,
            NavTarget::Logout => false,
        }
    }

    /// Items on the right-hand side of the bar
    fn is_account_item(self) -> bool {
        matches!(self, NavTarget::Login | NavTarget::Register | NavTarget::Logout)
    }
}

/// Navigation entries for the current session, in display order
pub fn nav_items(state: &AppState) -> Vec<NavTarget> {
    let mut items = vec![NavTarget::Home];

    if state.is_authenticated() {
        if state.is_venue_manager() {
            items.push(NavTarget::CreateVenue);
        }
        items.push(NavTarget::Profile);
        items.push(NavTarget::Logout);
    } else {
        items.push(NavTarget::Login);
        items.push(NavTarget::Register);
    }

    items
}

pub fn render_header(app: &mut HolidazeApp, ui: &mut egui::Ui) {
    let items = nav_items(&app.app_state);
    let mut clicked = None;

    ui.horizontal_centered(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        ui.add_space(20.0);

        ui.label(egui::RichText::new("Holidaze").size(20.0).color(ACCENT).strong())
            .on_hover_text(format!("Holidaze v{}", app.app_state.app_version()));
        ui.add_space(20.0);

        for item in items.iter().copied().filter(|i| !i.is_account_item()) {
            if nav_button(ui, item, item.is_active(&app.screen)) {
                clicked = Some(item);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(20.0);
            for item in items.iter().rev().copied().filter(|i| i.is_account_item()) {
                if nav_button(ui, item, item.is_active(&app.screen)) {
                    clicked = Some(item);
                }
            }

            if let Some(user) = app.app_state.user() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(&user.name).size(13.0).color(TEXT_SECONDARY));
                let avatar = user.avatar.as_ref().and_then(|m| app.media.texture(ui.ctx(), &m.url));
                match avatar {
                    Some(texture) => {
                        ui.add(
                            egui::Image::new(&texture)
                                .fit_to_exact_size(egui::vec2(32.0, 32.0))
                                .corner_radius(16.0),
                        );
                    }
                    None => {
                        ui.label(egui::RichText::new("●").size(20.0).color(LIGHT_GRAY));
                    }
                }
            }
        });
    });

    match clicked {
        Some(NavTarget::Home) => app.navigate(Screen::Home),
        Some(NavTarget::CreateVenue) => app.navigate(Screen::VenueCreate),
        Some(NavTarget::Profile) => app.navigate(Screen::Profile),
        Some(NavTarget::Login) => app.navigate(Screen::Login),
        Some(NavTarget::Register) => app.navigate(Screen::Register),
        Some(NavTarget::Logout) => app.logout(),
        None => {}
    }
}

fn nav_button(ui: &mut egui::Ui, item: NavTarget, active: bool) -> bool {
    let response = ui.add_sized(
        egui::vec2(item.width(), BUTTON_HEIGHT),
        egui::Button::new(
            egui::RichText::new(item.label())
                .size(14.0)
                .color(if active { ACCENT } else { LIGHT_GRAY }),
        )
        .fill(if active { MID_GRAY } else { DARK_GRAY })
        .corner_radius(CORNER_RADIUS),
    );

    match item.hint() {
        Some(hint) => response.on_hover_text(hint).clicked(),
        None => response.clicked(),
    }
}
