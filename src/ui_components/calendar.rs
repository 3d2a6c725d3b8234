use chrono::{Datelike, Duration, NaiveDate};
use eframe::egui;
use std::collections::BTreeSet;

use crate::ui_components::colors::*;
use crate::utils::availability::{is_selectable, RangeSelection};

const DAY_SIZE: egui::Vec2 = egui::vec2(38.0, 32.0);
const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayState {
    Past,
    Booked,
    Endpoint,
    InRange,
    Available,
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// First day of the month `delta` months away
pub fn shift_month(month: NaiveDate, delta: i32) -> NaiveDate {
    let index = month.year() * 12 + month.month0() as i32 + delta;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1).unwrap_or(month)
}

/// Weeks of the month, Sunday first; `None` pads days outside it
pub fn month_grid(month: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = first_of_month(month);
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut day = first;
    let mut column = first.weekday().num_days_from_sunday() as usize;

    while day.month() == first.month() {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
        day += Duration::days(1);
    }
    if column > 0 {
        weeks.push(week);
    }
    weeks
}

pub fn day_state(day: NaiveDate, today: NaiveDate, booked: &BTreeSet<NaiveDate>, selection: &RangeSelection) -> DayState {
    if booked.contains(&day) {
        DayState::Booked
    } else if !is_selectable(day, today, booked) {
        DayState::Past
    } else if selection.from() == Some(day) || selection.to() == Some(day) {
        DayState::Endpoint
    } else if selection.contains(day) {
        DayState::InRange
    } else {
        DayState::Available
    }
}

/// Month view with range picking. Returns true when the selection changed.
pub fn render_calendar(
    ui: &mut egui::Ui,
    month: &mut NaiveDate,
    today: NaiveDate,
    booked: &BTreeSet<NaiveDate>,
    selection: &mut RangeSelection,
) -> bool {
    let mut changed = false;
    let can_go_back = *month > first_of_month(today);

    ui.horizontal(|ui| {
        if ui.add_enabled(can_go_back, egui::Button::new("‹").fill(DARK_GRAY).corner_radius(3.0)).clicked() {
            *month = shift_month(*month, -1);
        }
        ui.add_sized(
            egui::vec2(DAY_SIZE.x * 7.0 - 70.0, 24.0),
            egui::Label::new(egui::RichText::new(month.format("%B %Y").to_string()).size(15.0).strong()),
        );
        if ui.add(egui::Button::new("›").fill(DARK_GRAY).corner_radius(3.0)).clicked() {
            *month = shift_month(*month, 1);
        }
    });

    ui.add_space(6.0);
    ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);

    ui.horizontal(|ui| {
        for name in WEEKDAYS {
            ui.add_sized(DAY_SIZE, egui::Label::new(egui::RichText::new(name).size(12.0).color(TEXT_TERTIARY)));
        }
    });

    for week in month_grid(*month) {
        ui.horizontal(|ui| {
            for slot in week {
                let Some(day) = slot else {
                    ui.allocate_exact_size(DAY_SIZE, egui::Sense::hover());
                    continue;
                };

                let state = day_state(day, today, booked, selection);
                let mut text = egui::RichText::new(day.day().to_string()).size(13.0);
                let fill = match state {
                    DayState::Past => {
                        text = text.color(TEXT_TERTIARY);
                        BG_CARD
                    }
                    DayState::Booked => {
                        text = text.color(TEXT_SECONDARY).strikethrough();
                        DAY_BOOKED
                    }
                    DayState::Endpoint => {
                        text = text.color(egui::Color32::WHITE).strong();
                        ACCENT
                    }
                    DayState::InRange => DAY_RANGE,
                    DayState::Available => DARK_GRAY,
                };

                let enabled = !matches!(state, DayState::Past | DayState::Booked);
                let response = ui
                    .add_enabled(enabled, egui::Button::new(text).fill(fill).corner_radius(3.0).min_size(DAY_SIZE))
                    .on_disabled_hover_text(if state == DayState::Booked { "Already booked" } else { "Unavailable" });

                if response.clicked() {
                    selection.click(day, booked);
                    changed = true;
                }
            }
        });
    }

    changed
}
