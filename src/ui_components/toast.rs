/// Toast notifications for auth events, bookings and venue changes
/// Drawn at the bottom-center of the window

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Vec2};
use std::time::{Duration, Instant};
use crate::ui_components::colors::*;

const TOAST_WIDTH: f32 = 440.0;
const TOAST_HEIGHT: f32 = 50.0;
const TOAST_SPACING: f32 = 10.0;
const BOTTOM_OFFSET: f32 = 30.0;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    pub fn opacity(&self) -> f32 {
        let elapsed = self.created_at.elapsed().as_secs_f32();
        let total = self.duration.as_secs_f32();

        // Fade in first 0.2s, fade out last 0.5s
        if elapsed < 0.2 {
            elapsed / 0.2
        } else if elapsed > total - 0.5 {
            ((total - elapsed) / 0.5).max(0.0)
        } else {
            1.0
        }
    }
}

#[derive(Default)]
pub struct ToastManager {
    pub toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, toast: Toast) {
        log::debug!("[Toast] {:?}: {}", toast.toast_type, toast.message);
        self.toasts.push(toast);
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.show(Toast::new(message, ToastType::Success));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.show(Toast::new(message, ToastType::Error));
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.show(Toast::new(message, ToastType::Info));
    }

    pub fn is_active(&self) -> bool {
        !self.toasts.is_empty()
    }

    /// Render all active toasts and clean up expired ones
    pub fn render(&mut self, ui: &mut egui::Ui) {
        self.toasts.retain(|toast| !toast.is_expired());

        if self.toasts.is_empty() {
            return;
        }

        let screen_rect = ui.ctx().content_rect();

        // Newest at the bottom
        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let y_offset = BOTTOM_OFFSET + (i as f32) * (TOAST_HEIGHT + TOAST_SPACING);
            let pos = Pos2::new(
                screen_rect.center().x - TOAST_WIDTH / 2.0,
                screen_rect.max.y - y_offset - TOAST_HEIGHT,
            );
            let rect = Rect::from_min_size(pos, Vec2::new(TOAST_WIDTH, TOAST_HEIGHT));

            let (bg_color, icon) = match toast.toast_type {
                ToastType::Success => (SUCCESS, "✓"),
                ToastType::Error => (ERROR, "✗"),
                ToastType::Info => (BG_BUTTON_HOVER, "i"),
            };

            let opacity = toast.opacity();
            let bg_with_opacity = Color32::from_rgba_premultiplied(
                (bg_color.r() as f32 * opacity) as u8,
                (bg_color.g() as f32 * opacity) as u8,
                (bg_color.b() as f32 * opacity) as u8,
                (220.0 * opacity) as u8,
            );
            let text_color = Color32::from_rgba_premultiplied(255, 255, 255, (255.0 * opacity) as u8);

            ui.painter().rect_filled(rect, 8.0, bg_with_opacity);
            ui.painter().rect_stroke(
                rect,
                8.0,
                egui::Stroke::new(1.0, Color32::from_rgba_premultiplied(255, 255, 255, (100.0 * opacity) as u8)),
                egui::epaint::StrokeKind::Outside,
            );

            ui.painter().text(
                Pos2::new(rect.min.x + 20.0, rect.center().y),
                Align2::LEFT_CENTER,
                icon,
                FontId::proportional(20.0),
                text_color,
            );

            let text_rect = Rect::from_min_max(Pos2::new(rect.min.x + 45.0, rect.min.y), rect.max);
            ui.painter().text(
                text_rect.center(),
                Align2::CENTER_CENTER,
                &toast.message,
                FontId::proportional(14.0),
                text_color,
            );
        }

        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_queues_by_type() {
        let mut toasts = ToastManager::new();
        toasts.show_success("Welcome back!");
        toasts.show_info("Logged out");
        toasts.show_error("Failed to delete venue");

        let kinds: Vec<_> = toasts.toasts.iter().map(|t| t.toast_type.clone()).collect();
        assert_eq!(kinds, vec![ToastType::Success, ToastType::Info, ToastType::Error]);
        assert!(toasts.is_active());
    }

    #[test]
    fn test_expiry_and_fade() {
        let mut toast = Toast::new("Logged out", ToastType::Info);
        assert!(!toast.is_expired());
        assert!(toast.opacity() <= 1.0);

        toast.created_at = Instant::now() - Duration::from_secs(4);
        assert!(toast.is_expired());
        assert_eq!(toast.opacity(), 0.0);
    }
}
