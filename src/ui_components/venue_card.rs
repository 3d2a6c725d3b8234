use eframe::egui::{self, Color32, Sense, Vec2};

use crate::models::Venue;
use crate::ui_components::colors::*;
use crate::utils::formatting::{format_price, truncate_text};
use crate::utils::media::MediaCache;

pub const CARD_SIZE: f32 = 240.0;
const CARD_PADDING: f32 = 8.0;
const IMAGE_HEIGHT: f32 = 160.0;
const METADATA_HEIGHT: f32 = 70.0;

/// Cover image (or placeholder) inside `rect`
pub fn paint_cover(ui: &egui::Ui, media: &mut MediaCache, url: Option<&str>, rect: egui::Rect) {
    let ctx = ui.ctx().clone();
    let texture = url.and_then(|url| media.texture(&ctx, url));

    if let Some(texture) = texture {
        ui.painter().image(
            texture.id(),
            rect,
            cover_uv(texture.size_vec2(), rect.size()),
            Color32::WHITE,
        );
    } else if url.is_some_and(|u| !media.is_failed(u)) {
        // Skeleton pulse while the download runs
        let time = ui.input(|i| i.time) as f32;
        let pulse = ((time * 1.8).sin() * 0.5 + 0.5) * 12.0;
        let shade = (SKELETON_BASE.r() as f32 + pulse) as u8;
        ui.painter().rect_filled(rect, 6.0, Color32::from_rgb(shade, shade, shade + 5));
        ui.ctx().request_repaint();
    } else {
        ui.painter().rect_filled(rect, 6.0, MID_GRAY);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No image",
            egui::FontId::proportional(12.0),
            TEXT_TERTIARY,
        );
    }
}

/// UV rect that crops the image to fill the target without stretching
pub fn cover_uv(image: Vec2, target: Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_ratio = image.x / image.y;
    let target_ratio = target.x / target.y;

    if image_ratio > target_ratio {
        let visible = target_ratio / image_ratio;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let visible = image_ratio / target_ratio;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, inset), egui::pos2(1.0, 1.0 - inset))
    }
}

/// Grid card: cover, name, location, price per night. Returns true when clicked.
pub fn render_venue_card(ui: &mut egui::Ui, media: &mut MediaCache, venue: &Venue) -> bool {
    let (rect, response) = ui.allocate_exact_size(Vec2::new(CARD_SIZE, IMAGE_HEIGHT + METADATA_HEIGHT), Sense::click());

    ui.painter().rect_filled(rect, 8.0, if response.hovered() { BG_HOVER } else { BG_CARD });
    if response.hovered() {
        ui.painter().rect_stroke(
            rect,
            8.0,
            egui::Stroke::new(1.5, ACCENT),
            egui::epaint::StrokeKind::Outside,
        );
    }

    let image_rect = egui::Rect::from_min_size(
        rect.min + Vec2::splat(CARD_PADDING),
        Vec2::new(CARD_SIZE - CARD_PADDING * 2.0, IMAGE_HEIGHT - CARD_PADDING),
    );
    paint_cover(ui, media, venue.cover_image().map(|m| m.url.as_str()), image_rect);

    // Rating badge on the image
    if venue.rating > 0.0 {
        let badge_rect = egui::Rect::from_min_size(image_rect.right_top() + Vec2::new(-52.0, 6.0), Vec2::new(46.0, 20.0));
        ui.painter().rect_filled(badge_rect, 10.0, OVERLAY_BADGE);
        ui.painter().text(
            badge_rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("★ {:.1}", venue.rating),
            egui::FontId::proportional(11.0),
            WARNING,
        );
    }

    let text_x = rect.min.x + CARD_PADDING + 2.0;
    let metadata_y = image_rect.max.y + 8.0;
    ui.painter().text(
        egui::pos2(text_x, metadata_y),
        egui::Align2::LEFT_TOP,
        truncate_text(&venue.name, 28),
        egui::FontId::proportional(14.0),
        TEXT_PRIMARY,
    );
    ui.painter().text(
        egui::pos2(text_x, metadata_y + 20.0),
        egui::Align2::LEFT_TOP,
        truncate_text(&venue.location.short_label(), 32),
        egui::FontId::proportional(11.0),
        TEXT_SECONDARY,
    );
    ui.painter().text(
        egui::pos2(text_x, metadata_y + 38.0),
        egui::Align2::LEFT_TOP,
        format!("{} / night  ·  up to {} guests", format_price(venue.price), venue.max_guests),
        egui::FontId::proportional(12.0),
        ACCENT_HOVER,
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_uv_crops_wide_images() {
        let uv = cover_uv(Vec2::new(400.0, 100.0), Vec2::new(200.0, 100.0));
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!(uv.min.y, 0.0);
    }

    #[test]
    fn test_cover_uv_crops_tall_images() {
        let uv = cover_uv(Vec2::new(100.0, 200.0), Vec2::new(100.0, 100.0));
        assert_eq!(uv.min.x, 0.0);
        assert!((uv.min.y - 0.25).abs() < 1e-6);
        assert_eq!(cover_uv(Vec2::ZERO, Vec2::new(1.0, 1.0)).max, egui::pos2(1.0, 1.0));
    }
}
