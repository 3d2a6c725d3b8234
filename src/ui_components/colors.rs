/// Color palette for Holidaze
/// Dark theme with a coral accent

use eframe::egui::Color32;

// Brand
pub const ACCENT: Color32 = Color32::from_rgb(255, 90, 95);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(255, 122, 126);

// Background colors (from darkest to lightest)
pub const BG_MAIN: Color32 = Color32::from_rgb(16, 16, 16);         // #101010 - Main background
pub const BG_CARD: Color32 = Color32::from_rgb(18, 18, 18);         // #121212 - Cards, panels
pub const BG_HOVER: Color32 = Color32::from_rgb(26, 26, 26);        // #1A1A1A - Hover states
pub const BG_HEADER: Color32 = Color32::from_rgb(25, 25, 25);
pub const BG_BUTTON_HOVER: Color32 = Color32::from_rgb(45, 45, 50);

pub const DARK_GRAY: Color32 = Color32::from_rgb(30, 30, 32);
pub const MID_GRAY: Color32 = Color32::from_rgb(45, 45, 50);
pub const LIGHT_GRAY: Color32 = Color32::from_rgb(160, 160, 160);

// Text colors
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160);
pub const TEXT_TERTIARY: Color32 = Color32::from_rgb(120, 120, 120);

// Skeleton/loading
pub const SKELETON_BASE: Color32 = Color32::from_rgb(55, 55, 60);

// Borders
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(40, 40, 45);

// Calendar days
pub const DAY_BOOKED: Color32 = Color32::from_rgb(70, 30, 32);
pub const DAY_RANGE: Color32 = Color32::from_rgb(110, 45, 48);

// Special states
pub const SUCCESS: Color32 = Color32::from_rgb(76, 175, 80);
pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
pub const WARNING: Color32 = Color32::from_rgb(255, 193, 7);

pub const OVERLAY_DARK: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 150);
pub const OVERLAY_BADGE: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);
