#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
mod api;
mod app;
mod app_state;
mod error;
mod models;
mod screens;
mod ui_components;
mod utils;

use eframe::egui;
use app::HolidazeApp;
use utils::config::ApiConfig;

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "Holidaze";
const APP_DESCRIPTION: &str = "Venue booking";

const APP_WIDTH: f32 = 1280.0;
const APP_HEIGHT: f32 = 860.0;
const MIN_WIDTH: f32 = 960.0;
const MIN_HEIGHT: f32 = 640.0;

fn main() -> Result<(), eframe::Error> {
    // RUST_LOG=debug for request URLs and payload sizes
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("arboard", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[Main] Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("[Main] Using API at {}", config.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} v{} - {}", APP_NAME, APP_VERSION, APP_DESCRIPTION))
            .with_inner_size([APP_WIDTH, APP_HEIGHT])
            .with_min_inner_size([MIN_WIDTH, MIN_HEIGHT])
            .with_icon(load_icon()),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        options,
        Box::new(|cc| Ok(Box::new(HolidazeApp::new(cc, config)))),
    )
}

/// App icon - coral gradient with a white house
fn load_icon() -> egui::IconData {
    let (icon_width, icon_height) = (64usize, 64usize);
    let mut pixels = vec![0u8; icon_width * icon_height * 4];

    for y in 0..icon_height {
        for x in 0..icon_width {
            let idx = (y * icon_width + x) * 4;
            let brightness = 1.0 - (y as f32 / icon_height as f32) * 0.3;

            pixels[idx] = (255.0 * brightness) as u8;
            pixels[idx + 1] = (90.0 * brightness) as u8;
            pixels[idx + 2] = (95.0 * brightness) as u8;
            pixels[idx + 3] = 255;
        }
    }

    let center_x = icon_width as i32 / 2;
    let mut paint = |x: i32, y: i32| {
        if (0..icon_width as i32).contains(&x) && (0..icon_height as i32).contains(&y) {
            let idx = (y as usize * icon_width + x as usize) * 4;
            pixels[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
    };

    // Roof
    for y in 14..32 {
        let half = y - 14;
        for x in (center_x - half)..=(center_x + half) {
            paint(x, y);
        }
    }
    // Walls with a door gap
    for y in 32..50 {
        for x in (center_x - 14)..=(center_x + 14) {
            let door = (center_x - 4..=center_x + 4).contains(&x) && y >= 38;
            if !door {
                paint(x, y);
            }
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_width as u32,
        height: icon_height as u32,
    }
}
