pub mod holidaze_app;
pub mod task;

mod account;
mod venues;

pub use holidaze_app::HolidazeApp;
