pub mod availability;
pub mod clipboard;
pub mod config;
pub mod fingerprint;
pub mod formatting;
pub mod http;
pub mod media;
pub mod ownership;
pub mod session_store;
pub mod validation;

#[cfg(test)]
pub mod test_server;

pub use clipboard::{copy_to_clipboard, open_in_browser};
