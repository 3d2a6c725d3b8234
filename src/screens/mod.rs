// Screen modules - one per route
pub mod home;
pub mod login;
pub mod register;
pub mod venue_detail;
pub mod venue_form;
pub mod profile;
pub mod edit_images;

// Re-export for convenience
pub use home::render_home_view;
pub use login::render_login_view;
pub use register::render_register_view;
pub use venue_detail::render_venue_detail_view;
pub use venue_form::render_venue_form_view;
pub use profile::render_profile_view;
pub use edit_images::render_edit_images_view;
