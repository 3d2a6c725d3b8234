// Reusable UI pieces shared by the screens
pub mod calendar;
pub mod colors;
pub mod confirm_dialog;
pub mod header;
pub mod helpers;
pub mod layout;
pub mod toast;
pub mod venue_card;
