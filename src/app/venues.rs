// Venue browsing, booking and venue management flows
use eframe::egui;
use log::{info, warn};

use crate::api::bookings::{book_stay, fetch_venue_bookings};
use crate::api::venues::{create_venue, delete_venue, fetch_venue, search_venues, update_venue, VenueIncludes};
use crate::app::holidaze_app::{HolidazeApp, PendingDelete, Screen};
use crate::app::task::{take_finished, Task};
use crate::error::AppError;
use crate::models::Venue;
use crate::screens::venue_detail::{VenueDetailState, BOOKING_SUCCESS_MESSAGE};
use crate::screens::venue_form::{FormAccess, VenueFormState, VenueGate};
use crate::ui_components::confirm_dialog::{render_confirm_dialog, DialogChoice};
use crate::ui_components::helpers::PageChange;
use crate::utils::availability::booked_days;
use crate::utils::ownership::{confirm_venue_manager, is_same_person, verify_ownership, OwnershipVerdict};
use crate::utils::validation::{validate_venue, ValidationErrors};

impl HolidazeApp {
    // ====================================
    // HOME
    // ====================================

    pub(crate) fn open_home(&mut self) {
        self.fetch_venues();
    }

    pub fn fetch_venues(&mut self) {
        let config = self.config.clone();
        let query = self.home.active_query.clone();
        let page = self.home.page.max(1);

        self.home.error = None;
        self.home.task = Some(Task::spawn(&self.ctx, "venue list", move || async move {
            search_venues(&config, &query, page).await
        }));
    }

    pub fn submit_search(&mut self) {
        self.home.active_query = self.home.query.trim().to_string();
        self.home.page = 1;
        info!("[Venues] Searching for {:?}", self.home.active_query);
        self.fetch_venues();
    }

    pub fn clear_search(&mut self) {
        self.home.query.clear();
        self.submit_search();
    }

    pub fn change_page(&mut self, change: PageChange) {
        let meta = &self.home.meta;
        self.home.page = match change {
            PageChange::Previous => meta.previous_page.unwrap_or(self.home.page.saturating_sub(1)).max(1),
            PageChange::Next => meta.next_page.unwrap_or(self.home.page + 1),
        };
        self.fetch_venues();
    }

    pub(crate) fn check_home_updates(&mut self) {
        match take_finished(&mut self.home.task) {
            Some(Ok(paged)) => {
                self.home.venues = paged.items;
                self.home.meta = paged.meta;
            }
            Some(Err(e)) => {
                warn!("[Venues] Listing failed: {}", e);
                self.home.error = Some(e.to_string());
            }
            None => {}
        }
    }

    // ====================================
    // VENUE DETAIL + BOOKING
    // ====================================

    pub(crate) fn open_venue(&mut self, id: &str) {
        self.venue_detail = VenueDetailState::new(id);

        let config = self.config.clone();
        let token = self.app_state.token();
        let id = id.to_string();
        self.venue_detail.task = Some(Task::spawn(&self.ctx, "venue detail", move || async move {
            fetch_venue(&config, token.as_deref(), &id, VenueIncludes::ALL).await
        }));
    }

    /// Signed-in venue manager who owns this venue
    fn manages(&self, venue: &Venue) -> bool {
        match (self.app_state.user(), venue.owner.as_ref()) {
            (Some(user), Some(owner)) => user.venue_manager && is_same_person(owner, &user),
            _ => false,
        }
    }

    pub(crate) fn check_venue_detail(&mut self) {
        match take_finished(&mut self.venue_detail.task) {
            Some(Ok(venue)) => {
                self.venue_detail.booked = booked_days(venue.bookings());
                self.venue_detail.can_manage = self.manages(&venue);
                info!(
                    "[Venues] Opened {} ({} booked days)",
                    venue.name,
                    self.venue_detail.booked.len()
                );
                self.venue_detail.venue = Some(venue);
            }
            Some(Err(e)) if e.is_unauthorized() => self.handle_unauthorized(),
            Some(Err(e)) => {
                warn!("[Venues] Could not load venue {}: {}", self.venue_detail.venue_id, e);
                self.venue_detail.error = Some(if e.is_not_found() {
                    "Venue not found".to_string()
                } else {
                    e.to_string()
                });
            }
            None => {}
        }
    }

    pub fn submit_booking(&mut self) {
        let Some(token) = self.app_state.token() else {
            self.toast_manager.show_error("Please log in to book this venue");
            self.navigate(Screen::Login);
            return;
        };
        let Some(venue) = self.venue_detail.venue.as_ref() else {
            return;
        };

        let config = self.config.clone();
        let venue_id = venue.id.clone();
        let max_guests = venue.max_guests;
        let detail = &mut self.venue_detail;
        let selection = detail.selection.clone();
        let guests = detail.guests;
        let booked = detail.booked.clone();

        detail.booking_error = None;
        detail.booking_success = None;
        detail.booking_task = Some(Task::spawn(&self.ctx, "booking", move || async move {
            book_stay(&config, &token, &venue_id, &selection, guests, max_guests, &booked).await
        }));
    }

    pub(crate) fn check_booking(&mut self) {
        match take_finished(&mut self.venue_detail.booking_task) {
            Some(Ok(booking)) => {
                info!("[Booking] Confirmed booking {}", booking.id);
                let detail = &mut self.venue_detail;
                detail.booking_success = Some(BOOKING_SUCCESS_MESSAGE.to_string());
                detail.selection.clear();
                detail.guests = 1;
                self.toast_manager.show_success(BOOKING_SUCCESS_MESSAGE);
                self.refresh_venue_bookings();
            }
            Some(Err(AppError::Validation(errors))) => {
                self.venue_detail.booking_error = Some(errors.to_string());
            }
            Some(Err(e)) if e.is_unauthorized() => self.handle_unauthorized(),
            Some(Err(e)) => {
                warn!("[Booking] Booking failed: {}", e);
                self.venue_detail.booking_error = Some(e.to_string());
                self.toast_manager.show_error("Booking failed");
            }
            None => {}
        }

        match take_finished(&mut self.venue_detail.refresh_task) {
            Some(Ok(bookings)) => {
                self.venue_detail.booked = booked_days(&bookings);
                if let Some(venue) = self.venue_detail.venue.as_mut() {
                    venue.bookings = Some(bookings);
                }
            }
            Some(Err(e)) => warn!("[Booking] Could not refresh calendar: {}", e),
            None => {}
        }
    }

    fn refresh_venue_bookings(&mut self) {
        let config = self.config.clone();
        let token = self.app_state.token();
        let id = self.venue_detail.venue_id.clone();
        self.venue_detail.refresh_task = Some(Task::spawn(&self.ctx, "calendar refresh", move || async move {
            fetch_venue_bookings(&config, token.as_deref(), &id).await
        }));
    }

    // ====================================
    // CREATE / EDIT
    // ====================================

    pub(crate) fn open_venue_create(&mut self) {
        self.venue_form = VenueFormState::create();
        let Some(session) = self.app_state.session() else {
            return;
        };

        let config = self.config.clone();
        self.venue_form.gate_task = Some(Task::spawn(&self.ctx, "venue manager check", move || async move {
            confirm_venue_manager(&config, &session).await.map(VenueGate::Manager)
        }));
    }

    pub(crate) fn open_venue_edit(&mut self, id: &str) {
        self.venue_form = VenueFormState::edit(id);

        let config = self.config.clone();
        let session = self.app_state.session();
        let id = id.to_string();
        self.venue_form.gate_task = Some(Task::spawn(&self.ctx, "ownership check", move || async move {
            verify_ownership(&config, session.as_ref(), &id).await.map(VenueGate::Ownership)
        }));
    }

    pub(crate) fn check_venue_gate(&mut self) {
        match take_finished(&mut self.venue_form.gate_task) {
            Some(Ok(VenueGate::Manager(user))) => {
                let is_manager = user.venue_manager;
                self.refresh_cached_user(user);
                if is_manager {
                    self.venue_form.access = FormAccess::Granted;
                } else {
                    self.toast_manager.show_error("Only venue managers can create venues");
                    self.navigate(Screen::Profile);
                }
            }
            Some(Ok(VenueGate::Ownership(OwnershipVerdict::Owner(venue)))) => {
                self.venue_form.load_venue(&venue);
                self.venue_form.access = FormAccess::Granted;
            }
            Some(Ok(VenueGate::Ownership(verdict))) => {
                let message = verdict.denial_message().unwrap_or("Access denied");
                self.toast_manager.show_error(message);
                match verdict {
                    OwnershipVerdict::NotAuthenticated => self.navigate(Screen::Login),
                    _ => self.navigate(Screen::Profile),
                }
            }
            Some(Err(e)) if e.is_unauthorized() => self.handle_unauthorized(),
            Some(Err(e)) => {
                warn!("[Venues] Access check failed: {}", e);
                self.venue_form.access = FormAccess::Failed(if e.is_not_found() {
                    "Venue not found".to_string()
                } else {
                    e.to_string()
                });
            }
            None => {}
        }
    }

    pub fn submit_venue_form(&mut self) {
        let Some(token) = self.app_state.token() else {
            self.toast_manager.show_error("You must be logged in to manage venues");
            self.navigate(Screen::Login);
            return;
        };

        let payload = match validate_venue(&self.venue_form.form) {
            Ok(payload) => payload,
            Err(errors) => {
                warn!("[Venues] Form has {} invalid fields", errors.len());
                self.venue_form.errors = errors;
                self.toast_manager.show_error("Please fix the highlighted fields");
                return;
            }
        };
        self.venue_form.errors = ValidationErrors::new();

        let config = self.config.clone();
        let editing = self.venue_form.editing.clone();
        self.venue_form.submit_task = Some(Task::spawn(&self.ctx, "venue save", move || async move {
            match editing {
                Some(id) => update_venue(&config, &token, &id, &payload).await,
                None => create_venue(&config, &token, &payload).await,
            }
        }));
    }

    pub(crate) fn check_venue_form(&mut self) {
        let editing = self.venue_form.editing.is_some();
        match take_finished(&mut self.venue_form.submit_task) {
            Some(Ok(venue)) if editing => {
                self.toast_manager.show_success("Venue updated successfully!");
                info!("[Venues] Updated {}", venue.id);
                self.navigate(Screen::Profile);
            }
            Some(Ok(venue)) => {
                self.toast_manager.show_success("Venue created successfully!");
                info!("[Venues] Created {}", venue.id);
                self.navigate(Screen::VenueDetail(venue.id));
            }
            Some(Err(e)) => {
                let context = if editing { "Failed to update venue" } else { "Failed to create venue" };
                self.report_error(context, &e);
            }
            None => {}
        }
    }

    // ====================================
    // DELETE
    // ====================================

    pub fn request_delete(&mut self, venue_id: &str, venue_name: &str) {
        self.pending_delete = Some(PendingDelete {
            venue_id: venue_id.to_string(),
            venue_name: venue_name.to_string(),
            task: None,
        });
    }

    pub(crate) fn confirm_delete(&mut self) {
        let Some(token) = self.app_state.token() else {
            self.pending_delete = None;
            self.toast_manager.show_error("You must be logged in to delete venues");
            return;
        };
        let Some(pending) = self.pending_delete.as_mut() else {
            return;
        };

        let config = self.config.clone();
        let id = pending.venue_id.clone();
        pending.task = Some(Task::spawn(&self.ctx, "venue delete", move || async move {
            delete_venue(&config, &token, &id).await
        }));
    }

    pub(crate) fn check_venue_delete(&mut self) {
        let Some(pending) = self.pending_delete.as_mut() else {
            return;
        };
        match take_finished(&mut pending.task) {
            Some(Ok(())) => {
                info!("[Venues] Deleted {}", pending.venue_id);
                self.pending_delete = None;
                self.toast_manager.show_success("Venue deleted successfully");
                self.navigate(Screen::Profile);
            }
            Some(Err(e)) => {
                self.pending_delete = None;
                self.report_error("Failed to delete venue", &e);
            }
            None => {}
        }
    }

    pub(crate) fn render_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending_delete.as_ref() else {
            return;
        };
        let message = format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            pending.venue_name
        );

        match render_confirm_dialog(ctx, "Delete venue", &message, "Delete", pending.task.is_some()) {
            Some(DialogChoice::Confirm) => self.confirm_delete(),
            Some(DialogChoice::Cancel) => self.pending_delete = None,
            None => {}
        }
    }
}
