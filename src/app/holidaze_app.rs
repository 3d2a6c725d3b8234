use eframe::egui;
use log::{error, info, warn};

use crate::api::profiles::{fetch_profile, ProfileIncludes};
use crate::app::task::{take_finished, Task};
use crate::app_state::AppState;
use crate::error::AppError;
use crate::models::CachedUser;
use crate::screens::edit_images::EditImagesState;
use crate::screens::home::HomeState;
use crate::screens::login::LoginState;
use crate::screens::profile::ProfileState;
use crate::screens::register::RegisterState;
use crate::screens::venue_detail::VenueDetailState;
use crate::screens::venue_form::VenueFormState;
use crate::ui_components::colors::*;
use crate::ui_components::toast::ToastManager;
use crate::utils::config::ApiConfig;
use crate::utils::media::MediaCache;
use crate::utils::session_store::{Session, SessionStore};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home,
    Login,
    Register,
    VenueDetail(String),
    VenueEdit(String),
    VenueCreate,
    Profile,
    EditImages,
}

impl Screen {
    /// Screens that need a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Screen::VenueEdit(_) | Screen::VenueCreate | Screen::Profile | Screen::EditImages
        )
    }
}

/// Venue waiting on the delete confirmation dialog
pub struct PendingDelete {
    pub venue_id: String,
    pub venue_name: String,
    pub task: Option<Task<()>>,
}

pub struct HolidazeApp {
    pub ctx: egui::Context,
    pub config: ApiConfig,
    pub session_store: SessionStore,
    pub app_state: AppState,
    pub screen: Screen,

    pub toast_manager: ToastManager,
    pub media: MediaCache,

    // Per-screen state
    pub home: HomeState,
    pub login: LoginState,
    pub register: RegisterState,
    pub venue_detail: VenueDetailState,
    pub venue_form: VenueFormState,
    pub profile: ProfileState,
    pub edit_images: EditImagesState,

    pub pending_delete: Option<PendingDelete>,
    pub session_sync: Option<Task<CachedUser>>,
}

impl HolidazeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ApiConfig) -> Self {
        Self::with_parts(cc.egui_ctx.clone(), config, SessionStore::new(), MediaCache::new())
    }

    pub fn with_parts(ctx: egui::Context, config: ApiConfig, session_store: SessionStore, media: MediaCache) -> Self {
        let session = session_store.load();
        match &session {
            Some(s) => info!("[Session] Restored session for {}", s.user.name),
            None => info!("[Session] No stored session"),
        }

        let mut app = Self {
            ctx,
            config,
            session_store,
            app_state: AppState::with_session(session),
            screen: Screen::Home,
            toast_manager: ToastManager::new(),
            media,
            home: HomeState::default(),
            login: LoginState::default(),
            register: RegisterState::default(),
            venue_detail: VenueDetailState::default(),
            venue_form: VenueFormState::default(),
            profile: ProfileState::default(),
            edit_images: EditImagesState::default(),
            pending_delete: None,
            session_sync: None,
        };

        app.resync_if_stale();
        app.navigate(Screen::Home);
        app
    }

    pub fn navigate(&mut self, screen: Screen) {
        if screen.requires_session() && !self.app_state.is_authenticated() {
            warn!("[Nav] {:?} needs a session, redirecting to login", screen);
            self.toast_manager.show_error("Please log in to continue");
            self.navigate(Screen::Login);
            return;
        }

        info!("[Nav] {:?}", screen);
        self.screen = screen.clone();

        match screen {
            Screen::Home => self.open_home(),
            Screen::Login => self.login = LoginState::default(),
            Screen::Register => self.register = RegisterState::default(),
            Screen::VenueDetail(id) => self.open_venue(&id),
            Screen::VenueEdit(id) => self.open_venue_edit(&id),
            Screen::VenueCreate => self.open_venue_create(),
            Screen::Profile => self.open_profile(),
            Screen::EditImages => self.open_edit_images(),
        }
    }

    // ====================================
    // SESSION
    // ====================================

    /// Persist a fresh session and publish it to every screen
    pub fn start_session(&mut self, session: Session) {
        if let Err(e) = self.session_store.save(&session) {
            error!("[Session] Could not persist session: {}", e);
            self.toast_manager.show_error("Signed in, but the session could not be saved");
        }
        self.app_state.set_session(session);
    }

    /// Replace the cached profile in both the store and the shared state
    pub fn refresh_cached_user(&mut self, user: CachedUser) {
        if let Err(e) = self.session_store.update_user(user.clone()) {
            warn!("[Session] Could not update cached profile: {}", e);
        }
        self.app_state.set_user(user);
    }

    fn end_session(&mut self) {
        if let Err(e) = self.session_store.clear() {
            error!("[Session] Could not clear stored session: {}", e);
        }
        self.app_state.clear();

        self.profile = ProfileState::default();
        self.edit_images = EditImagesState::default();
        self.venue_form = VenueFormState::default();
        self.venue_detail.can_manage = false;
        self.pending_delete = None;
        self.session_sync = None;
    }

    pub fn logout(&mut self) {
        self.end_session();
        info!("[Auth] Logged out");
        self.toast_manager.show_info("Logged out");
        self.navigate(Screen::Home);
    }

    /// The API rejected the token: drop the session and ask for a new login
    pub fn handle_unauthorized(&mut self) {
        warn!("[Session] Token rejected by the API, signing out");
        self.end_session();
        self.toast_manager.show_error("Your session has expired. Please log in again.");
        self.navigate(Screen::Login);
    }

    /// Toast for a failed request; a 401 ends the session instead
    pub fn report_error(&mut self, context: &str, err: &AppError) {
        if err.is_unauthorized() {
            self.handle_unauthorized();
        } else {
            warn!("[App] {}: {}", context, err);
            self.toast_manager.show_error(format!("{}: {}", context, err));
        }
    }

    fn resync_if_stale(&mut self) {
        let Some(session) = self.app_state.session() else {
            return;
        };
        if !session.is_stale() || self.session_sync.is_some() {
            return;
        }

        info!("[Session] Cached profile for {} is stale, resyncing", session.user.name);
        let config = self.config.clone();
        self.session_sync = Some(Task::spawn(&self.ctx, "session resync", move || async move {
            let profile = fetch_profile(&config, &session.token, &session.user.name, ProfileIncludes::NONE).await?;
            Ok::<_, AppError>(CachedUser::from(&profile))
        }));
    }

    fn check_session_sync(&mut self) {
        match take_finished(&mut self.session_sync) {
            Some(Ok(user)) => {
                info!("[Session] Profile resynced for {}", user.name);
                self.refresh_cached_user(user);
            }
            Some(Err(e)) if e.is_unauthorized() => self.handle_unauthorized(),
            Some(Err(e)) => warn!("[Session] Resync failed, keeping cached profile: {}", e),
            None => {}
        }
    }

    // ====================================
    // FRAME
    // ====================================

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let (home, profile, search) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::H),
                i.modifiers.ctrl && i.key_pressed(egui::Key::P),
                i.modifiers.ctrl && i.key_pressed(egui::Key::F),
            )
        });

        if home {
            self.navigate(Screen::Home);
        }
        if profile {
            if self.app_state.is_authenticated() {
                self.navigate(Screen::Profile);
            } else {
                self.navigate(Screen::Login);
            }
        }
        if search {
            if self.screen != Screen::Home {
                self.navigate(Screen::Home);
            }
            self.home.focus_search = true;
        }
    }

    fn check_background_tasks(&mut self) {
        self.check_session_sync();
        self.check_home_updates();
        self.check_login();
        self.check_register();
        self.check_venue_detail();
        self.check_booking();
        self.check_venue_gate();
        self.check_venue_form();
        self.check_venue_delete();
        self.check_profile();
        self.check_edit_images();
    }
}

impl eframe::App for HolidazeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(TEXT_PRIMARY);
        visuals.panel_fill = BG_CARD;
        visuals.window_fill = BG_CARD;
        visuals.extreme_bg_color = BG_MAIN;
        ctx.set_visuals(visuals);

        self.handle_keyboard_shortcuts(ctx);

        self.media.poll(ctx);
        self.check_background_tasks();

        crate::ui_components::layout::render_with_layout(self, ctx);
        self.render_delete_dialog(ctx);

        // Toasts on top of everything
        egui::Area::new(egui::Id::new("toast_area"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::Vec2::ZERO)
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                self.toast_manager.render(ui);
            });

        if self.toast_manager.is_active() || self.media.is_loading() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_components::header::{nav_items, NavTarget};
    use crate::screens::venue_detail::BOOKING_SUCCESS_MESSAGE;
    use crate::ui_components::toast::ToastType;
    use crate::utils::availability::{is_range_available, to_api_timestamp};
    use crate::utils::test_server::{envelope, error_body, FakeApi, Route};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn test_app(api: &FakeApi, dir: &tempfile::TempDir) -> HolidazeApp {
        HolidazeApp::with_parts(
            egui::Context::default(),
            api.config(),
            SessionStore::with_path(dir.path().join("session.db")),
            MediaCache::with_dir(dir.path().join("media")),
        )
    }

    fn empty_list() -> Route {
        Route::get("/holidaze/venues", 200, envelope(json!([])))
    }

    fn manager_session() -> Session {
        Session::new(
            "tok",
            CachedUser {
                name: "kari".into(),
                email: "kari@stud.noroff.no".into(),
                venue_manager: true,
                ..Default::default()
            },
        )
    }

    fn pump_until(app: &mut HolidazeApp, done: impl Fn(&HolidazeApp) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) {
            assert!(Instant::now() < deadline, "background work did not finish");
            app.check_background_tasks();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_logout_clears_store_and_navigation() {
        let api = FakeApi::start(vec![empty_list()]);
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.db"));
        store.save(&manager_session()).unwrap();

        let mut app = test_app(&api, &dir);
        assert!(app.app_state.is_authenticated());
        assert!(nav_items(&app.app_state).contains(&NavTarget::Logout));

        app.logout();

        assert!(!app.app_state.is_authenticated());
        assert!(store.load().is_none());
        assert_eq!(app.screen, Screen::Home);
        let items = nav_items(&app.app_state);
        assert!(items.contains(&NavTarget::Login));
        assert!(!items.contains(&NavTarget::Profile));
        assert_eq!(app.toast_manager.toasts.last().unwrap().message, "Logged out");
    }

    #[test]
    fn test_protected_screen_redirects_to_login() {
        let api = FakeApi::start(vec![empty_list()]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&api, &dir);

        app.navigate(Screen::Profile);
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_login_stores_session_and_opens_profile() {
        let api = FakeApi::start(vec![
            empty_list(),
            Route::post(
                "/auth/login",
                200,
                envelope(json!({"name": "kari", "email": "kari@stud.noroff.no", "accessToken": "jwt"})),
            ),
            Route::get(
                "/holidaze/profiles/kari",
                200,
                envelope(json!({"name": "kari", "email": "kari@stud.noroff.no", "venueManager": true})),
            ),
            Route::get("/holidaze/profiles/kari/bookings?_venue=true", 200, envelope(json!([]))),
            Route::get("/holidaze/profiles/kari/venues", 200, envelope(json!([]))),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&api, &dir);

        app.navigate(Screen::Login);
        app.login.form.email = "kari@stud.noroff.no".into();
        app.login.form.password = "secret123".into();
        app.submit_login();
        pump_until(&mut app, |app| app.screen == Screen::Profile);

        assert_eq!(app.app_state.token().as_deref(), Some("jwt"));
        assert_eq!(app.session_store.load().unwrap().token, "jwt");
        assert_eq!(app.toast_manager.toasts.last().unwrap().message, "Welcome back!");
    }

    #[test]
    fn test_unauthorized_response_ends_session() {
        let api = FakeApi::start(vec![
            empty_list(),
            Route::get("/holidaze/profiles/kari", 401, error_body("Invalid token")),
        ]);
        let dir = tempfile::tempdir().unwrap();
        SessionStore::with_path(dir.path().join("session.db")).save(&manager_session()).unwrap();
        let mut app = test_app(&api, &dir);

        app.navigate(Screen::Profile);
        pump_until(&mut app, |app| app.screen == Screen::Login);

        assert!(!app.app_state.is_authenticated());
        assert!(app.session_store.load().is_none());
    }

    #[test]
    fn test_stale_session_is_resynced_at_startup() {
        let api = FakeApi::start(vec![
            empty_list(),
            Route::get(
                "/holidaze/profiles/kari",
                200,
                envelope(json!({"name": "kari", "email": "kari@stud.noroff.no", "venueManager": false})),
            ),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut stale = manager_session();
        stale.synced_at -= 3600;
        SessionStore::with_path(dir.path().join("session.db")).save(&stale).unwrap();

        let mut app = test_app(&api, &dir);
        assert!(app.session_sync.is_some());
        pump_until(&mut app, |app| app.session_sync.is_none());

        assert!(!app.app_state.is_venue_manager());
        let stored = app.session_store.load().unwrap();
        assert!(!stored.user.venue_manager);
        assert!(!stored.is_stale());
    }

    fn signed_in_app(api: &FakeApi, dir: &tempfile::TempDir) -> HolidazeApp {
        SessionStore::with_path(dir.path().join("session.db")).save(&manager_session()).unwrap();
        test_app(api, dir)
    }

    #[test]
    fn test_failed_auto_login_prefills_login_form() {
        let api = FakeApi::start(vec![
            empty_list(),
            Route::post(
                "/auth/register",
                201,
                envelope(json!({"name": "kari_n", "email": "kari@stud.noroff.no", "venueManager": false})),
            ),
            Route::post("/auth/login", 401, error_body("Invalid email or password")),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&api, &dir);

        app.navigate(Screen::Register);
        app.register.form.name = "kari_n".into();
        app.register.form.email = "kari@stud.noroff.no".into();
        app.register.form.password = "secret123".into();
        app.submit_register();
        pump_until(&mut app, |app| app.screen == Screen::Login);

        assert!(!app.app_state.is_authenticated());
        assert!(app.session_store.load().is_none());
        assert_eq!(app.login.form.email, "kari@stud.noroff.no");
        let last = app.toast_manager.toasts.last().unwrap();
        assert_eq!(last.message, "Please log in with your new account");
        assert_eq!(last.toast_type, ToastType::Info);
    }

    #[test]
    fn test_booking_refreshes_calendar() {
        let day = |d| NaiveDate::from_ymd_opt(2030, 8, d).unwrap();
        let api = FakeApi::start(vec![
            empty_list(),
            Route::get(
                "/holidaze/venues/v1?_owner=true&_bookings=true",
                200,
                envelope(json!({"id": "v1", "name": "Cabin", "price": 100, "maxGuests": 4, "bookings": []})),
            ),
            Route::post(
                "/holidaze/bookings",
                201,
                envelope(json!({"id": "b1", "dateFrom": to_api_timestamp(day(10)),
                                "dateTo": to_api_timestamp(day(12)), "guests": 2})),
            ),
            Route::get(
                "/holidaze/venues/v1?_bookings=true",
                200,
                envelope(json!({"id": "v1", "name": "Cabin", "bookings": [
                    {"id": "b1", "dateFrom": to_api_timestamp(day(10)), "dateTo": to_api_timestamp(day(12)), "guests": 2}
                ]})),
            ),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_in_app(&api, &dir);

        app.navigate(Screen::VenueDetail("v1".into()));
        pump_until(&mut app, |app| app.venue_detail.venue.is_some());
        assert!(app.venue_detail.booked.is_empty());

        let booked = app.venue_detail.booked.clone();
        app.venue_detail.selection.click(day(10), &booked);
        app.venue_detail.selection.click(day(12), &booked);
        app.venue_detail.guests = 2;
        app.submit_booking();
        pump_until(&mut app, |app| !app.venue_detail.booked.is_empty());

        let detail = &app.venue_detail;
        assert_eq!(detail.booking_success.as_deref(), Some(BOOKING_SUCCESS_MESSAGE));
        assert!(!detail.selection.is_complete());
        assert_eq!(detail.booked.len(), 3);
        assert!(!is_range_available(day(12), day(14), &detail.booked));
        assert_eq!(detail.venue.as_ref().unwrap().bookings().len(), 1);
        assert_eq!(api.requests().last().unwrap().url, "/holidaze/venues/v1?_bookings=true");
    }

    #[test]
    fn test_confirmed_delete_opens_profile() {
        let api = FakeApi::start(vec![empty_list(), Route::delete("/holidaze/venues/v1", 204)]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_in_app(&api, &dir);

        app.request_delete("v1", "Cabin");
        app.confirm_delete();
        pump_until(&mut app, |app| app.pending_delete.is_none());

        assert_eq!(app.screen, Screen::Profile);
        assert!(app
            .toast_manager
            .toasts
            .iter()
            .any(|t| t.message == "Venue deleted successfully"));
    }

    #[test]
    fn test_failed_delete_closes_dialog() {
        let api = FakeApi::start(vec![
            empty_list(),
            Route::new("DELETE", "/holidaze/venues/v1", 500, error_body("Something went wrong")),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_in_app(&api, &dir);

        app.request_delete("v1", "Cabin");
        app.confirm_delete();
        pump_until(&mut app, |app| app.pending_delete.is_none());

        assert_eq!(app.screen, Screen::Home);
        let last = app.toast_manager.toasts.last().unwrap();
        assert_eq!(last.toast_type, ToastType::Error);
        assert!(last.message.starts_with("Failed to delete venue"));
    }

    #[test]
    fn test_edit_refused_for_other_owner_opens_profile() {
        let api = FakeApi::start(vec![
            empty_list(),
            Route::get(
                "/holidaze/venues/v1?_owner=true",
                200,
                envelope(json!({"id": "v1", "name": "Cabin", "owner": {"name": "ola", "email": "ola@stud.noroff.no"}})),
            ),
            Route::get("/holidaze/venues/v1", 200, envelope(json!({"id": "v1", "name": "Cabin"}))),
            Route::get("/holidaze/profiles/kari?_venues=true", 200, envelope(json!({"name": "kari", "venues": []}))),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_in_app(&api, &dir);

        app.navigate(Screen::VenueEdit("v1".into()));
        pump_until(&mut app, |app| app.screen != Screen::VenueEdit("v1".into()));

        assert_eq!(app.screen, Screen::Profile);
        assert!(app
            .toast_manager
            .toasts
            .iter()
            .any(|t| t.message == "You can only edit your own venues"));
    }
}
