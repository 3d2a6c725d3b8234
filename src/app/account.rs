// Login, registration and profile flows
use log::{info, warn};

use crate::api::auth::{register, sign_in};
use crate::api::profiles::{fetch_dashboard, update_profile_media};
use crate::app::holidaze_app::{HolidazeApp, Screen};
use crate::app::task::{take_finished, Task};
use crate::error::AppError;
use crate::models::{CachedUser, LoginRequest};
use crate::screens::edit_images::EditImagesState;
use crate::screens::profile::ProfileState;
use crate::screens::register::RegisterOutcome;
use crate::utils::validation::{validate_login, validate_profile_images, validate_register, ProfileImagesForm, ValidationErrors};

impl HolidazeApp {
    // ====================================
    // LOGIN / REGISTER
    // ====================================

    pub fn submit_login(&mut self) {
        let credentials = match validate_login(&self.login.form) {
            Ok(credentials) => credentials,
            Err(errors) => {
                self.login.errors = errors;
                return;
            }
        };
        self.login.errors = ValidationErrors::new();
        self.login.error = None;

        let config = self.config.clone();
        self.login.task = Some(Task::spawn(&self.ctx, "login", move || async move {
            sign_in(&config, &credentials).await
        }));
    }

    pub(crate) fn check_login(&mut self) {
        match take_finished(&mut self.login.task) {
            Some(Ok(session)) => {
                info!("[Auth] {} signed in", session.user.name);
                self.start_session(session);
                self.toast_manager.show_success("Welcome back!");
                self.navigate(Screen::Profile);
            }
            Some(Err(e)) => {
                warn!("[Auth] Login failed: {}", e);
                self.login.error = Some(e.to_string());
            }
            None => {}
        }
    }

    pub fn submit_register(&mut self) {
        let account = match validate_register(&self.register.form) {
            Ok(account) => account,
            Err(errors) => {
                self.register.errors = errors;
                return;
            }
        };
        self.register.errors = ValidationErrors::new();
        self.register.error = None;

        let config = self.config.clone();
        self.register.task = Some(Task::spawn(&self.ctx, "register", move || async move {
            let profile = register(&config, &account).await?;
            let credentials = LoginRequest {
                email: account.email.clone(),
                password: account.password.clone(),
            };
            match sign_in(&config, &credentials).await {
                Ok(session) => Ok::<_, AppError>(RegisterOutcome::SignedIn(session)),
                Err(e) => {
                    warn!("[Auth] Automatic login after registering {} failed: {}", profile.name, e);
                    Ok(RegisterOutcome::RegisteredOnly { email: profile.email })
                }
            }
        }));
    }

    pub(crate) fn check_register(&mut self) {
        match take_finished(&mut self.register.task) {
            Some(Ok(RegisterOutcome::SignedIn(session))) => {
                self.start_session(session);
                self.toast_manager.show_success("Registration successful!");
                self.navigate(Screen::Profile);
            }
            Some(Ok(RegisterOutcome::RegisteredOnly { email })) => {
                self.toast_manager.show_success("Registration successful!");
                self.toast_manager.show_info("Please log in with your new account");
                self.navigate(Screen::Login);
                self.login.form.email = email;
            }
            Some(Err(e)) => {
                warn!("[Auth] Registration failed: {}", e);
                self.register.error = Some(e.to_string());
                self.toast_manager.show_error("Registration failed");
            }
            None => {}
        }
    }

    // ====================================
    // PROFILE
    // ====================================

    pub(crate) fn open_profile(&mut self) {
        let Some(session) = self.app_state.session() else {
            return;
        };
        let show_past = self.profile.show_past;
        self.profile = ProfileState { show_past, ..Default::default() };

        let config = self.config.clone();
        self.profile.task = Some(Task::spawn(&self.ctx, "profile dashboard", move || async move {
            fetch_dashboard(&config, &session.token, &session.user.name).await
        }));
    }

    pub(crate) fn check_profile(&mut self) {
        match take_finished(&mut self.profile.task) {
            Some(Ok(dashboard)) => {
                self.refresh_cached_user(CachedUser::from(&dashboard.profile));
                self.profile.dashboard = Some(dashboard);
            }
            Some(Err(e)) if e.is_unauthorized() => self.handle_unauthorized(),
            Some(Err(e)) => {
                warn!("[Profile] Could not load profile: {}", e);
                self.profile.error = Some(e.to_string());
            }
            None => {}
        }
    }

    // ====================================
    // PROFILE IMAGES
    // ====================================

    pub(crate) fn open_edit_images(&mut self) {
        let user = self.app_state.user().unwrap_or_default();
        self.edit_images = EditImagesState {
            form: ProfileImagesForm::from_media(user.avatar.as_ref(), user.banner.as_ref()),
            ..Default::default()
        };
    }

    pub fn submit_profile_images(&mut self) {
        let Some(session) = self.app_state.session() else {
            self.navigate(Screen::Login);
            return;
        };

        let update = match validate_profile_images(&self.edit_images.form, &session.user.name) {
            Ok(update) => update,
            Err(errors) => {
                self.edit_images.errors = errors;
                return;
            }
        };
        self.edit_images.errors = ValidationErrors::new();
        self.edit_images.error = None;

        let config = self.config.clone();
        self.edit_images.task = Some(Task::spawn(&self.ctx, "profile images", move || async move {
            update_profile_media(&config, &session.token, &session.user.name, &update).await
        }));
    }

    pub(crate) fn check_edit_images(&mut self) {
        match take_finished(&mut self.edit_images.task) {
            Some(Ok(profile)) => {
                let mut user = self.app_state.user().unwrap_or_default();
                user.avatar = profile.avatar;
                user.banner = profile.banner;
                self.refresh_cached_user(user);
                self.media.retry_failed();

                self.toast_manager.show_success("Profile images updated successfully!");
                self.navigate(Screen::Profile);
            }
            Some(Err(e)) if e.is_unauthorized() => self.handle_unauthorized(),
            Some(Err(e)) => {
                warn!("[Profile] Image update failed: {}", e);
                self.edit_images.error = Some(e.to_string());
            }
            None => {}
        }
    }
}
