//! Voice-driven login/registration state machine.
//!
//! Pure over transcribed strings: the host loop listens, feeds each
//! utterance to [`AuthFlow::handle`], and speaks the reply. Voice capture
//! and playback stay outside.
//!
//! Registration is four steps (name, email, username, password), login is
//! two (username, password). "cancel"/"back"/"stop" steps backwards at any
//! point.

use anyhow::Result;

use crate::auth::store::{LoginOutcome, RegisterOutcome, UserStore};
use crate::auth::validate::{validate_email, validate_name, validate_password};
use crate::speech::{match_command, normalize_spoken_email};

const CANCEL_WORDS: [&str; 3] = ["cancel", "back", "stop"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthStage {
    Welcome,
    RegName,
    RegEmail,
    RegUsername,
    RegPassword,
    LoginUsername,
    LoginPassword,
    Home,
}

/// Signal to the host loop beyond the spoken reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    None,
    /// User reached the home stage.
    LoggedIn,
    /// User asked to analyze a video; host should start the pipeline.
    StartAnalysis,
    /// User logged out; flow is back at the welcome stage.
    LoggedOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthReply {
    /// Sentence to speak in response to the utterance.
    pub speech: String,
    pub event: FlowEvent,
}

impl AuthReply {
    fn say(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            event: FlowEvent::None,
        }
    }

    fn with_event(speech: impl Into<String>, event: FlowEvent) -> Self {
        Self {
            speech: speech.into(),
            event,
        }
    }
}

#[derive(Debug, Default)]
struct Pending {
    name: Option<String>,
    email: Option<String>,
    username: Option<String>,
}

/// The login/registration state machine.
#[derive(Debug)]
pub struct AuthFlow {
    stage: AuthStage,
    pending: Pending,
    login_username: Option<String>,
    user_name: Option<String>,
}

impl AuthFlow {
    pub fn new() -> Self {
        Self {
            stage: AuthStage::Welcome,
            pending: Pending::default(),
            login_username: None,
            user_name: None,
        }
    }

    pub fn stage(&self) -> &AuthStage {
        &self.stage
    }

    /// Display name of the logged-in user, once at the home stage.
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// What to speak when (re)entering the current stage.
    pub fn prompt(&self) -> String {
        match &self.stage {
            AuthStage::Welcome => {
                "Welcome to Visionmate. Navigate with clarity, live with freedom. \
                 Say Register to create a new account, or Login to sign in."
                    .to_string()
            }
            AuthStage::RegName => {
                "Step one of four. Say your full name.".to_string()
            }
            AuthStage::RegEmail => {
                "Step two of four. Say your email address slowly. \
                 Say at for the at symbol and dot for period."
                    .to_string()
            }
            AuthStage::RegUsername => {
                "Step three of four. Say your desired username. \
                 Use letters and numbers only. Spaces will be removed."
                    .to_string()
            }
            AuthStage::RegPassword => {
                "Final step, step four of four. Say your password. \
                 It must be at least six characters long."
                    .to_string()
            }
            AuthStage::LoginUsername => {
                "Login process. Step one of two. Please say your username.".to_string()
            }
            AuthStage::LoginPassword => {
                "Step two of two. Please say your password.".to_string()
            }
            AuthStage::Home => {
                let name = self.user_name.as_deref().unwrap_or("User");
                format!(
                    "Welcome {}. Say Analyze Video to process a file, or say Logout to sign out.",
                    name
                )
            }
        }
    }

    /// Advance on one utterance. `None` means silence.
    pub fn handle(&mut self, store: &mut UserStore, heard: Option<&str>) -> Result<AuthReply> {
        let Some(heard) = heard else {
            return Ok(AuthReply::say("No command received. Please try again."));
        };
        let heard = heard.trim();
        if heard.is_empty() {
            return Ok(AuthReply::say("No command received. Please try again."));
        }

        match self.stage.clone() {
            AuthStage::Welcome => Ok(self.handle_welcome(heard)),
            AuthStage::RegName => Ok(self.handle_reg_name(heard)),
            AuthStage::RegEmail => Ok(self.handle_reg_email(heard)),
            AuthStage::RegUsername => Ok(self.handle_reg_username(heard)),
            AuthStage::RegPassword => self.handle_reg_password(store, heard),
            AuthStage::LoginUsername => Ok(self.handle_login_username(heard)),
            AuthStage::LoginPassword => self.handle_login_password(store, heard),
            AuthStage::Home => Ok(self.handle_home(heard)),
        }
    }

    fn handle_welcome(&mut self, heard: &str) -> AuthReply {
        if match_command(heard, &["register", "registration", "sign up", "signup"]) {
            self.stage = AuthStage::RegName;
            self.pending = Pending::default();
            AuthReply::say("Starting registration process.")
        } else if match_command(heard, &["login", "sign in", "signin"]) {
            self.stage = AuthStage::LoginUsername;
            AuthReply::say("Starting login process.")
        } else {
            AuthReply::say("Sorry, I couldn't understand. Please say Register or Login clearly.")
        }
    }

    fn handle_reg_name(&mut self, heard: &str) -> AuthReply {
        if match_command(heard, &CANCEL_WORDS) {
            self.stage = AuthStage::Welcome;
            return AuthReply::say("Cancelling registration. Returning to main menu.");
        }
        if !validate_name(heard) {
            return AuthReply::say(
                "Invalid name. Name must contain only letters and spaces, \
                 at least two characters. Please try again.",
            );
        }
        let name = heard.trim().to_string();
        let speech = format!("Thank you. Your name {} is saved. Proceeding to email.", name);
        self.pending.name = Some(name);
        self.stage = AuthStage::RegEmail;
        AuthReply::say(speech)
    }

    fn handle_reg_email(&mut self, heard: &str) -> AuthReply {
        if match_command(heard, &CANCEL_WORDS) {
            self.stage = AuthStage::RegName;
            return AuthReply::say("Going back to name.");
        }
        let email = normalize_spoken_email(heard);
        if !validate_email(&email) {
            return AuthReply::say("Invalid email format. Please say a valid email address.");
        }
        let speech = format!("Email {} saved. Proceeding to username.", email);
        self.pending.email = Some(email);
        self.stage = AuthStage::RegUsername;
        AuthReply::say(speech)
    }

    fn handle_reg_username(&mut self, heard: &str) -> AuthReply {
        if match_command(heard, &CANCEL_WORDS) {
            self.stage = AuthStage::RegEmail;
            return AuthReply::say("Going back to email.");
        }
        let username = heard.replace(' ', "").to_lowercase();
        let speech = format!("Username {} saved. Proceeding to password.", username);
        self.pending.username = Some(username);
        self.stage = AuthStage::RegPassword;
        AuthReply::say(speech)
    }

    fn handle_reg_password(&mut self, store: &mut UserStore, heard: &str) -> Result<AuthReply> {
        if match_command(heard, &CANCEL_WORDS) {
            self.stage = AuthStage::RegUsername;
            return Ok(AuthReply::say("Going back to username."));
        }
        let password = heard.replace(' ', "").to_lowercase();
        if !validate_password(&password) {
            return Ok(AuthReply::say(
                "Password is too weak or too short. Please use at least six \
                 characters and avoid common passwords.",
            ));
        }

        let (Some(name), Some(email), Some(username)) = (
            self.pending.name.clone(),
            self.pending.email.clone(),
            self.pending.username.clone(),
        ) else {
            // Stages only advance once each field is captured.
            self.stage = AuthStage::RegName;
            return Ok(AuthReply::say("Registration incomplete. Starting over."));
        };

        match store.add_user(&name, &email, &username, &password)? {
            RegisterOutcome::Registered => {
                self.stage = AuthStage::Welcome;
                self.pending = Pending::default();
                Ok(AuthReply::say(format!(
                    "Congratulations! Registration successful. Welcome {}. \
                     You can now login using username {}. Returning to main menu.",
                    name, username
                )))
            }
            outcome => {
                self.stage = AuthStage::RegUsername;
                Ok(AuthReply::say(format!(
                    "{} Please try again with different credentials.",
                    outcome.message()
                )))
            }
        }
    }

    fn handle_login_username(&mut self, heard: &str) -> AuthReply {
        if match_command(heard, &CANCEL_WORDS) {
            self.stage = AuthStage::Welcome;
            return AuthReply::say("Cancelling login. Returning to main menu.");
        }
        let username = heard.replace(' ', "").to_lowercase();
        let speech = format!("Username {} received. Proceeding to password.", username);
        self.login_username = Some(username);
        self.stage = AuthStage::LoginPassword;
        AuthReply::say(speech)
    }

    fn handle_login_password(&mut self, store: &mut UserStore, heard: &str) -> Result<AuthReply> {
        if match_command(heard, &CANCEL_WORDS) {
            self.stage = AuthStage::LoginUsername;
            return Ok(AuthReply::say("Going back to username."));
        }
        let password = heard.replace(' ', "").to_lowercase();
        let Some(username) = self.login_username.clone() else {
            self.stage = AuthStage::LoginUsername;
            return Ok(AuthReply::say("Login incomplete. Please say your username."));
        };

        match store.check_user(&username, &password)? {
            LoginOutcome::Success(name) => {
                self.stage = AuthStage::Home;
                let speech = format!(
                    "Login successful! Welcome back {}. You are now logged in.",
                    name
                );
                self.user_name = Some(name);
                Ok(AuthReply::with_event(speech, FlowEvent::LoggedIn))
            }
            outcome => {
                self.stage = AuthStage::LoginUsername;
                let reason = outcome
                    .failure_message()
                    .unwrap_or("Login failed. Please try again.");
                Ok(AuthReply::say(format!("{} Please try again.", reason)))
            }
        }
    }

    fn handle_home(&mut self, heard: &str) -> AuthReply {
        if match_command(
            heard,
            &["analyze video", "analyse video", "upload video", "process file"],
        ) {
            return AuthReply::with_event("Proceeding to video analysis.", FlowEvent::StartAnalysis);
        }
        if match_command(heard, &["logout", "sign out", "log out", "stop"]) {
            self.stage = AuthStage::Welcome;
            self.user_name = None;
            self.login_username = None;
            return AuthReply::with_event(
                "Logging out. Shutting down Visionmate. See you next time!",
                FlowEvent::LoggedOut,
            );
        }
        AuthReply::say("Sorry, I couldn't understand. Please say Analyze Video or Logout.")
    }
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}
