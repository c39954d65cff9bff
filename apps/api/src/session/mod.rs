//! Per-user session flow: `Login → Upload → Results`.
//!
//! Transitions happen only on explicit actions. Anything not listed in
//! [`Session`]'s methods is an `InvalidTransition`.

pub mod handlers;
pub mod store;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AnalysisReport, ResumeUpload};

pub use store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Upload resumes and paste JD to proceed.")]
    MissingInputs,

    #[error("Cannot {action} from the {from} stage")]
    InvalidTransition { from: Stage, action: &'static str },

    #[error("Unknown session {0}")]
    UnknownSession(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Login,
    Upload,
    Results,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Login => "login",
            Stage::Upload => "upload",
            Stage::Results => "results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Login,
    Upload,
    Results { report: Arc<AnalysisReport> },
}

/// Username/password pair the login stage checks against.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every access; drives idle expiry.
    pub last_seen: DateTime<Utc>,
    pub state: SessionState,
}

/// What the API exposes about a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub stage: Stage,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_seen: now,
            state: SessionState::Login,
        }
    }

    pub fn stage(&self) -> Stage {
        match self.state {
            SessionState::Login => Stage::Login,
            SessionState::Upload => Stage::Upload,
            SessionState::Results { .. } => Stage::Results,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            stage: self.stage(),
        }
    }

    pub fn expect_stage(&self, stage: Stage, action: &'static str) -> Result<(), SessionError> {
        if self.stage() == stage {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.stage(),
                action,
            })
        }
    }

    /// Login → Upload. Exact match on both fields; the stage is unchanged on failure.
    pub fn login(
        &mut self,
        expected: &Credentials,
        username: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        self.expect_stage(Stage::Login, "login")?;
        if username != expected.username || password != expected.password {
            return Err(SessionError::InvalidCredentials);
        }
        self.state = SessionState::Upload;
        Ok(())
    }

    /// Upload → Login.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.expect_stage(Stage::Upload, "log out")?;
        self.state = SessionState::Login;
        Ok(())
    }

    /// Checks an analysis may start: Upload stage, non-blank JD, at least one résumé.
    pub fn check_analysis(&self, jd_text: &str, resumes: &[ResumeUpload]) -> Result<(), SessionError> {
        self.expect_stage(Stage::Upload, "analyze")?;
        if jd_text.trim().is_empty() || resumes.is_empty() {
            return Err(SessionError::MissingInputs);
        }
        Ok(())
    }

    /// Upload → Results. Re-checks the stage since the analysis ran unlocked.
    pub fn complete_analysis(&mut self, report: Arc<AnalysisReport>) -> Result<(), SessionError> {
        self.expect_stage(Stage::Upload, "analyze")?;
        self.state = SessionState::Results { report };
        Ok(())
    }

    pub fn report(&self) -> Result<Arc<AnalysisReport>, SessionError> {
        match &self.state {
            SessionState::Results { report } => Ok(report.clone()),
            _ => Err(SessionError::InvalidTransition {
                from: self.stage(),
                action: "view results",
            }),
        }
    }

    /// Results → Upload. The report is dropped.
    pub fn back(&mut self) -> Result<(), SessionError> {
        self.expect_stage(Stage::Results, "go back")?;
        self.state = SessionState::Upload;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
