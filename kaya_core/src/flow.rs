//! Application Flow
//!
//! Single source of truth for which screen is active and what the user has
//! submitted. The transition methods are the only mutators:
//!
//! ```text
//! Landing --get_started--> Intake --submit_intake--> Processing
//!    ^                       |  ^                        |
//!    +----back_to_landing----+  +--analyze_another--+    | processing_complete
//!                                                   |    v
//!                                                   +- Report
//! ```

use crate::intake::IntakePayload;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Landing,
    Intake,
    Processing,
    Report,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Intake => "intake",
            Screen::Processing => "processing",
            Screen::Report => "report",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    GetStarted,
    BackToLanding,
    SubmitIntake,
    ProcessingComplete,
    AnalyzeAnother,
}

impl Transition {
    /// Source and target screen of this transition
    pub fn edge(&self) -> (Screen, Screen) {
        match self {
            Transition::GetStarted => (Screen::Landing, Screen::Intake),
            Transition::BackToLanding => (Screen::Intake, Screen::Landing),
            Transition::SubmitIntake => (Screen::Intake, Screen::Processing),
            Transition::ProcessingComplete => (Screen::Processing, Screen::Report),
            Transition::AnalyzeAnother => (Screen::Report, Screen::Intake),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transition::GetStarted => "get started",
            Transition::BackToLanding => "go back",
            Transition::SubmitIntake => "submit intake",
            Transition::ProcessingComplete => "complete processing",
            Transition::AnalyzeAnother => "analyze another",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Cannot {} from the {from} screen", .transition.label())]
    InvalidTransition { from: Screen, transition: Transition },
}

#[derive(Debug, Clone)]
pub struct AppFlow {
    screen: Screen,
    payload: Option<IntakePayload>,
    session_id: Uuid,
    completed_analyses: u32,
}

impl AppFlow {
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        log::info!("[FLOW] Session {} started on {}", session_id, Screen::Landing);
        Self {
            screen: Screen::Landing,
            payload: None,
            session_id,
            completed_analyses: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The submitted payload, present from Processing until the user starts over
    pub fn payload(&self) -> Option<&IntakePayload> {
        self.payload.as_ref()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn completed_analyses(&self) -> u32 {
        self.completed_analyses
    }

    pub fn get_started(&mut self) -> Result<Screen, FlowError> {
        self.advance(Transition::GetStarted)
    }

    /// Unsubmitted form edits live in the form, not here, and are dropped
    /// by the caller.
    pub fn back_to_landing(&mut self) -> Result<Screen, FlowError> {
        self.advance(Transition::BackToLanding)
    }

    pub fn submit_intake(&mut self, payload: IntakePayload) -> Result<Screen, FlowError> {
        self.advance(Transition::SubmitIntake)?;
        log::info!(
            "[FLOW] Intake accepted: company={} industry={} roles={} resume={} ({} bytes)",
            payload.target_company(),
            payload.industry().id(),
            payload.roles().len(),
            payload.resume_file().name,
            payload.resume_file().size_bytes
        );
        self.payload = Some(payload);
        Ok(self.screen)
    }

    pub fn processing_complete(&mut self) -> Result<Screen, FlowError> {
        self.advance(Transition::ProcessingComplete)?;
        self.completed_analyses += 1;
        Ok(self.screen)
    }

    pub fn analyze_another(&mut self) -> Result<Screen, FlowError> {
        self.advance(Transition::AnalyzeAnother)?;
        self.payload = None;
        Ok(self.screen)
    }

    fn advance(&mut self, transition: Transition) -> Result<Screen, FlowError> {
        let (from, to) = transition.edge();
        if self.screen != from {
            log::warn!(
                "[FLOW] Rejected '{}' while on {}",
                transition.label(),
                self.screen
            );
            return Err(FlowError::InvalidTransition {
                from: self.screen,
                transition,
            });
        }

        log::info!("[FLOW] {} -> {} ({})", from, to, transition.label());
        self.screen = to;
        Ok(to)
    }
}

impl Default for AppFlow {
    fn default() -> Self {
        Self::new()
    }
}
