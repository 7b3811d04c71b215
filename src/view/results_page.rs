//! Results page fetch state.
//!
//! `Loading` is entered when a session id is present; a missing id goes
//! straight to `Error` without any request. Each fetch is tagged with a
//! ticket, and completions carrying an older ticket are dropped.

use crate::api::client::RESULTS_FALLBACK;
use crate::error::AppError;
use crate::models::results::ResultsResponse;
use log::debug;

pub const NO_SESSION_MESSAGE: &str = "No session ID provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsState {
    Loading,
    Success(Box<ResultsResponse>),
    Error(String),
}

#[derive(Debug)]
pub struct ResultsPage {
    session_id: Option<String>,
    state: ResultsState,
    current: u64,
}

impl ResultsPage {
    pub fn new() -> Self {
        Self {
            session_id: None,
            state: ResultsState::Error(NO_SESSION_MESSAGE.to_string()),
            current: 0,
        }
    }

    /// Navigate to a session. Returns the ticket the caller must hand back
    /// with the fetch outcome, or `None` when there is nothing to fetch.
    pub fn open(&mut self, session_id: Option<&str>) -> Option<FetchTicket> {
        self.current += 1;
        match session_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => {
                self.session_id = Some(id.to_string());
                self.state = ResultsState::Loading;
                Some(FetchTicket(self.current))
            }
            None => {
                self.session_id = None;
                self.state = ResultsState::Error(NO_SESSION_MESSAGE.to_string());
                None
            }
        }
    }

    /// Leave the page; any fetch still in flight becomes stale.
    pub fn close(&mut self) {
        self.current += 1;
    }

    /// Apply a fetch outcome. Returns `false` if the ticket was stale and the
    /// outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: std::result::Result<ResultsResponse, AppError>,
    ) -> bool {
        if ticket.0 != self.current {
            debug!("Discarding stale results fetch (ticket {})", ticket.0);
            return false;
        }

        self.state = match outcome {
            Ok(results) => ResultsState::Success(Box::new(results)),
            Err(e) => ResultsState::Error(fetch_error_message(&e)),
        };
        true
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    pub fn into_state(self) -> ResultsState {
        self.state
    }
}

impl Default for ResultsPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend-provided text when there is one, the generic fallback otherwise.
pub fn fetch_error_message(error: &AppError) -> String {
    match error {
        AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        AppError::MissingSession => NO_SESSION_MESSAGE.to_string(),
        _ => RESULTS_FALLBACK.to_string(),
    }
}
