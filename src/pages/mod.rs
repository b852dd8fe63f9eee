//! Page controllers.
//!
//! Every page follows the same shape: an optional program handle (absent while the
//! wallet is disconnected), form state, a load step run when the page is opened,
//! a submit handler and a render gate. Failures never leave a controller, they
//! become an inline message on the page.

use std::time::Duration;

use tokio::time::Instant;

use crate::clients::errors::{Error, Result};

/// Add-track page
pub mod add_track;
/// Playlist listing and creation page
pub mod playlists;
/// Profile page
pub mod profile;

pub use add_track::AddTrackPage;
pub use playlists::PlaylistsPage;
pub use profile::ProfilePage;

pub const USERNAME_MAX_LEN: usize = 32;
pub const TRACK_TITLE_MAX_LEN: usize = 64;
pub const TRACK_URI_MAX_LEN: usize = 200;
// Playlist names are a PDA seed, and seeds are capped at 32 bytes
pub const PLAYLIST_NAME_MAX_LEN: usize = 32;

pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(5);

pub const MISSING_PROFILE_MESSAGE: &str = "User profile not found. Please create a profile first.";

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected before any network call.
    Rejected(String),
    Succeeded,
    /// The failure message is also shown on the page.
    Failed(String),
}

/// A success message that hides itself [`SUCCESS_BANNER_DURATION`] after it was shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuccessBanner {
    shown_at: Option<Instant>,
}

impl SuccessBanner {
    pub fn show(&mut self) {
        self.shown_at = Some(Instant::now());
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at
            .is_some_and(|at| at.elapsed() < SUCCESS_BANNER_DURATION)
    }
}

/// Trims `value` and checks it is non-empty and at most `max_chars` characters.
pub fn required_field(label: &str, value: &str, max_chars: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{label} is required")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(Error::InvalidInput(format!(
            "{label} must be at most {max_chars} characters"
        )));
    }
    Ok(trimmed.to_string())
}
