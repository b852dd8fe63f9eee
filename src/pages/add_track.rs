use std::fmt;

use log::{debug, error, info};
use url::Url;

use crate::{
    clients::{errors::Error, program::SolifyApi},
    pages::{
        MISSING_PROFILE_MESSAGE, SubmitOutcome, SuccessBanner, TRACK_TITLE_MAX_LEN,
        TRACK_URI_MAX_LEN, required_field,
    },
};

pub struct AddTrackPage<P> {
    program: Option<P>,
    title: String,
    uri: String,
    is_loading: bool,
    success: SuccessBanner,
    error: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum AddTrackView<'a> {
    Disconnected,
    Form {
        title: &'a str,
        uri: &'a str,
        is_loading: bool,
        success: bool,
        error: Option<&'a str>,
    },
}

impl<P: SolifyApi> AddTrackPage<P> {
    pub fn new(program: Option<P>) -> Self {
        AddTrackPage {
            program,
            title: String::new(),
            uri: String::new(),
            is_loading: false,
            success: SuccessBanner::default(),
            error: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    fn validate(&self) -> Result<(String, String), Error> {
        let title = required_field("Track title", &self.title, TRACK_TITLE_MAX_LEN)?;
        let uri = required_field("Track URI", &self.uri, TRACK_URI_MAX_LEN)?;
        Url::parse(&uri)
            .map_err(|e| Error::InvalidInput(format!("Track URI is not a valid URL: {e}")))?;
        Ok((title, uri))
    }

    /// Adds the track at the profile's current track count.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let (title, uri) = match self.validate() {
            Ok(fields) => fields,
            Err(e) => {
                debug!("Missing requirements to add track: {e}");
                return SubmitOutcome::Rejected(e.to_string());
            }
        };
        let Some(program) = &self.program else {
            return SubmitOutcome::Rejected("Wallet is not connected".into());
        };

        self.is_loading = true;
        self.error = None;

        let outcome = match program.fetch_user_profile().await {
            Ok(Some(profile)) => {
                debug!("Current track count: {}", profile.track_count);
                match program.add_track(profile.track_count, &uri, &title).await {
                    Ok(signature) => {
                        info!("Track added successfully, signature: {signature}");
                        self.success.show();
                        self.title.clear();
                        self.uri.clear();
                        SubmitOutcome::Succeeded
                    }
                    Err(e) => {
                        error!("Error adding track: {e}");
                        SubmitOutcome::Failed(format!("Failed to add track: {e}"))
                    }
                }
            }
            Ok(None) => SubmitOutcome::Failed(MISSING_PROFILE_MESSAGE.into()),
            Err(e) => {
                error!("Error with user profile: {e}");
                SubmitOutcome::Failed(format!("Failed to add track: {e}"))
            }
        };

        if let SubmitOutcome::Failed(message) = &outcome {
            self.error = Some(message.clone());
        }
        self.is_loading = false;
        outcome
    }

    pub fn view(&self) -> AddTrackView<'_> {
        if self.program.is_none() {
            return AddTrackView::Disconnected;
        }
        AddTrackView::Form {
            title: &self.title,
            uri: &self.uri,
            is_loading: self.is_loading,
            success: self.success.is_visible(),
            error: self.error.as_deref(),
        }
    }
}

impl fmt::Display for AddTrackView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddTrackView::Disconnected => {
                writeln!(f, "Add Track")?;
                writeln!(f, "Please connect your wallet to add a track.")
            }
            AddTrackView::Form {
                is_loading,
                success,
                error,
                ..
            } => {
                if *success {
                    writeln!(f, "Track added successfully!")?;
                }
                if let Some(error) = error {
                    writeln!(f, "{error}")?;
                }
                if *is_loading {
                    writeln!(f, "Adding...")?;
                }
                Ok(())
            }
        }
    }
}
