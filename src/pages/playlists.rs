use std::fmt;

use log::{debug, error, info};

use crate::{
    clients::{entities::PlaylistView, errors::Error, pda, program::SolifyApi},
    pages::{PLAYLIST_NAME_MAX_LEN, SubmitOutcome, SuccessBanner, required_field},
};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load playlists. Please try again.";
pub const PROFILE_REQUIRED_MESSAGE: &str = "You need to create a profile first";

pub struct PlaylistsPage<P> {
    program: Option<P>,
    playlist_name: String,
    is_loading: bool,
    success: SuccessBanner,
    error: Option<String>,
    playlists: Vec<PlaylistView>,
    selected: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub enum PlaylistsListing<'a> {
    Loading,
    Empty,
    Playlists(&'a [PlaylistView]),
}

#[derive(Debug, PartialEq)]
pub enum PlaylistsView<'a> {
    Disconnected,
    Page {
        success: bool,
        error: Option<&'a str>,
        listing: PlaylistsListing<'a>,
        selected: Option<&'a PlaylistView>,
    },
}

impl<P: SolifyApi> PlaylistsPage<P> {
    pub fn new(program: Option<P>) -> Self {
        PlaylistsPage {
            program,
            playlist_name: String::new(),
            is_loading: false,
            success: SuccessBanner::default(),
            error: None,
            playlists: Vec::new(),
            selected: None,
        }
    }

    pub fn set_playlist_name(&mut self, name: impl Into<String>) {
        self.playlist_name = name.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn playlists(&self) -> &[PlaylistView] {
        &self.playlists
    }

    /// Lists the wallet's playlists. A wallet without a profile simply has none.
    pub async fn load(&mut self) {
        let Some(program) = &self.program else {
            debug!("Missing requirements to fetch playlists: no wallet connected");
            return;
        };

        self.is_loading = true;
        self.error = None;

        match program.fetch_user_profile().await {
            Ok(Some(_)) => match program.fetch_playlists().await {
                Ok(playlists) => {
                    debug!("Loaded {} playlists", playlists.len());
                    self.playlists = playlists;
                }
                Err(e) => {
                    error!("Error fetching playlists: {e}");
                    self.error = Some(LOAD_FAILED_MESSAGE.into());
                }
            },
            Ok(None) => {
                debug!("No user profile found, no playlists to show");
                self.playlists.clear();
            }
            Err(e) => {
                error!("Error fetching playlists: {e}");
                self.error = Some(LOAD_FAILED_MESSAGE.into());
            }
        }
        self.is_loading = false;
    }

    fn validate(&self) -> Result<String, Error> {
        let name = required_field("Playlist name", &self.playlist_name, PLAYLIST_NAME_MAX_LEN)?;
        if name.len() > PLAYLIST_NAME_MAX_LEN {
            return Err(Error::InvalidInput(format!(
                "Playlist name must be at most {PLAYLIST_NAME_MAX_LEN} bytes"
            )));
        }
        Ok(name)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let name = match self.validate() {
            Ok(name) => name,
            Err(e) => {
                debug!("Missing requirements to create playlist: {e}");
                return SubmitOutcome::Rejected(e.to_string());
            }
        };
        let Some(program) = &self.program else {
            return SubmitOutcome::Rejected("Wallet is not connected".into());
        };

        self.is_loading = true;
        self.error = None;

        let outcome = match program.fetch_user_profile().await {
            Ok(Some(_)) => {
                let authority = program.authority();
                match pda::find_playlist_address(&authority, &name, &program.program_id()) {
                    Ok((address, _)) => {
                        debug!("Playlist PDA: {address}");
                        match program.create_playlist(&name).await {
                            Ok(signature) => {
                                info!("Playlist created successfully, signature: {signature}");
                                self.playlists.push(PlaylistView {
                                    id: address.to_string(),
                                    name,
                                    track_count: 0,
                                    owner: authority.to_string(),
                                });
                                self.success.show();
                                self.playlist_name.clear();
                                SubmitOutcome::Succeeded
                            }
                            Err(e) => {
                                error!("Error creating playlist: {e}");
                                SubmitOutcome::Failed(format!("Failed to create playlist: {e}"))
                            }
                        }
                    }
                    Err(e) => {
                        error!("Error deriving playlist address: {e}");
                        SubmitOutcome::Failed(format!("Failed to create playlist: {e}"))
                    }
                }
            }
            Ok(None) => SubmitOutcome::Failed(PROFILE_REQUIRED_MESSAGE.into()),
            Err(e) => {
                error!("Error checking user profile: {e}");
                SubmitOutcome::Failed(format!("Failed to create playlist: {e}"))
            }
        };

        if let SubmitOutcome::Failed(message) = &outcome {
            self.error = Some(message.clone());
        }
        self.is_loading = false;
        outcome
    }

    /// Opens the detail view of the playlist at `index`; out of range closes it.
    pub fn select(&mut self, index: usize) {
        self.selected = (index < self.playlists.len()).then_some(index);
    }

    pub fn select_by_name(&mut self, name: &str) -> bool {
        self.selected = self.playlists.iter().position(|p| p.name == name);
        self.selected.is_some()
    }

    pub fn close_selected(&mut self) {
        self.selected = None;
    }

    pub fn view(&self) -> PlaylistsView<'_> {
        if self.program.is_none() {
            return PlaylistsView::Disconnected;
        }
        let listing = if self.is_loading {
            PlaylistsListing::Loading
        } else if self.playlists.is_empty() {
            PlaylistsListing::Empty
        } else {
            PlaylistsListing::Playlists(&self.playlists)
        };
        PlaylistsView::Page {
            success: self.success.is_visible(),
            error: self.error.as_deref(),
            listing,
            selected: self.selected.and_then(|i| self.playlists.get(i)),
        }
    }
}

impl fmt::Display for PlaylistsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let PlaylistsView::Page {
            success,
            error,
            listing,
            selected,
        } = self
        else {
            writeln!(f, "Playlists")?;
            return writeln!(f, "Please connect your wallet to view and create playlists.");
        };

        if *success {
            writeln!(f, "Playlist created successfully!")?;
        }
        if let Some(error) = error {
            writeln!(f, "{error}")?;
        }

        writeln!(f, "Your Playlists")?;
        match listing {
            PlaylistsListing::Loading => writeln!(f, "Loading...")?,
            PlaylistsListing::Empty => {
                writeln!(f, "You haven't created any playlists yet.")?;
                writeln!(f, "Create your first playlist to get started!")?;
            }
            PlaylistsListing::Playlists(playlists) => {
                for playlist in *playlists {
                    writeln!(f, "  {} ({} tracks)", playlist.name, playlist.track_count)?;
                }
            }
        }

        if let Some(playlist) = selected {
            writeln!(f)?;
            writeln!(f, "{}", playlist.name)?;
            writeln!(f, "Address: {}", playlist.id)?;
            if playlist.track_count == 0 {
                writeln!(f, "This playlist is empty.")?;
            } else {
                writeln!(f, "{} tracks", playlist.track_count)?;
            }
        }
        Ok(())
    }
}
