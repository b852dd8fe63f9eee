use std::fmt;

use log::{debug, error, info, warn};

use crate::{
    clients::{entities::Track, program::SolifyApi},
    pages::{SubmitOutcome, USERNAME_MAX_LEN, required_field},
};

pub struct ProfilePage<P> {
    program: Option<P>,
    username: String,
    is_initialized: bool,
    is_loading: bool,
    tracks: Vec<Track>,
    error: Option<String>,
}

/// What the profile page currently shows.
#[derive(Debug, PartialEq)]
pub enum ProfileView<'a> {
    Disconnected,
    Loading,
    Profile {
        username: &'a str,
        wallet: String,
        tracks: &'a [Track],
    },
    CreateForm {
        username: &'a str,
        error: Option<&'a str>,
    },
}

impl<P: SolifyApi> ProfilePage<P> {
    pub fn new(program: Option<P>) -> Self {
        ProfilePage {
            program,
            username: String::new(),
            is_initialized: false,
            is_loading: false,
            tracks: Vec::new(),
            error: None,
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Fetches the connected wallet's profile. Any failure leaves the page in the
    /// profile-creation state.
    pub async fn load(&mut self) {
        let Some(program) = &self.program else {
            debug!("Missing requirements to fetch profile: no wallet connected");
            return;
        };

        self.is_loading = true;
        debug!("Attempting to fetch user profile ...");
        match program.fetch_user_profile().await {
            Ok(Some(profile)) => {
                info!("User profile found: {}", profile.username);
                self.tracks = match program.fetch_tracks(profile.track_count).await {
                    Ok(tracks) => tracks,
                    Err(e) => {
                        warn!("Failed to fetch tracks: {e}");
                        Vec::new()
                    }
                };
                self.username = profile.username;
                self.is_initialized = true;
            }
            Ok(None) => {
                info!("User profile not found, user needs to create one");
                self.is_initialized = false;
            }
            Err(e) => {
                error!("Error in profile fetch process: {e}");
                self.is_initialized = false;
            }
        }
        self.is_loading = false;
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let username = match required_field("Username", &self.username, USERNAME_MAX_LEN) {
            Ok(username) => username,
            Err(e) => return SubmitOutcome::Rejected(e.to_string()),
        };
        let Some(program) = &self.program else {
            return SubmitOutcome::Rejected("Wallet is not connected".into());
        };

        self.is_loading = true;
        self.error = None;
        let outcome = match program.init_user_profile(&username).await {
            Ok(signature) => {
                info!("Profile created successfully, signature: {signature}");
                self.username = username;
                self.is_initialized = true;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                error!("Error creating profile: {e}");
                let message = format!("Failed to create profile: {e}");
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        };
        self.is_loading = false;
        outcome
    }

    pub fn view(&self) -> ProfileView<'_> {
        let Some(program) = &self.program else {
            return ProfileView::Disconnected;
        };
        if self.is_loading {
            ProfileView::Loading
        } else if self.is_initialized {
            ProfileView::Profile {
                username: &self.username,
                wallet: program.authority().to_string(),
                tracks: &self.tracks,
            }
        } else {
            ProfileView::CreateForm {
                username: &self.username,
                error: self.error.as_deref(),
            }
        }
    }
}

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileView::Disconnected => {
                writeln!(f, "Profile")?;
                writeln!(f, "Please connect your wallet to view your profile.")
            }
            ProfileView::Loading => writeln!(f, "Loading..."),
            ProfileView::Profile {
                username,
                wallet,
                tracks,
            } => {
                writeln!(f, "Welcome, {username}")?;
                writeln!(f, "Wallet: {wallet}")?;
                writeln!(f)?;
                writeln!(f, "Your Tracks")?;
                if tracks.is_empty() {
                    writeln!(f, "You haven't added any tracks yet.")?;
                    writeln!(f, "Add your first track with `solify add-track`.")
                } else {
                    for track in *tracks {
                        writeln!(f, "  {} <{}>", track.title, track.uri)?;
                    }
                    Ok(())
                }
            }
            ProfileView::CreateForm { error, .. } => {
                if let Some(error) = error {
                    writeln!(f, "{error}")?;
                }
                writeln!(f, "Create Your Profile")?;
                writeln!(f, "Run `solify create-profile <USERNAME>` (max {USERNAME_MAX_LEN} characters).")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::pubkey::Pubkey;

    use super::*;
    use crate::pages::fake::{Call, FakeProgram};

    #[tokio::test]
    async fn disconnected_always_prompts_for_wallet() {
        let mut page: ProfilePage<FakeProgram> = ProfilePage::new(None);
        page.load().await;
        page.set_username("alice");
        let outcome = page.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(page.view(), ProfileView::Disconnected);
        assert!(page.view().to_string().contains("Please connect your wallet"));
    }

    #[tokio::test]
    async fn existing_profile_is_shown_with_tracks() {
        let mut program = FakeProgram::new().with_profile("alice", 1);
        program.tracks = vec![Track {
            owner: program.authority,
            title: "Intro".into(),
            uri: "https://example.com/intro.mp3".into(),
        }];
        let mut page = ProfilePage::new(Some(program));
        page.load().await;

        assert!(page.is_initialized());
        assert!(!page.is_loading());
        let ProfileView::Profile {
            username, tracks, ..
        } = page.view()
        else {
            panic!("expected profile view");
        };
        assert_eq!(username, "alice");
        assert_eq!(tracks.len(), 1);
    }

    #[tokio::test]
    async fn missing_profile_shows_creation_form() {
        let mut page = ProfilePage::new(Some(FakeProgram::new()));
        page.load().await;

        assert!(!page.is_initialized());
        assert!(matches!(page.view(), ProfileView::CreateForm { error: None, .. }));
    }

    #[tokio::test]
    async fn failed_fetch_is_not_an_error_state() {
        let program = FakeProgram::new().with_profile("alice", 0);
        program.fail_next("connection refused");
        let mut page = ProfilePage::new(Some(program));
        page.load().await;

        assert!(!page.is_initialized());
        assert!(!page.is_loading());
        assert_eq!(
            page.view(),
            ProfileView::CreateForm {
                username: "",
                error: None
            }
        );
    }

    #[tokio::test]
    async fn blank_username_never_reaches_network() {
        let mut page = ProfilePage::new(Some(FakeProgram::new()));
        page.set_username("   ");
        let outcome = page.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        let program = page.program.as_ref().unwrap();
        assert!(program.calls().is_empty());
    }

    #[tokio::test]
    async fn create_profile_marks_page_initialized() {
        let mut page = ProfilePage::new(Some(FakeProgram::new()));
        page.load().await;
        page.set_username("  bob ");
        let outcome = page.submit().await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert!(page.is_initialized());
        assert!(!page.is_loading());
        let program = page.program.as_ref().unwrap();
        assert_eq!(
            program.calls(),
            vec![Call::FetchProfile, Call::InitProfile("bob".into())]
        );
        assert_ne!(program.authority(), Pubkey::default());
    }

    #[tokio::test]
    async fn failed_creation_surfaces_inline_message() {
        let program = FakeProgram::new();
        program.fail_next("blockhash not found");
        let mut page = ProfilePage::new(Some(program));
        page.set_username("carol");
        let outcome = page.submit().await;

        let SubmitOutcome::Failed(message) = outcome else {
            panic!("expected failure");
        };
        assert!(message.starts_with("Failed to create profile:"));
        assert!(!page.is_loading());
        assert!(page.view().to_string().contains("Failed to create profile"));
    }

    #[tokio::test]
    async fn track_fetch_failure_still_shows_profile() {
        let program = FakeProgram::new().with_profile("alice", 2);
        program.fail_call(1, "rate limited");
        let mut page = ProfilePage::new(Some(program));
        page.load().await;

        assert!(page.is_initialized());
        assert!(!page.is_loading());
        let ProfileView::Profile {
            username, tracks, ..
        } = page.view()
        else {
            panic!("expected profile view");
        };
        assert_eq!(username, "alice");
        assert!(tracks.is_empty());
        assert_eq!(
            page.program.as_ref().unwrap().calls(),
            vec![Call::FetchProfile, Call::FetchTracks(2)]
        );
    }
}
