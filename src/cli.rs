use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use solana_sdk::pubkey::Pubkey;
use solify::{
    clients::{
        ClientConfig, SolifyProgram, WalletSession,
        errors::{Error, Result},
        pda,
    },
    pages::{AddTrackPage, PlaylistsPage, ProfilePage, SubmitOutcome},
};

#[derive(Parser)]
#[command(name = "solify")]
#[command(version, about = "Client for the Solify on-chain music program", long_about = None)]
struct Cli {
    /// Wallet keypair file, overrides SOLIFY_KEYPAIR
    #[arg(long, global = true)]
    keypair: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Page(PageCommand),
    /// Print a program-derived address
    Derive {
        #[command(subcommand)]
        entity: DeriveEntity,
    },
}

#[derive(Subcommand)]
enum PageCommand {
    /// Show the connected wallet's profile and tracks
    Profile {},
    /// Create a profile for the connected wallet
    CreateProfile { username: String },
    /// Add a track to the connected wallet's profile
    AddTrack {
        #[arg(long)]
        title: String,
        #[arg(long)]
        uri: String,
    },
    /// List the connected wallet's playlists
    Playlists {
        /// Print the playlists as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one playlist by name
    Playlist { name: String },
    /// Create a playlist
    CreatePlaylist { name: String },
}

#[derive(Subcommand)]
enum DeriveEntity {
    Profile {
        #[arg(long)]
        owner: Option<Pubkey>,
    },
    Track {
        #[arg(long)]
        owner: Option<Pubkey>,
        #[arg(long)]
        index: u64,
    },
    Playlist {
        #[arg(long)]
        owner: Option<Pubkey>,
        #[arg(long)]
        name: String,
    },
    PlaylistItem {
        #[arg(long)]
        playlist: Pubkey,
        #[arg(long)]
        index: u64,
    },
    Like {
        #[arg(long)]
        track: Pubkey,
        #[arg(long)]
        liker: Option<Pubkey>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    info!("Building config ...");
    let config = ClientConfig::try_default();

    match cli.command {
        Commands::Derive { entity } => {
            let mut config = config?;
            if let Some(keypair) = cli.keypair {
                config.keypair_path = keypair;
            }
            let wallet = WalletSession::connect(&config.keypair_path);
            derive(&config, wallet.as_ref(), entity)
        }
        Commands::Page(command) => {
            let program = SolifyProgram::from_config(config, cli.keypair);
            run_page(program, command).await
        }
    }
}

async fn run_page(program: Option<SolifyProgram>, command: PageCommand) -> Result<()> {
    match command {
        PageCommand::Profile {} => {
            let mut page = ProfilePage::new(program);
            page.load().await;
            print!("{}", page.view());
        }
        PageCommand::CreateProfile { username } => {
            let mut page = ProfilePage::new(program);
            page.load().await;
            if !page.is_initialized() {
                page.set_username(username);
                let outcome = page.submit().await;
                print!("{}", page.view());
                return reject_or_continue(outcome);
            }
            print!("{}", page.view());
        }
        PageCommand::AddTrack { title, uri } => {
            let mut page = AddTrackPage::new(program);
            page.set_title(title);
            page.set_uri(uri);
            let outcome = page.submit().await;
            print!("{}", page.view());
            reject_or_continue(outcome)?;
        }
        PageCommand::Playlists { json } => {
            let mut page = PlaylistsPage::new(program);
            page.load().await;
            if json {
                println!("{}", serde_json::to_string_pretty(page.playlists())?);
            } else {
                print!("{}", page.view());
            }
        }
        PageCommand::Playlist { name } => {
            let mut page = PlaylistsPage::new(program);
            page.load().await;
            if !page.select_by_name(&name) {
                info!("No playlist named {name}");
            }
            print!("{}", page.view());
        }
        PageCommand::CreatePlaylist { name } => {
            let mut page = PlaylistsPage::new(program);
            page.load().await;
            page.set_playlist_name(name);
            let outcome = page.submit().await;
            print!("{}", page.view());
            reject_or_continue(outcome)?;
        }
    }
    Ok(())
}

// Failures are rendered inline by the page; only client-side rejections abort
fn reject_or_continue(outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Rejected(reason) => Err(Error::InvalidInput(reason)),
        SubmitOutcome::Succeeded | SubmitOutcome::Failed(_) => Ok(()),
    }
}

fn derive(
    config: &ClientConfig,
    wallet: Option<&WalletSession>,
    entity: DeriveEntity,
) -> Result<()> {
    let program_id = &config.program_id;
    let owner_or_wallet = |owner: Option<Pubkey>| {
        owner.or_else(|| wallet.map(WalletSession::pubkey)).ok_or_else(|| {
            Error::InvalidInput("no wallet connected, pass the key explicitly".into())
        })
    };

    let (address, bump) = match entity {
        DeriveEntity::Profile { owner } => {
            pda::find_user_profile_address(&owner_or_wallet(owner)?, program_id)
        }
        DeriveEntity::Track { owner, index } => {
            pda::find_track_address(&owner_or_wallet(owner)?, index, program_id)
        }
        DeriveEntity::Playlist { owner, name } => {
            pda::find_playlist_address(&owner_or_wallet(owner)?, &name, program_id)?
        }
        DeriveEntity::PlaylistItem { playlist, index } => {
            pda::find_playlist_item_address(&playlist, index, program_id)
        }
        DeriveEntity::Like { track, liker } => {
            pda::find_like_address(&track, &owner_or_wallet(liker)?, program_id)
        }
    };
    println!("{address} (bump {bump})");
    Ok(())
}
