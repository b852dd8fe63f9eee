use std::path::PathBuf;

use log::{debug, error, info, warn};
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    signer::Signer,
    transaction::Transaction,
};

use crate::clients::{
    config::ClientConfig,
    entities::{DISCRIMINATOR_LEN, Playlist, PlaylistView, ProgramAccount, Track, UserProfile},
    errors::Result,
    instructions, pda,
    wallet::WalletSession,
};

// getMultipleAccounts accepts at most 100 keys per request
const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// Upper bound on tracks listed for one profile; the count comes from chain data.
pub const MAX_LISTED_TRACKS: u64 = 1_000;

/// Track addresses `0..count` of `owner`, capped at [`MAX_LISTED_TRACKS`].
pub fn track_addresses(owner: &Pubkey, count: u64, program_id: &Pubkey) -> Vec<Pubkey> {
    if count > MAX_LISTED_TRACKS {
        warn!("Profile reports {count} tracks, listing the first {MAX_LISTED_TRACKS}");
    }
    (0..count.min(MAX_LISTED_TRACKS))
        .map(|index| pda::find_track_address(owner, index, program_id).0)
        .collect()
}

/// Operations the pages need from the on-chain program, bound to one wallet.
#[allow(async_fn_in_trait)]
pub trait SolifyApi {
    /// Key of the connected wallet.
    fn authority(&self) -> Pubkey;

    fn program_id(&self) -> Pubkey;

    /// `Ok(None)` when the wallet has no profile yet.
    async fn fetch_user_profile(&self) -> Result<Option<UserProfile>>;

    /// Tracks `0..count` of the connected wallet. Missing tracks are skipped.
    async fn fetch_tracks(&self, count: u64) -> Result<Vec<Track>>;

    async fn fetch_playlists(&self) -> Result<Vec<PlaylistView>>;

    async fn init_user_profile(&self, username: &str) -> Result<Signature>;

    async fn add_track(&self, track_index: u64, uri: &str, title: &str) -> Result<Signature>;

    async fn create_playlist(&self, name: &str) -> Result<Signature>;
}

/// Handle to the Solify program for a connected wallet.
pub struct SolifyProgram {
    rpc: RpcClient,
    config: ClientConfig,
    wallet: WalletSession,
}

impl SolifyProgram {
    /// Returns `None` when no wallet is connected; callers treat every program
    /// operation as unavailable in that case.
    pub fn connect(config: &ClientConfig, wallet: Option<WalletSession>) -> Option<Self> {
        let Some(wallet) = wallet else {
            info!("No wallet connected");
            return None;
        };

        debug!("Using RPC URL: {}", config.rpc_url);
        debug!("Using commitment: {:?}", config.commitment.commitment);
        debug!("Program ID: {}", config.program_id);

        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);
        Some(SolifyProgram {
            rpc,
            config: config.clone(),
            wallet,
        })
    }

    /// Builds the handle from a possibly broken configuration. A configuration
    /// error is logged and leaves the program unavailable, same as a missing wallet.
    pub fn from_config(
        config: Result<ClientConfig>,
        keypair_override: Option<PathBuf>,
    ) -> Option<Self> {
        let mut config = match config {
            Ok(config) => config,
            Err(e) => {
                error!("Error creating program: {e}");
                return None;
            }
        };
        if let Some(keypair) = keypair_override {
            config.keypair_path = keypair;
        }
        let wallet = WalletSession::connect(&config.keypair_path);
        Self::connect(&config, wallet)
    }

    async fn fetch_account<T: ProgramAccount>(&self, address: &Pubkey) -> Result<Option<T>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.config.commitment)
            .await?;
        match response.value {
            Some(account) => Ok(Some(T::try_decode(address, &account.data)?)),
            None => Ok(None),
        }
    }

    // Signs with the wallet and waits for confirmation at the configured commitment
    async fn send(&self, instruction: Instruction) -> Result<Signature> {
        let payer = self.wallet.keypair();
        let blockhash = self.rpc.get_latest_blockhash().await?;

        let message = Message::new(&[instruction], Some(&payer.pubkey()));
        let mut transaction = Transaction::new_unsigned(message);
        transaction.try_sign(&[payer], blockhash)?;

        debug!("Transaction submitted, waiting for confirmation ...");
        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .inspect_err(|e| error!("Transaction failed: {e}"))?;
        info!("Transaction confirmed: {signature}");
        Ok(signature)
    }
}

impl SolifyApi for SolifyProgram {
    fn authority(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    async fn fetch_user_profile(&self) -> Result<Option<UserProfile>> {
        let (address, _) = pda::find_user_profile_address(&self.authority(), &self.program_id());
        debug!("Fetching user profile {address} ...");
        self.fetch_account(&address).await
    }

    async fn fetch_tracks(&self, count: u64) -> Result<Vec<Track>> {
        let addresses = track_addresses(&self.authority(), count, &self.program_id());

        let mut tracks = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(MAX_MULTIPLE_ACCOUNTS) {
            let accounts = self
                .rpc
                .get_multiple_accounts_with_commitment(chunk, self.config.commitment)
                .await?
                .value;
            for (address, account) in chunk.iter().zip(accounts) {
                match account {
                    Some(account) => tracks.push(Track::try_decode(address, &account.data)?),
                    None => debug!("Track {address} not found, skipping"),
                }
            }
        }
        Ok(tracks)
    }

    async fn fetch_playlists(&self) -> Result<Vec<PlaylistView>> {
        let authority = self.authority();
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(0, &Playlist::discriminator())),
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                    DISCRIMINATOR_LEN,
                    authority.as_ref(),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.config.commitment),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id(), config)
            .await?;
        debug!("Found {} playlist accounts for {authority}", accounts.len());

        accounts
            .iter()
            .map(|(address, account)| {
                Playlist::try_decode(address, &account.data)
                    .map(|playlist| PlaylistView::new(address, &playlist))
            })
            .collect()
    }

    async fn init_user_profile(&self, username: &str) -> Result<Signature> {
        info!("Creating user profile with username: {username}");
        let instruction =
            instructions::init_user_profile(&self.program_id(), &self.authority(), username)?;
        self.send(instruction).await
    }

    async fn add_track(&self, track_index: u64, uri: &str, title: &str) -> Result<Signature> {
        info!("Adding track #{track_index} with title: {title} and URI: {uri}");
        let instruction = instructions::add_track(
            &self.program_id(),
            &self.authority(),
            track_index,
            uri,
            title,
        )?;
        self.send(instruction).await
    }

    async fn create_playlist(&self, name: &str) -> Result<Signature> {
        info!("Creating playlist: {name}");
        let instruction =
            instructions::create_playlist(&self.program_id(), &self.authority(), name)?;
        self.send(instruction).await
    }
}
