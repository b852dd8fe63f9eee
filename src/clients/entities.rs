use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::clients::{
    errors::{Error, Result},
    instructions::{ACCOUNT_NAMESPACE, sighash},
};

/// Byte offset of the first field after the account discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// An account type owned by the Solify program.
pub trait ProgramAccount: BorshDeserialize {
    const NAME: &'static str;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        sighash(ACCOUNT_NAMESPACE, Self::NAME)
    }

    // Accounts may be over-allocated, so trailing bytes are ignored
    fn try_decode(address: &Pubkey, data: &[u8]) -> Result<Self> {
        if data.len() < DISCRIMINATOR_LEN || data[..DISCRIMINATOR_LEN] != Self::discriminator() {
            return Err(Error::DiscriminatorMismatch(*address, Self::NAME));
        }
        let mut body = &data[DISCRIMINATOR_LEN..];
        Self::deserialize(&mut body).map_err(|e| Error::ParseError(format!("{address}: {e}")))
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub authority: Pubkey,
    pub username: String,
    pub track_count: u64,
}

impl ProgramAccount for UserProfile {
    const NAME: &'static str = "UserProfile";
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Track {
    pub owner: Pubkey,
    pub title: String,
    pub uri: String,
}

impl ProgramAccount for Track {
    const NAME: &'static str = "Track";
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Playlist {
    pub owner: Pubkey, // listing filters on this field at offset 8
    pub name: String,
    pub track_count: u64,
}

impl ProgramAccount for Playlist {
    const NAME: &'static str = "Playlist";
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct PlaylistItem {
    pub playlist: Pubkey,
    pub track: Pubkey,
    pub index: u64,
}

impl ProgramAccount for PlaylistItem {
    const NAME: &'static str = "PlaylistItem";
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Like {
    pub track: Pubkey,
    pub liker: Pubkey,
}

impl ProgramAccount for Like {
    const NAME: &'static str = "Like";
}

/// A playlist as shown on the playlists page.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlaylistView {
    pub id: String,
    pub name: String,
    pub track_count: u64,
    pub owner: String,
}

impl PlaylistView {
    pub fn new(address: &Pubkey, playlist: &Playlist) -> Self {
        PlaylistView {
            id: address.to_string(),
            name: playlist.name.clone(),
            track_count: playlist.track_count,
            owner: playlist.owner.to_string(),
        }
    }
}
