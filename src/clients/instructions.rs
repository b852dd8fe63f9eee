//! Instruction encoding for the Solify program.
//!
//! Instruction data is an 8-byte sighash of `global:<instruction name>` followed by
//! the Borsh-encoded positional arguments.

use borsh::BorshSerialize;
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_sdk_ids::system_program;

use crate::clients::{
    errors::{Error, Result},
    pda,
};

pub const GLOBAL_NAMESPACE: &str = "global";
pub const ACCOUNT_NAMESPACE: &str = "account";

/// First 8 bytes of `sha256("<namespace>:<name>")`.
pub fn sighash(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{namespace}:{name}");
    let digest = Sha256::digest(preimage.as_bytes());

    let mut sighash = [0u8; 8];
    sighash.copy_from_slice(&digest[..8]);
    sighash
}

/// A program instruction with its name and Borsh argument list.
pub trait InstructionArgs: BorshSerialize {
    const NAME: &'static str;

    fn data(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(64);
        data.extend_from_slice(&sighash(GLOBAL_NAMESPACE, Self::NAME));
        borsh::to_writer(&mut data, self)
            .map_err(|e| Error::EncodingError(Self::NAME, e.to_string()))?;
        Ok(data)
    }
}

#[derive(BorshSerialize, Debug, Clone, PartialEq)]
pub struct InitUserProfile {
    pub username: String,
}

impl InstructionArgs for InitUserProfile {
    const NAME: &'static str = "init_user_profile";
}

#[derive(BorshSerialize, Debug, Clone, PartialEq)]
pub struct AddTrack {
    pub uri: String,
    pub title: String,
}

impl InstructionArgs for AddTrack {
    const NAME: &'static str = "add_track";
}

#[derive(BorshSerialize, Debug, Clone, PartialEq)]
pub struct CreatePlaylist {
    pub name: String,
}

impl InstructionArgs for CreatePlaylist {
    const NAME: &'static str = "create_playlist";
}

pub fn init_user_profile(
    program_id: &Pubkey,
    authority: &Pubkey,
    username: &str,
) -> Result<Instruction> {
    let (user_profile, _) = pda::find_user_profile_address(authority, program_id);
    let args = InitUserProfile {
        username: username.to_string(),
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &args.data()?,
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(user_profile, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
    ))
}

// `track_index` is the profile's current track count
pub fn add_track(
    program_id: &Pubkey,
    authority: &Pubkey,
    track_index: u64,
    uri: &str,
    title: &str,
) -> Result<Instruction> {
    let (user_profile, _) = pda::find_user_profile_address(authority, program_id);
    let (track, _) = pda::find_track_address(authority, track_index, program_id);
    let args = AddTrack {
        uri: uri.to_string(),
        title: title.to_string(),
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &args.data()?,
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(user_profile, false),
            AccountMeta::new(track, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
    ))
}

/// Fails when `name` cannot be used as a playlist seed.
pub fn create_playlist(
    program_id: &Pubkey,
    authority: &Pubkey,
    name: &str,
) -> Result<Instruction> {
    let (user_profile, _) = pda::find_user_profile_address(authority, program_id);
    let (playlist, _) = pda::find_playlist_address(authority, name, program_id)?;
    let args = CreatePlaylist {
        name: name.to_string(),
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &args.data()?,
        vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(user_profile, false),
            AccountMeta::new(playlist, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Borsh strings are a u32 LE length prefix followed by the bytes
    fn borsh_str(s: &str) -> Vec<u8> {
        let mut out = u32::try_from(s.len()).unwrap().to_le_bytes().to_vec();
        out.extend_from_slice(s.as_bytes());
        out
    }

    #[test]
    fn sighash_matches_known_anchor_value() {
        // sha256("global:initialize")[..8], the discriminator every Anchor template starts with
        assert_eq!(
            sighash(GLOBAL_NAMESPACE, "initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
    }

    #[test]
    fn init_user_profile_layout() {
        let program = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let ix = init_user_profile(&program, &authority, "alice").unwrap();

        assert_eq!(ix.program_id, program);
        assert_eq!(&ix.data[..8], &sighash(GLOBAL_NAMESPACE, "init_user_profile"));
        assert_eq!(&ix.data[8..], borsh_str("alice").as_slice());

        let (profile, _) = pda::find_user_profile_address(&authority, &program);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(authority, true),
                AccountMeta::new(profile, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ]
        );
    }

    #[test]
    fn add_track_passes_uri_before_title() {
        let program = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let ix = add_track(&program, &authority, 2, "https://x.io/a.mp3", "Song").unwrap();

        let mut expected = sighash(GLOBAL_NAMESPACE, "add_track").to_vec();
        expected.extend(borsh_str("https://x.io/a.mp3"));
        expected.extend(borsh_str("Song"));
        assert_eq!(ix.data, expected);

        let (track, _) = pda::find_track_address(&authority, 2, &program);
        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(ix.accounts[2], AccountMeta::new(track, false));
        assert_eq!(ix.accounts[3].pubkey, system_program::ID);
        assert!(!ix.accounts[3].is_writable);
    }

    #[test]
    fn create_playlist_targets_named_playlist() {
        let program = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let ix = create_playlist(&program, &authority, "Chill").unwrap();

        let (playlist, _) = pda::find_playlist_address(&authority, "Chill", &program).unwrap();
        assert_eq!(ix.accounts[2].pubkey, playlist);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(&ix.data[8..], borsh_str("Chill").as_slice());
    }

    #[test]
    fn create_playlist_with_overlong_name_is_an_error() {
        let program = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let result = create_playlist(&program, &authority, &"x".repeat(40));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn instruction_data_is_sighash_then_args() {
        let args = CreatePlaylist {
            name: "Road trip".into(),
        };
        let data = args.data().unwrap();
        assert_eq!(&data[..8], &sighash(GLOBAL_NAMESPACE, CreatePlaylist::NAME));
        assert_eq!(&data[8..], borsh_str("Road trip").as_slice());
    }
}
