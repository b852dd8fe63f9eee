//! Program-derived addresses for every Solify entity.
//!
//! Each address is a pure function of its seeds and the program id, so the same
//! inputs always land on the same account.

use solana_sdk::pubkey::{MAX_SEED_LEN, Pubkey};

use crate::clients::errors::{Error, Result};

pub const USER_SEED: &[u8] = b"user";
pub const TRACK_SEED: &[u8] = b"track";
pub const PLAYLIST_SEED: &[u8] = b"playlist";
pub const PLAYLIST_ITEM_SEED: &[u8] = b"playlist_item";
pub const LIKE_SEED: &[u8] = b"like";

pub fn find_user_profile_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_SEED, authority.as_ref()], program_id)
}

/// The track index is encoded as a little-endian `u64`.
pub fn find_track_address(owner: &Pubkey, index: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[TRACK_SEED, owner.as_ref(), &index.to_le_bytes()],
        program_id,
    )
}

/// The raw UTF-8 bytes of `name` are used as a seed, so names longer than
/// [`MAX_SEED_LEN`] bytes are rejected with [`Error::InvalidInput`].
pub fn find_playlist_address(
    owner: &Pubkey,
    name: &str,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    if name.len() > MAX_SEED_LEN {
        return Err(Error::InvalidInput(format!(
            "Playlist name must be at most {MAX_SEED_LEN} bytes, got {}",
            name.len()
        )));
    }
    Pubkey::try_find_program_address(
        &[PLAYLIST_SEED, owner.as_ref(), name.as_bytes()],
        program_id,
    )
    .ok_or_else(|| Error::InvalidInput(format!("No viable playlist address for {name:?}")))
}

pub fn find_playlist_item_address(
    playlist: &Pubkey,
    index: u64,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PLAYLIST_ITEM_SEED, playlist.as_ref(), &index.to_le_bytes()],
        program_id,
    )
}

pub fn find_like_address(track: &Pubkey, liker: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LIKE_SEED, track.as_ref(), liker.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::config::DEFAULT_PROGRAM_ID;

    #[test]
    fn derivation_is_deterministic() {
        let owner = Pubkey::new_unique();
        let program = DEFAULT_PROGRAM_ID;

        assert_eq!(
            find_user_profile_address(&owner, &program),
            find_user_profile_address(&owner, &program)
        );
        assert_eq!(
            find_track_address(&owner, 3, &program),
            find_track_address(&owner, 3, &program)
        );
        assert_eq!(
            find_playlist_address(&owner, "road trip", &program).unwrap(),
            find_playlist_address(&owner, "road trip", &program).unwrap()
        );
        let (playlist, _) = find_playlist_address(&owner, "road trip", &program).unwrap();
        assert_eq!(
            find_playlist_item_address(&playlist, 0, &program),
            find_playlist_item_address(&playlist, 0, &program)
        );
        let (track, _) = find_track_address(&owner, 0, &program);
        assert_eq!(
            find_like_address(&track, &owner, &program),
            find_like_address(&track, &owner, &program)
        );
    }

    #[test]
    fn matches_manual_seed_layout() {
        let owner = Pubkey::new_unique();
        let program = Pubkey::new_unique();
        let expected = Pubkey::find_program_address(
            &[b"track", owner.as_ref(), &[7, 0, 0, 0, 0, 0, 0, 0]],
            &program,
        );
        assert_eq!(find_track_address(&owner, 7, &program), expected);
    }

    #[test]
    fn different_inputs_give_different_addresses() {
        let owner = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let program = Pubkey::new_unique();

        assert_ne!(
            find_track_address(&owner, 0, &program).0,
            find_track_address(&owner, 1, &program).0
        );
        assert_ne!(
            find_user_profile_address(&owner, &program).0,
            find_user_profile_address(&other, &program).0
        );
        assert_ne!(
            find_playlist_address(&owner, "a", &program).unwrap().0,
            find_playlist_address(&owner, "b", &program).unwrap().0
        );
        assert_ne!(
            find_user_profile_address(&owner, &program).0,
            find_user_profile_address(&owner, &Pubkey::new_unique()).0
        );
    }

    #[test]
    fn overlong_playlist_name_is_rejected_not_panicking() {
        let owner = Pubkey::new_unique();
        let program = DEFAULT_PROGRAM_ID;

        let err = find_playlist_address(&owner, &"a".repeat(33), &program).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(find_playlist_address(&owner, &"a".repeat(32), &program).is_ok());
    }
}
