use std::{path::Path, sync::Arc};

use log::{debug, info};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, read_keypair_file},
    signer::Signer,
};

/// The signing context of a connected user.
#[derive(Clone)]
pub struct WalletSession {
    keypair: Arc<Keypair>,
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("pubkey", &self.pubkey())
            .finish()
    }
}

impl WalletSession {
    pub fn new(keypair: Keypair) -> Self {
        WalletSession {
            keypair: Arc::new(keypair),
        }
    }

    // A missing or unreadable keypair file means the wallet is not connected
    pub fn connect(path: &Path) -> Option<Self> {
        match read_keypair_file(path) {
            Ok(keypair) => {
                let session = WalletSession::new(keypair);
                info!("Wallet connected: {}", session.pubkey());
                Some(session)
            }
            Err(e) => {
                debug!("No wallet connected, could not read keypair from {path:?}: {e}");
                None
            }
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keypair_file_is_disconnected() {
        let session = WalletSession::connect(Path::new("/definitely/not/here/id.json"));
        assert!(session.is_none());
    }

    #[test]
    fn session_exposes_signer_key() {
        let keypair = Keypair::new();
        let expected = keypair.pubkey();
        let session = WalletSession::new(keypair);
        assert_eq!(session.pubkey(), expected);
        assert_eq!(session.clone().pubkey(), expected);
    }
}
