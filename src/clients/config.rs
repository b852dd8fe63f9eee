use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use log::debug;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey,
    pubkey::Pubkey,
};

use crate::clients::errors::{Error, Result};

pub const RPC_URL_VAR: &str = "SOLIFY_RPC_URL";
pub const PROGRAM_ID_VAR: &str = "SOLIFY_PROGRAM_ID";
pub const COMMITMENT_VAR: &str = "SOLIFY_COMMITMENT";
pub const KEYPAIR_VAR: &str = "SOLIFY_KEYPAIR";
pub const HTTP_ADDR_VAR: &str = "SOLIFY_HTTP_ADDR";

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("Dqm43aWDpiFr7cEk37Xnud7NPPo18dCBCkfN4hLJWHnT");
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Network settings shared by every program handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub program_id: Pubkey,
    pub commitment: CommitmentConfig,
    pub keypair_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            program_id: DEFAULT_PROGRAM_ID,
            commitment: CommitmentConfig::confirmed(),
            keypair_path: default_keypair_path(),
        }
    }
}

impl ClientConfig {
    // Read settings from the process environment, loading `.env` first if present
    pub fn try_default() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unset or blank values
    /// fall back to the defaults; malformed values are configuration errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = ClientConfig::default();

        let program_id = match get(PROGRAM_ID_VAR) {
            Some(raw) => Pubkey::from_str(raw.trim()).map_err(|e| {
                Error::ConfigurationError(format!("{PROGRAM_ID_VAR}={raw} is not a valid key: {e}"))
            })?,
            None => defaults.program_id,
        };
        let commitment = match get(COMMITMENT_VAR) {
            Some(raw) => parse_commitment(&raw)?,
            None => defaults.commitment,
        };

        Ok(ClientConfig {
            rpc_url: get(RPC_URL_VAR).unwrap_or(defaults.rpc_url),
            program_id,
            commitment,
            keypair_path: get(KEYPAIR_VAR).map_or(defaults.keypair_path, PathBuf::from),
        })
    }
}

pub fn parse_commitment(raw: &str) -> Result<CommitmentConfig> {
    let level = match raw.trim().to_ascii_lowercase().as_str() {
        "processed" => CommitmentLevel::Processed,
        "confirmed" => CommitmentLevel::Confirmed,
        "finalized" => CommitmentLevel::Finalized,
        other => {
            return Err(Error::ConfigurationError(format!(
                "{COMMITMENT_VAR}={other} must be one of processed, confirmed, finalized"
            )));
        }
    };
    Ok(CommitmentConfig { commitment: level })
}

// Same location the Solana CLI writes its default keypair to
fn default_keypair_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if home directory can't be determined
        .join(".config")
        .join("solana")
        .join("id.json")
}

/// Loads a `.env` file from the working directory or its parents, if there is one.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {path:?}");
            Some(path)
        }
        Err(e) => {
            debug!("No .env file loaded: {e}");
            None
        }
    }
}

pub fn http_addr() -> Result<SocketAddr> {
    http_addr_from_lookup(|name| std::env::var(name).ok())
}

pub fn http_addr_from_lookup<F>(lookup: F) -> Result<SocketAddr>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(HTTP_ADDR_VAR)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
    raw.trim()
        .parse()
        .map_err(|e| Error::ConfigurationError(format!("{HTTP_ADDR_VAR}={raw}: {e}")))
}
