use solana_client::client_error::ClientError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse account data, error: {0}")]
    ParseError(String),

    #[error("Account {0} is not a {1} account")]
    DiscriminatorMismatch(Pubkey, &'static str),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to encode {0} arguments, error: {1}")]
    EncodingError(&'static str, String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("RPC error: {0}")]
    RpcError(#[from] Box<ClientError>),

    #[error("Signing error: {0}")]
    SignerError(#[from] solana_sdk::signer::SignerError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<ClientError> for Error {
    fn from(err: ClientError) -> Self {
        Error::RpcError(Box::new(err))
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
