/// Environment-driven client configuration
pub mod config;
/// On-chain account types and page views
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Instruction encoding
pub mod instructions;
/// Program-derived addresses
pub mod pda;
/// Program handle bound to a wallet session
pub mod program;
/// Wallet session loaded from a keypair file
pub mod wallet;

pub use config::ClientConfig;
pub use program::{SolifyApi, SolifyProgram};
pub use wallet::WalletSession;
