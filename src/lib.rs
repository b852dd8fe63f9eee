//! Solify - client for the Solify on-chain music program
//!
//! This library derives program addresses, encodes instructions and drives the
//! profile, add-track and playlist pages of a connected wallet.

/// Client modules for configuration, wallets and the on-chain program
pub mod clients;
/// Health-check HTTP endpoint
pub mod health;
/// Page controllers: form state, submit handlers and render gates
pub mod pages;
