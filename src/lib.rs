//! AddressMatch Library
//!
//! Decides whether two free-text postal addresses denote the same place:
//! a lexical precheck (normalization + edit distance) followed by a
//! structured verdict from an external model.

pub mod broadcast;
pub mod config;
pub mod core;
pub mod error;
pub mod oracle;
pub mod server;
pub mod session;
pub mod trigger;
pub mod verify;
