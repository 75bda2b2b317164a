//! Scanlink Auth - Pairing secret and URL
//!
//! Provides the shared-secret token that authenticates phone-to-desktop scan
//! submissions, and the builder for the URL embedded in the pairing QR code.
//!
//! # Pairing Flow
//!
//! 1. Desktop generates a token with [`token::generate`] (or loads a saved one)
//! 2. Desktop renders [`pairing::scanner_url`] as a QR code
//! 3. Phone scans the QR, opens the scanner page, and submits decoded codes
//!    with the token attached
//! 4. Server checks each submission with [`token::validate`]

pub mod pairing;
pub mod token;

pub use pairing::scanner_url;
pub use token::{generate, validate, TOKEN_ENTROPY_BYTES};
