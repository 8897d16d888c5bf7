//! Common library for the site backend
//!
//! This crate provides functionality shared by the auth and booking services:
//! database connectivity and errors, the session token codec, the cookie based
//! identity verifiers and the request gate protecting private routes.
//!
//! ```rust,no_run
//! use common::identity::{IdentityVerifier, UserVerifier};
//! use common::token::{TokenCodec, TokenConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let codec = TokenCodec::new(&TokenConfig::from_env()?);
//!     let verifier = UserVerifier::new(codec);
//!     let identity = verifier.verify(&axum::http::HeaderMap::new());
//!     println!("Identity: {:?}", identity);
//!     Ok(())
//! }
//! ```

pub mod cookies;
pub mod database;
pub mod error;
pub mod gate;
pub mod http;
pub mod identity;
pub mod token;
