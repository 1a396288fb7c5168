//! Cakestack admin console library.
//!
//! The staff management surface as a library, so the router can be driven
//! by integration tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod extract;
pub mod identity;
pub mod routes;
pub mod state;
