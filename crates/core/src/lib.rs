//! Cakestack Core - Domain logic shared by every Cakestack component.
//!
//! This crate is consumed by:
//! - `storefront` - Public customer-facing API
//! - `admin` - Staff console API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only pure functions and types - no I/O, no
//! database access, no HTTP clients. Every operation here is a synchronous
//! function of its inputs, which keeps the hard parts (pricing, the order
//! state machine, authorization) trivially unit-testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, money, and order status
//! - [`pricing`] - Deterministic price computation for cake configurations
//! - [`lifecycle`] - Order status state machine
//! - [`access`] - Capability-based authorization for tenant-scoped actions
//! - [`tenant`] - Shop/tenant resolution from request paths

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod lifecycle;
pub mod pricing;
pub mod tenant;
pub mod types;

pub use types::*;
