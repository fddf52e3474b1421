//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `client` - Session, cart, and API client logic
//! - `cli` - Command-line storefront frontend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no state.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails
//! - [`auth`] - Identity service request/response payloads
//! - [`catalog`] - Product and category wire types
//! - [`order`] - Order service wire types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod catalog;
pub mod order;
pub mod types;

pub use auth::{JwtResponse, LoginRequest, SignupRequest, User};
pub use catalog::{Category, Product, ProductPage};
pub use order::{Order, OrderItem, OrderLineRequest, OrderRequest};
pub use types::*;
