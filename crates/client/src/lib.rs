//! Shopfront client library.
//!
//! The engineered core of the storefront: an authenticated session manager,
//! a snapshot-pricing shopping cart, durable local storage, and a typed
//! client for the remote REST API. Presentation layers (the CLI, or any
//! other frontend) consume these through a narrow read/mutate interface.
//!
//! # Architecture
//!
//! - [`storage`] - localStorage-style string-keyed slots (file or memory)
//! - [`api`] - REST API client; attaches the persisted bearer token
//! - [`session`] - current user + token, bootstrapped from storage
//! - [`cart`] - line items with captured product snapshots, persisted on
//!   every mutation
//! - [`checkout`] - pricing derivation and order submission
//!
//! All state lives on one logical thread of control: mutations happen on
//! discrete commands or on completion of an awaited network call, so the
//! managers take `&mut self` and need no locks.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use cart::{CartManager, LineItem, ProductSnapshot};
pub use checkout::{CheckoutError, PricingQuote, ShippingForm, place_order};
pub use config::ClientConfig;
pub use error::AppError;
pub use session::SessionManager;
pub use storage::{FileStorage, MemoryStorage, Storage};
