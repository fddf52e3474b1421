//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

use std::sync::Arc;

use shopfront_client::api::ApiClient;
use shopfront_client::cart::CartManager;
use shopfront_client::config::ClientConfig;
use shopfront_client::error::Result;
use shopfront_client::session::SessionManager;
use shopfront_client::storage::{FileStorage, Storage};

/// Everything a command needs: config, storage-backed managers, API client.
///
/// Session and cart are bootstrapped from the data directory on load, so
/// each CLI invocation picks up where the previous one left off.
pub struct App {
    pub api: ApiClient,
    pub session: SessionManager,
    pub cart: CartManager,
}

impl App {
    /// Load configuration, open storage, and restore persisted state.
    pub fn load() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.data_dir)?);

        let api = ApiClient::new(&config, Arc::clone(&storage))?;

        let mut session = SessionManager::new(api.clone(), Arc::clone(&storage));
        session.bootstrap();

        let mut cart = CartManager::new(storage);
        cart.restore();

        Ok(Self { api, session, cart })
    }
}
