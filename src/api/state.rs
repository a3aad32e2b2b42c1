//! Application state for the AC4 engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::book::DutyBook;
use crate::config::ConfigLoader;
use crate::rates::RateSource;
use crate::storage::KeyValueStore;

/// The store type held by the API's duty book.
pub type SharedStore = Box<dyn KeyValueStore + Send>;

/// Shared application state.
///
/// Holds the loaded tariff configuration, the duty book behind a mutex so
/// that one request mutates it at a time, and the advisory rate source.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    book: Arc<Mutex<DutyBook<SharedStore>>>,
    rates: Arc<dyn RateSource>,
}

impl AppState {
    /// Creates the state, loading the duty book from `store`.
    pub fn new<S>(config: ConfigLoader, store: S, rates: Arc<dyn RateSource>) -> Self
    where
        S: KeyValueStore + Send + 'static,
    {
        let book = DutyBook::open(Box::new(store) as SharedStore, &config);
        Self {
            config: Arc::new(config),
            book: Arc::new(Mutex::new(book)),
            rates,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the duty book.
    pub fn book(&self) -> &Mutex<DutyBook<SharedStore>> {
        &self.book
    }

    /// Returns the rate source.
    pub fn rate_source(&self) -> &dyn RateSource {
        self.rates.as_ref()
    }
}
