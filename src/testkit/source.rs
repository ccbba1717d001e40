//! Mock [`StatsSource`] for testing.
//!
//! [`ScriptedSource`] answers each account from a pre-loaded table.
//! Unscripted accounts get `default_response`, which starts as the
//! reference ships so a freshly built source rates every player.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::domain::reference_ships;
use crate::domain::ShipStats;
use crate::port::outbound::stats::{StatsError, StatsSource};

type Response = Result<Vec<ShipStats>, StatsError>;

/// A mock stats source with scripted per-account responses.
pub struct ScriptedSource {
    responses: HashMap<u64, Response>,
    default_response: Response,
    delays: HashMap<u64, Duration>,
    panics: HashSet<u64>,
    realms: Option<HashSet<String>>,
    calls: Arc<AtomicU32>,
    requested: Arc<Mutex<Vec<(String, u64)>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: Ok(reference_ships()),
            delays: HashMap::new(),
            panics: HashSet::new(),
            realms: None,
            calls: Arc::new(AtomicU32::new(0)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the response for one account.
    pub fn with_response(mut self, account_id: u64, response: Response) -> Self {
        self.responses.insert(account_id, response);
        self
    }

    /// Response for accounts without a scripted one.
    pub fn with_default_response(mut self, response: Response) -> Self {
        self.default_response = response;
        self
    }

    /// Delay the answer for one account.
    pub fn with_delay(mut self, account_id: u64, delay: Duration) -> Self {
        self.delays.insert(account_id, delay);
        self
    }

    /// Panic while fetching this account.
    pub fn with_panic(mut self, account_id: u64) -> Self {
        self.panics.insert(account_id);
        self
    }

    /// Restrict known realms; others fail with [`StatsError::UnknownRealm`].
    pub fn with_realms(mut self, realms: &[&str]) -> Self {
        self.realms = Some(realms.iter().map(|r| (*r).to_string()).collect());
        self
    }

    /// Shared counter of `fetch` calls.
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }

    /// Shared log of `(realm, account_id)` pairs in call order.
    pub fn requested(&self) -> Arc<Mutex<Vec<(String, u64)>>> {
        Arc::clone(&self.requested)
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsSource for ScriptedSource {
    async fn fetch(&self, realm: &str, account_id: u64) -> Result<Vec<ShipStats>, StatsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push((realm.to_string(), account_id));

        if let Some(realms) = &self.realms {
            if !realms.contains(realm) {
                return Err(StatsError::UnknownRealm(realm.to_string()));
            }
        }

        if let Some(delay) = self.delays.get(&account_id) {
            tokio::time::sleep(*delay).await;
        }

        if self.panics.contains(&account_id) {
            panic!("scripted panic for account {account_id}");
        }

        self.responses
            .get(&account_id)
            .unwrap_or(&self.default_response)
            .clone()
    }

    fn source_name(&self) -> &'static str {
        "Scripted"
    }
}
