//! In-process gateway backed by a map.
//!
//! Used by the smoke CLI and by tests that need a well-behaved service.
//! Ids for new documents are generated like client node ids.

use crate::gateway::{GatewayError, GatewayResult, MaquetteGateway};
use crate::model::id::NodeId;
use crate::model::maquette::Maquette;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Map-backed `MaquetteGateway`.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    documents: Mutex<BTreeMap<NodeId, Maquette>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway pre-seeded with persisted documents.
    pub fn with_documents(documents: impl IntoIterator<Item = Maquette>) -> Self {
        let documents = documents
            .into_iter()
            .map(|document| (document.id.clone(), document))
            .collect();
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// Returns the persisted copy of one document.
    pub fn stored(&self, id: &NodeId) -> Option<Maquette> {
        self.documents().ok()?.get(id).cloned()
    }

    fn documents(&self) -> GatewayResult<MutexGuard<'_, BTreeMap<NodeId, Maquette>>> {
        self.documents
            .lock()
            .map_err(|_| GatewayError::Unavailable("in-memory store poisoned".to_string()))
    }

    fn set_lock(&self, id: &NodeId, in_production: bool) -> GatewayResult<Maquette> {
        let mut documents = self.documents()?;
        let document = documents
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        document.in_production = in_production;
        Ok(document.clone())
    }
}

#[async_trait]
impl MaquetteGateway for InMemoryGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Maquette>> {
        Ok(self.documents()?.values().cloned().collect())
    }

    async fn save(&self, id: &NodeId, maquette: &Maquette) -> GatewayResult<Maquette> {
        let mut documents = self.documents()?;
        let stored = documents
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        if stored.in_production {
            return Err(GatewayError::rejected(
                "locked",
                format!("maquette {id} is in production"),
            ));
        }
        *stored = maquette.clone();
        Ok(stored.clone())
    }

    async fn save_new(&self, maquette: &Maquette) -> GatewayResult<Maquette> {
        let mut persisted = maquette.clone();
        persisted.id = NodeId::generate();
        self.documents()?
            .insert(persisted.id.clone(), persisted.clone());
        Ok(persisted)
    }

    async fn lock(&self, id: &NodeId) -> GatewayResult<Maquette> {
        self.set_lock(id, true)
    }

    async fn unlock(&self, id: &NodeId) -> GatewayResult<Maquette> {
        self.set_lock(id, false)
    }

    async fn delete_by_id(&self, id: &NodeId) -> GatewayResult<()> {
        self.documents()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::NotFound(id.clone()))
    }
}
