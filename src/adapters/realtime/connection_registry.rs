//! In-process connection registry.
//!
//! One instance is owned by the transport and injected wherever a
//! connection must be resolved to its user.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{ConnectionId, ConnectionRegistry, ConnectionRegistryError};

#[derive(Debug, Default)]
pub struct InMemoryConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, UserId>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live connections belonging to `user_id`.
    pub async fn connections_of(&self, user_id: &UserId) -> Vec<ConnectionId> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, owner)| *owner == user_id)
            .map(|(id, _)| *id)
            .collect()
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        user_id: &UserId,
    ) -> Result<(), ConnectionRegistryError> {
        let mut connections = self.connections.write().await;
        match connections.get(&connection_id) {
            Some(owner) if owner != user_id => {
                Err(ConnectionRegistryError::AlreadyRegistered(connection_id))
            }
            Some(_) => Ok(()),
            None => {
                connections.insert(connection_id, user_id.clone());
                tracing::debug!(
                    connection_id = %connection_id,
                    user_id = %user_id,
                    "Connection registered"
                );
                Ok(())
            }
        }
    }

    async fn unregister_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<UserId>, ConnectionRegistryError> {
        let removed = self.connections.write().await.remove(connection_id);
        if removed.is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
        Ok(removed)
    }

    async fn lookup(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<UserId>, ConnectionRegistryError> {
        Ok(self.connections.read().await.get(connection_id).cloned())
    }
}
