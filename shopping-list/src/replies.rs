//! Per-command reply slots.
//!
//! A caller registers interest in a correlation id before sending its
//! command. The reducer resolves that slot while the store still holds its
//! write lock, so an applied command always reaches its caller as a success
//! no matter how far behind the action broadcast the caller is.

use crate::error::ContainerError;
use crate::types::CorrelationId;
use basket_runtime::StoreError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;

/// What the reducer did with one command
pub type CommandResult = Result<(), ContainerError>;

type Slots = HashMap<CorrelationId, oneshot::Sender<CommandResult>>;

/// Pending replies keyed by correlation id
///
/// Clones share the same slots.
#[derive(Clone, Default)]
pub struct ReplyRegistry {
    pending: Arc<Mutex<Slots>>,
}

impl ReplyRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a slot for `correlation_id`
    ///
    /// The slot is removed again when the returned [`PendingReply`] is
    /// dropped, answered or not.
    #[must_use]
    pub fn register(&self, correlation_id: CorrelationId) -> PendingReply {
        let (sender, receiver) = oneshot::channel();
        self.slots().insert(correlation_id, sender);

        PendingReply {
            correlation_id,
            receiver,
            registry: self.clone(),
        }
    }

    /// Answers the slot for `correlation_id`
    ///
    /// Returns false if nobody is waiting, for example when the command was
    /// sent straight to the store without registering.
    pub fn resolve(&self, correlation_id: CorrelationId, result: CommandResult) -> bool {
        let Some(sender) = self.slots().remove(&correlation_id) else {
            return false;
        };
        sender.send(result).is_ok()
    }

    /// Number of callers still waiting
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        // The map stays consistent even if a holder panicked
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ReplyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyRegistry")
            .field("pending", &self.pending_count())
            .finish()
    }
}

/// Receiving end of one registered slot
#[derive(Debug)]
pub struct PendingReply {
    correlation_id: CorrelationId,
    receiver: oneshot::Receiver<CommandResult>,
    registry: ReplyRegistry,
}

impl PendingReply {
    /// Waits up to `timeout` for the reducer's answer
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`] if no answer arrived in time
    /// - [`StoreError::ChannelClosed`] if the slot was dropped unanswered
    pub async fn recv(mut self, timeout: Duration) -> Result<CommandResult, StoreError> {
        match tokio::time::timeout(timeout, &mut self.receiver).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(StoreError::ChannelClosed),
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        self.registry.slots().remove(&self.correlation_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShoppingListId;

    const WAIT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn resolved_slot_delivers_the_result() {
        let registry = ReplyRegistry::new();
        let correlation_id = CorrelationId::new();
        let reply = registry.register(correlation_id);

        assert!(registry.resolve(correlation_id, Ok(())));
        assert_eq!(reply.recv(WAIT).await, Ok(Ok(())));
        assert_eq!(registry.pending_count(), 0);
    }

    #[tokio::test]
    async fn rejection_is_delivered_as_is() {
        let registry = ReplyRegistry::new();
        let correlation_id = CorrelationId::new();
        let reply = registry.register(correlation_id);
        let error = ContainerError::ListNotFound {
            id: ShoppingListId::from("missing"),
        };

        registry.resolve(correlation_id, Err(error.clone()));

        assert_eq!(reply.recv(WAIT).await, Ok(Err(error)));
    }

    #[tokio::test]
    async fn unanswered_slot_times_out_and_is_removed() {
        let registry = ReplyRegistry::new();
        let correlation_id = CorrelationId::new();

        let result = registry.register(correlation_id).recv(WAIT).await;

        assert_eq!(result, Err(StoreError::Timeout));
        assert_eq!(registry.pending_count(), 0);
        assert!(!registry.resolve(correlation_id, Ok(())));
    }

    #[test]
    fn dropping_a_reply_frees_its_slot() {
        let registry = ReplyRegistry::new();
        let reply = registry.register(CorrelationId::new());
        assert_eq!(registry.pending_count(), 1);

        drop(reply);

        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn resolving_an_unknown_id_is_a_no_op() {
        let registry = ReplyRegistry::new();
        assert!(!registry.resolve(CorrelationId::new(), Ok(())));
    }
}
