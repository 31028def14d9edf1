//! Change notification for container readers.
//!
//! A [`ContainerWatcher`] hears about every successful mutation after it
//! has been committed, so a reader that re-reads the container on
//! notification always sees the change.

use crate::hooks::ShoppingListStore;
use crate::types::{ShoppingListAction, ShoppingListId};
use futures::Stream;
use std::pin::Pin;
use tokio::sync::broadcast;

/// Stream of container changes
pub type ChangeStream = Pin<Box<dyn Stream<Item = ContainerChange> + Send>>;

/// A committed mutation of the container
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerChange {
    /// A list was inserted
    ListAdded {
        /// Id of the new list
        id: ShoppingListId,
    },
    /// An item was appended to a list
    ItemAdded {
        /// List that grew
        shopping_list_id: ShoppingListId,
        /// Index of the new item
        position: usize,
    },
}

impl ContainerChange {
    /// The change an action reports, if any
    ///
    /// Commands and rejections report nothing.
    #[must_use]
    pub fn from_action(action: &ShoppingListAction) -> Option<Self> {
        match action {
            ShoppingListAction::ShoppingListAdded { id, .. } => {
                Some(Self::ListAdded { id: id.clone() })
            },
            ShoppingListAction::ShoppingListItemAdded {
                shopping_list_id,
                position,
                ..
            } => Some(Self::ItemAdded {
                shopping_list_id: shopping_list_id.clone(),
                position: *position,
            }),
            _ => None,
        }
    }

    /// Id of the list that changed
    #[must_use]
    pub const fn shopping_list_id(&self) -> &ShoppingListId {
        match self {
            Self::ListAdded { id } => id,
            Self::ItemAdded {
                shopping_list_id, ..
            } => shopping_list_id,
        }
    }
}

/// Subscription to a store's container changes
#[derive(Debug)]
pub struct ContainerWatcher {
    actions: broadcast::Receiver<ShoppingListAction>,
}

impl ContainerWatcher {
    /// Starts watching `store`
    ///
    /// Only changes committed after this call are reported.
    #[must_use]
    pub fn new(store: &ShoppingListStore) -> Self {
        Self {
            actions: store.subscribe_actions(),
        }
    }

    /// Waits for the next change
    ///
    /// Returns `None` once every handle to the store is gone. If the watcher
    /// falls too far behind, the missed changes are logged and skipped.
    pub async fn changed(&mut self) -> Option<ContainerChange> {
        loop {
            match self.actions.recv().await {
                Ok(action) => {
                    if let Some(change) = ContainerChange::from_action(&action) {
                        return Some(change);
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Container watcher lagged, changes skipped");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Turns the watcher into a stream of changes
    #[must_use]
    pub fn into_stream(self) -> ChangeStream {
        let stream = async_stream::stream! {
            let mut watcher = self;
            while let Some(change) = watcher.changed().await {
                yield change;
            }
        };

        Box::pin(stream)
    }
}
