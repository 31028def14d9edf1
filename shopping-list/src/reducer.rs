//! Reducer logic for the shopping-list container.
//!
//! Commands are applied to the container while the store holds its write
//! lock. The result goes straight to the caller's reply slot, and a single
//! outcome event reports it to observers through the store's action
//! broadcast. Outcome events are no-ops when they come back into the reducer.

use crate::replies::ReplyRegistry;
use crate::types::{ShoppingListAction, ShoppingListContainer};
use basket_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Environment dependencies for the shopping-list reducer
#[derive(Clone)]
pub struct ShoppingListEnvironment {
    /// Clock for timestamping outcome events
    pub clock: Arc<dyn Clock>,
    /// Callers waiting for the result of a command
    pub replies: ReplyRegistry,
}

impl ShoppingListEnvironment {
    /// Creates a new `ShoppingListEnvironment` with no pending replies
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            replies: ReplyRegistry::new(),
        }
    }
}

impl std::fmt::Debug for ShoppingListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingListEnvironment")
            .field("replies", &self.replies)
            .finish_non_exhaustive()
    }
}

/// Reducer for the shopping-list container
#[derive(Clone, Debug, Default)]
pub struct ShoppingListReducer;

impl ShoppingListReducer {
    /// Creates a new `ShoppingListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ShoppingListReducer {
    type State = ShoppingListContainer;
    type Action = ShoppingListAction;
    type Environment = ShoppingListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let outcome = match action {
            // ========== Commands ==========
            ShoppingListAction::AddShoppingList {
                correlation_id,
                list,
            } => {
                let id = list.id.clone();
                match state.add_shopping_list(list) {
                    Ok(()) => {
                        tracing::debug!(shopping_list_id = %id, "Shopping list added");
                        ShoppingListAction::ShoppingListAdded {
                            correlation_id,
                            id,
                            added_at: env.clock.now(),
                        }
                    },
                    Err(error) => {
                        tracing::warn!(shopping_list_id = %id, %error, "Rejected shopping list");
                        ShoppingListAction::CommandRejected {
                            correlation_id,
                            error,
                        }
                    },
                }
            },

            ShoppingListAction::AddShoppingListItem {
                correlation_id,
                shopping_list_id,
                item,
            } => match state.add_shopping_list_item(&shopping_list_id, item) {
                Ok(position) => {
                    tracing::debug!(%shopping_list_id, position, "Shopping list item added");
                    ShoppingListAction::ShoppingListItemAdded {
                        correlation_id,
                        shopping_list_id,
                        position,
                        added_at: env.clock.now(),
                    }
                },
                Err(error) => {
                    tracing::warn!(%shopping_list_id, %error, "Rejected shopping list item");
                    ShoppingListAction::CommandRejected {
                        correlation_id,
                        error,
                    }
                },
            },

            // ========== Events ==========
            // Already applied by the command that produced them
            ShoppingListAction::ShoppingListAdded { .. }
            | ShoppingListAction::ShoppingListItemAdded { .. }
            | ShoppingListAction::CommandRejected { .. } => return SmallVec::new(),
        };

        let result = match &outcome {
            ShoppingListAction::CommandRejected { error, .. } => Err(error.clone()),
            _ => Ok(()),
        };
        env.replies.resolve(outcome.correlation_id(), result);

        smallvec![Effect::emit(outcome)]
    }
}
