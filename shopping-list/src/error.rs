//! Error types for the shopping-list container, its action hooks and forms.

use crate::types::ShoppingListId;
use basket_runtime::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A mutation the container refused
///
/// Both variants are contract violations by the caller: ids must be unique
/// and items may only target lists that exist. The container is left
/// exactly as it was when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerError {
    /// A list with this id is already in the container
    #[error("shopping list already exists.")]
    DuplicateList {
        /// The id that was already taken
        id: ShoppingListId,
    },

    /// No list with this id is in the container
    #[error("shopping list does not exist.")]
    ListNotFound {
        /// The id that was looked up
        id: ShoppingListId,
    },
}

impl ContainerError {
    /// The list id the failed operation referred to
    #[must_use]
    pub const fn id(&self) -> &ShoppingListId {
        match self {
            Self::DuplicateList { id } | Self::ListNotFound { id } => id,
        }
    }
}

/// Error returned by the store-bound action hooks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The container rejected the operation
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The store did not process the operation or never reported an outcome
    #[error("store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Validation failure on a form field
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// The list name was left empty
    #[error("Name is required")]
    NameRequired,

    /// The list name only contained whitespace
    #[error("Name cannot be blank")]
    NameBlank,

    /// The item name was left empty
    #[error("Item name is required")]
    ItemNameRequired,

    /// The item name only contained whitespace
    #[error("Item name cannot be blank")]
    ItemNameBlank,
}
