//! Domain types for the shopping-list manager.
//!
//! A [`ShoppingListContainer`] maps list ids to lists. Lists are only ever
//! added, and a list's items only ever grow at the end, so both mutators
//! either apply completely or reject without touching anything.

use crate::error::ContainerError;
use basket_macros::Action;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

/// Opaque unique identifier of a shopping list
///
/// Callers supply ids and are responsible for their uniqueness;
/// [`ShoppingListId::new`] generates a random UUID string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingListId(String);

impl ShoppingListId {
    /// Creates a new random `ShoppingListId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShoppingListId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ShoppingListId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ShoppingListId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ShoppingListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry of a shopping list
///
/// Items have no id of their own; their position in the list is their identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Display name
    pub name: String,
    /// Whether the item has been picked up
    pub checked: bool,
}

impl ShoppingListItem {
    /// Creates an unchecked item
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked: false,
        }
    }
}

/// A named, ordered list of items
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Unique identifier
    pub id: ShoppingListId,
    /// Display name
    pub name: String,
    /// Items in insertion order
    #[serde(rename = "itemList")]
    pub item_list: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Creates a list without items
    #[must_use]
    pub fn new(id: ShoppingListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            item_list: Vec::new(),
        }
    }

    /// Number of checked items
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.item_list.iter().filter(|item| item.checked).count()
    }

    /// Completion summary, formatted as `"{checked} / {total}"`
    #[must_use]
    pub fn status(&self) -> String {
        format!("{} / {}", self.checked_count(), self.item_list.len())
    }
}

/// All shopping lists, keyed by id
///
/// Every key equals the `id` of the list stored under it. Iteration follows
/// insertion order. Deserializing rejects maps that break the key rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShoppingListContainer {
    lists: IndexMap<ShoppingListId, ShoppingList>,
}

impl ShoppingListContainer {
    /// Creates an empty container
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: IndexMap::new(),
        }
    }

    /// Inserts `list` under its own id
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::DuplicateList`] if the id is already present.
    pub fn add_shopping_list(&mut self, list: ShoppingList) -> Result<(), ContainerError> {
        if self.lists.contains_key(&list.id) {
            return Err(ContainerError::DuplicateList { id: list.id });
        }

        self.lists.insert(list.id.clone(), list);
        Ok(())
    }

    /// Appends `item` to the end of the list with id `shopping_list_id`
    ///
    /// Returns the position the item was stored at.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ListNotFound`] if no list has that id.
    pub fn add_shopping_list_item(
        &mut self,
        shopping_list_id: &ShoppingListId,
        item: ShoppingListItem,
    ) -> Result<usize, ContainerError> {
        let Some(list) = self.lists.get_mut(shopping_list_id) else {
            return Err(ContainerError::ListNotFound {
                id: shopping_list_id.clone(),
            });
        };

        list.item_list.push(item);
        Ok(list.item_list.len() - 1)
    }

    /// Returns a list by id
    #[must_use]
    pub fn get(&self, id: &ShoppingListId) -> Option<&ShoppingList> {
        self.lists.get(id)
    }

    /// Checks if a list exists
    #[must_use]
    pub fn contains(&self, id: &ShoppingListId) -> bool {
        self.lists.contains_key(id)
    }

    /// Returns the number of lists
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if there are no lists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Iterates lists in insertion order
    pub fn lists(&self) -> impl Iterator<Item = &ShoppingList> {
        self.lists.values()
    }
}

impl<'de> Deserialize<'de> for ShoppingListContainer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let lists = IndexMap::<ShoppingListId, ShoppingList>::deserialize(deserializer)?;

        if let Some((key, list)) = lists.iter().find(|(key, list)| **key != list.id) {
            return Err(de::Error::custom(format!(
                "list stored under `{key}` has id `{}`",
                list.id
            )));
        }

        Ok(Self { lists })
    }
}

/// Ties an outcome event to the command that caused it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Creates a new random `CorrelationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actions representing commands and their outcome events
///
/// Commands mutate the container. Each command produces exactly one outcome
/// event carrying the same correlation id; events never change state.
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShoppingListAction {
    // ========== Commands ==========
    /// Command: Add a new list
    #[command]
    AddShoppingList {
        /// Request identifier
        correlation_id: CorrelationId,
        /// The list to insert
        list: ShoppingList,
    },

    /// Command: Append an item to an existing list
    #[command]
    AddShoppingListItem {
        /// Request identifier
        correlation_id: CorrelationId,
        /// Target list
        shopping_list_id: ShoppingListId,
        /// The item to append
        item: ShoppingListItem,
    },

    // ========== Events ==========
    /// Event: A list was added
    #[event]
    ShoppingListAdded {
        /// Request identifier
        correlation_id: CorrelationId,
        /// Id of the new list
        id: ShoppingListId,
        /// When the list was added
        added_at: DateTime<Utc>,
    },

    /// Event: An item was appended
    #[event]
    ShoppingListItemAdded {
        /// Request identifier
        correlation_id: CorrelationId,
        /// List the item was appended to
        shopping_list_id: ShoppingListId,
        /// Index of the new item
        position: usize,
        /// When the item was added
        added_at: DateTime<Utc>,
    },

    /// Event: A command was rejected by the container
    #[event]
    CommandRejected {
        /// Request identifier
        correlation_id: CorrelationId,
        /// Why the command was rejected
        error: ContainerError,
    },
}

impl ShoppingListAction {
    /// The correlation id carried by every action
    #[must_use]
    pub const fn correlation_id(&self) -> CorrelationId {
        match self {
            Self::AddShoppingList { correlation_id, .. }
            | Self::AddShoppingListItem { correlation_id, .. }
            | Self::ShoppingListAdded { correlation_id, .. }
            | Self::ShoppingListItemAdded { correlation_id, .. }
            | Self::CommandRejected { correlation_id, .. } => *correlation_id,
        }
    }
}
