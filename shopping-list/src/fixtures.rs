//! Generators for test data.
//!
//! Every field gets a random default. Override fields with struct update
//! syntax:
//!
//! ```
//! use shopping_list::fixtures::{generate_shopping_list, generate_shopping_list_item};
//! use shopping_list::ShoppingList;
//!
//! let list = ShoppingList {
//!     name: "Groceries".to_string(),
//!     item_list: vec![generate_shopping_list_item()],
//!     ..generate_shopping_list()
//! };
//! assert_eq!(list.status(), "0 / 1");
//! ```

use crate::types::{ShoppingList, ShoppingListId, ShoppingListItem};
use uuid::Uuid;

/// A list with a random id, a random name and no items
#[must_use]
pub fn generate_shopping_list() -> ShoppingList {
    ShoppingList::new(ShoppingListId::new(), random_name())
}

/// An unchecked item with a random name
#[must_use]
pub fn generate_shopping_list_item() -> ShoppingListItem {
    ShoppingListItem::new(random_name())
}

fn random_name() -> String {
    format!("name-{}", Uuid::new_v4())
}
