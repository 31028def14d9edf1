//! Read-only views over a container snapshot.
//!
//! Views are built from a snapshot and then rendered as plain text. They
//! never hold a reference to the store, so a reader rebuilds its view after
//! each change notification.

use crate::routing::Route;
use crate::types::{ShoppingListContainer, ShoppingListId};
use std::fmt;

/// Text shown when the container has no lists
pub const NO_SHOPPING_LISTS: &str = "No shopping lists.";

/// Text shown when a detail view targets an unknown id
pub const SHOPPING_LIST_NOT_FOUND: &str = "Shopping list not found.";

/// Text shown for a list without items
pub const NO_ITEMS: &str = "No items in shopping list.";

const STRIKETHROUGH_ON: &str = "\u{1b}[9m";
const STRIKETHROUGH_OFF: &str = "\u{1b}[29m";

/// One row of the listing table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingRow {
    /// List id
    pub id: ShoppingListId,
    /// List name, rendered as a link
    pub name: String,
    /// Target of the link
    pub link: String,
    /// `"{checked} / {total}"`
    pub status: String,
}

/// Table of all lists
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingView {
    /// The container has no lists
    Empty,
    /// One row per list, in insertion order
    Table(Vec<ListingRow>),
}

impl ListingView {
    /// Builds the listing for `container`
    #[must_use]
    pub fn from_container(container: &ShoppingListContainer) -> Self {
        if container.is_empty() {
            return Self::Empty;
        }

        let rows = container
            .lists()
            .map(|list| ListingRow {
                id: list.id.clone(),
                name: list.name.clone(),
                link: Route::ShoppingList(list.id.clone()).path(),
                status: list.status(),
            })
            .collect();

        Self::Table(rows)
    }

    /// Rows of the table, empty for [`ListingView::Empty`]
    #[must_use]
    pub fn rows(&self) -> &[ListingRow] {
        match self {
            Self::Empty => &[],
            Self::Table(rows) => rows,
        }
    }
}

impl fmt::Display for ListingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str(NO_SHOPPING_LISTS),
            Self::Table(rows) => {
                f.write_str("Name | Status")?;
                for row in rows {
                    write!(f, "\n{} <{}> | {}", row.name, row.link, row.status)?;
                }
                Ok(())
            },
        }
    }
}

/// One item of the detail view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailItem {
    /// Item name
    pub name: String,
    /// Checked items are struck through
    pub strikethrough: bool,
}

/// A single list with its items
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailView {
    /// No list has the requested id
    NotFound,
    /// The list was found
    List {
        /// List id
        id: ShoppingListId,
        /// Heading
        name: String,
        /// Items in insertion order
        items: Vec<DetailItem>,
    },
}

impl DetailView {
    /// Builds the detail view of list `id`
    #[must_use]
    pub fn from_container(container: &ShoppingListContainer, id: &ShoppingListId) -> Self {
        let Some(list) = container.get(id) else {
            return Self::NotFound;
        };

        Self::List {
            id: list.id.clone(),
            name: list.name.clone(),
            items: list
                .item_list
                .iter()
                .map(|item| DetailItem {
                    name: item.name.clone(),
                    strikethrough: item.checked,
                })
                .collect(),
        }
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::List { name, items, .. } = self else {
            return f.write_str(SHOPPING_LIST_NOT_FOUND);
        };

        f.write_str(name)?;
        if items.is_empty() {
            return write!(f, "\n{NO_ITEMS}");
        }
        for item in items {
            if item.strikethrough {
                write!(f, "\n- {STRIKETHROUGH_ON}{}{STRIKETHROUGH_OFF}", item.name)?;
            } else {
                write!(f, "\n- {}", item.name)?;
            }
        }
        Ok(())
    }
}
