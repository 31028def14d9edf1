//! Path routing for the two pages.

use crate::forms::{ITEM_NAME_LABEL, ITEM_SUBMIT_LABEL, LIST_NAME_LABEL, LIST_SUBMIT_LABEL};
use crate::types::{ShoppingListContainer, ShoppingListId};
use crate::views::{DetailView, ListingView};

const SHOPPING_LIST_PREFIX: &str = "/shopping-list/";

/// A page of the application
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: the create form and the listing
    Home,
    /// `/shopping-list/:id`: one list and its item form
    ShoppingList(ShoppingListId),
}

impl Route {
    /// Parses a path, `None` if it matches no page
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        if path == "/" {
            return Some(Self::Home);
        }

        let id = path.strip_prefix(SHOPPING_LIST_PREFIX)?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Self::ShoppingList(ShoppingListId::from(id)))
    }

    /// Path of this page
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::ShoppingList(id) => format!("{SHOPPING_LIST_PREFIX}{id}"),
        }
    }
}

/// Renders the page at `route` from a container snapshot
#[must_use]
pub fn render_page(container: &ShoppingListContainer, route: &Route) -> String {
    match route {
        Route::Home => format!(
            "Home\n\nCreate\n{LIST_NAME_LABEL}: ____ [{LIST_SUBMIT_LABEL}]\n\nList\n{}",
            ListingView::from_container(container)
        ),
        Route::ShoppingList(id) => match DetailView::from_container(container, id) {
            detail @ DetailView::NotFound => detail.to_string(),
            detail => format!("{detail}\n\n{ITEM_NAME_LABEL}: ____ [{ITEM_SUBMIT_LABEL}]"),
        },
    }
}
