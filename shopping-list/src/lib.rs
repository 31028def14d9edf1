//! Single-user shopping-list manager built on the Basket store.
//!
//! The container maps list ids to lists and only changes through two
//! commands: add a list, and append an item to an existing list. Both are
//! applied atomically by the store; a rejected command leaves the container
//! untouched and reports a [`ContainerError`] to the caller.
//!
//! - Action hooks bind the commands to one store instance
//! - [`ContainerWatcher`] notifies readers after every committed change
//! - Forms validate names before anything reaches the store
//! - Views and routes render container snapshots as text
//!
//! # Quick Start
//!
//! ```no_run
//! use shopping_list::{
//!     AppConfig, ShoppingList, ShoppingListEnvironment, ShoppingListId, ShoppingListItem,
//!     ListingView, hooks,
//! };
//! use basket_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = ShoppingListEnvironment::new(Arc::new(SystemClock));
//! let store = hooks::new_store(env, &AppConfig::default());
//!
//! // Create a list and add an item to it
//! let id = ShoppingListId::new();
//! hooks::add_shopping_list(&store, ShoppingList::new(id.clone(), "Groceries")).await?;
//! hooks::add_shopping_list_item(&store, id, ShoppingListItem::new("Milk")).await?;
//!
//! // Render the listing
//! let container = hooks::shopping_list_container(&store).await;
//! println!("{}", ListingView::from_container(&container));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod forms;
pub mod hooks;
pub mod observe;
pub mod reducer;
pub mod replies;
pub mod routing;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use error::{ActionError, ContainerError, FormError};
pub use forms::{AddShoppingListForm, AddShoppingListItemForm, SubmitOutcome};
pub use hooks::{ShoppingListStore, new_store};
pub use observe::{ContainerChange, ContainerWatcher};
pub use reducer::{ShoppingListEnvironment, ShoppingListReducer};
pub use replies::ReplyRegistry;
pub use routing::{Route, render_page};
pub use types::{
    CorrelationId, ShoppingList, ShoppingListAction, ShoppingListContainer, ShoppingListId,
    ShoppingListItem,
};
pub use views::{DetailView, ListingView};
