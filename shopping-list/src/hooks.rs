//! Store-bound actions and read accessors.
//!
//! Presentation code never touches the container directly. It reads
//! snapshots through the accessors here and mutates through the two store
//! operations, usually via a hook bound to one store instance.

use crate::config::AppConfig;
use crate::error::ActionError;
use crate::reducer::{ShoppingListEnvironment, ShoppingListReducer};
use crate::types::{
    CorrelationId, ShoppingList, ShoppingListAction, ShoppingListContainer, ShoppingListId,
    ShoppingListItem,
};
use basket_runtime::Store;
use futures::future::{BoxFuture, FutureExt};

/// Store holding one shopping-list container
pub type ShoppingListStore =
    Store<ShoppingListContainer, ShoppingListAction, ShoppingListEnvironment, ShoppingListReducer>;

/// Creates an independent store with an empty container
#[must_use]
pub fn new_store(env: ShoppingListEnvironment, config: &AppConfig) -> ShoppingListStore {
    Store::with_config(
        ShoppingListContainer::new(),
        ShoppingListReducer::new(),
        env,
        config.store_config(),
    )
}

/// Adds `list` to the store's container
///
/// # Errors
///
/// - [`ActionError::Container`] if a list with the same id already exists
/// - [`ActionError::Store`] if the store is shutting down or never answered
pub async fn add_shopping_list(
    store: &ShoppingListStore,
    list: ShoppingList,
) -> Result<(), ActionError> {
    dispatch(
        store,
        ShoppingListAction::AddShoppingList {
            correlation_id: CorrelationId::new(),
            list,
        },
    )
    .await
}

/// Appends `item` to the list `shopping_list_id` in the store's container
///
/// # Errors
///
/// - [`ActionError::Container`] if no list has that id
/// - [`ActionError::Store`] if the store is shutting down or never answered
pub async fn add_shopping_list_item(
    store: &ShoppingListStore,
    shopping_list_id: ShoppingListId,
    item: ShoppingListItem,
) -> Result<(), ActionError> {
    dispatch(
        store,
        ShoppingListAction::AddShoppingListItem {
            correlation_id: CorrelationId::new(),
            shopping_list_id,
            item,
        },
    )
    .await
}

/// Sends a command and waits for the reducer's answer in its reply slot
///
/// The slot is registered before sending, and the reducer answers it under
/// the store's write lock, so a slow caller cannot miss its own result.
async fn dispatch(
    store: &ShoppingListStore,
    command: ShoppingListAction,
) -> Result<(), ActionError> {
    let reply = store.environment().replies.register(command.correlation_id());

    store.send(command).await?;

    reply.recv(store.config().default_action_timeout).await??;
    Ok(())
}

/// Binds `op` to `store`
///
/// The returned closure calls `op` with its own clone of the store, so
/// callers only pass the operation's arguments. Whatever `op` returns,
/// errors included, is handed back unchanged.
pub fn create_store_action_hook<S, Args, F, Fut>(store: S, op: F) -> impl Fn(Args) -> Fut + Clone
where
    S: Clone,
    F: Fn(S, Args) -> Fut + Clone,
{
    move |args| op(store.clone(), args)
}

/// Hook adding a list to `store`
pub fn use_add_shopping_list(
    store: &ShoppingListStore,
) -> impl Fn(ShoppingList) -> BoxFuture<'static, Result<(), ActionError>> + Clone {
    create_store_action_hook(store.clone(), |store: ShoppingListStore, list: ShoppingList| {
        async move { add_shopping_list(&store, list).await }.boxed()
    })
}

/// Arguments of the add-item hook: target list and the item to append
pub type ItemArgs = (ShoppingListId, ShoppingListItem);

/// Hook appending an item to a list in `store`
pub fn use_add_shopping_list_item(
    store: &ShoppingListStore,
) -> impl Fn(ItemArgs) -> BoxFuture<'static, Result<(), ActionError>> + Clone {
    create_store_action_hook(
        store.clone(),
        |store: ShoppingListStore, (shopping_list_id, item): ItemArgs| {
            async move { add_shopping_list_item(&store, shopping_list_id, item).await }.boxed()
        },
    )
}

/// Snapshot of the whole container
pub async fn shopping_list_container(store: &ShoppingListStore) -> ShoppingListContainer {
    store.state(ShoppingListContainer::clone).await
}

/// Snapshot of a single list, `None` if there is no list with that id
pub async fn shopping_list(store: &ShoppingListStore, id: &ShoppingListId) -> Option<ShoppingList> {
    store.state(|container| container.get(id).cloned()).await
}
