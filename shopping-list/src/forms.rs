//! Forms for creating lists and items.
//!
//! A form owns its input text and the error from its last submission.
//! Names are checked here, never in the container: a submission only
//! reaches the bound action when the name is non-empty and not just
//! whitespace.

use crate::error::{ActionError, FormError};
use crate::hooks::ItemArgs;
use crate::types::{ShoppingList, ShoppingListId, ShoppingListItem};
use std::future::Future;

/// Label of the list name field
pub const LIST_NAME_LABEL: &str = "Name";
/// Submit button of the list form
pub const LIST_SUBMIT_LABEL: &str = "Submit";
/// Label of the item name field
pub const ITEM_NAME_LABEL: &str = "Item name";
/// Submit button of the item form
pub const ITEM_SUBMIT_LABEL: &str = "Add item";

/// Result of a submission that did not fail in the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// The action ran and the input was cleared
    Submitted(T),
    /// Validation failed; nothing was sent
    Invalid(FormError),
}

/// Checks a name field, keeping the text as entered
fn validate_name(input: &str, required: FormError, blank: FormError) -> Result<&str, FormError> {
    if input.is_empty() {
        return Err(required);
    }
    if input.trim().is_empty() {
        return Err(blank);
    }
    Ok(input)
}

/// Form creating a new shopping list
#[derive(Clone, Debug)]
pub struct AddShoppingListForm<H> {
    name: String,
    error: Option<FormError>,
    add_shopping_list: H,
}

impl<H, Fut> AddShoppingListForm<H>
where
    H: Fn(ShoppingList) -> Fut,
    Fut: Future<Output = Result<(), ActionError>>,
{
    /// Creates an empty form submitting through `add_shopping_list`
    pub const fn new(add_shopping_list: H) -> Self {
        Self {
            name: String::new(),
            error: None,
            add_shopping_list,
        }
    }

    /// Current input
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the input
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Error shown under the field, if the last submission was invalid
    #[must_use]
    pub const fn error(&self) -> Option<FormError> {
        self.error
    }

    /// Validates and submits the input as a new empty list
    ///
    /// On success the new list's id is returned and the input is cleared.
    ///
    /// # Errors
    ///
    /// Returns the action's error unchanged; the input is kept.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<ShoppingListId>, ActionError> {
        let name = match validate_name(&self.name, FormError::NameRequired, FormError::NameBlank) {
            Ok(name) => name.to_string(),
            Err(error) => {
                tracing::debug!(%error, "Shopping list form rejected input");
                self.error = Some(error);
                return Ok(SubmitOutcome::Invalid(error));
            },
        };
        self.error = None;

        let id = ShoppingListId::new();
        (self.add_shopping_list)(ShoppingList::new(id.clone(), name)).await?;

        self.name.clear();
        Ok(SubmitOutcome::Submitted(id))
    }
}

/// Form appending an item to one list
#[derive(Clone, Debug)]
pub struct AddShoppingListItemForm<H> {
    shopping_list_id: ShoppingListId,
    name: String,
    error: Option<FormError>,
    add_shopping_list_item: H,
}

impl<H, Fut> AddShoppingListItemForm<H>
where
    H: Fn(ItemArgs) -> Fut,
    Fut: Future<Output = Result<(), ActionError>>,
{
    /// Creates an empty form for the list `shopping_list_id`
    pub const fn new(shopping_list_id: ShoppingListId, add_shopping_list_item: H) -> Self {
        Self {
            shopping_list_id,
            name: String::new(),
            error: None,
            add_shopping_list_item,
        }
    }

    /// List this form appends to
    #[must_use]
    pub const fn shopping_list_id(&self) -> &ShoppingListId {
        &self.shopping_list_id
    }

    /// Current input
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the input
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Error shown under the field, if the last submission was invalid
    #[must_use]
    pub const fn error(&self) -> Option<FormError> {
        self.error
    }

    /// Validates and submits the input as an unchecked item
    ///
    /// # Errors
    ///
    /// Returns the action's error unchanged; the input is kept.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<()>, ActionError> {
        let validated =
            validate_name(&self.name, FormError::ItemNameRequired, FormError::ItemNameBlank);
        let name = match validated {
            Ok(name) => name.to_string(),
            Err(error) => {
                tracing::debug!(
                    %error,
                    shopping_list_id = %self.shopping_list_id,
                    "Item form rejected input"
                );
                self.error = Some(error);
                return Ok(SubmitOutcome::Invalid(error));
            },
        };
        self.error = None;

        (self.add_shopping_list_item)((self.shopping_list_id.clone(), ShoppingListItem::new(name)))
            .await?;

        self.name.clear();
        Ok(SubmitOutcome::Submitted(()))
    }
}
