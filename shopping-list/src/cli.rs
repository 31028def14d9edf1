//! Line-oriented front end.
//!
//! Each input line is one [`Command`]. Mutations go through the same forms
//! a graphical front end would use, so blank names are rejected before they
//! reach the store.

use crate::error::FormError;
use crate::forms::{AddShoppingListForm, AddShoppingListItemForm, SubmitOutcome};
use crate::hooks::{
    ShoppingListStore, shopping_list_container, use_add_shopping_list, use_add_shopping_list_item,
};
use crate::routing::{Route, render_page};
use crate::types::ShoppingListId;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  help                    show this text
  new <name>              create a shopping list
  ls                      show all shopping lists
  open <id|path>          show a shopping list (or / for the listing)
  add <id> <item name>    append an item to a shopping list
  dump                    print all lists as JSON
  quit                    exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print usage
    Help,
    /// Submit the create-list form with this name
    New(String),
    /// Show the listing
    Ls,
    /// Show a page
    Open(Route),
    /// Submit the add-item form of a list
    Add {
        /// Target list
        shopping_list_id: ShoppingListId,
        /// Item name as typed
        name: String,
    },
    /// Print the container as JSON
    Dump,
    /// Leave the loop
    Quit,
}

/// An input line that is not a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command word
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    /// A required argument was left out
    #[error("usage: {0}")]
    Usage(&'static str),

    /// The path matches no page
    #[error("no page at `{0}`")]
    UnknownPath(String),
}

impl Command {
    /// Parses one input line
    ///
    /// Names keep their whitespace so the forms can tell blank names apart.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for unknown words, missing arguments and
    /// unknown paths.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        match word {
            "help" | "?" => Ok(Self::Help),
            "new" => Ok(Self::New(rest.to_string())),
            "ls" => Ok(Self::Ls),
            "open" => {
                let target = rest.trim();
                if target.is_empty() {
                    return Err(CommandError::Usage("open <id|path>"));
                }
                if target.starts_with('/') {
                    Route::parse(target)
                        .map(Self::Open)
                        .ok_or_else(|| CommandError::UnknownPath(target.to_string()))
                } else {
                    Ok(Self::Open(Route::ShoppingList(ShoppingListId::from(target))))
                }
            },
            "add" => {
                let rest = rest.trim_start();
                let (id, name) = rest.split_once(' ').unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err(CommandError::Usage("add <id> <item name>"));
                }
                Ok(Self::Add {
                    shopping_list_id: ShoppingListId::from(id),
                    name: name.to_string(),
                })
            },
            "dump" => Ok(Self::Dump),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Reads commands from `input` until `quit` or end of input
///
/// # Errors
///
/// Returns an error if reading input, writing output or serializing the
/// container fails. Rejected commands are reported on `output` instead.
pub async fn run<R, W>(store: &ShoppingListStore, input: R, output: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut list_form = AddShoppingListForm::new(use_add_shopping_list(store));
    let add_item = use_add_shopping_list_item(store);
    let mut route = Route::Home;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(error) => {
                emit(output, &error.to_string()).await?;
                continue;
            },
        };
        tracing::debug!(?command, "Command parsed");

        match command {
            Command::Help => emit(output, HELP).await?,
            Command::Quit => break,
            Command::Ls => {
                route = Route::Home;
                show(store, &route, output).await?;
            },
            Command::Open(target) => {
                route = target;
                show(store, &route, output).await?;
            },
            Command::New(name) => {
                list_form.set_name(name);
                match list_form.submit().await {
                    Ok(SubmitOutcome::Submitted(id)) => {
                        route = Route::Home;
                        show(store, &route, output).await?;
                        emit(output, &format!("Created {}", Route::ShoppingList(id).path())).await?;
                    },
                    Ok(SubmitOutcome::Invalid(error)) => invalid(output, error).await?,
                    Err(error) => emit(output, &format!("error: {error}")).await?,
                }
            },
            Command::Add {
                shopping_list_id,
                name,
            } => {
                let mut form =
                    AddShoppingListItemForm::new(shopping_list_id.clone(), add_item.clone());
                form.set_name(name);
                match form.submit().await {
                    Ok(SubmitOutcome::Submitted(())) => {
                        route = Route::ShoppingList(shopping_list_id);
                        show(store, &route, output).await?;
                    },
                    Ok(SubmitOutcome::Invalid(error)) => invalid(output, error).await?,
                    Err(error) => emit(output, &format!("error: {error}")).await?,
                }
            },
            Command::Dump => {
                let container = shopping_list_container(store).await;
                emit(output, &serde_json::to_string_pretty(&container)?).await?;
            },
        }
    }

    Ok(())
}

async fn show<W>(store: &ShoppingListStore, route: &Route, output: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let container = shopping_list_container(store).await;
    emit(output, &render_page(&container, route)).await
}

async fn invalid<W>(output: &mut W, error: FormError) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    emit(output, &format!("invalid: {error}")).await
}

async fn emit<W>(output: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::ActionError;
    use crate::hooks::{add_shopping_list, new_store};
    use crate::reducer::ShoppingListEnvironment;
    use crate::types::{ShoppingList, ShoppingListItem};
    use basket_testing::test_clock;
    use std::sync::Arc;

    fn test_store() -> ShoppingListStore {
        new_store(ShoppingListEnvironment::new(Arc::new(test_clock())), &AppConfig::default())
    }

    async fn session(store: &ShoppingListStore, input: &str) -> String {
        let mut output = Vec::new();
        let result = run(store, input.as_bytes(), &mut output).await;
        assert!(result.is_ok(), "session failed: {result:?}");
        String::from_utf8_lossy(&output).into_owned()
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("ls\r\n"), Ok(Command::Ls));
        assert_eq!(Command::parse("  dump"), Ok(Command::Dump));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_keeps_names_as_typed() {
        assert_eq!(Command::parse("new Weekly shop"), Ok(Command::New("Weekly shop".to_string())));
        assert_eq!(Command::parse("new    "), Ok(Command::New("   ".to_string())));
        assert_eq!(Command::parse("new"), Ok(Command::New(String::new())));
        assert_eq!(
            Command::parse("add g1 Oat milk"),
            Ok(Command::Add {
                shopping_list_id: ShoppingListId::from("g1"),
                name: "Oat milk".to_string()
            })
        );
    }

    #[test]
    fn parse_open_targets() {
        assert_eq!(Command::parse("open /"), Ok(Command::Open(Route::Home)));
        assert_eq!(
            Command::parse("open /shopping-list/g1"),
            Ok(Command::Open(Route::ShoppingList(ShoppingListId::from("g1"))))
        );
        assert_eq!(
            Command::parse("open g1"),
            Ok(Command::Open(Route::ShoppingList(ShoppingListId::from("g1"))))
        );
        assert_eq!(
            Command::parse("open /nowhere"),
            Err(CommandError::UnknownPath("/nowhere".to_string()))
        );
        assert_eq!(Command::parse("open"), Err(CommandError::Usage("open <id|path>")));
    }

    #[test]
    fn parse_rejects_unknown_words() {
        assert_eq!(Command::parse("delete g1"), Err(CommandError::Unknown("delete".to_string())));
        assert_eq!(Command::parse("add"), Err(CommandError::Usage("add <id> <item name>")));
    }

    #[tokio::test]
    async fn new_list_shows_up_in_listing() {
        let store = test_store();

        let output = session(&store, "new Groceries\nls\nquit\n").await;

        assert!(output.contains("Groceries </shopping-list/"));
        assert!(output.contains("| 0 / 0"));
        assert!(output.contains("Created /shopping-list/"));
        assert_eq!(shopping_list_container(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn blank_list_name_is_rejected() {
        let store = test_store();

        let output = session(&store, "new   \nls\n").await;

        assert_eq!(
            output,
            "invalid: Name cannot be blank\n\
             Home\n\nCreate\nName: ____ [Submit]\n\nList\nNo shopping lists.\n"
        );
    }

    #[tokio::test]
    async fn add_item_renders_the_list() -> Result<(), ActionError> {
        let store = test_store();
        let groceries = ShoppingList::new(ShoppingListId::from("g1"), "Groceries");
        add_shopping_list(&store, groceries).await?;

        let output = session(&store, "add g1 Milk\nadd missing Bread\n").await;

        assert!(output.starts_with("Groceries\n- Milk\n"));
        assert!(output.ends_with("error: shopping list does not exist.\n"));
        let list = crate::hooks::shopping_list(&store, &ShoppingListId::from("g1")).await;
        assert_eq!(list.map(|l| l.item_list), Some(vec![ShoppingListItem::new("Milk")]));
        Ok(())
    }

    #[tokio::test]
    async fn dump_prints_json() -> Result<(), ActionError> {
        let store = test_store();
        let groceries = ShoppingList::new(ShoppingListId::from("g1"), "Groceries");
        add_shopping_list(&store, groceries).await?;

        let output = session(&store, "dump\n").await;

        let json: serde_json::Value = serde_json::from_str(&output).unwrap_or_default();
        assert_eq!(json["g1"]["name"], "Groceries");
        assert_eq!(json["g1"]["itemList"], serde_json::json!([]));
        Ok(())
    }
}
