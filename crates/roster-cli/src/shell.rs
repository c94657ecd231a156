//! Interactive session: one command per line.
//!
//! The loop waits on three things at once: the next input line, the
//! debounced search text settling, and the store finishing a load. Each of
//! them re-renders the page.

use std::io;
use std::num::NonZeroUsize;

use roster_core::{SortKey, UserId};
use roster_runtime::{ExportOutcome, ExportScope};
use tokio::task::JoinHandle;

use crate::directory::{CopyField, Directory};
use crate::error::AppError;
use crate::views::{render_detail, render_facets, render_page};

pub const HELP: &str = "\
Commands:
  search <text>            apply search text now (empty clears)
  type <text>              search as you type; applies after a pause
  company <name>           exact company filter (empty clears)
  city <name>              exact city filter (empty clears)
  clear-filters            drop search text and filters
  sort <key>               name, username, email, phone, website, company, city
                           (repeat to flip direction)
  page first|prev|next|last|<n>
  size <n>                 rows per page
  view                     toggle grid / table
  select <id>              toggle selection
  select-all               select every filtered row
  unselect-all             clear the selection
  show <id>                user details
  copy email|phone <id>    copy a field to the clipboard
  export [selected|<id>]   export filtered, selected, or one user to CSV
  facets                   list companies and cities
  list                     redraw the current page
  reload                   fetch users again
  help                     this text
  quit                     exit";

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMove {
    First,
    Prev,
    Next,
    Last,
    To(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Type(String),
    Company(String),
    City(String),
    ClearFilters,
    Sort(SortKey),
    Page(PageMove),
    Size(NonZeroUsize),
    View,
    Select(UserId),
    SelectAll,
    UnselectAll,
    Show(UserId),
    Copy(CopyField, UserId),
    Export(ExportScope),
    Facets,
    List,
    Reload,
    Help,
    Quit,
}

fn parse_id(arg: &str) -> Result<UserId, String> {
    arg.trim()
        .parse::<u64>()
        .map(UserId)
        .map_err(|_| format!("invalid user id '{}'", arg.trim()))
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "type" | "t" => ShellCommand::Type(rest.to_string()),
        "company" => ShellCommand::Company(rest.to_string()),
        "city" => ShellCommand::City(rest.to_string()),
        "clear-filters" | "clear" => ShellCommand::ClearFilters,
        "sort" => ShellCommand::Sort(rest.parse()?),
        "page" | "p" => ShellCommand::Page(match rest.to_ascii_lowercase().as_str() {
            "first" => PageMove::First,
            "prev" => PageMove::Prev,
            "next" | "" => PageMove::Next,
            "last" => PageMove::Last,
            n => PageMove::To(
                n.parse()
                    .map_err(|_| format!("invalid page '{}'", rest))?,
            ),
        }),
        "n" | "next" => ShellCommand::Page(PageMove::Next),
        "prev" => ShellCommand::Page(PageMove::Prev),
        "size" => ShellCommand::Size(
            rest.parse()
                .map_err(|_| format!("invalid page size '{}'", rest))?,
        ),
        "view" | "v" => ShellCommand::View,
        "select" => ShellCommand::Select(parse_id(rest)?),
        "select-all" => ShellCommand::SelectAll,
        "unselect-all" => ShellCommand::UnselectAll,
        "show" => ShellCommand::Show(parse_id(rest)?),
        "copy" => {
            let (field, id) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: copy email|phone <id>".to_string())?;
            ShellCommand::Copy(field.parse()?, parse_id(id)?)
        }
        "export" => ShellCommand::Export(match rest {
            "" | "all" => ExportScope::AllFiltered,
            "selected" => ExportScope::SelectedOnly,
            id => ExportScope::Single(parse_id(id)?),
        }),
        "facets" => ShellCommand::Facets,
        "list" | "ls" => ShellCommand::List,
        "reload" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(command))
}

// =============================================================================
// Execution
// =============================================================================

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the page.
    Render,
    /// Print this text.
    Text(String),
    /// Nothing to print.
    Silent,
    Quit,
}

/// Apply one command to the directory.
pub async fn execute(directory: &mut Directory, command: ShellCommand) -> Reply {
    match command {
        ShellCommand::Search(text) => directory.set_search(text),
        ShellCommand::Type(text) => {
            directory.type_search(text);
            return Reply::Silent;
        }
        ShellCommand::Company(name) => directory.set_company_filter(name),
        ShellCommand::City(name) => directory.set_city_filter(name),
        ShellCommand::ClearFilters => directory.clear_filters(),
        ShellCommand::Sort(key) => {
            directory.toggle_sort(key);
        }
        ShellCommand::Page(PageMove::First) => directory.first_page(),
        ShellCommand::Page(PageMove::Prev) => directory.prev_page(),
        ShellCommand::Page(PageMove::Next) => directory.next_page(),
        ShellCommand::Page(PageMove::Last) => directory.last_page(),
        ShellCommand::Page(PageMove::To(page)) => directory.goto_page(page),
        ShellCommand::Size(size) => directory.set_page_size(size),
        ShellCommand::View => {
            directory.toggle_view();
        }
        ShellCommand::Select(id) => {
            directory.toggle_select(id);
        }
        ShellCommand::SelectAll => {
            directory.select_all_visible();
        }
        ShellCommand::UnselectAll => directory.clear_selection(),
        ShellCommand::Show(id) => {
            return match directory.user(id) {
                Some(user) => Reply::Text(render_detail(&user)),
                None => Reply::Text(format!("No user with id {}", id)),
            };
        }
        ShellCommand::Copy(field, id) => {
            directory.copy(field, id);
            return Reply::Silent;
        }
        ShellCommand::Export(scope) => {
            return match directory.export(scope).await {
                // The notifier has already reported the outcome
                Ok(ExportOutcome::Saved { .. } | ExportOutcome::Empty) => Reply::Silent,
                Ok(ExportOutcome::Cancelled) => Reply::Text("Export cancelled.".to_string()),
                Err(e) => Reply::Text(format!("Export failed: {}", e)),
            };
        }
        ShellCommand::Facets => return Reply::Text(render_facets(&directory.facets())),
        ShellCommand::List => {}
        ShellCommand::Reload => {
            let _ = directory.spawn_load();
            return Reply::Silent;
        }
        ShellCommand::Help => return Reply::Text(HELP.to_string()),
        ShellCommand::Quit => return Reply::Quit,
    }
    Reply::Render
}

// =============================================================================
// Loop
// =============================================================================

/// Read one line from stdin on the blocking pool. `None` at end of input.
fn read_line() -> JoinHandle<io::Result<Option<String>>> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match io::stdin().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    })
}

/// Run the interactive session until `quit` or end of input.
///
/// A new stdin read starts only after the previous command finished, so
/// confirmation prompts inside a command read their own answer.
pub async fn run(directory: &mut Directory) -> Result<(), AppError> {
    let mut search_rx = directory.subscribe_search();
    let mut load_rx = directory.subscribe_load();

    let _ = directory.spawn_load();
    println!("{}", render_page(&directory.refresh()));
    println!("Type 'help' for commands.");

    let mut input = read_line();
    loop {
        tokio::select! {
            joined = &mut input => {
                let line = joined.map_err(io::Error::other)??;
                let Some(line) = line else {
                    tracing::debug!("End of input");
                    break;
                };

                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(command)) => match execute(directory, command).await {
                        Reply::Render => println!("{}", render_page(&directory.refresh())),
                        Reply::Text(text) => println!("{}", text),
                        Reply::Silent => {}
                        Reply::Quit => break,
                    },
                    Err(message) => eprintln!("{}", message),
                }

                // Immediate search changes were already drawn
                search_rx.borrow_and_update();
                input = read_line();
            }
            Ok(()) = search_rx.changed() => {
                search_rx.borrow_and_update();
                println!("{}", render_page(&directory.refresh()));
            }
            Ok(()) = load_rx.changed() => {
                let settled = !load_rx.borrow_and_update().is_loading();
                if settled {
                    println!("{}", render_page(&directory.refresh()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Services;
    use crate::platform::{DirectoryFileSink, TerminalClipboard, TerminalNotifier};
    use roster_core::{fallback_users, AppConfig};
    use roster_runtime::{MemoryPreferenceStore, StaticUserSource};
    use std::sync::Arc;

    fn directory(export_dir: &std::path::Path) -> Directory {
        let config = AppConfig {
            export_delay_ms: 0,
            ..AppConfig::default()
        };
        Directory::new(
            &config,
            Services {
                source: Arc::new(StaticUserSource::new(fallback_users())),
                preferences: Arc::new(MemoryPreferenceStore::new()),
                sink: Arc::new(DirectoryFileSink::new(export_dir)),
                clipboard: Arc::new(TerminalClipboard::new()),
                notifier: Arc::new(TerminalNotifier::new().assume_yes(true)),
            },
        )
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("search  Romaguera "),
            Ok(Some(ShellCommand::Search("Romaguera".to_string())))
        );
        assert_eq!(
            parse_command("search"),
            Ok(Some(ShellCommand::Search(String::new())))
        );
        assert_eq!(
            parse_command("sort City"),
            Ok(Some(ShellCommand::Sort(SortKey::City)))
        );
        assert_eq!(
            parse_command("page last"),
            Ok(Some(ShellCommand::Page(PageMove::Last)))
        );
        assert_eq!(
            parse_command("page 3"),
            Ok(Some(ShellCommand::Page(PageMove::To(3))))
        );
        assert_eq!(
            parse_command("copy phone 4"),
            Ok(Some(ShellCommand::Copy(CopyField::Phone, UserId(4))))
        );
        assert_eq!(
            parse_command("export selected"),
            Ok(Some(ShellCommand::Export(ExportScope::SelectedOnly)))
        );
        assert_eq!(
            parse_command("export 2"),
            Ok(Some(ShellCommand::Export(ExportScope::Single(UserId(2)))))
        );
        assert_eq!(parse_command("QUIT"), Ok(Some(ShellCommand::Quit)));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("sort zipcode").is_err());
        assert!(parse_command("size 0").is_err());
        assert!(parse_command("select abc").is_err());
        assert!(parse_command("copy email").is_err());
        assert!(parse_command("copy fax 1").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[tokio::test]
    async fn test_execute_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = directory(dir.path());
        directory.load().await;

        assert_eq!(
            execute(&mut directory, ShellCommand::Search("group".to_string())).await,
            Reply::Render
        );
        assert_eq!(directory.refresh().rows.len(), 2);

        assert_eq!(
            execute(&mut directory, ShellCommand::SelectAll).await,
            Reply::Render
        );
        assert_eq!(directory.selected_count(), 2);

        let reply = execute(&mut directory, ShellCommand::Show(UserId(7))).await;
        let Reply::Text(text) = reply else {
            panic!("expected details");
        };
        assert!(text.starts_with("#7 Kurtis Weissnat"));

        assert_eq!(
            execute(&mut directory, ShellCommand::Export(ExportScope::SelectedOnly)).await,
            Reply::Silent
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        assert_eq!(
            execute(&mut directory, ShellCommand::Show(UserId(99))).await,
            Reply::Text("No user with id 99".to_string())
        );
        assert_eq!(execute(&mut directory, ShellCommand::Quit).await, Reply::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_is_silent_until_settled() {
        let dir = tempfile::tempdir().unwrap();
        let mut directory = directory(dir.path());
        directory.load().await;
        let mut search_rx = directory.subscribe_search();

        assert_eq!(
            execute(&mut directory, ShellCommand::Type("Gwen".to_string())).await,
            Reply::Silent
        );
        search_rx.changed().await.unwrap();
        assert_eq!(*search_rx.borrow(), "Gwen");
        assert_eq!(directory.refresh().rows.len(), 1);
    }
}
