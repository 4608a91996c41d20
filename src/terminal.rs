//! Line-oriented front end over the [`Shell`].

use std::io::Write;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::error::AppError;
use crate::navigation::Route;
use crate::query::{SortKey, StatusFilter};
use crate::shell::{ActiveView, Shell};
use crate::views::{DELETE_PROMPT, FormField};

pub const HELP: &str = "\
Commands:
  list | add | edit <row|id> | go <path>   navigate
  filter <all|ongoing|completed|planned>   filter the list by status
  sort <none|name|date>                    choose the sort key
  order                                    toggle ascending/descending
  delete <row|id>                          delete a course (asks first)
  reload                                   fetch the list again
  set <field> [value]                      edit a form field
      fields: name status instructor date certificate progress notes
  submit                                   submit the add/edit form
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    Edit(String),
    Filter(StatusFilter),
    Sort(SortKey),
    ToggleOrder,
    Delete(String),
    Reload,
    Set(FormField, String),
    Submit,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("usage: {} {}", verb, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "list" | "home" => Ok(Command::Go(Route::List)),
            "add" => Ok(Command::Go(Route::Add)),
            "go" => Route::parse(&require("<path>")?)
                .map(Command::Go)
                .map_err(|e| e.user_message("Unknown page")),
            "edit" => require("<row|id>").map(Command::Edit),
            "filter" => require("<status>")?.parse().map(Command::Filter),
            "sort" => require("<key>")?.parse().map(Command::Sort),
            "order" => Ok(Command::ToggleOrder),
            "delete" | "rm" => require("<row|id>").map(Command::Delete),
            "reload" => Ok(Command::Reload),
            "set" => {
                let args = require("<field> [value]")?;
                let (field, value) = match args.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (args.as_str(), ""),
                };
                Ok(Command::Set(field.parse()?, value.to_string()))
            }
            "submit" | "save" => Ok(Command::Submit),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {} (try `help`)", other)),
        }
    }
}

pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Runs until `quit` or end of input. Navigation requested by views
    /// (delayed redirects) is applied as it arrives.
    pub async fn run(
        &mut self,
        shell: &mut Shell,
        navigation: &mut UnboundedReceiver<Route>,
    ) -> Result<(), AppError> {
        self.show(shell)?;
        loop {
            tokio::select! {
                line = self.lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.handle_line(shell, &line).await? {
                        break;
                    }
                }
                Some(route) = navigation.recv() => {
                    shell.navigate(route).await;
                    self.show(shell)?;
                }
            }
        }
        Ok(())
    }

    /// Handles one input line. Returns `false` when the user quits.
    pub async fn handle_line(&mut self, shell: &mut Shell, line: &str) -> Result<bool, AppError> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(msg) => {
                writeln!(self.out, "{}", msg)?;
                return Ok(true);
            }
        };
        debug!("command: {:?}", command);

        match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(true);
            }
            Command::Show => {}
            Command::Go(route) => shell.navigate(route).await,
            Command::Edit(target) => {
                let id = resolve_row(shell, &target);
                shell.navigate(Route::Edit(id)).await;
            }
            Command::Delete(target) => {
                let id = resolve_row(shell, &target);
                if let ActiveView::List(view) = shell.view_mut() {
                    write!(self.out, "{} [y/N] ", DELETE_PROMPT)?;
                    self.out.flush()?;
                    let answer = self.lines.next_line().await?.unwrap_or_default();
                    let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
                    view.delete(&id, |_| confirmed).await;
                } else {
                    writeln!(self.out, "Deleting is only available on the course list.")?;
                    return Ok(true);
                }
            }
            Command::Filter(filter) => match shell.view_mut() {
                ActiveView::List(view) => view.set_status_filter(filter),
                _ => return self.list_only(),
            },
            Command::Sort(key) => match shell.view_mut() {
                ActiveView::List(view) => view.set_sort_key(key),
                _ => return self.list_only(),
            },
            Command::ToggleOrder => match shell.view_mut() {
                ActiveView::List(view) => {
                    if !view.toggle_sort_direction() {
                        writeln!(self.out, "Pick a sort key first.")?;
                        return Ok(true);
                    }
                }
                _ => return self.list_only(),
            },
            Command::Reload => match shell.view_mut() {
                ActiveView::List(view) => view.reload().await,
                _ => return self.list_only(),
            },
            Command::Set(field, value) => {
                let result = match shell.view_mut() {
                    ActiveView::Add(view) => view.update_field(field, value),
                    ActiveView::Edit(view) => view.update_field(field, value),
                    ActiveView::List(_) => {
                        writeln!(self.out, "Open the add or edit page to change fields.")?;
                        return Ok(true);
                    }
                };
                if let Err(e) = result {
                    writeln!(self.out, "{}", e.user_message("Could not set field."))?;
                    return Ok(true);
                }
            }
            Command::Submit => match shell.view_mut() {
                ActiveView::Add(view) => {
                    view.submit().await;
                }
                ActiveView::Edit(view) => {
                    view.submit().await;
                }
                ActiveView::List(_) => {
                    writeln!(self.out, "Nothing to submit on the course list.")?;
                    return Ok(true);
                }
            },
        }

        self.show(shell)?;
        Ok(true)
    }

    fn list_only(&mut self) -> Result<bool, AppError> {
        writeln!(self.out, "That command only works on the course list.")?;
        Ok(true)
    }

    fn show(&mut self, shell: &Shell) -> Result<(), AppError> {
        writeln!(self.out, "{}", shell.render())?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// A 1-based index into the visible list, or a raw record id.
fn resolve_row(shell: &Shell, target: &str) -> String {
    if let (ActiveView::List(view), Ok(index)) = (shell.view(), target.parse::<usize>()) {
        let visible = view.visible();
        if let Some(course) = index.checked_sub(1).and_then(|i| visible.get(i)) {
            return course.id.clone();
        }
    }
    target.to_string()
}
