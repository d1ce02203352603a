//! Terminal input parsing.
//!
//! A line starting with `/` is a command; anything else is a message. A
//! leading `//` escapes a message that itself starts with a slash.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use crate::controller::{Event, ModelSettingsForm, Target};
use crate::net::types::Provider;

pub const HELP: &str = "\
Type a message and press enter to send it.

  /new                              start a new conversation
  /switch <id>                      open a thread
  /rename <id|.> <title...>         rename a thread (. = current)
  /pin [id]                         pin or unpin a thread
  /delete [id]                      delete a thread
  /delete-all                       delete every thread
  /prev, /next                      recall earlier input
  /models                           list local Ollama models
  /model ollama [name]              use a local model
  /model gemini <api_key> [model]   use Gemini
  /list                             show the thread list
  /think                            toggle thinking traces
  /help                             this text
  /quit                             exit";

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Handled by the controller.
    Event(Event),
    Prev,
    Next,
    List,
    ToggleThinking,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: /{0} (try /help)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown provider: {0} (expected ollama or gemini)")]
    UnknownProvider(String),
}

/// Split `/name rest` into `("name", "rest")`.
fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    }
}

fn target(arg: &str) -> Target {
    if arg.is_empty() || arg == "." {
        Target::Active
    } else {
        Target::Thread(arg.to_owned())
    }
}

fn optional(arg: Option<&str>) -> Option<String> {
    arg.map(str::to_owned)
}

fn parse_model(rest: &str) -> Result<Event, ParseError> {
    const USAGE: &str = "/model ollama [name] | /model gemini <api_key> [model]";
    let mut args = rest.split_whitespace();
    let provider = match args.next() {
        None => return Err(ParseError::Usage(USAGE)),
        Some("ollama") => Provider::Ollama,
        Some("gemini") => Provider::Gemini,
        Some(other) => return Err(ParseError::UnknownProvider(other.to_owned())),
    };
    let form = match provider {
        Provider::Ollama => ModelSettingsForm { provider, model_name: optional(args.next()), api_key: None },
        Provider::Gemini => {
            let api_key = optional(args.next());
            ModelSettingsForm { provider, model_name: optional(args.next()), api_key }
        }
    };
    if args.next().is_some() {
        return Err(ParseError::Usage(USAGE));
    }
    Ok(Event::UpdateModelSettings(form))
}

/// Parse one line of terminal input. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`ParseError`] for unknown commands or missing arguments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(input) = line.strip_prefix('/') else {
        return Ok(Some(Command::Event(Event::Send(line.to_owned()))));
    };
    if input.starts_with('/') {
        return Ok(Some(Command::Event(Event::Send(input.to_owned()))));
    }

    let (name, rest) = split_command(input);
    let command = match name {
        "new" => Command::Event(Event::NewChat),
        "switch" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("/switch <id>"));
            }
            Command::Event(Event::Select(rest.to_owned()))
        }
        "rename" => {
            let (id, title) = split_command(rest);
            if id.is_empty() {
                return Err(ParseError::Usage("/rename <id|.> <title...>"));
            }
            // An empty title still reaches the controller, which rejects it.
            Command::Event(Event::Rename { target: target(id), title: title.to_owned() })
        }
        "pin" => Command::Event(Event::TogglePin(target(rest))),
        "delete" => Command::Event(Event::Delete(target(rest))),
        "delete-all" => Command::Event(Event::DeleteAll),
        "models" => Command::Event(Event::RefreshModels),
        "model" => Command::Event(parse_model(rest)?),
        "prev" => Command::Prev,
        "next" => Command::Next,
        "list" => Command::List,
        "think" => Command::ToggleThinking,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(command))
}
