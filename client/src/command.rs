//! Terminal commands that stand in for UI events.

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  new                 start a new game
  type <id> <text>    type into a field (sent after a pause)
  enter <id> <text>   submit a field right away
  clear <id>          empty a field
  hint                show a hint for a few seconds
  reveal              show all answers
  suggest <query>     autocomplete country names
  show                print the board
  help                print this help
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewGame,
    Type { field_id: u32, text: String },
    Enter { field_id: u32, text: String },
    Clear { field_id: u32 },
    Hint,
    Reveal,
    Suggest { query: String },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs a field id")]
    MissingFieldId(&'static str),
    #[error("'{0}' is not a valid field id")]
    InvalidFieldId(String),
    #[error("'suggest' needs a query")]
    MissingQuery,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "new" => Ok(Command::NewGame),
            "type" => {
                let (field_id, text) = Self::field_and_text("type", rest)?;
                Ok(Command::Type { field_id, text })
            }
            "enter" => {
                let (field_id, text) = Self::field_and_text("enter", rest)?;
                Ok(Command::Enter { field_id, text })
            }
            "clear" => {
                let (field_id, _) = Self::field_and_text("clear", rest)?;
                Ok(Command::Clear { field_id })
            }
            "hint" => Ok(Command::Hint),
            "reveal" => Ok(Command::Reveal),
            "suggest" if rest.is_empty() => Err(CommandError::MissingQuery),
            "suggest" => Ok(Command::Suggest {
                query: rest.to_string(),
            }),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    // Text keeps its inner spacing ("Central African Republic").
    fn field_and_text(verb: &'static str, rest: &str) -> Result<(u32, String), CommandError> {
        let (id, text) = match rest.split_once(char::is_whitespace) {
            Some((id, text)) => (id, text.trim()),
            None => (rest, ""),
        };
        if id.is_empty() {
            return Err(CommandError::MissingFieldId(verb));
        }
        let field_id = id
            .parse()
            .map_err(|_| CommandError::InvalidFieldId(id.to_string()))?;
        Ok((field_id, text.to_string()))
    }
}
