//! Console command parsing.

use policydesk_model::{EntityKey, RecordId};
use thiserror::Error;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(EntityKey),
    List,
    Form,
    Set { field: String, value: String },
    Edit(RecordId),
    Submit,
    Cancel,
    Delete(RecordId),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown entity '{0}', expected one of: customers, plans, policies")]
    UnknownEntity(String),
}

/// Parses a line of input. Blank lines yield `Ok(None)`.
///
/// `set` keeps everything after the field name as the value, inner
/// spaces included; a missing value clears the field.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "tab" | "use" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("tab <customers|plans|policies>"));
            }
            let key = rest
                .parse::<EntityKey>()
                .map_err(|_| CommandError::UnknownEntity(rest.to_string()))?;
            Command::Tab(key)
        }
        "list" | "ls" => Command::List,
        "form" => Command::Form,
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err(CommandError::Usage("set <field> <value>"));
            }
            Command::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "edit" => Command::Edit(record_id(rest, "edit <id>")?),
        "submit" | "save" => Command::Submit,
        "cancel" => Command::Cancel,
        "delete" | "rm" => Command::Delete(record_id(rest, "delete <id>")?),
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn record_id(arg: &str, usage: &'static str) -> Result<RecordId, CommandError> {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        return Err(CommandError::Usage(usage));
    }
    Ok(RecordId::parse(arg))
}

/// Whether a confirmation answer means yes. Anything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub const HELP: &str = "\
Commands:
  tab <customers|plans|policies>  switch entity (discards the form)
  list                            show the record table
  form                            show the form
  set <field> <value>             change a form field
  edit <id>                       load a record into the form
  submit                          validate and save the form
  cancel                          clear the form
  delete <id>                     delete a record (asks first)
  reload                          fetch records again
  help                            this text
  quit                            leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \t"), Ok(None));
    }

    #[test]
    fn parses_simple_verbs_case_insensitively() {
        assert_eq!(parse_command("LIST"), Ok(Some(Command::List)));
        assert_eq!(parse_command(" submit "), Ok(Some(Command::Submit)));
        assert_eq!(parse_command("q"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("?"), Ok(Some(Command::Help)));
    }

    #[test]
    fn tab_takes_entity_key() {
        assert_eq!(
            parse_command("tab Policies"),
            Ok(Some(Command::Tab(EntityKey::Policies)))
        );
        assert_eq!(
            parse_command("tab cars"),
            Err(CommandError::UnknownEntity("cars".to_string()))
        );
        assert!(matches!(parse_command("tab"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            parse_command("set nombres  Ana  Maria Torres "),
            Ok(Some(Command::Set {
                field: "nombres".to_string(),
                value: "Ana  Maria Torres".to_string(),
            }))
        );
        assert_eq!(
            parse_command("set telefono"),
            Ok(Some(Command::Set {
                field: "telefono".to_string(),
                value: String::new(),
            }))
        );
        assert!(matches!(parse_command("set"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn ids_parse_as_numbers_when_possible() {
        assert_eq!(
            parse_command("edit 42"),
            Ok(Some(Command::Edit(RecordId::Int(42))))
        );
        assert_eq!(
            parse_command("delete abc"),
            Ok(Some(Command::Delete(RecordId::Text("abc".to_string()))))
        );
        assert!(matches!(parse_command("delete"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("edit 1 2"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn unknown_verbs_are_reported() {
        assert_eq!(
            parse_command("frobnicate now"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn only_yes_confirms() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES\n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("sure"));
    }
}
