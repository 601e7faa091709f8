//! Command and button-action parsing.
//!
//! Inbound text starting with [`COMMAND_MARKER`] becomes a [`Command`]; button action tokens become
//! a [`CallbackAction`]. Both are closed enums with an explicit unrecognized variant, so routing is an
//! exhaustive `match`.

/// Leading character that turns a message into a command.
pub const COMMAND_MARKER: char = '/';

/// Number of messages `/get` returns without a valid argument.
pub const DEFAULT_GET_LIMIT: usize = 5;

/// Argument of `/delete`, kept as parsed so the handler can answer with the right hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteArg {
    Id(i64),
    Missing,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    /// `None` when the argument is absent, not a whole number or not positive. `3x` counts as not
    /// a number.
    Get(Option<usize>),
    All,
    Count,
    Delete(DeleteArg),
    Clear,
    /// Any other token, lowercased without the marker.
    Unknown(String),
}

impl Command {
    /// Parses message text. Returns `None` when the text is content, not a command.
    ///
    /// The token is the first whitespace-delimited word without the marker; a `@botname`
    /// suffix (group chats) is ignored and matching is case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix(COMMAND_MARKER)?;
        let mut parts = rest.splitn(2, char::is_whitespace);
        let token = parts.next().unwrap_or_default();
        let arg = parts
            .next()
            .and_then(|args| args.split_whitespace().next());

        let name = token
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        let command = match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "get" => Command::Get(
                arg.and_then(|a| a.parse::<usize>().ok())
                    .filter(|n| *n > 0),
            ),
            "all" => Command::All,
            "count" => Command::Count,
            "delete" => Command::Delete(match arg {
                None => DeleteArg::Missing,
                Some(a) => match a.parse::<i64>() {
                    Ok(id) => DeleteArg::Id(id),
                    Err(_) => DeleteArg::Invalid(a.to_string()),
                },
            }),
            "clear" => Command::Clear,
            _ => Command::Unknown(name),
        };
        Some(command)
    }
}

/// Action carried by a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    ClearConfirm,
    ClearCancel,
    Unknown(String),
}

impl CallbackAction {
    const CLEAR_CONFIRM: &'static str = "clear_confirm";
    const CLEAR_CANCEL: &'static str = "clear_cancel";

    pub fn parse(token: &str) -> Self {
        match token {
            Self::CLEAR_CONFIRM => CallbackAction::ClearConfirm,
            Self::CLEAR_CANCEL => CallbackAction::ClearCancel,
            other => CallbackAction::Unknown(other.to_string()),
        }
    }

    /// Token to put on an outgoing button.
    pub fn as_token(&self) -> &str {
        match self {
            CallbackAction::ClearConfirm => Self::CLEAR_CONFIRM,
            CallbackAction::ClearCancel => Self::CLEAR_CANCEL,
            CallbackAction::Unknown(token) => token,
        }
    }
}
