//! Telegram command parsing.
//!
//! Every command fits in one message. Multi-value arguments are separated
//! by `;` so warehouse names may contain spaces.

use crate::domain::WarehouseKind;

/// Supported Telegram commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    Watch {
        warehouse: String,
        max_coefficient: i32,
        min_lead_days: i32,
        box_type: String,
    },
    Unwatch {
        warehouse: String,
    },
    List,
    Find {
        box_type: String,
        min_lead_days: i32,
        max_coefficient: i32,
    },
    Warehouses(WarehouseKind),
    Available(WarehouseKind),
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber { field: &'static str, value: String },
    UnexpectedArgument(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
            Self::MissingArgument(name) => write!(f, "missing argument `{name}`"),
            Self::InvalidNumber { field, value } => {
                write!(f, "`{field}` must be a whole number, got `{value}`")
            }
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument `{arg}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let text = text.trim();
    let (raw_command, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(head, tail)| (head, tail.trim()));
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/list" => Ok(TelegramCommand::List),
        "/watch" => {
            let mut args = split_args(rest);
            let warehouse = required(args.next(), "warehouse")?;
            let max_coefficient = number(args.next(), "max coefficient")?;
            let min_lead_days = number(args.next(), "lead days")?;
            let box_type = required(args.next(), "box type")?;
            reject_extra(args)?;
            Ok(TelegramCommand::Watch {
                warehouse,
                max_coefficient,
                min_lead_days,
                box_type,
            })
        }
        "/unwatch" => Ok(TelegramCommand::Unwatch {
            warehouse: required(Some(rest), "warehouse")?,
        }),
        "/find" => {
            let mut args = split_args(rest);
            let box_type = required(args.next(), "box type")?;
            let min_lead_days = number(args.next(), "lead days")?;
            let max_coefficient = number(args.next(), "max coefficient")?;
            reject_extra(args)?;
            Ok(TelegramCommand::Find {
                box_type,
                min_lead_days,
                max_coefficient,
            })
        }
        "/warehouses" => Ok(TelegramCommand::Warehouses(parse_kind(rest)?)),
        "/available" => Ok(TelegramCommand::Available(parse_kind(rest)?)),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn split_args(rest: &str) -> impl Iterator<Item = &str> {
    rest.split(';').map(str::trim).filter(|arg| !arg.is_empty())
}

fn required(arg: Option<&str>, name: &'static str) -> Result<String, CommandParseError> {
    match arg.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(CommandParseError::MissingArgument(name)),
    }
}

fn number(arg: Option<&str>, name: &'static str) -> Result<i32, CommandParseError> {
    let raw = required(arg, name)?;
    raw.parse().map_err(|_| CommandParseError::InvalidNumber {
        field: name,
        value: raw,
    })
}

fn reject_extra<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<(), CommandParseError> {
    match args.next() {
        Some(extra) => Err(CommandParseError::UnexpectedArgument(extra.to_string())),
        None => Ok(()),
    }
}

fn parse_kind(rest: &str) -> Result<WarehouseKind, CommandParseError> {
    match rest {
        "" => Ok(WarehouseKind::Warehouse),
        "sc" | "сц" => Ok(WarehouseKind::ServiceCenter),
        other => Err(CommandParseError::UnexpectedArgument(other.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /watch <warehouse|*>; <max coef>; <lead days>; <box type> - 🔔 Subscribe to slots\n\
    /unwatch <warehouse|*> - 🔕 Drop subscriptions for a warehouse\n\
    /list - 📄 Your subscriptions\n\
    /find <box type>; <lead days>; <max coef> - 🔎 Search the latest snapshot\n\
    /warehouses [sc] - 🏭 Warehouse directory (sc = service centers)\n\
    /available [sc] - 📊 Coefficient ranges per warehouse\n\
    /help - ❓ Show this message\n\n\
    Example: /watch Казань; 3; 7; Короба"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("watch", "Subscribe to acceptance slots"),
        ("unwatch", "Drop subscriptions for a warehouse"),
        ("list", "Your subscriptions"),
        ("find", "Search the latest snapshot"),
        ("warehouses", "Warehouse directory"),
        ("available", "Coefficient ranges per warehouse"),
        ("help", "Show all commands"),
    ]
}
