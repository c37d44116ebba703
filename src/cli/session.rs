use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::product::ProductId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionParseError {
    #[error("Unknown command '{command}'. Type 'help' for a list of commands")]
    UnknownCommand { command: String },

    #[error("Command '{command}' requires {argument}")]
    MissingArgument { command: String, argument: &'static str },

    #[error("Command '{command}' takes at most one argument")]
    TooManyArguments { command: String },

    #[error("Invalid product id '{value}'")]
    InvalidProductId { value: String },

    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    #[error("Amount must not be negative: {value}")]
    NegativeAmount { value: Decimal },
}

/// One line of a cart session, typed at the shell prompt or read from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Catalog,
    Show,
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Total,
    Empty,
    Pay(Decimal),
    Export,
    Receipt,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
catalog          list products
cart | show      show cart contents
add <id>         add a product to the cart
inc <id>         increase a product's quantity
dec <id>         decrease a product's quantity
remove <id>      remove a product from the cart
total            show the cart total
empty            empty the cart
pay <amount>     pay toward the cart total
export           print the cart as JSON
receipt          show the last receipt
help             show this help
quit | exit      leave the session";

impl FromStr for SessionCommand {
    type Err = SessionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next();

        if parts.next().is_some() {
            return Err(SessionParseError::TooManyArguments { command: verb });
        }

        let command = match verb.as_str() {
            "catalog" | "products" => SessionCommand::Catalog,
            "cart" | "show" => SessionCommand::Show,
            "add" => SessionCommand::Add(parse_id(&verb, argument)?),
            "inc" | "increase" => SessionCommand::Increase(parse_id(&verb, argument)?),
            "dec" | "decrease" => SessionCommand::Decrease(parse_id(&verb, argument)?),
            "remove" | "rm" => SessionCommand::Remove(parse_id(&verb, argument)?),
            "total" => SessionCommand::Total,
            "empty" | "clear" => SessionCommand::Empty,
            "pay" => SessionCommand::Pay(parse_amount(&verb, argument)?),
            "export" => SessionCommand::Export,
            "receipt" => SessionCommand::Receipt,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            _ => return Err(SessionParseError::UnknownCommand { command: verb }),
        };

        let takes_argument = matches!(
            command,
            SessionCommand::Add(_)
                | SessionCommand::Increase(_)
                | SessionCommand::Decrease(_)
                | SessionCommand::Remove(_)
                | SessionCommand::Pay(_)
        );
        if !takes_argument && argument.is_some() {
            return Err(SessionParseError::TooManyArguments { command: verb });
        }

        Ok(command)
    }
}

/// Strips comments and whitespace; `None` for lines with nothing to run.
pub fn clean_line(line: &str) -> Option<&str> {
    let without_comment = match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    };
    let trimmed = without_comment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_id(command: &str, argument: Option<&str>) -> Result<ProductId, SessionParseError> {
    let value = argument.ok_or_else(|| SessionParseError::MissingArgument {
        command: command.to_string(),
        argument: "a product id",
    })?;

    value
        .parse::<ProductId>()
        .map_err(|_| SessionParseError::InvalidProductId { value: value.to_string() })
}

fn parse_amount(command: &str, argument: Option<&str>) -> Result<Decimal, SessionParseError> {
    let value = argument.ok_or_else(|| SessionParseError::MissingArgument {
        command: command.to_string(),
        argument: "an amount",
    })?;

    let amount = Decimal::from_str(value.trim_start_matches('$'))
        .map_err(|_| SessionParseError::InvalidAmount { value: value.to_string() })?;

    if amount < Decimal::ZERO {
        return Err(SessionParseError::NegativeAmount { value: amount });
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  add 990  # strawberry"), Some("add 990"));
        assert_eq!(clean_line("# just a comment"), None);
        assert_eq!(clean_line("   "), None);
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        assert_eq!("ADD 990".parse::<SessionCommand>(), Ok(SessionCommand::Add(990)));
        assert_eq!("Total".parse::<SessionCommand>(), Ok(SessionCommand::Total));
    }

    #[test]
    fn test_dollar_prefix_is_accepted() {
        let command: SessionCommand = "pay $3".parse().unwrap();
        assert_eq!(command, SessionCommand::Pay(Decimal::from(3)));
    }
}
