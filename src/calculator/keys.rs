//! Turning button labels into calculator actions.
//!
//! Accepts the labels printed on the keypad (`7`, `×`, `M+`, `±`, ...) plus
//! the ASCII stand-ins a keyboard can type (`*`, `/`, `x`, `+/-`).

use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

use super::state::{Action, Operator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("unknown calculator key: {0:?}")]
    Unknown(String),
    #[error("unexpected input at byte {offset}: {fragment:?}")]
    Unexpected { offset: usize, fragment: String },
}

lazy_static! {
    /// One keypad token. Multi-character keys come first so `M+` isn't read
    /// as a stray `M` followed by `+`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)M[+\-RC]|\+/-|AC|[0-9]|[.+\-−×x*÷/=%±C]"
    ).unwrap();
}

impl FromStr for Action {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();

        if let Ok(op) = key.parse::<Operator>() {
            return Ok(Self::Operator(op));
        }

        if key.len() == 1
            && let Some(d) = key.chars().next().and_then(|c| c.to_digit(10))
        {
            return Ok(Self::Digit(d as u8));
        }

        match key.to_ascii_uppercase().as_str() {
            "." => Ok(Self::Decimal),
            "=" => Ok(Self::Equals),
            "C" | "AC" => Ok(Self::Clear),
            "±" | "+/-" | "NEG" => Ok(Self::Negate),
            "%" => Ok(Self::Percent),
            "M+" => Ok(Self::MemoryAdd),
            "M-" => Ok(Self::MemorySubtract),
            "MR" => Ok(Self::MemoryRecall),
            "MC" => Ok(Self::MemoryClear),
            _ => Err(ParseKeyError::Unknown(key.to_string())),
        }
    }
}

/// Split a run of keys such as `"12.5×3="` or `"5 M+ C MR"` into actions.
///
/// Whitespace separates keys but is otherwise ignored. Anything that isn't a
/// key is an error pointing at the offending fragment.
pub fn parse_keys(input: &str) -> Result<Vec<Action>, ParseKeyError> {
    let mut actions = Vec::new();
    let mut cursor = 0;

    for token in KEY_TOKEN.find_iter(input) {
        let gap = &input[cursor..token.start()];
        if !gap.trim().is_empty() {
            return Err(ParseKeyError::Unexpected {
                offset: cursor,
                fragment: gap.trim().to_string(),
            });
        }
        actions.push(token.as_str().parse()?);
        cursor = token.end();
    }

    let rest = &input[cursor..];
    if !rest.trim().is_empty() {
        return Err(ParseKeyError::Unexpected {
            offset: cursor,
            fragment: rest.trim().to_string(),
        });
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_labels() {
        assert_eq!("7".parse::<Action>(), Ok(Action::Digit(7)));
        assert_eq!("×".parse::<Action>(), Ok(Action::Operator(Operator::Multiply)));
        assert_eq!("÷".parse::<Action>(), Ok(Action::Operator(Operator::Divide)));
        assert_eq!("m+".parse::<Action>(), Ok(Action::MemoryAdd));
        assert_eq!("MR".parse::<Action>(), Ok(Action::MemoryRecall));
        assert_eq!("±".parse::<Action>(), Ok(Action::Negate));
        assert_eq!("c".parse::<Action>(), Ok(Action::Clear));
        assert_eq!("%".parse::<Action>(), Ok(Action::Percent));
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(matches!(
            "sqrt".parse::<Action>(),
            Err(ParseKeyError::Unknown(_))
        ));
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_compact_sequence() {
        let actions = parse_keys("12.5*2=").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Digit(1),
                Action::Digit(2),
                Action::Decimal,
                Action::Digit(5),
                Action::Operator(Operator::Multiply),
                Action::Digit(2),
                Action::Equals,
            ]
        );
    }

    #[test]
    fn test_spaced_sequence_with_memory_keys() {
        let actions = parse_keys("5 M+ C MR").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Digit(5),
                Action::MemoryAdd,
                Action::Clear,
                Action::MemoryRecall,
            ]
        );
    }

    #[test]
    fn test_negate_ascii() {
        assert_eq!(parse_keys("3+/-").unwrap(), vec![Action::Digit(3), Action::Negate]);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = parse_keys("2 + foo").unwrap_err();
        assert!(matches!(err, ParseKeyError::Unexpected { offset: 3, .. }));
    }
}
