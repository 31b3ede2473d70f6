//! Tokenized nested-pair literals and their text parser.
//!
//! A [`Literal`] is the structure handed to [`SnailfishNumber::make`](crate::domain::SnailfishNumber::make):
//! plain integers and nested lists, exactly as they appear on an input line.
//! It does not enforce the two-element rule; that is checked when a tree is built.
//!
//! Nesting is limited to [`MAX_NESTING`] lists. Parsing, building and printing
//! all recurse once per level, so deeper input is rejected up front instead
//! of exhausting the stack.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use nom::branch::alt;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res};
use nom::error::ParseError;
use nom::multi::separated_list0;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use tracing::instrument;

use crate::domain::error::DomainError;

/// Integer type carried by regular numbers.
pub type Regular = u64;

/// Deepest list nesting accepted; `[1,2]` has nesting 1.
pub const MAX_NESTING: usize = 64;

/// Nested list literal, e.g. `[[1,2],3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Regular(Regular),
    List(Vec<Literal>),
}

impl Literal {
    /// Two-element list literal.
    pub fn pair(left: impl Into<Literal>, right: impl Into<Literal>) -> Self {
        Literal::List(vec![left.into(), right.into()])
    }

    pub fn is_regular(&self) -> bool {
        matches!(self, Literal::Regular(_))
    }
}

impl From<Regular> for Literal {
    fn from(value: Regular) -> Self {
        Literal::Regular(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Regular(value) => write!(f, "{}", value),
            Literal::List(items) => write!(f, "[{}]", items.iter().join(",")),
        }
    }
}

impl FromStr for Literal {
    type Err = DomainError;

    #[instrument(level = "trace")]
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let depth = nesting(input);
        if depth > MAX_NESTING {
            let excerpt: String = input.trim().chars().take(32).collect();
            return Err(DomainError::too_deep(format!("{}...", excerpt), depth));
        }
        match all_consuming(element)(input) {
            Ok((_, literal)) => Ok(literal),
            Err(e) => Err(DomainError::malformed(input.trim(), e.to_string())),
        }
    }
}

/// Deepest bracket nesting in `input`, counted without recursion.
fn nesting(input: &str) -> usize {
    input
        .bytes()
        .scan(0usize, |depth, byte| {
            match byte {
                b'[' => *depth += 1,
                b']' => *depth = depth.saturating_sub(1),
                _ => {}
            }
            Some(*depth)
        })
        .max()
        .unwrap_or(0)
}

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading and
/// trailing whitespace, returning the output of `inner`.
fn ws<'a, F, O, E: ParseError<&'a str>>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Parser<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

fn regular(input: &str) -> IResult<&str, Literal> {
    map(map_res(digit1, str::parse::<Regular>), Literal::Regular)(input)
}

fn list(input: &str) -> IResult<&str, Literal> {
    map(
        delimited(
            ws(char('[')),
            separated_list0(ws(char(',')), element),
            ws(char(']')),
        ),
        Literal::List,
    )(input)
}

fn element(input: &str) -> IResult<&str, Literal> {
    ws(alt((regular, list)))(input)
}
