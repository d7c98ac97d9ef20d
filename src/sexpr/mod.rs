//! Nested-parenthesis expression parser.
//!
//! Turns a flat string such as `(astar (nn (path model.pb)))` into a tree of
//! lists and atoms. The parser only constructs trees; no meaning is attached
//! to the atoms.
//!
//! # Grammar
//!
//! - whitespace separates tokens and is otherwise discarded
//! - `(` and `)` are always single-character tokens
//! - any maximal run of other characters is an atom
//!
//! The input must hold exactly one top-level element: a fully parenthesized
//! list or a bare atom.

mod tokenizer;
mod tree;


pub use tokenizer::{Token, TokenKind, tokenize};
pub use tree::ParseTree;

use crate::error::{DynArgsError, Result};

/// Parse `text` into a single tree.
///
/// # Errors
///
/// Returns `DynArgsError::ParseError` for empty input, an unmatched `)`,
/// input ending inside an open list, or more than one top-level element.
pub fn parse(text: &str) -> Result<ParseTree> {
    let mut tokens = tokenize(text);

    // Open lists; the root is implicit and never closed by `)`.
    let mut stack: Vec<Vec<ParseTree>> = vec![Vec::new()];

    loop {
        let Some(token) = tokens.next() else {
            return Err(parse_error(
                text.len(),
                if stack.len() > 1 {
                    "unexpected end of input: unclosed '('"
                } else {
                    "empty input"
                },
            ));
        };

        match token.kind {
            TokenKind::Open => stack.push(Vec::new()),
            TokenKind::Close => {
                if stack.len() == 1 {
                    return Err(parse_error(token.offset, "unmatched ')'"));
                }
                let finished = stack.pop().unwrap_or_default();
                if let Some(parent) = stack.last_mut() {
                    parent.push(ParseTree::List(finished));
                }
            }
            TokenKind::Atom => {
                if let Some(current) = stack.last_mut() {
                    current.push(ParseTree::Atom(token.text.to_string()));
                }
            }
        }

        if stack.len() == 1 {
            break;
        }
    }

    if let Some(extra) = tokens.next() {
        return Err(parse_error(
            extra.offset,
            &format!(
                "expected a single top-level expression, found trailing '{}'",
                extra.text
            ),
        ));
    }

    let mut root = stack.pop().unwrap_or_default();
    root.pop()
        .ok_or_else(|| parse_error(text.len(), "empty input"))
}

/// Remove `;` line comments, as used in PDDL files.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| match line.find(';') {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_error(offset: usize, message: &str) -> DynArgsError {
    DynArgsError::ParseError {
        offset,
        message: message.to_string(),
    }
}
