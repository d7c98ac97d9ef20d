//! Tokenizer for nested-parenthesis expressions.

use std::iter::Peekable;
use std::str::CharIndices;

/// Token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    Open,
    /// `)`
    Close,
    /// A maximal run of non-whitespace, non-parenthesis characters.
    Atom,
}

/// A token borrowed from the input, with its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Iterator over the tokens of `input`. Whitespace is skipped.
pub struct Tokens<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

/// Tokenize `input` lazily.
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens {
        input,
        chars: input.char_indices().peekable(),
    }
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == ')'
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }

        let (start, ch) = self.chars.next()?;
        let kind = match ch {
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            _ => TokenKind::Atom,
        };

        let end = if kind == TokenKind::Atom {
            let mut end = start + ch.len_utf8();
            while let Some(&(pos, next)) = self.chars.peek() {
                if is_delimiter(next) {
                    break;
                }
                end = pos + next.len_utf8();
                self.chars.next();
            }
            end
        } else {
            start + 1
        };

        Some(Token {
            kind,
            text: &self.input[start..end],
            offset: start,
        })
    }
}
