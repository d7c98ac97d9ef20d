//! Parse tree produced by [`super::parse`].
//!
//! Trees may nest arbitrarily deep, so every whole-tree walk here (drop,
//! display, JSON rendering) runs on an explicit work stack.

use std::fmt;

/// A parsed expression: an atom or an ordered list of child expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
    Atom(String),
    List(Vec<ParseTree>),
}

/// One output element of a tree walk.
enum Piece<'a> {
    Atom(&'a str),
    Open,
    Separator,
    Close,
}

/// Pending work of a tree walk.
enum Step<'a> {
    Node(&'a ParseTree),
    Separator,
    Close,
}

impl ParseTree {
    /// The atom text, if this node is an atom.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            ParseTree::Atom(atom) => Some(atom),
            ParseTree::List(_) => None,
        }
    }

    /// The children, if this node is a list.
    pub fn as_list(&self) -> Option<&[ParseTree]> {
        match self {
            ParseTree::Atom(_) => None,
            ParseTree::List(children) => Some(children),
        }
    }

    /// The leading atom of a list, e.g. `define` for `(define ...)`.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// Render the tree as compact JSON: atoms as strings, lists as arrays.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        self.walk(|piece| -> serde_json::Result<()> {
            match piece {
                Piece::Atom(atom) => out.push_str(&serde_json::to_string(atom)?),
                Piece::Open => out.push('['),
                Piece::Separator => out.push(','),
                Piece::Close => out.push(']'),
            }
            Ok(())
        })?;
        Ok(out)
    }

    /// Visit the tree in output order.
    fn walk<E>(&self, mut emit: impl FnMut(Piece<'_>) -> Result<(), E>) -> Result<(), E> {
        let mut pending = vec![Step::Node(self)];

        while let Some(step) = pending.pop() {
            match step {
                Step::Node(ParseTree::Atom(atom)) => emit(Piece::Atom(atom))?,
                Step::Node(ParseTree::List(children)) => {
                    emit(Piece::Open)?;
                    pending.push(Step::Close);
                    for (i, child) in children.iter().enumerate().rev() {
                        pending.push(Step::Node(child));
                        if i > 0 {
                            pending.push(Step::Separator);
                        }
                    }
                }
                Step::Separator => emit(Piece::Separator)?,
                Step::Close => emit(Piece::Close)?,
            }
        }

        Ok(())
    }
}

/// Re-serializes the tree with single spaces between elements.
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.walk(|piece| match piece {
            Piece::Atom(atom) => f.write_str(atom),
            Piece::Open => f.write_str("("),
            Piece::Separator => f.write_str(" "),
            Piece::Close => f.write_str(")"),
        })
    }
}

impl Drop for ParseTree {
    fn drop(&mut self) {
        let ParseTree::List(children) = self else {
            return;
        };

        // Detach grandchildren before each node drops so no drop recurses.
        let mut detached = std::mem::take(children);
        while let Some(mut node) = detached.pop() {
            if let ParseTree::List(grandchildren) = &mut node {
                detached.append(grandchildren);
            }
        }
    }
}
