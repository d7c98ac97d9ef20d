//! Native PDDL reader for initial states.

use super::{TaskLoader, atom_notation};
use crate::error::{DynArgsError, Result};
use crate::sexpr::{self, ParseTree};
use std::collections::BTreeSet;
use std::path::Path;

/// Reads the `:init` section of a PDDL problem.
///
/// The initial state holds the positive literals of `:init` plus the
/// equality atom `=(o, o)` for every domain constant and problem object.
/// Negated literals and numeric assignments are not facts and are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PddlTaskLoader;

impl PddlTaskLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TaskLoader for PddlTaskLoader {
    fn initial_state(&self, domain: &Path, problem: &Path) -> Result<BTreeSet<String>> {
        let domain_tree = read_define(domain)?;
        let problem_tree = read_define(problem)?;

        let mut objects = Vec::new();
        if let Some(constants) = section(&domain_tree, ":constants") {
            objects.extend(typed_names(constants));
        }
        if let Some(declared) = section(&problem_tree, ":objects") {
            objects.extend(typed_names(declared));
        }

        let mut facts: BTreeSet<String> = objects
            .iter()
            .map(|&object| atom_notation("=", &[object, object]))
            .collect();

        let init = section(&problem_tree, ":init")
            .ok_or_else(|| task_error(problem, "missing :init section"))?;
        for literal in init {
            if let Some(fact) = ground_fact(literal).map_err(|msg| task_error(problem, &msg))? {
                facts.insert(fact);
            }
        }

        tracing::debug!(
            problem = %problem.display(),
            facts = facts.len(),
            "loaded initial state"
        );

        Ok(facts)
    }
}

/// Read, normalize and parse a `(define ...)` file.
fn read_define(path: &Path) -> Result<ParseTree> {
    let content = std::fs::read_to_string(path).map_err(|e| DynArgsError::io(path, e))?;
    let normalized = sexpr::strip_comments(&content).to_lowercase();

    let tree = sexpr::parse(&normalized).map_err(|e| task_error(path, &e.to_string()))?;
    if tree.head() != Some("define") {
        return Err(task_error(path, "expected a (define ...) form"));
    }
    Ok(tree)
}

/// Elements of the `(name ...)` section of a define form, without the head.
fn section<'a>(define: &'a ParseTree, name: &str) -> Option<&'a [ParseTree]> {
    define
        .as_list()?
        .iter()
        .find(|child| child.head() == Some(name))
        .and_then(ParseTree::as_list)
        .map(|items| &items[1..])
}

/// Names of a typed list such as `a b - block c`; type annotations are dropped.
fn typed_names(items: &[ParseTree]) -> Vec<&str> {
    let mut names = Vec::new();
    let mut iter = items.iter();
    while let Some(item) = iter.next() {
        match item.as_atom() {
            Some("-") => {
                iter.next();
            }
            Some(name) => names.push(name),
            None => {}
        }
    }
    names
}

/// The fact an `:init` literal contributes, if any.
fn ground_fact(literal: &ParseTree) -> std::result::Result<Option<String>, String> {
    let Some(items) = literal.as_list() else {
        return Err(format!("expected a literal in :init, found '{}'", literal));
    };
    let Some((predicate, args)) = items.split_first() else {
        return Err("empty literal in :init".to_string());
    };
    let Some(predicate) = predicate.as_atom() else {
        return Err(format!("literal without predicate name: '{}'", literal));
    };

    if predicate == "not" || predicate == "=" {
        return Ok(None);
    }

    let args = args
        .iter()
        .map(|arg| {
            arg.as_atom()
                .ok_or_else(|| format!("non-ground argument in literal '{}'", literal))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Some(atom_notation(predicate, &args)))
}

fn task_error(path: &Path, message: &str) -> DynArgsError {
    DynArgsError::TaskLoadError {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
