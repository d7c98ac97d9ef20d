use crate::error::Result;
use crate::task_loader::TaskLoader;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const BLOCKS_DOMAIN: &str = "\
(define (domain blocks)
  (:requirements :strips :typing)
  (:types block)
  (:constants table - block)
  (:predicates (on ?x ?y - block) (ontable ?x - block) (clear ?x - block) (handempty))
  (:action pick-up
    :parameters (?x - block)
    :precondition (and (clear ?x) (ontable ?x) (handempty))
    :effect (and (not (ontable ?x)) (not (clear ?x)) (not (handempty)))))
";

pub(crate) const BLOCKS_PROBLEM: &str = "\
; two blocks, b on a
(define (problem blocks-p01)
  (:domain blocks)
  (:objects a b - block)
  (:init (on b a) (ontable a) (clear b) (handempty))
  (:goal (and (on a b))))
";

pub(crate) fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// A domain/problem pair on disk, optionally with an atom catalogue.
pub(crate) struct TaskFixture {
    pub(crate) temp: TempDir,
    pub(crate) domain: PathBuf,
    pub(crate) problem: PathBuf,
}

impl TaskFixture {
    /// Blocks task whose problem file is named `problem_name`.
    pub(crate) fn blocks(problem_name: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let domain = write_file(temp.path(), "domain.pddl", BLOCKS_DOMAIN);
        let problem = write_file(temp.path(), problem_name, BLOCKS_PROBLEM);
        Self {
            temp,
            domain,
            problem,
        }
    }

    /// Write `<problem-stem>.atoms` with the given JSON.
    pub(crate) fn with_atoms(self, json: &str) -> Self {
        let name = self.problem.with_extension("atoms");
        std::fs::write(name, json).unwrap();
        self
    }

    pub(crate) fn dir(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn inputs(&self) -> Vec<PathBuf> {
        vec![self.domain.clone(), self.problem.clone()]
    }
}

/// Task loader returning a fixed initial state and counting its calls.
pub(crate) struct FakeTaskLoader {
    facts: BTreeSet<String>,
    calls: Cell<usize>,
}

impl FakeTaskLoader {
    pub(crate) fn new<I, S>(facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            facts: facts.into_iter().map(Into::into).collect(),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TaskLoader for FakeTaskLoader {
    fn initial_state(&self, _domain: &Path, _problem: &Path) -> Result<BTreeSet<String>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.facts.clone())
    }
}
