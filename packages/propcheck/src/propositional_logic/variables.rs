use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use super::evaluate::Interpretation;

/// Variable names of one formula, in order of first appearance.
///
/// A name's position in the table is the index every leaf naming it uses to
/// reach its cell in an [`Assignment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable(IndexSet<String>);

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` if unseen and returns its index either way.
    pub fn register(&mut self, name: impl Into<String>) -> usize {
        self.0.insert_full(name.into()).0
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Fresh cells for every variable, all `false`.
    pub fn new_assignment(&self) -> Assignment {
        Assignment(vec![false; self.len()])
    }

    /// Snapshots `assignment` into a name-keyed mapping, in table order.
    pub fn interpretation(&self, assignment: &Assignment) -> Interpretation {
        Interpretation(
            self.0
                .iter()
                .zip(assignment.0.iter())
                .map(|(name, &value)| (name.clone(), value))
                .collect::<IndexMap<_, _>>(),
        )
    }

    /// Builds cells from a name-keyed mapping, returning the first table name
    /// the mapping lacks on failure.
    pub fn assignment_from(&self, interpretation: &Interpretation) -> Result<Assignment, &str> {
        self.0
            .iter()
            .map(|name| interpretation.get(name).ok_or(name.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map(Assignment)
    }
}

impl Display for VariableTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

/// One boolean cell per variable, indexed like the owning [`VariableTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment(Vec<bool>);

impl Assignment {
    pub fn get(&self, index: usize) -> bool {
        self.0[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.0[index] = value;
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
