use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::propositional_logic::evaluate::Interpretation;

/// The question an exhaustive search answers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum SearchGoal {
    Satisfiability,
    Tautology,
}

impl SearchGoal {
    /// The evaluation result that settles the question as soon as it shows
    /// up: a satisfying assignment, or a falsifying one.
    pub fn decisive_value(self) -> bool {
        match self {
            SearchGoal::Satisfiability => true,
            SearchGoal::Tautology => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchStats {
    pub evaluation_count: usize,
    pub assignment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub(crate) goal: SearchGoal,
    pub(crate) value: bool,
    pub(crate) witness: Option<Interpretation>,
    pub(crate) stats: SearchStats,
}

impl SearchResult {
    pub fn goal(&self) -> SearchGoal {
        self.goal
    }

    /// `true` if the formula is satisfiable (resp. a tautology).
    pub fn value(&self) -> bool {
        self.value
    }

    /// The satisfying assignment or the counterexample, whichever the goal
    /// asks for, if one exists.
    pub fn witness(&self) -> Option<&Interpretation> {
        self.witness.as_ref()
    }

    pub fn into_witness(self) -> Option<Interpretation> {
        self.witness
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn goals_stop_on_opposite_values() {
        let values = SearchGoal::iter()
            .map(|goal| (goal.to_string(), goal.decisive_value()))
            .collect::<Vec<_>>();

        assert_eq!(
            values,
            vec![
                ("satisfiability".to_owned(), true),
                ("tautology".to_owned(), false)
            ]
        );
    }
}
