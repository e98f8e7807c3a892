use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::explanation::{DiscardedExplanation, Explain};

use super::{
    ast::Sentence,
    error::{EvaluationError, ParseError},
    evaluate::Interpretation,
    parser::parse_sentence,
    solvers::{
        brute_force::AssignmentSearch,
        solve::{SearchGoal, SearchResult},
    },
    variables::VariableTable,
};

/// A parsed formula: its expression tree and the variables it names.
///
/// A formula is never mutated after parsing. Every search works on its own
/// copy of the variable cells, so one formula may be searched from several
/// threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    sentence: Sentence,
    variables: VariableTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaAttributes {
    pub satisfiable: bool,
    pub valid: bool,
}

impl Formula {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_explained(input, &mut DiscardedExplanation)
    }

    pub fn parse_explained(
        input: &str,
        explanation: &mut impl Explain,
    ) -> Result<Self, ParseError> {
        let (sentence, variables) = parse_sentence(input, explanation).inspect_err(|error| {
            log::debug!("rejected {:?}: {}", input, error);
        })?;

        log::debug!(
            "parsed {:?} as {} with variables {}",
            input,
            sentence,
            variables
        );

        Ok(Self {
            sentence,
            variables,
        })
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Fully parenthesized form using the canonical connective symbols.
    pub fn render(&self) -> String {
        self.sentence.to_string()
    }

    pub fn evaluate(&self, interpretation: &Interpretation) -> Result<bool, EvaluationError> {
        let assignment = self.variables.assignment_from(interpretation).map_err(|name| {
            EvaluationError::MissingVariable {
                name: name.to_owned(),
            }
        })?;

        Ok(self.sentence.value(&assignment))
    }

    pub fn search(
        &self,
        search: &AssignmentSearch,
        goal: SearchGoal,
        explanation: &mut impl Explain,
    ) -> SearchResult {
        search.run(&self.sentence, &self.variables, goal, explanation)
    }

    /// A satisfying assignment, or `None` if the formula is unsatisfiable.
    pub fn check_satisfiable(&self) -> Option<Interpretation> {
        self.search(
            &AssignmentSearch::default(),
            SearchGoal::Satisfiability,
            &mut DiscardedExplanation,
        )
        .into_witness()
    }

    /// A falsifying assignment, or `None` if the formula is a tautology.
    pub fn check_tautology(&self) -> Option<Interpretation> {
        self.search(
            &AssignmentSearch::default(),
            SearchGoal::Tautology,
            &mut DiscardedExplanation,
        )
        .into_witness()
    }

    pub fn get_attributes(&self) -> FormulaAttributes {
        FormulaAttributes {
            satisfiable: self.check_satisfiable().is_some(),
            valid: self.check_tautology().is_none(),
        }
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sentence)
    }
}
