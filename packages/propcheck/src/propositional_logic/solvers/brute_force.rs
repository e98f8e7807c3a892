use colored::Colorize;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    explanation::Explain,
    propositional_logic::{
        ast::Sentence,
        variables::{Assignment, VariableTable},
    },
};

use super::solve::{SearchGoal, SearchResult, SearchStats};

/// The order in which variables are fixed, outermost first. It decides which
/// witness is found first, not whether one is found.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
pub enum VariableOrder {
    #[default]
    FirstAppearance,
    Lexicographic,
}

/// Depth-first enumeration of all 2^n assignments, `false` before `true`,
/// stopping at the first assignment that settles the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentSearch {
    order: VariableOrder,
}

impl AssignmentSearch {
    pub fn new(order: VariableOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> VariableOrder {
        self.order
    }

    pub fn run(
        &self,
        sentence: &Sentence,
        variables: &VariableTable,
        goal: SearchGoal,
        explanation: &mut impl Explain,
    ) -> SearchResult {
        let mut engine = SearchEngine {
            sentence,
            variables,
            goal,
            order: self.ordered_indices(variables),
            assignment: variables.new_assignment(),
            stats: SearchStats::default(),
        };

        let value = explanation.with_subexplanation(
            || {
                format!(
                    "Checking {} of {} over {}",
                    goal,
                    sentence.to_string().blue(),
                    variables
                )
            },
            |explanation| engine.search(0, explanation),
        );

        log::debug!(
            "{} search over {} variables: {} after {} evaluations",
            goal,
            variables.len(),
            value,
            engine.stats.evaluation_count
        );

        let witness =
            (value == goal.decisive_value()).then(|| variables.interpretation(&engine.assignment));

        SearchResult {
            goal,
            value,
            witness,
            stats: engine.stats,
        }
    }

    fn ordered_indices(&self, variables: &VariableTable) -> Vec<usize> {
        let mut indices = (0..variables.len()).collect::<Vec<_>>();

        match self.order {
            VariableOrder::FirstAppearance => {}
            VariableOrder::Lexicographic => indices.sort_by_key(|&index| variables.name(index)),
        }

        indices
    }
}

#[derive(Debug)]
struct SearchEngine<'a> {
    sentence: &'a Sentence,
    variables: &'a VariableTable,
    goal: SearchGoal,

    // Table indices, in the order variables are fixed.
    order: Vec<usize>,
    assignment: Assignment,

    stats: SearchStats,
}

impl SearchEngine<'_> {
    fn assign(&mut self, index: usize, value: bool) {
        self.assignment.set(index, value);
        self.stats.assignment_count += 1;
    }

    /// Leaves the assignment as set by the last branch explored, which is the
    /// witness whenever the decisive value is returned.
    fn search<E: Explain>(&mut self, depth: usize, explanation: &mut E) -> bool {
        if depth == self.order.len() {
            self.stats.evaluation_count += 1;

            let value = self.sentence.value(&self.assignment);

            explanation.step(|| {
                format!(
                    "{} under {}",
                    if value { "true".green() } else { "false".red() },
                    self.variables.interpretation(&self.assignment)
                )
            });

            return value;
        }

        let index = self.order[depth];
        let name = self.variables.name(index).unwrap_or_default();
        let decisive_value = self.goal.decisive_value();

        self.assign(index, false);

        let result = explanation.with_subexplanation(
            || format!("{} ≔ false", name.cyan()),
            |explanation| self.search(depth + 1, explanation),
        );

        if result == decisive_value {
            explanation.step(|| "No need to check the other branch".to_owned());
            return result;
        }

        self.assign(index, true);

        explanation.with_subexplanation(
            || format!("{} ≔ true", name.cyan()),
            |explanation| self.search(depth + 1, explanation),
        )
    }
}
