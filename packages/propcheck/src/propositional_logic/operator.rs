use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Logical connectives, declared from the tightest-binding to the loosest.
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
pub enum Operator {
    Negation,
    Conjunction,
    Disjunction,
    Implication,
    Equivalence,
}

/// Operators from the tightest-binding to the loosest.
pub const PRECEDENCE: [Operator; 5] = [
    Operator::Negation,
    Operator::Conjunction,
    Operator::Disjunction,
    Operator::Implication,
    Operator::Equivalence,
];

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Negation => '¬',
            Operator::Conjunction => '∧',
            Operator::Disjunction => '∨',
            Operator::Implication => '⇒',
            Operator::Equivalence => '⇔',
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Operator::Negation => 1,
            Operator::Conjunction
            | Operator::Disjunction
            | Operator::Implication
            | Operator::Equivalence => 2,
        }
    }

    /// ASCII spellings accepted by [`normalize`](super::normalize::normalize).
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Operator::Negation => &["~", "!"],
            Operator::Conjunction => &["&&", "&", "/\\"],
            Operator::Disjunction => &["||", "|", "\\/"],
            Operator::Implication => &["=>", "->"],
            Operator::Equivalence => &["<=>", "<->"],
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Operator::iter().find(|operator| operator.symbol() == symbol)
    }

    pub fn is_operator_symbol(symbol: char) -> bool {
        Operator::from_symbol(symbol).is_some()
    }

    pub fn evaluate_unary(self, a: bool) -> bool {
        match self {
            Operator::Negation => !a,
            _ => unreachable!("{self:?} is not a unary operator"),
        }
    }

    pub fn evaluate_binary(self, a: bool, b: bool) -> bool {
        match self {
            Operator::Conjunction => a && b,
            Operator::Disjunction => a || b,
            Operator::Implication => !a || b,
            Operator::Equivalence => a == b,
            Operator::Negation => unreachable!("negation is not a binary operator"),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn truth_tables() {
        let test_cases = [
            (Operator::Conjunction, [false, false, false, true]),
            (Operator::Disjunction, [false, true, true, true]),
            (Operator::Implication, [true, true, false, true]),
            (Operator::Equivalence, [true, false, false, true]),
        ];

        for (operator, expected) in test_cases {
            let actual = [(false, false), (false, true), (true, false), (true, true)]
                .map(|(a, b)| operator.evaluate_binary(a, b));

            assert_eq!(actual, expected, "Operator: {operator}");
        }

        assert!(Operator::Negation.evaluate_unary(false));
        assert!(!Operator::Negation.evaluate_unary(true));
    }

    #[test]
    fn symbols_round_trip() {
        for operator in Operator::iter() {
            assert_eq!(Operator::from_symbol(operator.symbol()), Some(operator));
        }

        assert_eq!(Operator::from_symbol('a'), None);
        assert!(!Operator::is_operator_symbol('('));
    }

    #[test]
    fn precedence_matches_declaration_order() {
        assert_eq!(PRECEDENCE.to_vec(), Operator::iter().collect::<Vec<_>>());
        assert_eq!(
            PRECEDENCE.iter().filter(|operator| operator.arity() == 1).count(),
            1
        );
    }
}
