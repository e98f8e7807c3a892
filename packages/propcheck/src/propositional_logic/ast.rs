use std::fmt::Display;

use derive_more::derive::Display;
use termtree::Tree;

use super::{operator::Operator, variables::Assignment};

/// A leaf's handle on its variable: the name it was written with and the
/// index of its cell in the formula's variable table.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
#[display("{name}")]
pub struct PropositionalVariable {
    pub name: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sentence {
    Atomic(PropositionalVariable),
    Unary {
        operator: Operator,
        operand: Box<Sentence>,
    },
    Binary {
        operator: Operator,
        left: Box<Sentence>,
        right: Box<Sentence>,
    },
}

impl From<PropositionalVariable> for Sentence {
    fn from(variable: PropositionalVariable) -> Self {
        Sentence::Atomic(variable)
    }
}

impl Sentence {
    pub fn unary(operator: Operator, operand: Sentence) -> Self {
        debug_assert_eq!(operator.arity(), 1);

        Sentence::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: Operator, left: Sentence, right: Sentence) -> Self {
        debug_assert_eq!(operator.arity(), 2);

        Sentence::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Truth value under `assignment`. Both operands of a binary node are
    /// always evaluated.
    pub fn value(&self, assignment: &Assignment) -> bool {
        match self {
            Sentence::Atomic(variable) => assignment.get(variable.index),
            Sentence::Unary { operator, operand } => {
                operator.evaluate_unary(operand.value(assignment))
            }
            Sentence::Binary {
                operator,
                left,
                right,
            } => {
                let left = left.value(assignment);
                let right = right.value(assignment);

                operator.evaluate_binary(left, right)
            }
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Sentence::Atomic(_) => 1,
            Sentence::Unary { operand, .. } => 1 + operand.node_count(),
            Sentence::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    pub fn symbol(&self) -> String {
        match self {
            Sentence::Atomic(variable) => variable.name.clone(),
            Sentence::Unary { operator, .. } | Sentence::Binary { operator, .. } => {
                operator.symbol().to_string()
            }
        }
    }

    pub fn get_tree(&self) -> Tree<String> {
        let symbol = self.symbol();

        match self {
            Sentence::Atomic(_) => Tree::new(symbol),
            Sentence::Unary { operand, .. } => {
                Tree::new(symbol).with_leaves(vec![operand.get_tree()])
            }
            Sentence::Binary { left, right, .. } => {
                Tree::new(symbol).with_leaves(vec![left.get_tree(), right.get_tree()])
            }
        }
    }
}

impl Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentence::Atomic(variable) => write!(f, "{variable}"),
            Sentence::Unary { operator, operand } => write!(f, "({operator}{operand})"),
            Sentence::Binary {
                operator,
                left,
                right,
            } => write!(f, "({left}{operator}{right})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::propositional_logic::variables::VariableTable;

    use test_log::test;

    fn variable(table: &mut VariableTable, name: &str) -> Sentence {
        PropositionalVariable {
            name: name.to_owned(),
            index: table.register(name),
        }
        .into()
    }

    #[test]
    fn render_is_fully_parenthesized() {
        let mut table = VariableTable::new();
        let alpha = variable(&mut table, "α");

        let sentence = Sentence::binary(
            Operator::Implication,
            alpha.clone(),
            Sentence::unary(
                Operator::Negation,
                Sentence::unary(Operator::Negation, alpha),
            ),
        );

        assert_eq!(sentence.to_string(), "(α⇒(¬(¬α)))");
        assert_eq!(sentence.node_count(), 4);
    }

    #[test]
    fn leaves_sharing_a_name_share_a_cell() {
        let mut table = VariableTable::new();
        let p = variable(&mut table, "p");
        let q = variable(&mut table, "q");

        let sentence = Sentence::binary(
            Operator::Conjunction,
            Sentence::binary(Operator::Disjunction, p.clone(), q),
            Sentence::unary(Operator::Negation, p),
        );

        let mut assignment = table.new_assignment();
        assert!(!sentence.value(&assignment));

        assignment.set(1, true);
        assert!(sentence.value(&assignment));

        assignment.set(0, true);
        assert!(!sentence.value(&assignment));
    }

    #[test]
    fn tree_view_lists_operators_and_names() {
        let mut table = VariableTable::new();
        let sentence = Sentence::binary(
            Operator::Equivalence,
            variable(&mut table, "a"),
            variable(&mut table, "b"),
        );

        let rendered = sentence.get_tree().to_string();

        assert!(rendered.starts_with('⇔'));
        assert!(rendered.contains('a'));
        assert!(rendered.contains('b'));
    }
}
