use std::ops::Range;

use colored::Colorize;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::explanation::Explain;

use super::{
    ast::{PropositionalVariable, Sentence},
    error::ParseError,
    operator::{Operator, PRECEDENCE},
    variables::VariableTable,
};

/// Anything that is neither a parenthesis nor a connective belongs to a
/// variable name, including digits, whitespace and punctuation.
pub fn is_variable_character(c: char) -> bool {
    c != '(' && c != ')' && !Operator::is_operator_symbol(c)
}

/// Deepest subformula nesting accepted by [`parse_sentence`]. Every enclosing
/// pair of parentheses, `¬` and binary split counts as one level, and only a
/// variable may sit at the last one.
///
/// Building, evaluating, rendering and dropping a sentence all recurse once
/// per level, so deeper input is rejected as malformed instead of exhausting
/// the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses `input` into a sentence and the table of the variables it names.
///
/// Connectives are split loosest first (`⇔`, `⇒`, `∨`, `∧`), always at their
/// first occurrence outside parentheses, so chains of one connective group to
/// the right. `¬` is only accepted as the first character of a subformula.
/// Subformulas nested more than [`MAX_NESTING_DEPTH`] levels deep fail with
/// [`ParseError::MalformedExpression`].
pub fn parse_sentence(
    input: &str,
    explanation: &mut impl Explain,
) -> Result<(Sentence, VariableTable), ParseError> {
    explanation.with_subexplanation(
        || format!("Parsing formula {}", input.cyan()),
        |explanation| {
            check_parentheses(input)?;

            let scanned = ScannedInput::new(input);

            explanation.step(|| {
                format!(
                    "Variables in order of appearance: {}",
                    scanned.variables.to_string().blue()
                )
            });

            let sentence = scanned.sentence(0..scanned.chars.len(), 0, explanation)?;

            log::trace!(
                "parsed {:?} into {} nodes over {} variables",
                input,
                sentence.node_count(),
                scanned.variables.len()
            );

            Ok((sentence, scanned.variables))
        },
    )
}

fn check_parentheses(input: &str) -> Result<(), ParseError> {
    let opening = input.chars().filter(|&c| c == '(').count();
    let closing = input.chars().filter(|&c| c == ')').count();

    if opening == closing {
        Ok(())
    } else {
        Err(ParseError::UnbalancedParentheses {
            input: input.to_owned(),
            opening,
            closing,
        })
    }
}

/// The input split into characters, plus the per-position lookups every
/// recursive step shares.
#[derive(Debug)]
struct ScannedInput {
    chars: Vec<char>,
    operators: Vec<Option<Operator>>,
    // Index of the parenthesis closing the one opened at each position.
    closing: Vec<Option<usize>>,
    variables: VariableTable,
}

impl ScannedInput {
    fn new(input: &str) -> Self {
        let chars = input.chars().collect::<Vec<_>>();
        let operators = chars.iter().map(|&c| Operator::from_symbol(c)).collect();

        let mut closing = vec![None; chars.len()];
        let mut open = vec![];
        for (index, &c) in chars.iter().enumerate() {
            match c {
                '(' => open.push(index),
                ')' => {
                    if let Some(opening) = open.pop() {
                        closing[opening] = Some(index);
                    }
                }
                _ => {}
            }
        }

        let mut variables = VariableTable::new();
        for (is_variable, run) in &chars.iter().chunk_by(|&&c| is_variable_character(c)) {
            if is_variable {
                variables.register(run.collect::<String>());
            }
        }

        Self {
            chars,
            operators,
            closing,
            variables,
        }
    }

    fn text(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    fn malformed(&self, range: Range<usize>) -> ParseError {
        ParseError::MalformedExpression {
            position: range.start,
            fragment: self.text(range),
        }
    }

    fn sentence<E: Explain>(
        &self,
        range: Range<usize>,
        depth: usize,
        explanation: &mut E,
    ) -> Result<Sentence, ParseError> {
        let described = range.clone();

        explanation.with_subexplanation(
            move || format!("Parsing {}", self.text(described).cyan()),
            |explanation| {
                let Range { start, end } = range;

                if start == end {
                    explanation.step(|| "Empty subformula".red().to_string());
                    return Err(self.malformed(range));
                }

                if self.chars[range.clone()]
                    .iter()
                    .all(|&c| is_variable_character(c))
                {
                    let name = self.text(range.clone());
                    let index = self
                        .variables
                        .index_of(&name)
                        .ok_or_else(|| self.malformed(range.clone()))?;

                    explanation.step(|| format!("Variable {}", name.green()));

                    return Ok(PropositionalVariable { name, index }.into());
                }

                if depth == MAX_NESTING_DEPTH {
                    explanation.step(|| "Nested too deeply".red().to_string());
                    return Err(self.malformed(range));
                }

                if self.chars[start] == '('
                    && self.chars[end - 1] == ')'
                    && self.closing[start] == Some(end - 1)
                {
                    explanation.step(|| "Removing enclosing parentheses".to_owned());

                    return self.sentence(start + 1..end - 1, depth + 1, explanation);
                }

                let first_indices = self.top_level_operators(range.clone());

                explanation.step(|| {
                    format!(
                        "Connectives outside parentheses: {}",
                        first_indices
                            .iter()
                            .map(|(operator, index)| format!("{operator} at {index}"))
                            .join(", ")
                    )
                });

                for &operator in PRECEDENCE.iter().rev() {
                    let Some(&index) = first_indices.get(&operator) else {
                        continue;
                    };

                    if operator.arity() == 1 {
                        if index != start {
                            explanation.step(|| {
                                format!("{} is not a prefix here", operator.to_string().red())
                            });
                            continue;
                        }

                        explanation.step(|| {
                            format!("Applying {}", operator.to_string().magenta())
                        });

                        let operand = self.sentence(start + 1..end, depth + 1, explanation)?;

                        return Ok(Sentence::unary(operator, operand));
                    }

                    explanation.step(|| {
                        format!(
                            "Splitting at {} (position {index})",
                            operator.to_string().magenta()
                        )
                    });

                    let left = self.sentence(start..index, depth + 1, explanation)?;
                    let right = self.sentence(index + 1..end, depth + 1, explanation)?;

                    return Ok(Sentence::binary(operator, left, right));
                }

                explanation.step(|| "No usable connective".red().to_string());

                Err(self.malformed(range))
            },
        )
    }

    /// First position of each connective kind at parenthesis depth zero,
    /// depth being counted from the start of `range`.
    fn top_level_operators(&self, range: Range<usize>) -> IndexMap<Operator, usize> {
        let mut depth = 0isize;
        let mut first_indices = IndexMap::new();

        for index in range {
            match self.chars[index] {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ if depth != 0 => {}
                _ => {
                    if let Some(operator) = self.operators[index] {
                        first_indices.entry(operator).or_insert(index);
                    }
                }
            }
        }

        first_indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::explanation::{DiscardedExplanation, Explanation};

    use test_log::test;

    fn render(input: &str) -> Result<String, ParseError> {
        parse_sentence(input, &mut DiscardedExplanation).map(|(sentence, _)| sentence.to_string())
    }

    #[test]
    fn prescan_registers_maximal_runs_once() {
        let (_, variables) = parse_sentence("(p1∧q)∨(¬p1⇒r s)", &mut DiscardedExplanation)
            .expect("formula should parse");

        assert_eq!(variables.iter().collect::<Vec<_>>(), vec!["p1", "q", "r s"]);
    }

    #[test]
    fn operators_inside_parentheses_are_not_split_points() {
        let test_cases = [
            ("(a∨b)∧c", "((a∨b)∧c)"),
            ("a∧(b∨c)", "(a∧(b∨c))"),
            ("(a⇒b)⇔(c⇒d)", "((a⇒b)⇔(c⇒d))"),
            ("((a))", "a"),
            ("(a)∧(b)", "(a∧b)"),
            ("¬(a∧b)", "(¬(a∧b))"),
        ];

        for (i, (input, expected)) in test_cases.into_iter().enumerate() {
            assert_eq!(
                render(input).as_deref(),
                Ok(expected),
                "Test case {}; Input: {}",
                i + 1,
                input
            );
        }
    }

    #[test]
    fn malformed_positions_point_into_the_input() {
        let test_cases = [
            ("a∧∧b", "", 2),
            ("¬", "", 1),
            ("a¬b", "a¬b", 0),
            ("(a∧b)¬", "(a∧b)¬", 0),
            ("()", "", 1),
            (")a(", ")a(", 0),
            ("p∧", "", 2),
        ];

        for (i, (input, fragment, position)) in test_cases.into_iter().enumerate() {
            assert_eq!(
                render(input),
                Err(ParseError::MalformedExpression {
                    fragment: fragment.to_owned(),
                    position,
                }),
                "Test case {}; Input: {}",
                i + 1,
                input
            );
        }
    }

    #[test]
    fn unbalanced_counts_are_reported() {
        assert_eq!(
            render("((a∧b)"),
            Err(ParseError::UnbalancedParentheses {
                input: "((a∧b)".to_owned(),
                opening: 2,
                closing: 1,
            })
        );
    }

    #[test]
    fn deep_nesting_is_rejected_without_overflow() {
        let test_cases = [
            (format!("{}a", "¬".repeat(2000)), MAX_NESTING_DEPTH),
            (
                format!("{}a{}", "(".repeat(2000), ")".repeat(2000)),
                MAX_NESTING_DEPTH,
            ),
            (format!("{}a", "a∧".repeat(2000)), 2 * MAX_NESTING_DEPTH),
        ];

        for (i, (input, expected)) in test_cases.iter().enumerate() {
            match render(input) {
                Err(ParseError::MalformedExpression { position, fragment }) => {
                    assert_eq!(position, *expected, "Test case {}", i + 1);
                    assert!(input
                        .chars()
                        .skip(position)
                        .collect::<String>()
                        .starts_with(&fragment));
                }
                result => panic!("Test case {}: unexpected {:?}", i + 1, result),
            }
        }
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let input = format!("{}a", "¬".repeat(MAX_NESTING_DEPTH));
        let (sentence, variables) =
            parse_sentence(&input, &mut DiscardedExplanation).expect("formula should parse");

        assert_eq!(sentence.node_count(), MAX_NESTING_DEPTH + 1);

        let assignment = variables.new_assignment();
        assert!(!sentence.value(&assignment));
        assert_eq!(sentence.to_string().matches('¬').count(), MAX_NESTING_DEPTH);
    }

    #[test]
    fn explanation_records_splits() {
        let mut explanation = Explanation::new("test");

        parse_sentence("a∧b∨c", &mut explanation).expect("formula should parse");

        let steps = explanation.steps().join("\n");

        assert!(steps.contains("Splitting at"));
        assert!(steps.contains("Variable"));
    }
}
