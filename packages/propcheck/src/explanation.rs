use std::fmt::Display;

use enum_as_inner::EnumAsInner;
use termtree::Tree;

/// A sink for human-readable reasoning steps.
///
/// Descriptions are passed as closures so that sinks which throw everything
/// away (see [`DiscardedExplanation`]) never pay for formatting.
pub trait Explain {
    fn step(&mut self, step: impl FnOnce() -> String);

    fn subexplanation(&mut self, description: impl FnOnce() -> String) -> &mut Self;

    fn with_subexplanation<T>(
        &mut self,
        description: impl FnOnce() -> String,
        function: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let explanation = self.subexplanation(description);
        function(explanation)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, EnumAsInner)]
enum ExplanationComponent {
    Step(String),
    Explanation(Explanation),
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Explanation {
    description: String,
    components: Vec<ExplanationComponent>,
}

impl Explanation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            components: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Flattened list of all steps, depth first.
    pub fn steps(&self) -> Vec<&str> {
        let mut steps = vec![];

        for component in &self.components {
            match component {
                ExplanationComponent::Step(step) => steps.push(step.as_str()),
                ExplanationComponent::Explanation(explanation) => {
                    steps.extend(explanation.steps())
                }
            }
        }

        steps
    }

    pub fn get_tree(&self) -> Tree<String> {
        let mut leaves = vec![];

        for component in &self.components {
            match component {
                ExplanationComponent::Step(step) => {
                    leaves.push(Tree::new(step.clone()));
                }
                ExplanationComponent::Explanation(explanation) => {
                    leaves.push(explanation.get_tree());
                }
            }
        }

        Tree::new(self.description.clone()).with_leaves(leaves)
    }
}

impl Explain for Explanation {
    fn step(&mut self, step: impl FnOnce() -> String) {
        let step = ExplanationComponent::Step(step());

        if self.components.last() != Some(&step) {
            self.components.push(step);
        }
    }

    fn subexplanation(&mut self, description: impl FnOnce() -> String) -> &mut Self {
        self.components
            .push(ExplanationComponent::Explanation(Explanation::new(
                description(),
            )));

        match self
            .components
            .last_mut()
            .and_then(ExplanationComponent::as_explanation_mut)
        {
            Some(explanation) => explanation,
            None => unreachable!("a subexplanation was just pushed"),
        }
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.get_tree())
    }
}

/// An [`Explain`] sink that drops every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardedExplanation;

impl Explain for DiscardedExplanation {
    fn step(&mut self, _step: impl FnOnce() -> String) {}

    fn subexplanation(&mut self, _description: impl FnOnce() -> String) -> &mut Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn repeated_steps_are_collapsed() {
        let mut explanation = Explanation::new("root");
        assert!(explanation.is_empty());

        explanation.step(|| "a".to_owned());
        explanation.step(|| "a".to_owned());
        explanation.step(|| "b".to_owned());

        assert_eq!(explanation.steps(), vec!["a", "b"]);
    }

    #[test]
    fn subexplanations_nest_in_the_tree() {
        let mut explanation = Explanation::new("root");

        explanation.with_subexplanation(
            || "child".to_owned(),
            |explanation| explanation.step(|| "inner".to_owned()),
        );
        explanation.step(|| "outer".to_owned());

        assert_eq!(explanation.steps(), vec!["inner", "outer"]);

        let rendered = explanation.to_string();
        assert!(rendered.starts_with("root"));
        assert!(rendered.contains("child"));
        assert!(rendered.contains("inner"));
    }

    #[test]
    fn discarded_explanation_never_formats() {
        let mut explanation = DiscardedExplanation;

        explanation.step(|| panic!("step should not be built"));
        explanation.with_subexplanation(
            || panic!("description should not be built"),
            |_| (),
        );
    }
}
