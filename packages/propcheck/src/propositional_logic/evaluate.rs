use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A name-keyed truth assignment, as reported for witnesses and
/// counterexamples or supplied by callers to evaluate a formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation(pub IndexMap<String, bool>);

impl Interpretation {
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Interpretation {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Interpretation(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}

impl Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variable_list = self
            .0
            .iter()
            .sorted_by_key(|(name, _)| name.as_str())
            .map(|(name, &value)| {
                let prefix = if value { "" } else { "¬" };
                format!("{prefix}{name}")
            })
            .join(", ");

        write!(f, "{{{}}}", variable_list)
    }
}
