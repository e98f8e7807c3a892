use itertools::Itertools;
use strum::IntoEnumIterator;
use winnow::{
    ascii::multispace1,
    combinator::{alt, repeat},
    error::{ContextError, ParseError},
    token::{any, literal},
    Parser,
};

use super::operator::Operator;

/// Rewrites ASCII connective spellings (`->`, `&&`, `~`, ...) to the symbols
/// the parser understands and drops whitespace.
///
/// Longer aliases win over their prefixes, so `<=>` becomes `⇔` rather than
/// `<⇒`. Canonical symbols and every other character pass through untouched.
pub fn normalize(input: &str) -> String {
    let mut aliases = aliases_longest_first()
        .into_iter()
        .map(|(alias, operator)| literal(alias).value(operator.symbol()))
        .collect::<Vec<_>>();

    let normalized: Result<String, ParseError<&str, ContextError>> = repeat(
        0..,
        alt((
            multispace1.value(None),
            alt(aliases.as_mut_slice()).map(Some),
            any.map(Some),
        )),
    )
    .fold(String::new, |mut normalized, c: Option<char>| {
        normalized.extend(c);
        normalized
    })
    .parse(input);

    normalized.unwrap_or_else(|_| input.to_owned())
}

fn aliases_longest_first() -> Vec<(&'static str, Operator)> {
    Operator::iter()
        .flat_map(|operator| {
            operator
                .aliases()
                .iter()
                .map(move |&alias| (alias, operator))
        })
        .sorted_by_key(|(alias, _)| std::cmp::Reverse(alias.len()))
        .collect()
}
