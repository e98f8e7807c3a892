use std::io::{self, BufRead, Write};

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use colored::Colorize;
use propcheck::{
    explanation::{DiscardedExplanation, Explanation},
    propositional_logic::{
        error::ParseError,
        formula::Formula,
        normalize::normalize,
        solvers::{
            brute_force::{AssignmentSearch, VariableOrder},
            solve::{SearchGoal, SearchResult},
        },
    },
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Checks whether a propositional formula is satisfiable and whether it is a tautology"
)]
struct Cli {
    /// Formula to check, e.g. "α⇒¬¬α" (read from standard input if omitted)
    formula: Option<String>,

    /// Parse the formula as given, without rewriting ASCII connectives
    #[arg(long)]
    raw: bool,

    /// Order in which variables are fixed: first-appearance or lexicographic
    #[arg(long, default_value_t = VariableOrder::FirstAppearance)]
    order: VariableOrder,

    /// Print how the formula was parsed and searched
    #[arg(long)]
    explain: bool,

    /// Refuse formulas naming more variables than this
    #[arg(long, value_name = "INT", default_value_t = 24)]
    max_variables: usize,

    /// Log more (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    TermLogger::init(
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        },
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let input = match cli.formula {
        Some(formula) => formula,
        None => read_formula()?,
    };

    let text = if cli.raw {
        input.clone()
    } else {
        normalize(&input)
    };

    if text != input {
        println!("Replaced text: {}", text.yellow());
    }

    let (formula, explanation) = parse_formula(&text, cli.explain);

    if let Some(explanation) = explanation {
        println!("{explanation}");
    }

    let formula = formula?;

    println!("Evaluated: {}", formula.render().blue());

    if cli.explain {
        println!("{}", formula.sentence().get_tree());
    }

    let variable_count = formula.variables().len();
    if variable_count > cli.max_variables {
        return Err(eyre!(
            "{} names {} variables, more than the limit of {}",
            formula,
            variable_count,
            cli.max_variables
        ));
    }

    log::info!(
        "Searching up to 2^{} assignments of {}",
        variable_count,
        formula.variables()
    );

    let search = AssignmentSearch::new(cli.order);
    log::debug!("Fixing variables in {} order", search.order());

    println!("-----");

    let satisfiability = run_search(&formula, &search, SearchGoal::Satisfiability, cli.explain);
    if satisfiability.value() {
        println!("This logic is {}.", "satisfiable".green());
    } else {
        println!("This logic is {} satisfiable.", "NOT".red());
    }
    if let Some(solution) = satisfiability.witness() {
        println!("Possible solution: {}", solution.to_string().blue());
    }

    println!("-----");

    let tautology = run_search(&formula, &search, SearchGoal::Tautology, cli.explain);
    if tautology.value() {
        println!("This logic is {}.", "a tautology".green());
    } else {
        println!("This logic is {} a tautology.", "NOT".red());
    }
    if let Some(counterexample) = tautology.witness() {
        println!("Counter example: {}", counterexample.to_string().blue());
    }

    Ok(())
}

fn read_formula() -> Result<String> {
    print!("Input: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Parses `text`, recording the steps only when they are going to be shown.
fn parse_formula(text: &str, explain: bool) -> (Result<Formula, ParseError>, Option<Explanation>) {
    if explain {
        let mut explanation = Explanation::new("Parse");
        let formula = Formula::parse_explained(text, &mut explanation);

        (formula, Some(explanation))
    } else {
        (
            Formula::parse_explained(text, &mut DiscardedExplanation),
            None,
        )
    }
}

fn run_search(
    formula: &Formula,
    search: &AssignmentSearch,
    goal: SearchGoal,
    explain: bool,
) -> SearchResult {
    let result = if explain {
        let mut explanation = Explanation::new(goal.to_string());
        let result = formula.search(search, goal, &mut explanation);

        println!("{explanation}");

        result
    } else {
        formula.search(search, goal, &mut DiscardedExplanation)
    };

    log::info!(
        "{} took {} evaluations and {} assignments",
        result.goal(),
        result.stats().evaluation_count,
        result.stats().assignment_count
    );

    result
}
