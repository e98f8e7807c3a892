pub mod ast;
pub mod error;
pub mod evaluate;
pub mod formula;
pub mod normalize;
pub mod operator;
pub mod parser;
pub mod solvers;
pub mod variables;
