pub mod explanation;
pub mod propositional_logic;
