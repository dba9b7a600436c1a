//! Input and parsing helper functions for the CLI.
//!
//! - Prompting for missing identity and donation fields (`input`)
//! - Collection and date parsing (`parsing`)

mod input;
mod parsing;

pub use input::{prompt_amount, prompt_blood_type, prompt_identity, Prompter};
pub use parsing::{parse_collection, parse_date};
