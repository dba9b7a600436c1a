//! Prompting for fields the user did not pass as flags.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Input, Select};

use bloodbank_core::storage::Identity;
use bloodbank_core::BloodType;

use crate::cli::IdentityArgs;
use crate::errors::CliError;

/// Decides whether a missing value is asked for or reported.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    interactive: bool,
}

impl Prompter {
    pub fn new(no_input: bool) -> Self {
        Self {
            interactive: io::stdin().is_terminal() && !no_input,
        }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { interactive: false }
    }

    fn missing(&self, flag: &str) -> anyhow::Error {
        CliError::invalid_input(format!(
            "--{} is required when prompts are disabled",
            flag
        ))
        .into()
    }

    fn text(&self, value: Option<String>, flag: &str, prompt: &str) -> anyhow::Result<String> {
        if let Some(value) = value {
            return Ok(value);
        }
        if !self.interactive {
            return Err(self.missing(flag));
        }
        Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
    }

    fn optional_text(&self, value: Option<String>, prompt: &str) -> anyhow::Result<String> {
        if let Some(value) = value {
            return Ok(value);
        }
        if !self.interactive {
            return Ok(String::new());
        }
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn number<T>(&self, value: Option<T>, flag: &str, prompt: &str) -> anyhow::Result<T>
    where
        T: Clone + std::str::FromStr + ToString,
        <T as std::str::FromStr>::Err: std::fmt::Debug + ToString,
    {
        if let Some(value) = value {
            return Ok(value);
        }
        if !self.interactive {
            return Err(self.missing(flag));
        }
        Ok(Input::<T>::new().with_prompt(prompt).interact_text()?)
    }

    /// Ask whether the donor has a chronic condition, unless already flagged.
    pub fn chronic_condition(&self, flagged: bool) -> anyhow::Result<bool> {
        if flagged || !self.interactive {
            return Ok(flagged);
        }
        Ok(Confirm::new()
            .with_prompt("Do you have any chronic health condition?")
            .default(false)
            .interact()?)
    }
}

/// Fill in identity fields from flags, prompting for the rest.
pub fn prompt_identity(prompter: &Prompter, args: &IdentityArgs) -> anyhow::Result<Identity> {
    Ok(Identity {
        name: prompter.text(args.name.clone(), "name", "Name")?,
        email: prompter.text(args.email.clone(), "email", "Email")?,
        age: prompter.number(args.age, "age", "Age")?,
        id: prompter.number(args.id, "id", "ID")?,
        phone: prompter.optional_text(args.phone.clone(), "Phone (optional)")?,
    })
}

pub fn prompt_amount(prompter: &Prompter, value: Option<i64>, prompt: &str) -> anyhow::Result<i64> {
    prompter.number(value, "amount", prompt)
}

/// Blood type code from the flag, or picked from the list.
pub fn prompt_blood_type(prompter: &Prompter, value: Option<String>) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !prompter.interactive {
        return Err(prompter.missing("blood-type"));
    }
    let codes: Vec<&str> = BloodType::ALL.iter().map(|bt| bt.code()).collect();
    let index = Select::new()
        .with_prompt("Blood type")
        .items(&codes)
        .default(0)
        .interact()?;
    Ok(codes[index].to_string())
}
