//! Instruction interpreter for tracker sessions.
//!
//! One invocation per line:
//!
//! `FUNCTION arg arg ...`
//!
//! where FUNCTION is one of the tracker functions (`write`, `update`, `delete`,
//! `fetch`) or a shell keyword (`help`, `quit`, `exit`). Arguments are separated by
//! whitespace; wrap an argument in double quotes to keep spaces, and use `\"` or
//! `\\` inside quotes for a literal quote or backslash. `""` is an empty argument.
//!
//! Examples:
//! - `write A1 box drug classA alice shipped 2024-01-01T00:00Z "New York" 40.7,-74.0 Aspirin Acme blister 100ct 2024-01-01 LOT1 2026-01-01`
//! - `update A1 bob received 2024-01-05T00:00Z "Los Angeles" 34.0,-118.2`
//! - `fetch A1`
//! - `delete A1`

use pharmatrack_core::tracker::{
    api::{Invocation, InvocationResponse},
    dispatch::FUNCTIONS,
};

/// Represents a parsed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Blank line or comment
    Nil,
    Help,
    Quit,
    /// Routed to the tracker as is
    Invoke(Invocation),
}

impl TryFrom<&str> for Instruction {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();

        // Skip empty lines and comments
        if s.is_empty() || s.starts_with('#') {
            return Ok(Instruction::Nil);
        }

        let mut words = split_arguments(s)?.into_iter();
        let function = words.next().ok_or_else(|| anyhow::anyhow!("Invalid instruction format"))?;
        match function.as_str() {
            "help" | "?" => Ok(Instruction::Help),
            "quit" | "exit" => Ok(Instruction::Quit),
            _ => Ok(Instruction::Invoke(Invocation::new(function, words.collect()))),
        }
    }
}

/// Split a line into arguments, honoring double quotes.
pub fn split_arguments(line: &str) -> anyhow::Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => word.push(escaped),
                            Some(other) => {
                                word.push('\\');
                                word.push(other);
                            }
                            None => return Err(anyhow::anyhow!("Unterminated quoted argument")),
                        },
                        Some(other) => word.push(other),
                        None => return Err(anyhow::anyhow!("Unterminated quoted argument")),
                    }
                }
            }
            c if c.is_whitespace() => {
                if let Some(word) = current.take() {
                    args.push(word);
                }
            }
            c => current.get_or_insert_with(String::new).push(c),
        }
    }
    if let Some(word) = current {
        args.push(word);
    }
    Ok(args)
}

/// Text printed for a successful invocation
pub fn render_response(response: &InvocationResponse) -> String {
    match response {
        InvocationResponse::Payload(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        InvocationResponse::Empty => "OK".to_string(),
    }
}

pub fn print_help() {
    println!("Available functions:");
    for (name, arity) in FUNCTIONS {
        println!(" $ {name:<8} # arguments: {arity}");
    }
    println!();
    println!("Argument order:");
    println!(" write  id assetType category assetClass owner status moveDateTime location");
    println!("        geoLocation assetName company packingType packageSize mfgDate lotNumber");
    println!("        expiryDate [childAssetId childAssetType]...");
    println!(" update id owner status moveDateTime location geoLocation");
    println!(" delete id");
    println!(" fetch  id");
    println!();
    println!("Utility:");
    println!(" $ help                           # Show this help message");
    println!(" $ quit                           # End the session");
    println!(" $ # [comment]                    # Comment line");
    println!();
}
