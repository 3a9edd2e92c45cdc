//! Replays scripted set operations and folds their results into a checksum.
//!
//! A script is a stream of whitespace-separated tokens: a command name, followed by an integer
//! operand for the commands that take one. Processing stops at `End` or at the end of input.
//!
//! | Command       | Operation                   | Added to the checksum            |
//! |---------------|-----------------------------|----------------------------------|
//! | `Add x`       | [`SkipSet::insert`]         | 1 if `x` was new                 |
//! | `Remove x`    | [`SkipSet::remove`]         | 1 if `x` was present             |
//! | `Contains x`  | [`SkipSet::contains`]       | 1 if `x` is present              |
//! | `Ceiling x`   | [`SkipSet::ceiling`]        | the result, if any               |
//! | `Floor x`     | [`SkipSet::floor`]          | the result, if any               |
//! | `FindIndex i` | [`SkipSet::find_index`]     | the result, if any               |
//! | `First`       | [`SkipSet::first`]          | the result, if any               |
//! | `Last`        | [`SkipSet::last`]           | the result, if any               |
//!
//! The checksum is kept modulo [`MOD_VALUE`] and is never negative.
//!
//! # Examples
//!
//! ```
//! use skipset::script::Replay;
//!
//! let mut replay = Replay::new();
//! let checksum = replay.run("Add 1 Add 5 Add 3 Floor 4 Ceiling 4 End").unwrap();
//! assert_eq!(checksum, 3 + 3 + 5);
//! ```

use alloc::string::{String, ToString};

use crate::SkipSet;

/// Modulus of the running checksum.
pub const MOD_VALUE: i64 = 999_983;

/// One scripted operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Add(i64),
    Ceiling(i64),
    FindIndex(i64),
    First,
    Last,
    Floor(i64),
    Remove(i64),
    Contains(i64),
    End,
}

/// A malformed script.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects an integer operand")]
    MissingOperand { command: &'static str },
    #[error("`{command}` operand `{operand}` is not an integer")]
    InvalidOperand { command: &'static str, operand: String },
}

impl Command {
    /// Parses the next command from `tokens`, or returns `None` when the tokens are exhausted.
    ///
    /// An unknown command name consumes only that one token.
    pub fn parse<'a, I>(tokens: &mut I) -> Option<Result<Self, ScriptError>>
    where
        I: Iterator<Item = &'a str>,
    {
        let name = tokens.next()?;
        let command = match name {
            "Add" => operand(tokens, "Add").map(Command::Add),
            "Ceiling" => operand(tokens, "Ceiling").map(Command::Ceiling),
            "FindIndex" => operand(tokens, "FindIndex").map(Command::FindIndex),
            "First" => Ok(Command::First),
            "Last" => Ok(Command::Last),
            "Floor" => operand(tokens, "Floor").map(Command::Floor),
            "Remove" => operand(tokens, "Remove").map(Command::Remove),
            "Contains" => operand(tokens, "Contains").map(Command::Contains),
            "End" => Ok(Command::End),
            other => Err(ScriptError::UnknownCommand(other.to_string())),
        };
        Some(command)
    }
}

fn operand<'a, I>(tokens: &mut I, command: &'static str) -> Result<i64, ScriptError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(ScriptError::MissingOperand { command })?;
    token.parse().map_err(|_| ScriptError::InvalidOperand {
        command,
        operand: token.to_string(),
    })
}

/// Applies commands to a [`SkipSet<i64>`] and accumulates the checksum.
#[derive(Clone, Debug, Default)]
pub struct Replay {
    set: SkipSet<i64>,
    checksum: i64,
}

impl Replay {
    /// Starts a replay over an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_set(SkipSet::new())
    }

    /// Starts a replay over `set`.
    #[must_use]
    pub fn with_set(set: SkipSet<i64>) -> Self {
        Replay { set, checksum: 0 }
    }

    #[must_use]
    pub fn checksum(&self) -> i64 {
        self.checksum
    }

    #[must_use]
    pub fn set(&self) -> &SkipSet<i64> {
        &self.set
    }

    /// Applies one command. Returns `false` for [`Command::End`].
    pub fn apply(&mut self, command: Command) -> bool {
        let hit = match command {
            Command::Add(x) => self.set.insert(x).then_some(1),
            Command::Remove(x) => self.set.remove(&x).map(|_| 1),
            Command::Contains(x) => self.set.contains(&x).then_some(1),
            Command::Ceiling(x) => self.set.ceiling(&x).copied(),
            Command::Floor(x) => self.set.floor(&x).copied(),
            Command::FindIndex(i) => usize::try_from(i).ok().and_then(|i| self.set.find_index(i)).copied(),
            Command::First => self.set.first().copied(),
            Command::Last => self.set.last().copied(),
            Command::End => return false,
        };
        if let Some(value) = hit {
            self.checksum = (self.checksum + value.rem_euclid(MOD_VALUE)) % MOD_VALUE;
        }
        true
    }

    /// Runs every command in `script` up to `End` and returns the checksum.
    ///
    /// Unknown commands are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::MissingOperand`] or [`ScriptError::InvalidOperand`] when a
    /// command's operand is absent or not an integer. Commands before the bad one stay applied.
    pub fn run(&mut self, script: &str) -> Result<i64, ScriptError> {
        let mut tokens = script.split_ascii_whitespace();
        while let Some(command) = Command::parse(&mut tokens) {
            match command {
                Ok(command) => {
                    if !self.apply(command) {
                        break;
                    }
                }
                Err(ScriptError::UnknownCommand(_name)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(command = %_name, "skipping unknown command");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(self.checksum)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn parse_all(script: &str) -> Vec<Result<Command, ScriptError>> {
        let mut tokens = script.split_ascii_whitespace();
        core::iter::from_fn(|| Command::parse(&mut tokens)).collect()
    }

    #[test]
    fn parses_every_command() {
        let parsed = parse_all("Add 1 Ceiling -2 FindIndex 3 First Last Floor 4 Remove 5 Contains 6 End");
        assert_eq!(
            parsed,
            [
                Ok(Command::Add(1)),
                Ok(Command::Ceiling(-2)),
                Ok(Command::FindIndex(3)),
                Ok(Command::First),
                Ok(Command::Last),
                Ok(Command::Floor(4)),
                Ok(Command::Remove(5)),
                Ok(Command::Contains(6)),
                Ok(Command::End),
            ]
        );
    }

    #[test]
    fn operand_errors() {
        assert_eq!(parse_all("Add"), [Err(ScriptError::MissingOperand { command: "Add" })]);
        assert_eq!(
            parse_all("Floor x"),
            [Err(ScriptError::InvalidOperand {
                command: "Floor",
                operand: "x".to_string(),
            })]
        );
    }

    #[test]
    fn checksum_of_known_script() {
        let mut replay = Replay::new();
        let script = "Add 1 Add 5 Add 3 Add 9 Add 2 Add 3
                      First Last Floor 4 Ceiling 4 FindIndex 2 Contains 7
                      Remove 5 Ceiling 4 Remove 5 End Add 100";
        // 5 new adds, then 1 + 9 + 3 + 5 + 3 + 0, one removal, then 9.
        assert_eq!(replay.run(script), Ok(5 + 1 + 9 + 3 + 5 + 3 + 1 + 9));
        assert!(!replay.set().contains(&100));
    }

    #[test]
    fn unknown_commands_are_skipped() {
        let mut replay = Replay::new();
        assert_eq!(replay.run("Add 4 Frobnicate Last"), Ok(1 + 4));
    }

    #[test]
    fn negative_values_and_indices() {
        let mut replay = Replay::new();
        assert_eq!(replay.run("Add -1 First FindIndex -1"), Ok((1 + MOD_VALUE - 1) % MOD_VALUE));
        assert!(replay.checksum() >= 0);
    }

    #[test]
    fn checksum_wraps() {
        let mut replay = Replay::new();
        replay.apply(Command::Add(MOD_VALUE - 1));
        replay.apply(Command::First);
        assert_eq!(replay.checksum(), 0);
    }

    #[test]
    fn errors_stop_the_run() {
        let mut replay = Replay::new();
        assert!(replay.run("Add 1 Remove").is_err());
        assert_eq!(replay.checksum(), 1);
    }
}
