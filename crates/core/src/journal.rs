use serde::{Deserialize, Serialize};

use crate::types::{PlayerInput, Pos};

/// Everything needed to re-run a session: the level is supplied separately,
/// the journal pins seed, spawn point and the ordered player inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub spawn: Pos,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    /// Round the input was accepted in; informational only.
    pub round: u64,
    pub input: PlayerInput,
}

impl InputJournal {
    pub fn new(seed: u64, spawn: Pos) -> Self {
        Self { format_version: 1, seed, spawn, inputs: Vec::new() }
    }

    pub fn append(&mut self, round: u64, input: PlayerInput) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, round, input });
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
