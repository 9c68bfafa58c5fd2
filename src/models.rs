//! # Models
//!
//! The data structures a demo file is decoded into. The raw side
//! ([`DemoFile`]) is what the parser and extractor produce; the resolved
//! side ([`Demo`]) is what gets cached and served.
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive key/value pairs from a demo's fixed size header. Duplicate
/// keys keep the last occurrence; no ordering is preserved.
pub type RawHeader = HashMap<String, String>;

/// Configstring broadcasts keyed by slot. Slots are small integers, so fnv
/// does the hashing.
pub type ConfigStrings = FnvHashMap<u32, String>;

/// The raw extraction product of a single demo file, before any field is
/// interpreted.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DemoFile {
    pub header: RawHeader,
    pub config_strings: ConfigStrings,
}

/// Match metadata resolved from one demo file.
///
/// Built once from the file's header and configstrings and immutable from
/// then on. Serialization round-trips every field exactly, which is what
/// the on disk cache relies on. Display strings (`size_str`, `time_str`,
/// `duration_str`) are computed at resolution time, not per access.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Demo {
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub size_str: String,
    pub hostname: String,
    /// Match start in epoch seconds
    pub time: i64,
    pub time_str: String,
    /// Match length in seconds
    pub duration: i64,
    pub duration_str: String,
    pub map_id: String,
    pub map_name: String,
    pub game_type: String,
    /// True iff the gametype is exactly "duel"
    pub is_duel: bool,
    pub player1: String,
    pub player2: String,
    pub score1: i32,
    pub score2: i32,
}
