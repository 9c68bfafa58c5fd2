//! # demolens
//!
//! demolens digs the match metadata out of Warsow demo recordings
//! (`.wdz20` files). A demo opens with a fixed size header of NUL delimited
//! key/value pairs and continues with a gzip compressed recording of the
//! engine traffic, which carries the configstring broadcasts this crate
//! scans for. From the two the crate resolves who played, where, when, for
//! how long and to what score, and persists the result next to the demo so
//! each file is only ever parsed once.
//!
//! ```no_run
//! # fn main() -> Result<(), std::io::Error> {
//! for demo in demolens::list_demos("demos")? {
//!     println!(
//!         "{} on {}: {} {} : {} {}",
//!         demo.game_type, demo.map_name, demo.player1, demo.score1, demo.score2, demo.player2
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Sorting, grouping and rendering are left to the caller, as is removing
//! stale cache artifacts: an artifact's existence alone marks it valid.

pub use self::configstrings::{extract_configstrings, PLAYER1_SLOT, PLAYER2_SLOT};
pub use self::errors::*;
pub use self::header::{parse_raw_header, GZIP_START};
pub use self::models::*;
pub use self::parser::{list_demos, load_demo, parse_demo, read_demo_file, DEMO_EXTENSION};
pub use self::resolver::resolve_demo;

pub mod cache;
mod configstrings;
mod core_parser;
mod errors;
mod header;
pub mod humanize;
mod models;
mod parser;
mod resolver;
