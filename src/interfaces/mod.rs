//! Adapters between the engine and the outside world.
//!
//! `csv` handles batch input and machine-readable reports; `text` renders the
//! human-readable comparison printed by `feecalc quote`.

pub mod csv;
pub mod text;
