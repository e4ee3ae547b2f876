//! Subcommand modules for the `gloss` binary.

pub mod nwk;
