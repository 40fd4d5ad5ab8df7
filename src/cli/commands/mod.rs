//! Subcommands of the `brainiac` binary

pub mod play;
pub mod states;
