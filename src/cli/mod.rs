//! CLI infrastructure for brainiac
//!
//! This module provides the command-line interface for playing sessions
//! between human, random and MENACE agents and for inspecting the state space.

pub mod commands;
pub mod output;
