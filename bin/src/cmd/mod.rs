//! CLI subcommand modules.
//!
//! This module contains the implementations for all pares CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod compare;
pub(crate) mod var;
