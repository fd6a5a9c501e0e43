//! CLI subcommand modules.

pub(crate) mod fetch;
