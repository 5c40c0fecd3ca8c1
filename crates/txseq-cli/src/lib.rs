//! Library components of the `txseq` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
