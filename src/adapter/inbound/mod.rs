//! Driving adapters: the TCP protocol and the command line.

pub mod cli;
pub mod tcp;
