//! Domain types for PIX limit management and the storage port they flow through.

pub mod client;
pub mod outcome;
pub mod ports;
