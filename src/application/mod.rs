//! Application layer orchestrating PIX limit operations.
//!
//! This module defines `PixLimitService`, the entry point the HTTP interface
//! calls into. Each command maps to a single conditional operation on the
//! injected `LimitStore`.

pub mod service;
