//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive the full TUI against a scripted
//! backend, so they need crate-private constructors.
