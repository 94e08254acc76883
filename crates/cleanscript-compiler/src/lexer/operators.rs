//! Operator scanning documentation.
//!
//! This module documents the operator scanning logic in `scanner.rs`.
//! Multi-character operators are recognized by looking one character ahead.
//!
//! ## Operator Table
//!
//! | Token | Method | Variants |
//! |-------|--------|----------|
//! | `+` | `scan_plus` | `+`, `++` |
//! | `-` | `scan_minus` | `-`, `--`, `->` |
//! | `*` | `scan_star` | `*`, `**` |
//! | `/` | `scan_slash` | `/`, `//` (floor division) |
//! | `<` | `scan_less_than` | `<`, `<=`, `<<` |
//! | `>` | `scan_greater_than` | `>`, `>=`, `>>` |
//! | `=` | `scan_equal` | `=`, `==` |
//! | `!` | `scan_bang` | `!`, `!=` |
//!
//! `% & | ^ ~` are always single characters. There are no compound
//! assignment operators.
//!
//! ## Slashes and Hashes
//!
//! `//` is floor division, not a comment. Comments start with `#`:
//!
//! ```text
//! # line comment
//! #* block
//!    comment *#
//! ```
//!
//! ## The Cast Arrow
//!
//! `->` only appears in parameter lists, where it separates a cast
//! function from the parameter it converts (`int -> count`).

// This module serves as documentation. The actual implementation is in scanner.rs.
