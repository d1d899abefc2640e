//! Sailtree Core
//!
//! This crate provides core types, symbol tables, and error definitions
//! for the sailtree template parser.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Span`], [`Position`], [`InputEdit`] - Source location types
//! - [`Symbol`] - Grammar symbol ids, names, and metadata
//! - [`SailtreeError`] - Error types

pub mod error;
pub mod symbols;
pub mod types;

pub use error::{Result, SailtreeError};
pub use symbols::{
    Symbol, SymbolMetadata, LANGUAGE_VERSION, SYMBOL_COUNT, SYMBOL_METADATA, SYMBOL_NAMES,
    TOKEN_COUNT,
};
pub use types::{InputEdit, Position, Span};
