//! Core lexing primitives
//!
//! This module contains the building blocks for classifying text:
//! - Walker: splits text into (codepoint, unit) pairs, joining surrogate pairs
//! - EntityMachine: state machine for a single `&...;` reference
//! - Entities: predefined entity table and numeric reference parsing
//! - Scanner: routes characters between plain text and reference lexing
//! - Events: the classified outcomes and the sink they are pushed into

pub mod entities;
pub mod entity_machine;
pub mod events;
pub mod scanner;
pub mod walker;
