//! Ligature Core Types and Definitions
//!
//! This crate provides the foundational types for laying out Peirce-style
//! existential graphs. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Points, sizes, bounds and the ligature attachment helpers ([`geometry`] module)
//! - **Graph**: The immutable logical graph with its builder and validator ([`graph`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
