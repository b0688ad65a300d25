//! Error types for Ligature operations.
//!
//! This module provides the main error type [`LigatureError`] which wraps
//! the error conditions of graph validation, the layout phases and the
//! oracle.

use std::io;

use thiserror::Error;

use ligature_core::graph::GraphError;

use crate::{
    layout::{PhaseFailure, PhaseName},
    oracle::OracleError,
    validate::Violation,
};

/// The main error type for Ligature operations.
#[derive(Debug, Error)]
pub enum LigatureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid graph: {0}")]
    GraphInvalid(#[from] GraphError),

    #[error("Layout failed during {phase}: {reason}")]
    PhaseFailed { phase: PhaseName, reason: PhaseFailure },

    #[error("Layout violates {} containment rule(s)", violations.len())]
    LayoutNonCompliant { violations: Vec<Violation> },

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A graph description could not be read into a graph.
    #[error("Invalid input: {0}")]
    Input(String),
}
