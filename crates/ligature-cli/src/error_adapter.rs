//! Error adapter for converting LigatureError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`LigatureError::LayoutNonCompliant`] carries every containment
//! violation found in the layout; each violation is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use ligature::{
    LigatureError,
    layout::PhaseFailure,
    validate::{Violation, ViolationKind},
};

/// Adapter for a single containment violation.
pub struct ViolationAdapter<'a>(pub &'a Violation);

impl fmt::Debug for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViolationAdapter")
            .field("violation", &self.0)
            .finish()
    }
}

impl fmt::Display for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ViolationAdapter<'_> {}

impl MietteDiagnostic for ViolationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0.kind() {
            ViolationKind::OutsideContainer => "ligature::layout::outside_container",
            ViolationKind::SiblingOverlap => "ligature::layout::sibling_overlap",
            ViolationKind::ImproperCutOverlap => "ligature::layout::improper_cut_overlap",
            ViolationKind::MissingGeometry => "ligature::layout::missing_geometry",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match (self.0.expected(), self.0.actual()) {
            (Some(expected), Some(actual)) => Some(Box::new(format!(
                "compared {expected:?} against {actual:?}"
            ))),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Adapter for every [`LigatureError`] that is reported as a single error.
pub struct ErrorAdapter<'a>(pub &'a LigatureError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LigatureError::Io(_) => "ligature::io",
            LigatureError::GraphInvalid(_) => "ligature::graph",
            LigatureError::PhaseFailed { .. } => "ligature::phase",
            LigatureError::LayoutNonCompliant { .. } => "ligature::layout",
            LigatureError::Oracle(_) => "ligature::oracle",
            LigatureError::Config(_) => "ligature::config",
            LigatureError::Input(_) => "ligature::input",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LigatureError::GraphInvalid(_) => {
                "every element needs exactly one area, and predicates may only use vertices declared in an enclosing area"
            }
            LigatureError::PhaseFailed {
                reason: PhaseFailure::PaddingExceedsAvailableSpace { .. },
                ..
            } => "raise `layout.max_extent` or lower `layout.min_cut_padding`",
            LigatureError::PhaseFailed {
                reason: PhaseFailure::InvalidConfiguration(_),
                ..
            } => "check the `[layout]` section of the configuration file",
            LigatureError::Config(_) => {
                "pass a valid file with --config, or remove ligature/config.toml"
            }
            LigatureError::Input(_) => {
                "a graph file holds [[cut]], [[vertex]] and [[predicate]] tables and a [names] table"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One containment violation of a non-compliant layout.
    Violation(ViolationAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Violation(v) => fmt::Display::fmt(v, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Violation(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Violation(v) => v.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Violation(v) => v.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Violation(v) => v.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Violation(v) => v.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`LigatureError`] into a list of reportable errors.
///
/// For [`LigatureError::LayoutNonCompliant`], this returns one
/// [`Reportable`] for each violation. For other error variants, this
/// returns a single [`Reportable`].
pub fn to_reportables(err: &LigatureError) -> Vec<Reportable<'_>> {
    match err {
        LigatureError::LayoutNonCompliant { violations } if !violations.is_empty() => violations
            .iter()
            .map(|v| Reportable::Violation(ViolationAdapter(v)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ligature::{
        geometry::Bounds,
        graph::{GraphBuilder, GraphError},
        identifier::Id,
        layout::PhaseName,
        validate::validate_boxes,
    };

    use super::*;

    fn overlapping_violations() -> Vec<Violation> {
        let mut builder = GraphBuilder::new(Id::new("sheet"));
        builder
            .add_cut(Id::new("a"))
            .add_cut(Id::new("b"))
            .place(Id::new("sheet"), Id::new("a"))
            .place(Id::new("sheet"), Id::new("b"));
        let graph = builder.build().expect("valid graph");

        let boxes = HashMap::from([
            (Id::new("sheet"), Bounds::new(0.0, 0.0, 100.0, 100.0)),
            (Id::new("a"), Bounds::new(10.0, 10.0, 60.0, 60.0)),
            (Id::new("b"), Bounds::new(40.0, 40.0, 90.0, 90.0)),
        ]);
        validate_boxes(&graph, |id| boxes.get(&id).copied())
    }

    #[test]
    fn test_one_reportable_per_violation() {
        let violations = overlapping_violations();
        assert!(!violations.is_empty());
        let count = violations.len();
        let err = LigatureError::LayoutNonCompliant { violations };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), count);
        assert!(
            reportables
                .iter()
                .all(|r| matches!(r, Reportable::Violation(_)))
        );
        let code = reportables[0].code().expect("code").to_string();
        assert!(code.starts_with("ligature::layout::"));
    }

    #[test]
    fn test_graph_error_is_single() {
        let err = LigatureError::GraphInvalid(GraphError::OrphanElement(Id::new("lost")));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Invalid graph: element `lost` is not contained in any area"
                );
                assert_eq!(e.code().expect("code").to_string(), "ligature::graph");
                assert!(e.help().is_some());
            }
            Reportable::Violation(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_padding_failure_has_help() {
        let err = LigatureError::PhaseFailed {
            phase: PhaseName::ContainerSizing,
            reason: PhaseFailure::PaddingExceedsAvailableSpace {
                container: Id::new("c"),
                required: 120.0,
                available: 100.0,
            },
        };
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().expect("code").to_string(), "ligature::phase");
        let help = adapter.help().expect("help").to_string();
        assert!(help.contains("max_extent"));
    }

    #[test]
    fn test_malformed_document_is_an_input_error() {
        let err: LigatureError = crate::input::GraphDocument::parse("[[predicate]\n")
            .unwrap_err()
            .into();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].code().expect("code").to_string(),
            "ligature::input"
        );
        assert!(reportables[0].help().is_some());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = LigatureError::Io(std::io::Error::other("disk full"));
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().expect("code").to_string(), "ligature::io");
        assert!(adapter.help().is_none());
        assert!(adapter.labels().is_none());
    }
}
