use std::fmt;

use thiserror::Error;

use ligature_core::{graph::Graph, identifier::Id};

use super::LayoutContext;

/// Names of the pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseName {
    ElementSizing,
    ContainerSizing,
    CollisionDetection,
    PredicatePositioning,
    VertexPositioning,
    HookAssignment,
    LigatureRouting,
    BranchOptimization,
    AreaCompaction,
    /// Conversion of the finished context into a [`super::Layout`].
    Finalization,
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ElementSizing => "element sizing",
            Self::ContainerSizing => "container sizing",
            Self::CollisionDetection => "collision detection",
            Self::PredicatePositioning => "predicate positioning",
            Self::VertexPositioning => "vertex positioning",
            Self::HookAssignment => "hook assignment",
            Self::LigatureRouting => "ligature routing",
            Self::BranchOptimization => "branch optimization",
            Self::AreaCompaction => "area compaction",
            Self::Finalization => "finalization",
        };
        f.write_str(name)
    }
}

/// Why a phase could not establish its invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseFailure {
    #[error(
        "container `{container}` needs {required} units but only {available} are available, even with minimal padding"
    )]
    PaddingExceedsAvailableSpace {
        container: Id,
        required: f32,
        available: f32,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("`{0}` has not been computed by an earlier phase")]
    MissingInput(&'static str),

    #[error("`{0}` has already been published")]
    AlreadyPublished(&'static str),

    #[error("element `{0}` has no geometry")]
    MissingElement(Id),

    #[error("`{element}` still collides with `{other}`")]
    UnresolvedCollision { element: Id, other: Id },

    #[error("`{0}` would leave its reserved bounds")]
    EscapedBounds(Id),
}

/// Outcome of one phase.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseStatus {
    Completed,
    Failed(PhaseFailure),
}

impl From<Result<(), PhaseFailure>> for PhaseStatus {
    fn from(result: Result<(), PhaseFailure>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(reason) => Self::Failed(reason),
        }
    }
}

/// One step of the layout pipeline.
///
/// A phase reads the outputs of earlier phases from the context and
/// publishes its own. It must not overwrite anything an earlier phase
/// published; the context enforces this.
pub trait Phase {
    fn name(&self) -> PhaseName;

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus;
}
