//! The nine layout phases, in execution order.

mod branches;
mod collision;
mod compaction;
mod containers;
mod hooks;
mod ligatures;
mod predicates;
pub(crate) mod sizing;
mod vertices;

pub use branches::BranchOptimization;
pub use collision::CollisionDetection;
pub use compaction::AreaCompaction;
pub use containers::ContainerSizing;
pub use hooks::HookAssignment;
pub use ligatures::LigatureRouting;
pub use predicates::PredicatePositioning;
pub use sizing::ElementSizing;
pub use vertices::VertexPositioning;

use indexmap::IndexMap;
use log::debug;

use ligature_core::{
    geometry::Bounds,
    graph::{ElementKind, Graph},
    identifier::Id,
};

use super::{Arrangement, Phase, PhaseFailure};
use crate::{
    config::LayoutConfig,
    route::Router,
    validate::{Violation, ViolationKind},
};

/// The standard phase sequence.
pub(crate) fn standard(config: &LayoutConfig, router: &Router) -> Vec<Box<dyn Phase>> {
    vec![
        Box::new(ElementSizing::new(config.clone())),
        Box::new(ContainerSizing::new(config.clone())),
        Box::new(CollisionDetection::new(config.clone())),
        Box::new(PredicatePositioning),
        Box::new(VertexPositioning::new(config.vertex_radius())),
        Box::new(HookAssignment),
        Box::new(LigatureRouting::new(router.clone())),
        Box::new(BranchOptimization::new(router.clone(), config.vertex_radius())),
        Box::new(AreaCompaction::new(config.vertex_radius())),
    ]
}

/// Checks freshly placed boxes against their containers and siblings.
///
/// `placed` holds the boxes a phase is about to publish, `fixed` the final
/// boxes published by earlier phases. Siblings without either are
/// represented by their reserved cell (or arranged box, for cuts). Every
/// seed violation involving a placed element is re-checked first.
fn check_placement(
    graph: &Graph,
    arrangement: &Arrangement,
    seed: &[Violation],
    placed: &IndexMap<Id, Bounds>,
    fixed: &IndexMap<Id, Bounds>,
) -> Result<(), PhaseFailure> {
    let region = |id: Id| -> Result<Bounds, PhaseFailure> {
        if let Some(bounds) = placed.get(&id).or_else(|| fixed.get(&id)) {
            return Ok(*bounds);
        }
        match graph.kind(id) {
            Some(ElementKind::Cut | ElementKind::Sheet) => arrangement.container(id),
            _ => arrangement.cell(id),
        }
    };
    let inside_parent = |id: Id, bounds: Bounds| -> Result<(), PhaseFailure> {
        let parent = graph.parent(id).ok_or(PhaseFailure::MissingElement(id))?;
        if arrangement.container(parent)?.strictly_contains(&bounds) {
            Ok(())
        } else {
            Err(PhaseFailure::UnresolvedCollision {
                element: id,
                other: parent,
            })
        }
    };

    let mut resolved = 0;
    for violation in seed {
        let Some(element) = [Some(violation.element()), violation.other()]
            .into_iter()
            .flatten()
            .find(|id| placed.contains_key(id))
        else {
            continue;
        };
        match violation.kind() {
            ViolationKind::OutsideContainer => inside_parent(element, region(element)?)?,
            ViolationKind::SiblingOverlap => {
                if let Some(other) = violation.other()
                    && region(violation.element())?.overlaps(&region(other)?)
                {
                    return Err(PhaseFailure::UnresolvedCollision {
                        element: violation.element(),
                        other,
                    });
                }
            }
            ViolationKind::ImproperCutOverlap | ViolationKind::MissingGeometry => {}
        }
        resolved += 1;
    }

    for (id, bounds) in placed {
        inside_parent(*id, *bounds)?;
        let parent = graph.parent(*id).ok_or(PhaseFailure::MissingElement(*id))?;
        for sibling in graph.children(parent) {
            if sibling != id && bounds.overlaps(&region(*sibling)?) {
                return Err(PhaseFailure::UnresolvedCollision {
                    element: *id,
                    other: *sibling,
                });
            }
        }
    }

    if resolved > 0 {
        debug!(resolved = resolved; "Seed violations resolved");
    }
    Ok(())
}
