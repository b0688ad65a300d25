//! Write-once working state threaded through the phase pipeline.

use indexmap::IndexMap;
use log::trace;

use ligature_core::{
    geometry::{Bounds, Insets, Point, Size},
    graph::{ElementKind, Graph},
    identifier::Id,
};

use super::{ElementBox, Hook, Layout, Ligature, PhaseFailure};
use crate::{oracle::AdvisoryLayout, validate::Violation};

/// A single phase output that can be published once and read afterwards.
#[derive(Debug)]
struct Slot<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> Slot<T> {
    const fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    fn publish(&mut self, value: T) -> Result<(), PhaseFailure> {
        if self.value.is_some() {
            return Err(PhaseFailure::AlreadyPublished(self.name));
        }
        trace!(slot = self.name; "Published");
        self.value = Some(value);
        Ok(())
    }

    fn get(&self) -> Result<&T, PhaseFailure> {
        self.value
            .as_ref()
            .ok_or(PhaseFailure::MissingInput(self.name))
    }

    fn get_mut(&mut self) -> Result<&mut T, PhaseFailure> {
        self.value
            .as_mut()
            .ok_or(PhaseFailure::MissingInput(self.name))
    }

    fn take(&mut self) -> Result<T, PhaseFailure> {
        self.value.take().ok_or(PhaseFailure::MissingInput(self.name))
    }
}

/// Output of Container Sizing: the reserved cell of every non-sheet
/// element and the box of every container.
///
/// Cells of siblings are disjoint and lie inside their container's box
/// shrunk by `padding`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    padding: f32,
    cells: IndexMap<Id, Bounds>,
    containers: IndexMap<Id, Bounds>,
}

impl Arrangement {
    pub fn new(
        padding: f32,
        cells: IndexMap<Id, Bounds>,
        containers: IndexMap<Id, Bounds>,
    ) -> Self {
        Self {
            padding,
            cells,
            containers,
        }
    }

    /// Interior padding actually used, after any retries.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn cell(&self, element: Id) -> Result<Bounds, PhaseFailure> {
        self.cells
            .get(&element)
            .copied()
            .ok_or(PhaseFailure::MissingElement(element))
    }

    pub fn container(&self, container: Id) -> Result<Bounds, PhaseFailure> {
        self.containers
            .get(&container)
            .copied()
            .ok_or(PhaseFailure::MissingElement(container))
    }

    pub fn cells(&self) -> &IndexMap<Id, Bounds> {
        &self.cells
    }

    pub fn containers(&self) -> &IndexMap<Id, Bounds> {
        &self.containers
    }
}

/// Shared state of one pipeline invocation.
///
/// Holds one slot per phase output. A slot is published exactly once, by
/// the phase that owns it; reading a slot that has not been published, or
/// publishing one twice, is a [`PhaseFailure`]. The only refinements are
/// [`refine_vertex`](Self::refine_vertex) and
/// [`refine_ligature`](Self::refine_ligature), which keep vertices inside
/// their reserved cells.
#[derive(Debug)]
pub struct LayoutContext {
    advice: Option<AdvisoryLayout>,
    sizes: Slot<IndexMap<Id, Size>>,
    arrangement: Slot<Arrangement>,
    seed_violations: Slot<Vec<Violation>>,
    predicates: Slot<IndexMap<Id, Bounds>>,
    vertices: Slot<IndexMap<Id, Point>>,
    hooks: Slot<IndexMap<Id, Vec<Hook>>>,
    ligatures: Slot<IndexMap<Id, Ligature>>,
    compacted: Slot<IndexMap<Id, Bounds>>,
}

impl LayoutContext {
    /// Creates an empty context, optionally seeded with oracle advice.
    pub fn new(advice: Option<AdvisoryLayout>) -> Self {
        Self {
            advice,
            sizes: Slot::new("element sizes"),
            arrangement: Slot::new("container arrangement"),
            seed_violations: Slot::new("seed violations"),
            predicates: Slot::new("predicate bounds"),
            vertices: Slot::new("vertex positions"),
            hooks: Slot::new("hooks"),
            ligatures: Slot::new("ligatures"),
            compacted: Slot::new("compacted containers"),
        }
    }

    pub fn advice(&self) -> Option<&AdvisoryLayout> {
        self.advice.as_ref()
    }

    pub fn publish_sizes(&mut self, sizes: IndexMap<Id, Size>) -> Result<(), PhaseFailure> {
        self.sizes.publish(sizes)
    }

    pub fn sizes(&self) -> Result<&IndexMap<Id, Size>, PhaseFailure> {
        self.sizes.get()
    }

    /// Intrinsic size of a vertex or predicate.
    pub fn size(&self, element: Id) -> Result<Size, PhaseFailure> {
        self.sizes()?
            .get(&element)
            .copied()
            .ok_or(PhaseFailure::MissingElement(element))
    }

    pub fn publish_arrangement(&mut self, arrangement: Arrangement) -> Result<(), PhaseFailure> {
        self.arrangement.publish(arrangement)
    }

    pub fn arrangement(&self) -> Result<&Arrangement, PhaseFailure> {
        self.arrangement.get()
    }

    pub fn publish_seed_violations(
        &mut self,
        violations: Vec<Violation>,
    ) -> Result<(), PhaseFailure> {
        self.seed_violations.publish(violations)
    }

    /// Violations found in the seed geometry by Collision Detection.
    pub fn seed_violations(&self) -> Result<&[Violation], PhaseFailure> {
        self.seed_violations.get().map(Vec::as_slice)
    }

    pub fn publish_predicates(&mut self, bounds: IndexMap<Id, Bounds>) -> Result<(), PhaseFailure> {
        self.predicates.publish(bounds)
    }

    pub fn predicates(&self) -> Result<&IndexMap<Id, Bounds>, PhaseFailure> {
        self.predicates.get()
    }

    /// Final box of a predicate.
    pub fn predicate_bounds(&self, predicate: Id) -> Result<Bounds, PhaseFailure> {
        self.predicates()?
            .get(&predicate)
            .copied()
            .ok_or(PhaseFailure::MissingElement(predicate))
    }

    pub fn publish_vertices(&mut self, positions: IndexMap<Id, Point>) -> Result<(), PhaseFailure> {
        self.vertices.publish(positions)
    }

    pub fn vertices(&self) -> Result<&IndexMap<Id, Point>, PhaseFailure> {
        self.vertices.get()
    }

    pub fn vertex_position(&self, vertex: Id) -> Result<Point, PhaseFailure> {
        self.vertices()?
            .get(&vertex)
            .copied()
            .ok_or(PhaseFailure::MissingElement(vertex))
    }

    /// Moves an already positioned vertex.
    ///
    /// # Errors
    ///
    /// Fails with [`PhaseFailure::EscapedBounds`] if `position` is outside
    /// the vertex's reserved cell.
    pub fn refine_vertex(&mut self, vertex: Id, position: Point) -> Result<(), PhaseFailure> {
        let cell = self.arrangement()?.cell(vertex)?;
        if !cell.contains_point(position) {
            return Err(PhaseFailure::EscapedBounds(vertex));
        }
        let slot = self
            .vertices
            .get_mut()?
            .get_mut(&vertex)
            .ok_or(PhaseFailure::MissingElement(vertex))?;
        *slot = position;
        Ok(())
    }

    pub fn publish_hooks(&mut self, hooks: IndexMap<Id, Vec<Hook>>) -> Result<(), PhaseFailure> {
        self.hooks.publish(hooks)
    }

    /// Hooks of every vertex with at least one incidence, keyed by vertex.
    pub fn hooks(&self) -> Result<&IndexMap<Id, Vec<Hook>>, PhaseFailure> {
        self.hooks.get()
    }

    pub fn publish_ligatures(
        &mut self,
        ligatures: IndexMap<Id, Ligature>,
    ) -> Result<(), PhaseFailure> {
        self.ligatures.publish(ligatures)
    }

    pub fn ligatures(&self) -> Result<&IndexMap<Id, Ligature>, PhaseFailure> {
        self.ligatures.get()
    }

    /// Replaces the ligature of a vertex with a re-routed one.
    pub fn refine_ligature(&mut self, ligature: Ligature) -> Result<(), PhaseFailure> {
        let vertex = ligature.vertex();
        let slot = self
            .ligatures
            .get_mut()?
            .get_mut(&vertex)
            .ok_or(PhaseFailure::MissingElement(vertex))?;
        *slot = ligature;
        Ok(())
    }

    pub fn publish_compacted(
        &mut self,
        containers: IndexMap<Id, Bounds>,
    ) -> Result<(), PhaseFailure> {
        self.compacted.publish(containers)
    }

    /// Final container boxes after Area Compaction.
    pub fn compacted(&self) -> Result<&IndexMap<Id, Bounds>, PhaseFailure> {
        self.compacted.get()
    }

    /// Converts the finished context into the immutable layout.
    ///
    /// # Errors
    ///
    /// Fails with [`PhaseFailure::MissingElement`] for the first graph
    /// element without geometry.
    pub fn into_layout(
        mut self,
        graph: &Graph,
        vertex_radius: f32,
        canvas_margin: f32,
    ) -> Result<Layout, PhaseFailure> {
        let containers = self.compacted.take()?;
        let predicates = self.predicates.take()?;
        let vertices = self.vertices.take()?;
        let mut ligatures = self.ligatures.take()?;

        let sheet = graph.sheet();
        let container_box = |id: Id| {
            containers
                .get(&id)
                .copied()
                .ok_or(PhaseFailure::MissingElement(id))
        };
        let content_z = |id: Id| graph.parent(id).map_or(1, |parent| 2 * graph.depth(parent) + 1);

        let mut elements = IndexMap::with_capacity(graph.element_count() + 1);
        let sheet_box = container_box(sheet)?;
        elements.insert(sheet, ElementBox::new(ElementKind::Sheet, sheet_box, 0));
        for cut in graph.cuts() {
            let bounds = container_box(cut.id())?;
            let z_index = 2 * graph.depth(cut.id());
            elements.insert(cut.id(), ElementBox::new(ElementKind::Cut, bounds, z_index));
        }
        for predicate in graph.predicates() {
            let bounds = predicates
                .get(&predicate.id())
                .copied()
                .ok_or(PhaseFailure::MissingElement(predicate.id()))?;
            elements.insert(
                predicate.id(),
                ElementBox::new(ElementKind::Predicate, bounds, content_z(predicate.id())),
            );
        }
        let diameter = 2.0 * vertex_radius;
        for vertex in graph.vertices() {
            let position = vertices
                .get(&vertex.id())
                .copied()
                .ok_or(PhaseFailure::MissingElement(vertex.id()))?;
            elements.insert(
                vertex.id(),
                ElementBox::new(
                    ElementKind::Vertex,
                    Bounds::new_from_center(position, Size::new(diameter, diameter)),
                    content_z(vertex.id()),
                ),
            );
        }

        ligatures.retain(|vertex, _| graph.vertex(*vertex).is_some());
        let canvas = sheet_box.add_padding(Insets::uniform(canvas_margin));
        Ok(Layout::new(sheet, canvas, elements, ligatures))
    }
}
