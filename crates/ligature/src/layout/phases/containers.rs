//! Container Sizing: reserves a cell for every element and sizes every
//! container bottom-up so that it strictly contains its children.
//!
//! Children of a container are laid out in a row-wrapped grid of
//! `ceil(sqrt(n))` columns. Each cell is as wide as its element's footprint
//! and as tall as its row; cells are separated by the sibling spacing and
//! kept `padding` away from the container boundary. Sizes are computed
//! deepest containers first, then absolute positions are assigned top-down
//! from the sheet.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};

use ligature_core::{
    geometry::{Bounds, Point, Size},
    graph::{ElementKind, Graph},
    identifier::Id,
};

use crate::{
    config::LayoutConfig,
    layout::{Arrangement, LayoutContext, Phase, PhaseFailure, PhaseName, PhaseStatus},
    oracle::AdvisoryLayout,
};

/// Size of a container and the cells of its children, relative to the
/// container's top-left corner.
#[derive(Debug)]
struct LocalArrangement {
    size: Size,
    cells: Vec<(Id, Bounds)>,
}

/// A container that outgrew the configured maximum extent.
#[derive(Debug)]
struct Oversized {
    container: Id,
    required: f32,
}

/// Reserves disjoint cells inside every container.
#[derive(Debug, Clone)]
pub struct ContainerSizing {
    config: LayoutConfig,
}

impl ContainerSizing {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn run(&self, graph: &Graph, context: &mut LayoutContext) -> Result<(), PhaseFailure> {
        let min_padding = self.config.min_cut_padding();
        if self.config.cut_padding() <= 0.0 || min_padding <= 0.0 {
            return Err(PhaseFailure::InvalidConfiguration(
                "container padding must be positive".to_string(),
            ));
        }

        let mut padding = self.config.cut_padding();
        let arrangement = loop {
            match self.arrange(graph, context, padding)? {
                Ok(arrangement) => break arrangement,
                Err(oversized) if padding > min_padding => {
                    let retry = (padding / 2.0).max(min_padding);
                    warn!(
                        container:% = oversized.container,
                        required = oversized.required,
                        padding = retry;
                        "Container exceeds maximum extent, retrying with less padding"
                    );
                    padding = retry;
                }
                Err(oversized) => {
                    return Err(PhaseFailure::PaddingExceedsAvailableSpace {
                        container: oversized.container,
                        required: oversized.required,
                        available: self.config.max_extent(),
                    });
                }
            }
        };

        debug!(
            padding = arrangement.padding(),
            cells = arrangement.cells().len();
            "Containers arranged"
        );
        context.publish_arrangement(arrangement)
    }

    /// Arranges every container with the given padding.
    ///
    /// The outer result carries missing inputs; the inner one reports the
    /// first container larger than the maximum extent.
    fn arrange(
        &self,
        graph: &Graph,
        context: &LayoutContext,
        padding: f32,
    ) -> Result<Result<Arrangement, Oversized>, PhaseFailure> {
        let mut local: HashMap<Id, LocalArrangement> = HashMap::new();
        for container in graph.containers_by_depth() {
            let children = ordered_children(graph, container, context.advice());
            let mut footprints = Vec::with_capacity(children.len());
            for child in children {
                footprints.push((child, self.footprint(graph, context, &local, child)?));
            }

            let arrangement = self.grid(&footprints, padding);
            let required = arrangement.size.width().max(arrangement.size.height());
            if required > self.config.max_extent() {
                return Ok(Err(Oversized {
                    container,
                    required,
                }));
            }
            local.insert(container, arrangement);
        }

        // Top-down: parents are placed before their children.
        let sheet = graph.sheet();
        let sheet_size = local
            .get(&sheet)
            .map(|arrangement| arrangement.size)
            .ok_or(PhaseFailure::MissingElement(sheet))?;
        let margin = self.config.canvas_margin();
        let mut containers: HashMap<Id, Bounds> = HashMap::new();
        containers.insert(
            sheet,
            Bounds::new_from_top_left(Point::new(margin, margin), sheet_size),
        );
        let mut cells: HashMap<Id, Bounds> = HashMap::new();
        for container in graph.containers_by_depth().into_iter().rev() {
            let origin = containers
                .get(&container)
                .ok_or(PhaseFailure::MissingElement(container))?
                .min_point();
            let arrangement = local
                .get(&container)
                .ok_or(PhaseFailure::MissingElement(container))?;
            for (child, relative) in &arrangement.cells {
                let cell = relative.translate(origin);
                cells.insert(*child, cell);
                if let Some(child_arrangement) = local.get(child) {
                    containers.insert(
                        *child,
                        Bounds::new_from_center(cell.center(), child_arrangement.size),
                    );
                }
            }
        }

        let containers = graph
            .containers()
            .map(|id| {
                containers
                    .get(&id)
                    .map(|bounds| (id, *bounds))
                    .ok_or(PhaseFailure::MissingElement(id))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        let cells = graph
            .elements()
            .map(|id| {
                cells
                    .get(&id)
                    .map(|bounds| (id, *bounds))
                    .ok_or(PhaseFailure::MissingElement(id))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        Ok(Ok(Arrangement::new(padding, cells, containers)))
    }

    /// Space an element needs in its container.
    fn footprint(
        &self,
        graph: &Graph,
        context: &LayoutContext,
        local: &HashMap<Id, LocalArrangement>,
        element: Id,
    ) -> Result<Size, PhaseFailure> {
        match graph.kind(element) {
            Some(ElementKind::Vertex) => {
                let cell = self.config.vertex_cell_size();
                Ok(context.size(element)?.max(Size::new(cell, cell)))
            }
            Some(ElementKind::Predicate) => context.size(element),
            Some(ElementKind::Cut) => local
                .get(&element)
                .map(|arrangement| arrangement.size)
                .ok_or(PhaseFailure::MissingElement(element)),
            Some(ElementKind::Sheet) | None => Err(PhaseFailure::MissingElement(element)),
        }
    }

    /// Row-wrapped grid of cells for the given footprints.
    fn grid(&self, footprints: &[(Id, Size)], padding: f32) -> LocalArrangement {
        if footprints.is_empty() {
            let side = self.config.empty_cut_size();
            return LocalArrangement {
                size: Size::new(side, side),
                cells: Vec::new(),
            };
        }

        let spacing = self.config.sibling_spacing();
        let columns = (footprints.len() as f32).sqrt().ceil() as usize;
        let mut cells = Vec::with_capacity(footprints.len());
        let mut content_width = 0.0_f32;
        let mut y = padding;
        for row in footprints.chunks(columns.max(1)) {
            let row_height = row
                .iter()
                .map(|(_, size)| size.height())
                .fold(0.0_f32, f32::max);
            let mut x = padding;
            for (child, size) in row {
                cells.push((
                    *child,
                    Bounds::new_from_top_left(
                        Point::new(x, y),
                        Size::new(size.width(), row_height),
                    ),
                ));
                x += size.width() + spacing;
            }
            content_width = content_width.max(x - spacing - padding);
            y += row_height + spacing;
        }
        let content_height = y - spacing - padding;

        LocalArrangement {
            size: Size::new(content_width + 2.0 * padding, content_height + 2.0 * padding),
            cells,
        }
    }
}

impl Phase for ContainerSizing {
    fn name(&self) -> PhaseName {
        PhaseName::ContainerSizing
    }

    fn execute(&self, graph: &Graph, context: &mut LayoutContext) -> PhaseStatus {
        self.run(graph, context).into()
    }
}

/// Children of a container in creation order, or in the advice's reading
/// order (top to bottom, then left to right) when advice is available.
/// Children the advice does not mention keep their creation order after
/// the advised ones.
fn ordered_children(graph: &Graph, container: Id, advice: Option<&AdvisoryLayout>) -> Vec<Id> {
    let mut children = graph.children(container).to_vec();
    if let Some(advice) = advice {
        children.sort_by(|a, b| match (advice.anchor(*a), advice.anchor(*b)) {
            (Some(a), Some(b)) => a.y().total_cmp(&b.y()).then(a.x().total_cmp(&b.x())),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
    children
}

#[cfg(test)]
mod tests {
    use ligature_core::graph::GraphBuilder;

    use super::*;
    use crate::layout::phases::ElementSizing;

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    /// sheet: [ outer: [ inner: [], P(x), x ], Q ]
    fn graph() -> Graph {
        let mut builder = GraphBuilder::new(id("sheet"));
        builder
            .add_cut(id("outer"))
            .add_cut(id("inner"))
            .add_vertex(id("x"), None)
            .add_predicate(id("p"), "P", vec![id("x")])
            .add_predicate(id("q"), "Q", vec![])
            .place(id("sheet"), id("outer"))
            .place(id("sheet"), id("q"))
            .place(id("outer"), id("inner"))
            .place(id("outer"), id("x"))
            .place(id("outer"), id("p"));
        builder.build().expect("valid graph")
    }

    fn arrange(
        graph: &Graph,
        config: LayoutConfig,
        advice: Option<AdvisoryLayout>,
    ) -> Result<LayoutContext, PhaseFailure> {
        let mut context = LayoutContext::new(advice);
        if let PhaseStatus::Failed(reason) =
            ElementSizing::new(config.clone()).execute(graph, &mut context)
        {
            return Err(reason);
        }
        match ContainerSizing::new(config).execute(graph, &mut context) {
            PhaseStatus::Completed => Ok(context),
            PhaseStatus::Failed(reason) => Err(reason),
        }
    }

    #[test]
    fn test_containers_strictly_contain_cells() {
        let graph = graph();
        let context = arrange(&graph, LayoutConfig::default(), None).expect("arranged");
        let arrangement = context.arrangement().expect("published");

        for container in graph.containers() {
            let bounds = arrangement.container(container).expect("container box");
            let children = graph.children(container);
            for (i, child) in children.iter().enumerate() {
                let cell = arrangement.cell(*child).expect("cell");
                assert!(bounds.strictly_contains(&cell), "{child} escapes {container}");
                for other in &children[i + 1..] {
                    let other_cell = arrangement.cell(*other).expect("cell");
                    assert!(!cell.overlaps(&other_cell), "{child} overlaps {other}");
                }
            }
        }
    }

    #[test]
    fn test_cut_box_fits_its_cell() {
        let graph = graph();
        let context = arrange(&graph, LayoutConfig::default(), None).expect("arranged");
        let arrangement = context.arrangement().expect("published");

        let inner = arrangement.container(id("inner")).expect("inner box");
        let cell = arrangement.cell(id("inner")).expect("inner cell");
        assert_eq!(inner.width(), cell.width());
        assert!(inner.min_y() >= cell.min_y() && inner.max_y() <= cell.max_y());

        let config = LayoutConfig::default();
        assert_eq!(inner.width(), config.empty_cut_size());
    }

    #[test]
    fn test_sheet_is_offset_by_canvas_margin() {
        let graph = graph();
        let config = LayoutConfig::default().with_canvas_margin(7.0);
        let context = arrange(&graph, config, None).expect("arranged");
        let sheet = context
            .arrangement()
            .and_then(|arrangement| arrangement.container(id("sheet")))
            .expect("sheet box");
        assert_eq!(sheet.min_point(), Point::new(7.0, 7.0));
    }

    #[test]
    fn test_retry_with_smaller_padding() {
        let graph = graph();
        let generous = arrange(&graph, LayoutConfig::default(), None).expect("arranged");
        let sheet = generous
            .arrangement()
            .and_then(|arrangement| arrangement.container(id("sheet")))
            .expect("sheet box");

        // Just too small for the default padding, large enough for half of it
        let extent = sheet.width().max(sheet.height()) - 1.0;
        let config = LayoutConfig::default().with_max_extent(extent);
        let context = arrange(&graph, config.clone(), None).expect("arranged after retry");
        let padding = context.arrangement().expect("published").padding();
        assert!(padding < config.cut_padding());
        assert!(padding >= config.min_cut_padding());
    }

    #[test]
    fn test_padding_exceeds_available_space() {
        let graph = graph();
        let config = LayoutConfig::default().with_max_extent(30.0);

        let failure = arrange(&graph, config, None).unwrap_err();
        assert!(matches!(
            failure,
            PhaseFailure::PaddingExceedsAvailableSpace { available, .. } if available == 30.0
        ));
    }

    #[test]
    fn test_advice_sets_reading_order() {
        let graph = graph();
        let mut advice = AdvisoryLayout::new();
        // Suggest Q above the outer cut
        advice.insert_node(id("q"), Point::new(50.0, 10.0));
        advice.insert_cluster(id("outer"), Bounds::new(0.0, 40.0, 100.0, 140.0));

        assert_eq!(
            ordered_children(&graph, id("sheet"), Some(&advice)),
            vec![id("q"), id("outer")]
        );
        assert_eq!(
            ordered_children(&graph, id("sheet"), None),
            vec![id("outer"), id("q")]
        );
    }
}
