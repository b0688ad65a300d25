//! Reading Graphviz `-Tjson` output into an [`AdvisoryLayout`].
//!
//! Graphviz reports coordinates in points with the y axis pointing up.
//! Diagram units are points as well, so only the y axis is flipped against
//! the top of the drawing's bounding box.

use serde::Deserialize;

use ligature_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use super::{AdvisoryLayout, OracleError};

/// Name prefix that makes Graphviz treat a subgraph as a cluster.
pub(crate) const CLUSTER_PREFIX: &str = "cluster_";

#[derive(Debug, Deserialize)]
struct JsonGraph {
    bb: String,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

#[derive(Debug, Deserialize)]
struct JsonObject {
    name: String,
    #[serde(default)]
    bb: Option<String>,
    #[serde(default)]
    pos: Option<String>,
}

/// Parses the JSON document written by `dot -Tjson`.
///
/// Objects named `cluster_<id>` with a bounding box become cluster boxes;
/// objects with a position become node centers. Anything else is ignored.
///
/// # Errors
///
/// Returns [`OracleError::Json`] for invalid JSON and
/// [`OracleError::Malformed`] for unreadable coordinates.
///
/// # Examples
///
/// ```
/// use ligature::oracle::parse_graphviz_json;
/// use ligature_core::{geometry::Point, identifier::Id};
///
/// let json = br#"{
///     "bb": "0,0,100,80",
///     "objects": [
///         {"name": "cluster_c", "bb": "10,10,90,70"},
///         {"name": "p", "pos": "50,60"}
///     ]
/// }"#;
/// let advice = parse_graphviz_json(json).unwrap();
///
/// assert_eq!(advice.node(Id::new("p")), Some(Point::new(50.0, 20.0)));
/// assert_eq!(advice.cluster(Id::new("c")).unwrap().min_y(), 10.0);
/// ```
pub fn parse_graphviz_json(bytes: &[u8]) -> Result<AdvisoryLayout, OracleError> {
    let graph: JsonGraph = serde_json::from_slice(bytes)?;
    let canvas = parse_box(&graph.bb)?;
    let top = canvas.max_y();

    let mut advice = AdvisoryLayout::new();
    advice.set_canvas(flip_box(canvas, top));

    for object in &graph.objects {
        if let Some(bb) = &object.bb {
            if let Some(cut) = object.name.strip_prefix(CLUSTER_PREFIX) {
                advice.insert_cluster(Id::new(cut), flip_box(parse_box(bb)?, top));
            }
        } else if let Some(pos) = &object.pos {
            let [x, y] = parse_numbers::<2>(pos)?;
            advice.insert_node(Id::new(&object.name), Point::new(x, top - y));
        }
    }
    Ok(advice)
}

fn parse_box(value: &str) -> Result<Bounds, OracleError> {
    let [llx, lly, urx, ury] = parse_numbers::<4>(value)?;
    Ok(Bounds::new(llx.min(urx), lly.min(ury), llx.max(urx), lly.max(ury)))
}

fn flip_box(bounds: Bounds, top: f32) -> Bounds {
    Bounds::new(
        bounds.min_x(),
        top - bounds.max_y(),
        bounds.max_x(),
        top - bounds.min_y(),
    )
}

fn parse_numbers<const N: usize>(value: &str) -> Result<[f32; N], OracleError> {
    let mut numbers = [0.0; N];
    let mut parts = value.split(',');
    for number in &mut numbers {
        let part = parts
            .next()
            .ok_or_else(|| OracleError::Malformed(format!("expected {N} numbers in `{value}`")))?;
        *number = part
            .trim()
            .parse()
            .map_err(|_| OracleError::Malformed(format!("invalid number `{part}` in `{value}`")))?;
    }
    if parts.next().is_some() {
        return Err(OracleError::Malformed(format!(
            "expected {N} numbers in `{value}`"
        )));
    }
    Ok(numbers)
}
