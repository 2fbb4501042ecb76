//! Boundary outlines and contact classification.
//!
//! An `Outline` holds the boundary edges of a polygon (exterior and hole
//! rings). Building one from raw input checks the ring defects that make a
//! boundary intersection meaningless: short rings, non-finite coordinates and
//! self-intersections. Outlines of repaired geometry come from a boolean
//! overlay and are trusted as-is.
//!
//! Two outlines are compared edge against edge. Collinear overlaps of
//! positive length form a shared border; isolated touching points do not.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{BooleanOps, Coord, Line, LineString, MultiPolygon, Polygon, Rect};

use super::GeometryError;

/// How the boundaries of two regions meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// The boundaries do not meet.
    Disjoint,
    /// The boundaries meet only at isolated points, such as a shared corner.
    Point,
    /// The boundaries share segments of positive total length.
    Border { length: f64 },
}

impl Contact {
    /// Returns true when the contact makes the two regions neighbors.
    pub fn is_border(&self) -> bool {
        matches!(self, Contact::Border { .. })
    }
}

/// Boundary edges of a region, sorted by their minimum x coordinate.
#[derive(Debug, Clone)]
pub struct Outline {
    edges: Vec<Line<f64>>,
    bounds: Rect<f64>,
}

impl Outline {
    /// Builds an outline from raw polygon input, rejecting invalid rings.
    pub fn new(polygon: &Polygon<f64>) -> Result<Self, GeometryError> {
        let mut edges = Vec::new();
        for (index, ring) in rings(polygon).enumerate() {
            edges.extend(checked_ring_edges(ring, index)?);
        }
        Self::from_edges(edges)
    }

    /// Builds an outline from a topology-repaired copy of the polygon.
    pub fn repaired(polygon: &Polygon<f64>) -> Result<Self, GeometryError> {
        let healed = repair(polygon)?;
        let edges = healed
            .iter()
            .flat_map(rings)
            .flat_map(ring_edges)
            .collect();
        Self::from_edges(edges).map_err(|_| GeometryError::Irreparable)
    }

    fn from_edges(mut edges: Vec<Line<f64>>) -> Result<Self, GeometryError> {
        let Some(first) = edges.first() else {
            return Err(GeometryError::Empty);
        };

        let mut min = first.start;
        let mut max = first.start;
        for edge in &edges {
            for c in [edge.start, edge.end] {
                min.x = min.x.min(c.x);
                min.y = min.y.min(c.y);
                max.x = max.x.max(c.x);
                max.y = max.y.max(c.y);
            }
        }

        edges.sort_by(|a, b| min_x(a).total_cmp(&min_x(b)));
        Ok(Outline {
            edges,
            bounds: Rect::new(min, max),
        })
    }

    /// Bounding box of all boundary edges.
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// Number of boundary edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the two bounding boxes intersect or touch.
    pub fn may_touch(&self, other: &Outline) -> bool {
        rects_touch(&self.bounds, &other.bounds)
    }

    /// Classifies where this boundary meets the other one.
    pub fn contact(&self, other: &Outline) -> Contact {
        if !self.may_touch(other) {
            return Contact::Disjoint;
        }

        let mut touched = false;
        let mut length = 0.0;
        for edge in &self.edges {
            let hi = max_x(edge);
            let end = other.edges.partition_point(|e| min_x(e) <= hi);
            for candidate in &other.edges[..end] {
                if !lines_touch(edge, candidate) {
                    continue;
                }
                match line_intersection(*edge, *candidate) {
                    Some(LineIntersection::Collinear { intersection }) => {
                        let shared = segment_length(&intersection);
                        if shared > 0.0 {
                            length += shared;
                        } else {
                            touched = true;
                        }
                    }
                    Some(LineIntersection::SinglePoint { .. }) => touched = true,
                    None => {}
                }
            }
        }

        if length > 0.0 {
            Contact::Border { length }
        } else if touched {
            Contact::Point
        } else {
            Contact::Disjoint
        }
    }
}

/// Classifies the boundary contact of two raw polygons.
///
/// Fails when either polygon has an invalid ring; callers decide whether to
/// repair and retry.
pub fn boundary_contact(a: &Polygon<f64>, b: &Polygon<f64>) -> Result<Contact, GeometryError> {
    Ok(Outline::new(a)?.contact(&Outline::new(b)?))
}

/// Topology repair: a self-union through the boolean overlay, the
/// equivalent of a zero-width buffer. Self-intersections are resolved and
/// every resulting part keeps its area.
pub fn repair(polygon: &Polygon<f64>) -> Result<MultiPolygon<f64>, GeometryError> {
    let finite = rings(polygon)
        .flat_map(|ring| ring.coords())
        .all(|c| c.x.is_finite() && c.y.is_finite());
    if !finite {
        return Err(GeometryError::Irreparable);
    }

    let healed: MultiPolygon<f64> = polygon.union(polygon);
    if healed.0.is_empty() {
        return Err(GeometryError::Irreparable);
    }
    Ok(healed)
}

fn rings(polygon: &Polygon<f64>) -> impl Iterator<Item = &LineString<f64>> {
    std::iter::once(polygon.exterior()).chain(polygon.interiors())
}

/// Non-degenerate edges of a ring.
fn ring_edges(ring: &LineString<f64>) -> impl Iterator<Item = Line<f64>> + '_ {
    ring.lines().filter(|line| line.start != line.end)
}

fn checked_ring_edges(ring: &LineString<f64>, index: usize) -> Result<Vec<Line<f64>>, GeometryError> {
    let count = ring.0.len();
    if count < 4 {
        return Err(GeometryError::TooFewPoints { ring: index, count });
    }
    if ring.coords().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(GeometryError::NonFinite { ring: index });
    }

    let edges: Vec<Line<f64>> = ring_edges(ring).collect();
    if edges.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            ring: index,
            count: edges.len() + 1,
        });
    }

    // Sweep over edges ordered by min x; a pair can only touch while the
    // later edge starts at or before the earlier one ends.
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&a, &b| min_x(&edges[a]).total_cmp(&min_x(&edges[b])));

    let last = edges.len() - 1;
    for (pos, &i) in order.iter().enumerate() {
        let hi = max_x(&edges[i]);
        for &j in &order[pos + 1..] {
            if min_x(&edges[j]) > hi {
                break;
            }
            if !lines_touch(&edges[i], &edges[j]) {
                continue;
            }
            let (lo, high) = (i.min(j), i.max(j));
            let consecutive = high == lo + 1 || (lo == 0 && high == last);
            match line_intersection(edges[i], edges[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if consecutive => {}
                Some(_) => return Err(GeometryError::SelfIntersection { ring: index }),
            }
        }
    }
    Ok(edges)
}

fn min_x(line: &Line<f64>) -> f64 {
    line.start.x.min(line.end.x)
}

fn max_x(line: &Line<f64>) -> f64 {
    line.start.x.max(line.end.x)
}

fn segment_length(line: &Line<f64>) -> f64 {
    line.dx().hypot(line.dy())
}

/// Returns true if two boxes intersect or touch.
pub(crate) fn rects_touch(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x && b.min().x <= a.max().x && a.min().y <= b.max().y && b.min().y <= a.max().y
}

fn lines_touch(a: &Line<f64>, b: &Line<f64>) -> bool {
    let (a_lo, a_hi) = corners(a);
    let (b_lo, b_hi) = corners(b);
    a_lo.x <= b_hi.x && b_lo.x <= a_hi.x && a_lo.y <= b_hi.y && b_lo.y <= a_hi.y
}

fn corners(line: &Line<f64>) -> (Coord<f64>, Coord<f64>) {
    (
        Coord {
            x: line.start.x.min(line.end.x),
            y: line.start.y.min(line.end.y),
        },
        Coord {
            x: line.start.x.max(line.end.x),
            y: line.start.y.max(line.end.y),
        },
    )
}
