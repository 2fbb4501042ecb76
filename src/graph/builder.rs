//! Adjacency derivation from region polygons.
//!
//! Every unordered region pair is tested. A bounding-box check rejects pairs
//! that cannot meet; surviving pairs compare boundary outlines and become
//! neighbors only on a shared border of positive length. Pairs whose raw
//! geometry is invalid are retried once on repaired outlines, and pairs that
//! still fail are treated as non-adjacent. Pair tests run in parallel on the
//! rayon pool; the resulting graph does not depend on scheduling.

use std::time::Instant;

use geo::{BoundingRect, Rect};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::geometry::outline::rects_touch;
use crate::geometry::{Contact, GeometryError, Outline, Region};

use super::{AdjacencyGraph, GraphError};

/// Per-region precomputed outline state.
struct Footprint<'a> {
    region: &'a Region,
    bounds: Option<Rect<f64>>,
    raw: Result<Outline, GeometryError>,
    healed: Option<Outline>,
}

impl<'a> Footprint<'a> {
    fn new(region: &'a Region) -> Self {
        let raw = Outline::new(region.polygon());
        let healed = match &raw {
            Ok(_) => None,
            Err(err) => {
                debug!("region '{}' has invalid geometry: {}", region.id, err);
                Outline::repaired(region.polygon()).ok()
            }
        };
        Footprint {
            region,
            bounds: region.polygon().bounding_rect(),
            raw,
            healed,
        }
    }

    fn outline(&self) -> Result<&Outline, GeometryError> {
        self.raw.as_ref().map_err(Clone::clone)
    }

    fn repaired(&self) -> Result<&Outline, GeometryError> {
        match (&self.raw, &self.healed) {
            (Ok(outline), _) => Ok(outline),
            (Err(_), Some(outline)) => Ok(outline),
            (Err(_), None) => Err(GeometryError::Irreparable),
        }
    }
}

/// Builds the adjacency graph of a region set.
///
/// Fails only on an empty region list or duplicate ids; geometry faults in a
/// single pair degrade that pair to "not adjacent".
pub fn build_adjacency(regions: &[Region]) -> Result<AdjacencyGraph, GraphError> {
    if regions.is_empty() {
        return Err(GraphError::Empty);
    }

    let started = Instant::now();
    let footprints: Vec<Footprint> = regions.par_iter().map(Footprint::new).collect();
    let footprints = &footprints;
    let n = footprints.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .into_par_iter()
        .flat_map_iter(move |i| {
            ((i + 1)..n)
                .filter(move |&j| classify(&footprints[i], &footprints[j]).is_border())
                .map(move |j| (i, j))
        })
        .collect();

    let graph = AdjacencyGraph::from_edges(
        regions.iter().map(|r| r.id.as_str()),
        pairs
            .iter()
            .map(|&(i, j)| (regions[i].id.as_str(), regions[j].id.as_str())),
    )?;

    info!(
        "built adjacency graph: {} regions, {} edges in {:.1?}",
        graph.len(),
        graph.edge_count(),
        started.elapsed()
    );
    Ok(graph)
}

/// Classifies one pair: bounding-box rejection, raw outlines, then one retry
/// on repaired outlines.
fn classify(a: &Footprint, b: &Footprint) -> Contact {
    if let (Some(ra), Some(rb)) = (&a.bounds, &b.bounds) {
        if !rects_touch(ra, rb) {
            return Contact::Disjoint;
        }
    }

    match raw_contact(a, b) {
        Ok(contact) => contact,
        Err(err) => {
            debug!(
                "retrying '{}' / '{}' on repaired geometry: {}",
                a.region.id, b.region.id, err
            );
            match repaired_contact(a, b) {
                Ok(contact) => contact,
                Err(err) => {
                    warn!(
                        "treating '{}' and '{}' as non-adjacent: {}",
                        a.region.id, b.region.id, err
                    );
                    Contact::Disjoint
                }
            }
        }
    }
}

fn raw_contact(a: &Footprint, b: &Footprint) -> Result<Contact, GeometryError> {
    Ok(a.outline()?.contact(b.outline()?))
}

fn repaired_contact(a: &Footprint, b: &Footprint) -> Result<Contact, GeometryError> {
    Ok(a.repaired()?.contact(b.repaired()?))
}
