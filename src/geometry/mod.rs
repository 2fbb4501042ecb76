//! Region geometry.
//!
//! Regions carry one polygon each (multi-part inputs are reduced to their
//! largest part). Adjacency is decided on region outlines: two regions are
//! neighbors only when their boundaries share a segment of positive length,
//! never when they merely touch at a corner.

pub mod outline;
pub mod region;

pub use outline::{boundary_contact, repair, Contact, Outline};
pub use region::{largest_part, Region};

/// Defects that prevent a boundary intersection from being computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry is empty")]
    Empty,

    #[error("ring {ring} has {count} coordinates, need at least 4")]
    TooFewPoints { ring: usize, count: usize },

    #[error("ring {ring} has a non-finite coordinate")]
    NonFinite { ring: usize },

    #[error("ring {ring} intersects itself")]
    SelfIntersection { ring: usize },

    #[error("topology repair left no area")]
    Irreparable,
}
