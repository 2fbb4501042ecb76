//! Region data file loading.
//!
//! The data file is a JSON array of district records:
//!
//! ```json
//! [{"name": "Şəki", "name_en": "Shaki", "geometry_type": "Polygon",
//!   "polygons": [[[[47.1, 41.2], [47.3, 41.2], [47.3, 41.4], [47.1, 41.2]]]]}]
//! ```
//!
//! `polygons` is a list of polygons, each a list of rings (exterior first),
//! each a list of `[lon, lat]` pairs. The region id is the English name.
//! Multi-part regions keep only their largest part.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use geo::{LineString, Polygon};
use log::info;
use serde::Deserialize;

use crate::geometry::{GeometryError, Region};

/// Geometry kind declared by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GeometryType {
    Polygon,
    MultiPolygon,
}

/// One district record as stored in the data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    #[serde(default)]
    pub name_en: Option<String>,
    pub geometry_type: GeometryType,
    pub polygons: Vec<Vec<Vec<[f64; 2]>>>,
}

/// Errors that can occur while loading region data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid region data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("region '{0}' has no polygons")]
    NoPolygons(String),

    #[error("region '{name}': {source}")]
    Geometry {
        name: String,
        #[source]
        source: GeometryError,
    },
}

impl RegionRecord {
    /// Converts the record into a region, reducing multi-part geometry to
    /// its largest part.
    pub fn into_region(self) -> Result<Region, LoadError> {
        let name_en = self.name_en.unwrap_or_else(|| self.name.clone());
        let mut parts: Vec<Polygon<f64>> = self.polygons.iter().filter_map(|p| to_polygon(p)).collect();
        if parts.is_empty() {
            return Err(LoadError::NoPolygons(self.name));
        }
        if self.geometry_type == GeometryType::Polygon || parts.len() == 1 {
            parts.truncate(1);
        }

        Region::from_parts(name_en.clone(), self.name.clone(), name_en, parts).map_err(|source| {
            LoadError::Geometry {
                name: self.name,
                source,
            }
        })
    }
}

fn to_polygon(rings: &[Vec<[f64; 2]>]) -> Option<Polygon<f64>> {
    let (exterior, holes) = rings.split_first()?;
    let ring = |coords: &Vec<[f64; 2]>| -> LineString<f64> {
        coords.iter().map(|&[x, y]| (x, y)).collect::<Vec<_>>().into()
    };
    Some(Polygon::new(ring(exterior), holes.iter().map(ring).collect()))
}

/// Parses region records from JSON text.
pub fn parse_regions(json: &str) -> Result<Vec<Region>, LoadError> {
    let records: Vec<RegionRecord> = serde_json::from_str(json)?;
    records.into_iter().map(RegionRecord::into_region).collect()
}

/// Loads all regions from a data file.
pub fn load_regions(path: impl AsRef<Path>) -> Result<Vec<Region>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let regions = parse_regions(&text)?;
    info!("loaded {} regions from {}", regions.len(), path.display());
    Ok(regions)
}
