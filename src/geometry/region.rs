//! Region records.

use geo::{Area, Centroid, Point, Polygon};

use super::outline::{repair, Outline};
use super::GeometryError;

/// An administrative region with its display names and single-part polygon.
#[derive(Debug, Clone)]
pub struct Region {
    /// Stable unique key.
    pub id: String,
    /// Display name in the local language.
    pub name: String,
    /// English display name.
    pub name_en: String,
    polygon: Polygon<f64>,
    centroid: Point<f64>,
}

impl Region {
    /// Creates a region from one polygon, deriving its centroid.
    ///
    /// Polygons with invalid rings take the centroid of their repaired
    /// geometry, falling back to the raw polygon when repair leaves nothing.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        name_en: impl Into<String>,
        polygon: Polygon<f64>,
    ) -> Result<Self, GeometryError> {
        let centroid = match Outline::new(&polygon) {
            Ok(_) => polygon.centroid(),
            Err(_) => repair(&polygon)
                .ok()
                .and_then(|healed| healed.centroid())
                .or_else(|| polygon.centroid()),
        }
        .ok_or(GeometryError::Empty)?;
        Ok(Region {
            id: id.into(),
            name: name.into(),
            name_en: name_en.into(),
            polygon,
            centroid,
        })
    }

    /// Creates a region from a multi-part geometry, keeping only the part
    /// with the largest area. Minor fragments such as small islands are
    /// dropped.
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        name_en: impl Into<String>,
        parts: impl IntoIterator<Item = Polygon<f64>>,
    ) -> Result<Self, GeometryError> {
        let polygon = largest_part(parts).ok_or(GeometryError::Empty)?;
        Self::new(id, name, name_en, polygon)
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn centroid(&self) -> Point<f64> {
        self.centroid
    }

    /// Rings as `[lon, lat]` lists, exterior first.
    pub fn rings(&self) -> Vec<Vec<[f64; 2]>> {
        std::iter::once(self.polygon.exterior())
            .chain(self.polygon.interiors())
            .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
            .collect()
    }
}

/// Returns the part with the largest unsigned area. Ties keep the earliest part.
pub fn largest_part(parts: impl IntoIterator<Item = Polygon<f64>>) -> Option<Polygon<f64>> {
    let mut best: Option<(f64, Polygon<f64>)> = None;
    for part in parts {
        let area = part.unsigned_area();
        match &best {
            Some((best_area, _)) if area <= *best_area => {}
            _ => best = Some((area, part)),
        }
    }
    best.map(|(_, part)| part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (x, y),
                (x + size, y),
                (x + size, y + size),
                (x, y + size),
                (x, y),
            ]),
            vec![],
        )
    }

    #[test]
    fn largest_part_wins() {
        let region = Region::from_parts(
            "Lankaran",
            "Lənkəran",
            "Lankaran",
            vec![square(10.0, 10.0, 0.5), square(0.0, 0.0, 2.0), square(5.0, 5.0, 1.0)],
        )
        .unwrap();

        assert_eq!(region.polygon(), &square(0.0, 0.0, 2.0));
        assert!((region.centroid().x() - 1.0).abs() < 1e-12);
        assert!((region.centroid().y() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equal_parts_keep_the_first() {
        let part = largest_part(vec![square(3.0, 0.0, 1.0), square(0.0, 0.0, 1.0)]).unwrap();
        assert_eq!(part, square(3.0, 0.0, 1.0));
    }

    #[test]
    fn no_parts_is_empty() {
        let err = Region::from_parts("x", "x", "x", Vec::new()).unwrap_err();
        assert_eq!(err, GeometryError::Empty);
    }

    #[test]
    fn self_intersecting_polygon_uses_repaired_centroid() {
        // Lobes (0,0),(0.75,0.75),(0,1) and (0.75,0.75),(3,3),(3,0), areas
        // 0.375 and 3.375, centroids (0.25, 7/12) and (2.25, 1.25).
        let bowtie = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (3.0, 3.0), (3.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        let region = Region::new("q", "Q", "Q", bowtie.clone()).unwrap();
        assert!((region.centroid().x() - 2.05).abs() < 1e-9, "{:?}", region.centroid());
        assert!((region.centroid().y() - 4.4375 / 3.75).abs() < 1e-9, "{:?}", region.centroid());
        assert_eq!(region.polygon(), &bowtie);
    }

    #[test]
    fn collapsed_polygon_keeps_raw_centroid() {
        let flat = Polygon::new(
            LineString::from(vec![(1.0, 0.0), (2.0, 0.0), (1.5, 0.0), (1.0, 0.0)]),
            vec![],
        );
        let region = Region::new("flat", "flat", "flat", flat).unwrap();
        assert_eq!(region.centroid().y(), 0.0);
    }

    #[test]
    fn rings_list_exterior_coordinates() {
        let region = Region::new("a", "A", "A", square(0.0, 0.0, 1.0)).unwrap();
        let rings = region.rings();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][0], [0.0, 0.0]);
        assert_eq!(rings[0][2], [1.0, 1.0]);
        assert_eq!(rings[0].len(), 5);
    }
}
