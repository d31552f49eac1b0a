//! District boundary geometry.
//!
//! The aggregated table stores each boundary in its `the_geom` column, either
//! as WKT (`POLYGON` / `MULTIPOLYGON`, coordinates as `lon lat`) or as a
//! GeoJSON geometry object. Both are normalized to a [`MultiPolygon`] and
//! exported as a GeoJSON `MultiPolygon` for the D3.js map.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `[lon, lat]` position.
pub type Position = [f64; 2];

/// A closed ring of positions.
pub type Ring = Vec<Position>;

/// An exterior ring followed by zero or more holes.
pub type Polygon = Vec<Ring>;

/// Minimum number of positions in a ring.
const MIN_RING_POSITIONS: usize = 3;

/// Errors raised while parsing a boundary.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("unsupported geometry type `{0}`")]
    UnsupportedType(String),

    #[error("expected {expected} at offset {offset}")]
    Syntax { expected: &'static str, offset: usize },

    #[error("ring has {0} positions, at least 3 are required")]
    TooFewPositions(usize),

    #[error("non-finite coordinate")]
    NonFinite,

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A district boundary, normalized to a list of polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(pub Vec<Polygon>);

/// GeoJSON geometry object as handed to D3.js.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonGeometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: Vec<Polygon>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeoJsonInput {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

impl MultiPolygon {
    /// Parse a `the_geom` cell. A leading `{` selects GeoJSON, anything else is WKT.
    pub fn parse(text: &str) -> Result<Self, GeometryError> {
        let trimmed = text.trim();
        if trimmed.starts_with('{') {
            Self::from_geojson(trimmed)
        } else {
            Self::from_wkt(trimmed)
        }
    }

    /// Parse a WKT `POLYGON` or `MULTIPOLYGON`, with an optional `SRID=n;` prefix.
    pub fn from_wkt(text: &str) -> Result<Self, GeometryError> {
        let body = match text.find(';') {
            Some(idx) if text[..idx].trim().to_ascii_uppercase().starts_with("SRID") => &text[idx + 1..],
            _ => text,
        };
        let mut cursor = WktCursor::new(body);
        let keyword = cursor.keyword()?;
        let polygons = match keyword.as_str() {
            "POLYGON" => {
                if cursor.empty_marker() {
                    Vec::new()
                } else {
                    vec![cursor.polygon()?]
                }
            }
            "MULTIPOLYGON" => {
                if cursor.empty_marker() {
                    Vec::new()
                } else {
                    cursor.multipolygon()?
                }
            }
            other => return Err(GeometryError::UnsupportedType(other.to_string())),
        };
        cursor.end()?;
        Ok(Self(polygons))
    }

    /// Parse a GeoJSON `Polygon` or `MultiPolygon` geometry object.
    pub fn from_geojson(text: &str) -> Result<Self, GeometryError> {
        let input: GeoJsonInput = serde_json::from_str(text)?;
        let polygons = match input {
            GeoJsonInput::Polygon { coordinates } => vec![polygon_from_json(coordinates)?],
            GeoJsonInput::MultiPolygon { coordinates } => coordinates
                .into_iter()
                .map(polygon_from_json)
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Self(polygons))
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Export as a GeoJSON `MultiPolygon` geometry.
    pub fn to_geojson(&self) -> GeoJsonGeometry {
        GeoJsonGeometry {
            kind: "MultiPolygon",
            coordinates: self.0.clone(),
        }
    }
}

fn polygon_from_json(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon, GeometryError> {
    rings
        .into_iter()
        .map(|ring| {
            let positions = ring
                .into_iter()
                .map(|pos| match pos.as_slice() {
                    [lon, lat, ..] => checked_position(*lon, *lat),
                    _ => Err(GeometryError::Syntax {
                        expected: "a position with two coordinates",
                        offset: 0,
                    }),
                })
                .collect::<Result<Ring, _>>()?;
            checked_ring(positions)
        })
        .collect()
}

fn checked_position(lon: f64, lat: f64) -> Result<Position, GeometryError> {
    if lon.is_finite() && lat.is_finite() {
        Ok([lon, lat])
    } else {
        Err(GeometryError::NonFinite)
    }
}

fn checked_ring(ring: Ring) -> Result<Ring, GeometryError> {
    if ring.len() < MIN_RING_POSITIONS {
        Err(GeometryError::TooFewPositions(ring.len()))
    } else {
        Ok(ring)
    }
}

/// Recursive-descent reader over a WKT body.
struct WktCursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> WktCursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), GeometryError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(GeometryError::Syntax {
                expected,
                offset: self.pos,
            })
        }
    }

    /// Read the geometry type keyword, skipping a `Z`, `M` or `ZM` tag.
    fn keyword(&mut self) -> Result<String, GeometryError> {
        self.skip_ws();
        let start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        let keyword = String::from_utf8_lossy(&self.src[start..self.pos]).to_ascii_uppercase();
        self.skip_ws();
        let tag_start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        let tag = String::from_utf8_lossy(&self.src[tag_start..self.pos]).to_ascii_uppercase();
        match tag.as_str() {
            "" | "Z" | "M" | "ZM" => {}
            "EMPTY" => self.pos = tag_start,
            _ => {
                return Err(GeometryError::Syntax {
                    expected: "`Z`, `M` or `ZM` after the geometry type",
                    offset: tag_start,
                })
            }
        }
        Ok(keyword)
    }

    fn empty_marker(&mut self) -> bool {
        self.skip_ws();
        let rest = &self.src[self.pos..];
        if rest.len() >= 5 && rest[..5].eq_ignore_ascii_case(b"EMPTY") {
            self.pos += 5;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<f64, GeometryError> {
        self.skip_ws();
        let start = self.pos;
        while self.pos < self.src.len()
            && matches!(self.src[self.pos], b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E')
        {
            self.pos += 1;
        }
        std::str::from_utf8(&self.src[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or(GeometryError::Syntax {
                expected: "a number",
                offset: start,
            })
    }

    fn position(&mut self) -> Result<Position, GeometryError> {
        let lon = self.number()?;
        let lat = self.number()?;
        // Drop Z / M ordinates.
        while matches!(self.peek(), Some(b'0'..=b'9' | b'+' | b'-' | b'.')) {
            self.number()?;
        }
        checked_position(lon, lat)
    }

    fn ring(&mut self) -> Result<Ring, GeometryError> {
        self.expect(b'(', "`(` opening a ring")?;
        let mut ring = vec![self.position()?];
        while self.peek() == Some(b',') {
            self.pos += 1;
            ring.push(self.position()?);
        }
        self.expect(b')', "`)` closing a ring")?;
        checked_ring(ring)
    }

    fn polygon(&mut self) -> Result<Polygon, GeometryError> {
        self.expect(b'(', "`(` opening a polygon")?;
        let mut rings = vec![self.ring()?];
        while self.peek() == Some(b',') {
            self.pos += 1;
            rings.push(self.ring()?);
        }
        self.expect(b')', "`)` closing a polygon")?;
        Ok(rings)
    }

    fn multipolygon(&mut self) -> Result<Vec<Polygon>, GeometryError> {
        self.expect(b'(', "`(` opening a multipolygon")?;
        let mut polygons = vec![self.polygon()?];
        while self.peek() == Some(b',') {
            self.pos += 1;
            polygons.push(self.polygon()?);
        }
        self.expect(b')', "`)` closing a multipolygon")?;
        Ok(polygons)
    }

    fn end(&mut self) -> Result<(), GeometryError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(GeometryError::Syntax {
                expected: "end of geometry",
                offset: self.pos,
            }),
        }
    }
}
