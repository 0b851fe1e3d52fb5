//! Point and polygon geometry for map overlays.
//!
//! Coordinates are kept as read from the source file: `x` is longitude and
//! `y` latitude for geographic data.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingRole {
    Outer,
    Inner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring {
    pub role: RingRole,
    pub points: Vec<Point>,
}

impl Ring {
    pub fn outer(points: Vec<Point>) -> Self {
        Self {
            role: RingRole::Outer,
            points,
        }
    }

    pub fn inner(points: Vec<Point>) -> Self {
        Self {
            role: RingRole::Inner,
            points,
        }
    }

    /// Signed shoelace area and area centroid of the ring.
    fn area_and_centroid(&self) -> Option<(f64, Point)> {
        let pts = &self.points;
        if pts.len() < 3 {
            return None;
        }
        let mut twice_area = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            let cross = a.x * b.y - b.x * a.y;
            twice_area += cross;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        if twice_area.abs() < f64::EPSILON {
            return None;
        }
        let area = twice_area / 2.0;
        Some((area, Point::new(cx / (6.0 * area), cy / (6.0 * area))))
    }
}

/// Polygon made of one or more outer rings and any number of holes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// Area-weighted centroid; holes subtract their area.
    ///
    /// Degenerate polygons (zero net area) fall back to the mean of the outer
    /// ring vertices. Returns `None` for a polygon without vertices.
    pub fn centroid(&self) -> Option<Point> {
        let mut weight = 0.0;
        let mut sx = 0.0;
        let mut sy = 0.0;
        for ring in &self.rings {
            if let Some((area, c)) = ring.area_and_centroid() {
                let w = match ring.role {
                    RingRole::Outer => area.abs(),
                    RingRole::Inner => -area.abs(),
                };
                weight += w;
                sx += w * c.x;
                sy += w * c.y;
            }
        }
        if weight.abs() > f64::EPSILON {
            return Some(Point::new(sx / weight, sy / weight));
        }

        let outer: Vec<Point> = self
            .rings
            .iter()
            .filter(|r| r.role == RingRole::Outer)
            .flat_map(|r| r.points.iter().copied())
            .collect();
        if outer.is_empty() {
            return None;
        }
        let n = outer.len() as f64;
        Some(Point::new(
            outer.iter().map(|p| p.x).sum::<f64>() / n,
            outer.iter().map(|p| p.y).sum::<f64>() / n,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point(Point),
    Polygon(Polygon),
}

impl Geometry {
    pub fn centroid(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            Self::Polygon(poly) => poly.centroid(),
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            Self::Polygon(_) => None,
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            Self::Point(p) => Some(BoundingBox::from_point(*p)),
            Self::Polygon(poly) => poly
                .rings
                .iter()
                .flat_map(|r| r.points.iter().copied())
                .fold(None, |acc: Option<BoundingBox>, p| {
                    Some(match acc {
                        Some(b) => b.extend(p),
                        None => BoundingBox::from_point(p),
                    })
                }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn from_point(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    pub fn extend(self, p: Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    pub fn union(self, other: BoundingBox) -> Self {
        self.extend(Point::new(other.min_x, other.min_y))
            .extend(Point::new(other.max_x, other.max_y))
    }

    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }
}
