use ph_core::{Error, GridPoint, Point2f, Rect, Vec2f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteGeometry {
    rect: Rect,
    pivot: Point2f,
    pixels_per_unit: f32,
}

impl SpriteGeometry {
    /// `pivot` is in pixels relative to the bottom-left of `rect`.
    pub fn new(rect: Rect, pivot: Point2f, pixels_per_unit: f32) -> Result<Self, Error> {
        if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
            return Err(Error::InvalidScale);
        }
        Ok(Self {
            rect,
            pivot,
            pixels_per_unit,
        })
    }

    pub fn centered(rect: Rect, pixels_per_unit: f32) -> Result<Self, Error> {
        let pivot = Point2f::new(rect.width as f32 * 0.5, rect.height as f32 * 0.5);
        Self::new(rect, pivot, pixels_per_unit)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn pivot(&self) -> Point2f {
        self.pivot
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// `(grid - pivot) / pixels_per_unit` per axis; no rotation.
    pub fn to_local(&self, p: GridPoint) -> Point2f {
        Point2f {
            x: (p.x as f32 - self.pivot.x) / self.pixels_per_unit,
            y: (p.y as f32 - self.pivot.y) / self.pixels_per_unit,
        }
    }

    pub fn map_points(&self, points: &[GridPoint]) -> Vec<Point2f> {
        points.iter().map(|&p| self.to_local(p)).collect()
    }

    pub fn half_extents(&self) -> Vec2f {
        Vec2f {
            x: self.rect.width as f32 / self.pixels_per_unit * 0.5,
            y: self.rect.height as f32 / self.pixels_per_unit * 0.5,
        }
    }

    pub fn local_to_pixels(&self, length: f32) -> f32 {
        length * self.pixels_per_unit
    }
}
