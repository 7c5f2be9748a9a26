use core::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).norm()
    }
}

impl Vec2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// z-component of the 3D cross product; positive when `rhs` turns
    /// counter-clockwise from `self`.
    pub fn cross(self, rhs: Self) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Add<Vec2f> for Point2f {
    type Output = Point2f;

    fn add(self, rhs: Vec2f) -> Self::Output {
        Point2f {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Point2f> for Point2f {
    type Output = Vec2f;

    fn sub(self, rhs: Point2f) -> Self::Output {
        Vec2f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Sub for Vec2f {
    type Output = Vec2f;

    fn sub(self, rhs: Vec2f) -> Self::Output {
        Vec2f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2f {
    type Output = Vec2f;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec2f {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_adjacent8(self, other: Self) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }

    pub fn to_point2f(self) -> Point2f {
        Point2f {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

impl Sub for GridPoint {
    type Output = Vec2f;

    fn sub(self, rhs: GridPoint) -> Self::Output {
        Vec2f {
            x: (self.x - rhs.x) as f32,
            y: (self.y - rhs.y) as f32,
        }
    }
}

/// Axis-aligned pixel rectangle; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x <= width
            && self.y <= height
            && self.width <= width - self.x
            && self.height <= height - self.y
    }
}

#[cfg(test)]
mod tests {
    use super::{GridPoint, Point2f, Rect, Vec2f};

    #[test]
    fn vec_ops() {
        let a = Vec2f { x: 3.0, y: 4.0 };
        let b = Vec2f { x: 1.0, y: -2.0 };

        assert_eq!(a - b, Vec2f { x: 2.0, y: 6.0 });
        assert!((a.dot(b) + 5.0).abs() < 1e-6);
        assert!((a.norm() - 5.0).abs() < 1e-6);
        assert!((a.cross(b) + 10.0).abs() < 1e-6);
        assert_eq!(a * 2.0, Vec2f { x: 6.0, y: 8.0 });
    }

    #[test]
    fn cross_sign_follows_turn_direction() {
        let east = Vec2f::new(1.0, 0.0);
        let north = Vec2f::new(0.0, 1.0);
        assert!(east.cross(north) > 0.0);
        assert!(north.cross(east) < 0.0);
        assert_eq!(east.cross(east * 3.0), 0.0);
    }

    #[test]
    fn grid_point_adjacency() {
        let p = GridPoint::new(2, 2);
        assert!(p.is_adjacent8(GridPoint::new(3, 3)));
        assert!(p.is_adjacent8(GridPoint::new(2, 1)));
        assert!(!p.is_adjacent8(p));
        assert!(!p.is_adjacent8(GridPoint::new(4, 2)));
        assert_eq!(p.offset(-1, 1), GridPoint::new(1, 3));
        assert_eq!(GridPoint::new(5, 1) - p, Vec2f::new(3.0, -1.0));
    }

    #[test]
    fn point_distance() {
        let a = Point2f::new(0.0, 0.0);
        let b = Point2f::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(a + Vec2f::new(1.0, 2.0), Point2f::new(1.0, 2.0));
    }

    #[test]
    fn rect_fit_checks() {
        let r = Rect::new(2, 1, 4, 3);
        assert!(r.fits_within(6, 4));
        assert!(!r.fits_within(5, 4));
        assert!(!r.fits_within(6, 3));
        assert!(Rect::from_size(0, 5).is_empty());
        assert!(!Rect::new(7, 0, 0, 0).fits_within(6, 4));
    }
}
