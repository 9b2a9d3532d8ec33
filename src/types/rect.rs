use super::{Point, Size, Thickness};

/// An axis-aligned rectangle. Element bounds are stored in parent-local
/// coordinates; the draw traversal converts them to absolute ones.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub const fn from_location(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// The rectangle spanned by a thickness read as left/top/right/bottom
    /// coordinates.
    pub fn from_edges(edges: Thickness) -> Self {
        Self::new(
            edges.left,
            edges.top,
            edges.right - edges.left,
            edges.bottom - edges.top,
        )
    }

    pub fn location(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn left(self) -> f32 {
        self.x
    }

    pub fn top(self) -> f32 {
        self.y
    }

    pub fn right(self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(self, point: Point) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    pub fn contains_rect(self, other: Rect) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(self, other: Rect) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    /// Limits this rectangle to `bounds`. Disjoint rectangles yield
    /// `Rect::EMPTY`.
    pub fn intersect(self, bounds: Rect) -> Rect {
        let x1 = self.x.max(bounds.x);
        let x2 = self.right().min(bounds.right());
        let y1 = self.y.max(bounds.y);
        let y2 = self.bottom().min(bounds.bottom());
        if x2 >= x1 && y2 >= y1 {
            Rect::new(x1, y1, x2 - x1, y2 - y1)
        } else {
            Rect::EMPTY
        }
    }

    pub fn offset(self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Moves every edge inward by the thickness. The size never goes below
    /// zero.
    pub fn deflate(self, thickness: Thickness) -> Rect {
        Rect::new(
            self.x + thickness.left,
            self.y + thickness.top,
            (self.width - thickness.horizontal()).max(0.0),
            (self.height - thickness.vertical()).max(0.0),
        )
    }

    pub fn inflate(self, thickness: Thickness) -> Rect {
        Rect::new(
            self.x - thickness.left,
            self.y - thickness.top,
            self.width + thickness.horizontal(),
            self.height + thickness.vertical(),
        )
    }

    pub fn clamp_non_negative(self) -> Rect {
        Rect::new(self.x, self.y, self.width.max(0.0), self.height.max(0.0))
    }

    pub fn is_close(self, other: Rect) -> bool {
        self.location().is_close(other.location()) && self.size().is_close(other.size())
    }
}
