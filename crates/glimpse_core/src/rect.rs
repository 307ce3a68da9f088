/// An axis-aligned rectangle in source-pixel coordinates.
///
/// This is the unit the demos trade in: a detected face or a user-drawn
/// annotation is four numbers, nothing more. `w`/`h` may be zero; negative
/// extents never occur when constructed through [`RectPx::from_corners`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RectPx {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectPx {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanning two opposite corners, in any drag direction.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self {
            x,
            y,
            w: a.0.max(b.0) - x,
            h: a.1.max(b.1) - y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn intersection_area(&self, other: &Self) -> f32 {
        let ix = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let iy = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        ix * iy
    }

    /// Intersection over union; 0 when either rectangle is empty.
    pub fn iou(&self, other: &Self) -> f32 {
        let inter = self.intersection_area(other);
        if inter == 0.0 {
            return 0.0;
        }
        inter / (self.area() + other.area() - inter)
    }

    /// Clamp to the `[0, width] x [0, height]` region, shrinking as needed.
    /// An empty result stays empty instead of going negative.
    pub fn clamp_to(&self, width: f32, height: f32) -> Self {
        let x = self.x.clamp(0.0, width);
        let y = self.y.clamp(0.0, height);
        Self {
            x,
            y,
            w: (self.right().clamp(0.0, width) - x).max(0.0),
            h: (self.bottom().clamp(0.0, height) - y).max(0.0),
        }
    }
}
