use bevy::prelude::*;

/// Alpha used when a tone is registered without an explicit alpha.
pub const OPAQUE_ALPHA: i32 = 255;

/// Opaque identity token handed out by a [`ToneRegistry`](super::ToneRegistry).
///
/// Two specs at the same coordinate never share an id: a tone that is removed and
/// set again is a new spec, so overlay visuals are matched by id, not position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToneId(pub u64);

/// Immutable tint of one map tile.
///
/// Channel and alpha values are stored as given. Anything outside 0..=255 is the
/// caller's business; the color tone filter clamps when the overlay is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSpec {
    id: ToneId,
    x: i32,
    y: i32,
    red: i32,
    green: i32,
    blue: i32,
    gray: f32,
    alpha: i32,
}

impl ToneSpec {
    pub(crate) fn new(id: ToneId, x: i32, y: i32, red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        Self {
            id,
            x,
            y,
            red,
            green,
            blue,
            gray: ((red as f64 + green as f64 + blue as f64) / 3.0) as f32,
            alpha,
        }
    }

    #[inline]
    pub fn id(&self) -> ToneId {
        self.id
    }
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }
    #[inline]
    pub fn coord(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
    #[inline]
    pub fn red(&self) -> i32 {
        self.red
    }
    #[inline]
    pub fn green(&self) -> i32 {
        self.green
    }
    #[inline]
    pub fn blue(&self) -> i32 {
        self.blue
    }
    /// Mean of the three channels, computed once at construction.
    #[inline]
    pub fn gray(&self) -> f32 {
        self.gray
    }
    #[inline]
    pub fn alpha(&self) -> i32 {
        self.alpha
    }

    /// `[r, g, b, gray]` in the order the color tone filter expects.
    pub fn tone(&self) -> [f32; 4] {
        [self.red as f32, self.green as f32, self.blue as f32, self.gray]
    }

    #[inline]
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}
