use super::spec::{ToneId, ToneSpec, OPAQUE_ALPHA};

/// Ordered set of tile tones for one map, at most one per coordinate.
///
/// Insertion order is kept so iteration is stable; it carries no other meaning.
#[derive(Debug, Default, Clone)]
pub struct ToneRegistry {
    tones: Vec<ToneSpec>,
    next_id: u64,
}

impl ToneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever tone sits at `(x, y)` with a fresh spec appended at the end.
    pub fn set_tile_tone(&mut self, x: i32, y: i32, red: i32, green: i32, blue: i32, alpha: i32) -> ToneId {
        self.remove_tile_tone(x, y);
        let id = ToneId(self.next_id);
        self.next_id += 1;
        self.tones.push(ToneSpec::new(id, x, y, red, green, blue, alpha));
        id
    }

    pub fn set_tile_tone_opaque(&mut self, x: i32, y: i32, red: i32, green: i32, blue: i32) -> ToneId {
        self.set_tile_tone(x, y, red, green, blue, OPAQUE_ALPHA)
    }

    /// Removes the tone at `(x, y)`. Absent coordinates are a silent no-op.
    pub fn remove_tile_tone(&mut self, x: i32, y: i32) -> Option<ToneSpec> {
        let index = self.tones.iter().position(|t| t.is_at(x, y))?;
        Some(self.tones.remove(index))
    }

    pub fn tile_tone(&self, x: i32, y: i32) -> Option<&ToneSpec> {
        self.tones.iter().find(|t| t.is_at(x, y))
    }

    pub fn clear_tile_tones(&mut self) {
        self.tones.clear();
    }

    pub fn tile_tones(&self) -> &[ToneSpec] {
        &self.tones
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}
