//! Drawing surface trait for the PCD8544

use crate::glyph::{Coordinate, Glyph, Slot};

/// Write-only drawing surface backed by controller RAM
///
/// Operations are fire-and-forget: implementations report transfer
/// failures to their own sink and carry on, so nothing is returned.
/// A surface is not safe to use from two tasks at once; the hand-off ring
/// moves it between tasks by value instead of locking it.
#[allow(async_fn_in_trait)]
pub trait Surface {
    /// Blank a screen's worth of RAM from the current counter position
    async fn clear(&mut self);

    /// Set the write counters
    ///
    /// No range check; see [`Coordinate::new`].
    async fn move_to(&mut self, at: Coordinate);

    /// Write a glyph at the current counter position
    async fn draw_glyph(&mut self, glyph: &Glyph);

    /// Move to `at`, then write `glyph`
    async fn draw_glyph_at(&mut self, glyph: &Glyph, at: Coordinate) {
        self.move_to(at).await;
        self.draw_glyph(glyph).await;
    }
}

/// Helpers for slot-addressed drawing
#[allow(async_fn_in_trait)]
pub trait SurfaceExt: Surface {
    /// Draw a glyph at one of the fixed slots
    async fn draw_in_slot(&mut self, glyph: &Glyph, slot: Slot) {
        self.draw_glyph_at(glyph, slot.coordinate()).await;
    }
}

// Blanket implementation for all Surface types
impl<T: Surface> SurfaceExt for T {}
