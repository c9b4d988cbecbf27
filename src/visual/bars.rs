use rand::Rng;

use super::canvas::{LinearGradient, Point, Rect, Size};
use super::palette::Palette;

pub const BAR_COUNT: usize = 64;
pub const IDLE_HEIGHT: f32 = 5.0;
pub const MIN_HEIGHT: f32 = 10.0;
pub const MAX_HEIGHT: f32 = 50.0;
// one pixel gap between neighbours
pub const BAR_GAP: f32 = 1.0;

/// Height of a single bar for this frame. Re-rolled every frame while
/// playing, no smoothing.
pub fn bar_height<R: Rng>(rng: &mut R, is_playing: bool) -> f32 {
    if is_playing {
        rng.gen_range(MIN_HEIGHT..MAX_HEIGHT)
    } else {
        IDLE_HEIGHT
    }
}

/// Bottom-aligned rectangle for bar `i` spanning `1 / BAR_COUNT` of the width.
pub fn bar_rect(i: usize, height: f32, bounds: Size) -> Rect {
    let w = bounds.width / BAR_COUNT as f32;
    Rect::new(
        i as f32 * w,
        bounds.height - height,
        (w - BAR_GAP).max(0.0),
        height,
    )
}

/// Vertical gradient from the first palette color at the bar's foot to the
/// second (or first again) at its top.
pub fn bar_gradient(rect: &Rect, palette: &Palette) -> LinearGradient {
    let (bottom, top) = palette.gradient_stops();
    let mut g = LinearGradient::new(Point::new(0.0, rect.bottom()), Point::new(0.0, rect.y));
    g.add_color_stop(0.0, bottom);
    g.add_color_stop(1.0, top);
    g
}
