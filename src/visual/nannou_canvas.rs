use std::collections::HashSet;

use nannou::color::{LinSrgba, Mix};
use nannou::prelude::*;
use tracing::warn;

use super::canvas::{self, Canvas, Context2d, LinearGradient, Paint, Shadow, Size};
use super::color::parse_css_color;

// unparseable colors render as neutral gray
fn fallback() -> Srgba {
    srgba(0.5, 0.5, 0.5, 1.0)
}

// halo opacity relative to the shape it surrounds
const GLOW_ALPHA: f32 = 0.25;

fn faded(c: Srgba, alpha: f32) -> Srgba {
    let mut c = c;
    c.alpha *= alpha;
    c
}

/// Draws into a `nannou::Draw`, converting canvas space (top-left origin,
/// y down) into nannou's centered, y-up space.
pub struct NannouContext {
    draw: Draw,
    size: Size,
    alpha: f32,
    shadow: Option<(f32, Srgba)>,
    warned: HashSet<String>,
}

impl NannouContext {
    fn new(draw: Draw) -> Self {
        Self {
            draw,
            size: Size::new(0.0, 0.0),
            alpha: 1.0,
            shadow: None,
            warned: HashSet::new(),
        }
    }

    fn color(&mut self, css: &str) -> Srgba {
        match parse_css_color(css) {
            Some(c) => c,
            None => {
                if self.warned.insert(css.to_string()) {
                    warn!(color = css, "unrecognised color, using fallback");
                }
                fallback()
            }
        }
    }

    fn to_nannou(&self, p: canvas::Point) -> Point2 {
        pt2(p.x - self.size.width * 0.5, self.size.height * 0.5 - p.y)
    }

    fn gradient_color(&mut self, g: &LinearGradient, p: canvas::Point) -> Srgba {
        let dx = g.to.x - g.from.x;
        let dy = g.to.y - g.from.y;
        let len2 = dx * dx + dy * dy;
        let t = if len2 > 0.0 {
            (((p.x - g.from.x) * dx + (p.y - g.from.y) * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let stops: Vec<(f32, Srgba)> = g
            .stops
            .iter()
            .map(|(o, c)| (*o, self.color(c)))
            .collect();
        sample_stops(&stops, t)
    }

    /// Corners of `rect` (clockwise from top-left) in nannou space, each
    /// colored by where it falls on the gradient axis.
    fn gradient_corners(&mut self, rect: canvas::Rect, g: &LinearGradient) -> Vec<(Point2, Srgba)> {
        let corners = [
            canvas::Point::new(rect.x, rect.y),
            canvas::Point::new(rect.x + rect.w, rect.y),
            canvas::Point::new(rect.x + rect.w, rect.y + rect.h),
            canvas::Point::new(rect.x, rect.y + rect.h),
        ];
        let alpha = self.alpha;
        corners
            .iter()
            .map(|&p| {
                let c = self.gradient_color(g, p);
                (self.to_nannou(p), faded(c, alpha))
            })
            .collect()
    }
}

// mixing happens in linear space
fn sample_stops(stops: &[(f32, Srgba)], t: f32) -> Srgba {
    let Some(&(first_o, first_c)) = stops.first() else {
        return fallback();
    };
    if t <= first_o {
        return first_c;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = (o1 - o0).max(f32::EPSILON);
            let a: LinSrgba = c0.into_linear();
            let b: LinSrgba = c1.into_linear();
            return Srgba::from_linear(a.mix(&b, ((t - o0) / span).clamp(0.0, 1.0)));
        }
    }
    stops[stops.len() - 1].1
}

impl Context2d for NannouContext {
    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow.map(|s| (s.blur, self.color(&s.color)));
    }

    fn fill_rect(&mut self, rect: canvas::Rect, paint: &Paint) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let center = self.to_nannou(canvas::Point::new(rect.x + rect.w * 0.5, rect.y + rect.h * 0.5));

        if let Some((blur, glow)) = self.shadow {
            self.draw
                .rect()
                .xy(center)
                .w_h(rect.w + blur, rect.h + blur)
                .color(faded(glow, GLOW_ALPHA * self.alpha));
        }

        match paint {
            Paint::Solid(css) => {
                let c = self.color(css);
                self.draw
                    .rect()
                    .xy(center)
                    .w_h(rect.w, rect.h)
                    .color(faded(c, self.alpha));
            }
            Paint::Gradient(g) => {
                let points = self.gradient_corners(rect, g);
                self.draw.polygon().points_colored(points);
            }
        }
    }

    fn fill_circle(&mut self, center: canvas::Point, radius: f32, color: &str) {
        let c = self.color(color);
        let xy = self.to_nannou(center);

        if let Some((blur, glow)) = self.shadow {
            self.draw
                .ellipse()
                .xy(xy)
                .radius(radius + blur * 0.5)
                .color(faded(glow, GLOW_ALPHA * self.alpha));
        }

        self.draw
            .ellipse()
            .xy(xy)
            .radius(radius)
            .color(faded(c, self.alpha));
    }
}

/// The window as a visualizer surface. The frame is never cleared, the
/// visualizer's translucent overlay does the fading.
pub struct NannouCanvas {
    display: Option<Size>,
    buffer: (u32, u32),
    ctx: NannouContext,
}

impl NannouCanvas {
    pub fn new(window: Size) -> Self {
        Self {
            display: Some(window),
            buffer: (0, 0),
            ctx: NannouContext::new(Draw::new()),
        }
    }

    pub fn set_display(&mut self, window: Option<Size>) {
        self.display = window;
    }

    /// Drops the draw commands of the previous frame.
    pub fn begin_frame(&mut self) {
        self.ctx.draw.reset();
    }

    pub fn draw(&self) -> &Draw {
        &self.ctx.draw
    }
}

impl Canvas for NannouCanvas {
    fn display_size(&self) -> Option<Size> {
        self.display
    }

    fn set_buffer_size(&mut self, width: u32, height: u32) {
        self.buffer = (width, height);
        self.ctx.size = Size::new(width as f32, height as f32);
    }

    fn buffer_size(&self) -> (u32, u32) {
        self.buffer
    }

    fn context(&mut self) -> Option<&mut dyn Context2d> {
        Some(&mut self.ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::bars::{bar_gradient, bar_rect};
    use crate::visual::palette::Palette;

    fn close(a: Srgba, b: Srgba) -> bool {
        (a.red - b.red).abs() < 1e-3
            && (a.green - b.green).abs() < 1e-3
            && (a.blue - b.blue).abs() < 1e-3
            && (a.alpha - b.alpha).abs() < 1e-3
    }

    fn context(w: u32, h: u32) -> NannouContext {
        let mut canvas = NannouCanvas::new(Size::new(w as f32, h as f32));
        canvas.set_buffer_size(w, h);
        canvas.ctx
    }

    #[test]
    fn stops_hit_their_endpoints() {
        let red = srgba(1.0, 0.0, 0.0, 1.0);
        let blue = srgba(0.0, 0.0, 1.0, 1.0);
        let stops = [(0.0, red), (1.0, blue)];
        assert!(close(sample_stops(&stops, 0.0), red));
        assert!(close(sample_stops(&stops, 1.0), blue));
        let mid = sample_stops(&stops, 0.5);
        assert!(mid.red > 0.0 && mid.red < 1.0);
        assert!(mid.blue > 0.0 && mid.blue < 1.0);
    }

    #[test]
    fn single_stop_is_flat() {
        let green = srgba(0.0, 1.0, 0.0, 1.0);
        assert!(close(sample_stops(&[(0.0, green)], 0.7), green));
    }

    #[test]
    fn top_left_maps_to_upper_left_of_window() {
        let ctx = context(800, 400);
        assert_eq!(ctx.to_nannou(canvas::Point::new(0.0, 0.0)), pt2(-400.0, 200.0));
        assert_eq!(ctx.to_nannou(canvas::Point::new(800.0, 400.0)), pt2(400.0, -200.0));
        assert_eq!(ctx.to_nannou(canvas::Point::new(400.0, 200.0)), pt2(0.0, 0.0));
    }

    #[test]
    fn bar_foot_takes_first_palette_color() {
        let mut ctx = context(640, 100);
        let palette = Palette::new(["#ff0000", "#0000ff"]).unwrap();
        let rect = bar_rect(3, 40.0, Size::new(640.0, 100.0));
        let corners = ctx.gradient_corners(rect, &bar_gradient(&rect, &palette));

        let red = srgba(1.0, 0.0, 0.0, 1.0);
        let blue = srgba(0.0, 0.0, 1.0, 1.0);
        // clockwise from top-left: top corners blue, bottom corners red
        assert!(close(corners[0].1, blue));
        assert!(close(corners[1].1, blue));
        assert!(close(corners[2].1, red));
        assert!(close(corners[3].1, red));
        assert_eq!(corners[3].0, pt2(rect.x - 320.0, -50.0));
    }

    #[test]
    fn global_alpha_fades_gradient_corners() {
        let mut ctx = context(640, 100);
        ctx.set_global_alpha(0.6);
        let rect = bar_rect(0, 5.0, Size::new(640.0, 100.0));
        let corners = ctx.gradient_corners(rect, &bar_gradient(&rect, &Palette::default()));
        assert!(corners.iter().all(|(_, c)| (c.alpha - 0.6).abs() < 1e-4));
    }
}
