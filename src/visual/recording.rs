use super::canvas::{Canvas, Context2d, Paint, Point, Rect, Shadow, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    GlobalAlpha(f32),
    Shadow(Option<Shadow>),
    FillRect { rect: Rect, paint: Paint },
    FillCircle { center: Point, radius: f32, color: String },
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    pub ops: Vec<DrawOp>,
}

impl Context2d for RecordingContext {
    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.ops.push(DrawOp::Shadow(shadow));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }
}

/// Headless canvas that records draw calls instead of rasterizing them.
#[derive(Debug)]
pub struct RecordingCanvas {
    pub display: Option<Size>,
    pub buffer: (u32, u32),
    pub context_available: bool,
    pub ctx: RecordingContext,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            display: Some(Size::new(width, height)),
            buffer: (300, 150),
            context_available: true,
            ctx: RecordingContext::default(),
        }
    }

    pub fn without_context(width: f32, height: f32) -> Self {
        Self {
            context_available: false,
            ..Self::new(width, height)
        }
    }

    pub fn set_display(&mut self, width: f32, height: f32) {
        self.display = Some(Size::new(width, height));
    }

    pub fn detach(&mut self) {
        self.display = None;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ctx.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ctx.ops)
    }

    pub fn circles(&self) -> Vec<(Point, f32, &str)> {
        self.ctx
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillCircle { center, radius, color } => {
                    Some((*center, *radius, color.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Rects filled with a gradient, i.e. the bars.
    pub fn gradient_rects(&self) -> Vec<(Rect, &Paint)> {
        self.ctx
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect {
                    rect,
                    paint: paint @ Paint::Gradient(_),
                } => Some((*rect, paint)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn display_size(&self) -> Option<Size> {
        self.display
    }

    fn set_buffer_size(&mut self, width: u32, height: u32) {
        self.buffer = (width, height);
    }

    fn buffer_size(&self) -> (u32, u32) {
        self.buffer
    }

    fn context(&mut self) -> Option<&mut dyn Context2d> {
        if self.context_available {
            Some(&mut self.ctx)
        } else {
            None
        }
    }
}
