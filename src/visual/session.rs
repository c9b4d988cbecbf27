use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::bars::{self, BAR_COUNT};
use super::canvas::{Canvas, Context2d, Paint, Rect, Shadow, Size};
use super::palette::Palette;
use super::particle::{self, Particle};
use super::scheduler::{FrameHandle, FrameScheduler, ListenerId};
use crate::error::VisualError;

/// Translucent near-black painted over the last frame, leaves motion trails.
pub const TRAIL_OVERLAY: &str = "rgba(2, 6, 23, 0.1)";
pub const PARTICLE_ALPHA: f32 = 0.6;
pub const GLOW_BLUR: f32 = 15.0;

/// One run of the animation loop. Owns its particles, its pending frame and
/// its resize listener; dropping it cancels both.
pub struct Session {
    scheduler: FrameScheduler,
    palette: Palette,
    particles: Vec<Particle>,
    size: Size,
    rng: StdRng,
    pending: Option<FrameHandle>,
    listener: Option<ListenerId>,
}

impl Session {
    pub fn start(
        canvas: &mut dyn Canvas,
        palette: Palette,
        scheduler: FrameScheduler,
        mut rng: StdRng,
    ) -> Result<Self, VisualError> {
        if canvas.context().is_none() {
            return Err(VisualError::NoContext);
        }
        let display = canvas.display_size().ok_or(VisualError::Detached)?;
        let size = sync_buffer(canvas, display);

        let particles = particle::spawn(&mut rng, size, &palette);
        let listener = scheduler.add_resize_listener();
        let pending = scheduler.request_frame();
        debug!(
            width = size.width,
            height = size.height,
            colors = palette.len(),
            "visualizer session started"
        );

        Ok(Self {
            scheduler,
            palette,
            particles,
            size,
            rng,
            pending: Some(pending),
            listener: Some(listener),
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the frame behind `handle` if it is the one this session is
    /// waiting on, then schedules the next one. Returns whether it ran.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        is_playing: bool,
        canvas: &mut dyn Canvas,
    ) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        match canvas.context() {
            Some(ctx) => self.paint(is_playing, ctx),
            None => debug!("canvas context lost, skipping frame"),
        }
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// One frame step: fade, particles, bars.
    pub fn paint(&mut self, is_playing: bool, ctx: &mut dyn Context2d) {
        let Size { width, height } = self.size;

        ctx.set_global_alpha(1.0);
        ctx.set_shadow(None);
        ctx.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            &Paint::Solid(TRAIL_OVERLAY.to_string()),
        );

        // shadow and alpha stay set for the bars below
        ctx.set_global_alpha(PARTICLE_ALPHA);
        for p in &mut self.particles {
            if is_playing {
                p.advance(self.size);
            }
            ctx.set_shadow(Some(Shadow {
                blur: GLOW_BLUR,
                color: p.color.clone(),
            }));
            ctx.fill_circle(p.pos, p.radius, &p.color);
        }

        for i in 0..BAR_COUNT {
            let h = bars::bar_height(&mut self.rng, is_playing);
            let rect = bars::bar_rect(i, h, self.size);
            let gradient = bars::bar_gradient(&rect, &self.palette);
            ctx.fill_rect(rect, &Paint::Gradient(gradient));
        }
    }

    /// Re-reads the element's box. Particles keep their coordinates.
    pub fn resize(&mut self, canvas: &mut dyn Canvas) {
        match canvas.display_size() {
            Some(display) => {
                self.size = sync_buffer(canvas, display);
                debug!(width = self.size.width, height = self.size.height, "visualizer resized");
            }
            None => warn!("resize on a detached canvas ignored"),
        }
    }

    /// Cancels the pending frame and drops the resize listener. Safe to call
    /// any number of times.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(id) = self.listener.take() {
            self.scheduler.remove_resize_listener(id);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel();
    }
}

// buffer follows the on-screen box, never its own previous size
fn sync_buffer(canvas: &mut dyn Canvas, display: Size) -> Size {
    let w = display.width.max(0.0).round() as u32;
    let h = display.height.max(0.0).round() as u32;
    canvas.set_buffer_size(w, h);
    Size::new(w as f32, h as f32)
}
