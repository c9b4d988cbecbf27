use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::canvas::Canvas;
use super::palette::Palette;
use super::scheduler::{FrameHandle, FrameScheduler, ListenerId};
use super::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerProps {
    pub is_playing: bool,
    pub palette: Palette,
}

impl Default for VisualizerProps {
    fn default() -> Self {
        Self {
            is_playing: false,
            palette: Palette::default(),
        }
    }
}

/// Particle field plus bars, driven by a playing flag and a palette.
///
/// At most one [`Session`] is alive at a time. A new session (new particles,
/// new random seed) is built on mount and whenever the palette changes by
/// value. The playing flag is read on every frame and never restarts the
/// session, so pausing freezes particles where they are.
pub struct Visualizer {
    scheduler: FrameScheduler,
    props: VisualizerProps,
    session: Option<Session>,
    rng: StdRng,
    mounted: bool,
}

impl Visualizer {
    pub fn new(scheduler: FrameScheduler, props: VisualizerProps) -> Self {
        Self {
            scheduler,
            props,
            session: None,
            rng: StdRng::from_entropy(),
            mounted: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn props(&self) -> &VisualizerProps {
        &self.props
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, canvas: &mut dyn Canvas) {
        self.mounted = true;
        self.restart(canvas);
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.teardown();
    }

    /// Applies new props. Rebuilds the session only if the palette differs.
    pub fn update(&mut self, props: VisualizerProps, canvas: &mut dyn Canvas) {
        let palette_changed = props.palette != self.props.palette;
        self.props = props;
        if palette_changed && self.mounted {
            info!(colors = ?self.props.palette.colors(), "palette changed, rebuilding visualizer");
            self.restart(canvas);
        }
    }

    pub fn set_playing(&mut self, is_playing: bool) {
        self.props.is_playing = is_playing;
    }

    /// Returns whether a frame was painted for `handle`.
    pub fn on_frame(&mut self, handle: FrameHandle, canvas: &mut dyn Canvas) -> bool {
        let is_playing = self.props.is_playing;
        match self.session.as_mut() {
            Some(session) => session.on_frame(handle, is_playing, canvas),
            None => false,
        }
    }

    /// Runs every frame due on the scheduler. Returns how many painted.
    pub fn run_due_frames(&mut self, canvas: &mut dyn Canvas) -> usize {
        let mut painted = 0;
        for handle in self.scheduler.take_due() {
            if self.on_frame(handle, canvas) {
                painted += 1;
            }
        }
        painted
    }

    pub fn dispatch_resize(&mut self, listener: ListenerId, canvas: &mut dyn Canvas) {
        if let Some(session) = self.session.as_mut() {
            if session.listener() == Some(listener) {
                session.resize(canvas);
            }
        }
    }

    fn restart(&mut self, canvas: &mut dyn Canvas) {
        self.teardown();
        let rng = StdRng::seed_from_u64(self.rng.next_u64());
        match Session::start(canvas, self.props.palette.clone(), self.scheduler.clone(), rng) {
            Ok(session) => self.session = Some(session),
            Err(e) => debug!("visualizer idle: {e}"),
        }
    }

    fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.teardown();
    }
}
