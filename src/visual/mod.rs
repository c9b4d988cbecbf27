pub mod bars;
pub mod canvas;
pub mod color;
pub mod nannou_canvas;
pub mod palette;
pub mod particle;
pub mod recording;
pub mod scheduler;
pub mod session;
pub mod visualizer;

pub use canvas::{Canvas, Context2d, Paint, Size};
pub use nannou_canvas::NannouCanvas;
pub use palette::Palette;
pub use recording::RecordingCanvas;
pub use scheduler::FrameScheduler;
pub use session::Session;
pub use visualizer::{Visualizer, VisualizerProps};
