pub mod mood;

pub use mood::TrackAnalysis;
