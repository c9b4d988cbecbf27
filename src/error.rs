use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisualError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("canvas element is detached")]
    Detached,
}
