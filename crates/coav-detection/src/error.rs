/// Errors returned when a detector is configured with unusable parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("angle step must be a finite positive angle in radians (got {0})")]
    InvalidAngleStep(f64),
    #[error("proximity threshold must be finite and positive (got {0})")]
    InvalidThreshold(f64),
    #[error("density must lie in [0, 1] (got {0})")]
    InvalidDensity(f64),
    #[error("front window must be a fraction in (0, 1] of the image width (got {0})")]
    InvalidFrontWindow(f64),
    #[error("at least one near sample is required to flag an obstacle")]
    ZeroMinHits,
}
