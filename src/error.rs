use thiserror::Error;

/// Failures surfaced at the action boundary of the application.
///
/// Dialog cancellation is not an error; actions receive `None` for a
/// cancelled pick and decide for themselves whether that is silent.
#[derive(Debug, Error)]
pub enum DnnError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read class names file: {0}")]
    ClassNames(#[from] std::io::Error),

    #[error("model loading error: {0}")]
    ModelLoad(String),

    #[error("object detection error: {0}")]
    Inference(String),

    #[error("an image and a model must both be loaded first")]
    MissingPrerequisites,
}
