use std::path::{Path, PathBuf};

use ndarray::Array4;
use ort::{inputs, session::Session, value::Tensor};
use tracing::{debug, error};

use crate::error::DnnError;

/// Raw tensor read back from the network's first output: the reported shape
/// and the flattened element buffer. Interpretation is the caller's job.
#[derive(Debug, Clone)]
pub struct RawOutput {
    pub shape: Vec<i64>,
    pub data: Vec<f32>,
}

/// Opaque handle to a loaded inference graph.
///
/// Construction either fully succeeds or yields no handle at all; a graph
/// that reports no inputs or no outputs is rejected outright. Auxiliary text
/// configs (Caffe prototxt, TensorFlow pbtxt) have no input on the ONNX
/// runtime; the chosen path is kept for display only.
pub struct SsdNetwork {
    session: Session,
    model_path: PathBuf,
    config_path: Option<PathBuf>,
}

impl SsdNetwork {
    pub fn load(model_path: &Path, config_path: Option<&Path>) -> Result<Self, DnnError> {
        debug!(model = %model_path.display(), "loading detection model");

        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(model_path))
            .map_err(|e| {
                error!(model = %model_path.display(), error = %e, "session construction failed");
                DnnError::ModelLoad(e.to_string())
            })?;

        if session.inputs.is_empty() || session.outputs.is_empty() {
            return Err(DnnError::ModelLoad(
                "model graph has no inputs or outputs".to_string(),
            ));
        }

        debug!(
            inputs = session.inputs.len(),
            outputs = session.outputs.len(),
            "detection model ready"
        );

        Ok(Self {
            session,
            model_path: model_path.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Runs one forward pass over an NCHW input blob and returns the first
    /// output tensor verbatim.
    pub fn forward(&mut self, blob: Array4<f32>) -> Result<RawOutput, DnnError> {
        let dims = blob.shape().to_vec();
        let (elements, _offset) = blob.into_raw_vec_and_offset();
        let tensor = Tensor::from_array(([dims[0], dims[1], dims[2], dims[3]], elements))
            .map_err(|e| DnnError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(inputs![tensor])
            .map_err(|e| {
                error!(error = %e, "forward pass failed");
                DnnError::Inference(e.to_string())
            })?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| DnnError::Inference(e.to_string()))?;

        Ok(RawOutput {
            shape: shape.iter().copied().collect(),
            data: data.to_vec(),
        })
    }
}
