//! Detector boundary and detection normalization.

mod backend;
mod backends;
mod normalize;
mod result;

pub use backend::DetectorBackend;
pub use backends::StubBackend;
pub use normalize::{normalize, MalformedDetection};
pub use result::{BoundingBox, Detection, LabelMap, RawDetections};
