use anyhow::Result;

use crate::detect::result::{LabelMap, RawDetections};

/// Detector backend trait.
///
/// The actual model (YOLO or otherwise) is an external collaborator; this
/// trait is the seam it plugs into. Implementations return raw parallel
/// arrays; normalization happens in [`crate::detect::normalize`].
pub trait DetectorBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// The backend's class vocabulary, index to label.
    fn labels(&self) -> LabelMap;

    /// Run detection on one frame of packed RGB pixels.
    fn detect(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<RawDetections>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
