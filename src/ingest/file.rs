//! Local file frame source.
//!
//! Supplies frames sequentially from a local video file. Only local paths
//! are accepted; URL schemes are rejected. `stub://` paths select a
//! synthetic backend that produces a bounded number of frames for tests
//! and demos. Real container decoding is an external concern; wire a
//! decoder in by implementing another `FileBackend` variant.

use anyhow::{anyhow, Result};

/// One decoded video frame, packed RGB.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Zero-based position in the file, for progress and resume.
    pub index: u64,
}

/// Configuration for a local file source.
#[derive(Clone, Debug)]
pub struct FileConfig {
    /// Local file path, or `stub://<name>` for the synthetic backend.
    pub path: String,
    /// Target frame rate; the source may decimate to this rate.
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            target_fps: 10,
            width: 640,
            height: 480,
        }
    }
}

/// Statistics for a file source.
#[derive(Clone, Debug)]
pub struct FileStats {
    pub frames_read: u64,
    pub path: String,
}

pub struct FileSource {
    backend: FileBackend,
}

enum FileBackend {
    Synthetic(SyntheticFileSource),
}

impl FileSource {
    pub fn new(config: FileConfig) -> Result<Self> {
        if !is_local_file_path(&config.path) {
            return Err(anyhow!(
                "file ingestion only supports local paths (no URL schemes)"
            ));
        }
        if config.path.starts_with("stub://") {
            return Ok(Self {
                backend: FileBackend::Synthetic(SyntheticFileSource::new(config)),
            });
        }
        Err(anyhow!(
            "no video decoder built in; use a stub:// source or wire in a decoder backend"
        ))
    }

    pub fn connect(&mut self) -> Result<()> {
        match &mut self.backend {
            FileBackend::Synthetic(source) => source.connect(),
        }
    }

    /// Next frame in sequence; `None` when the file is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        match &mut self.backend {
            FileBackend::Synthetic(source) => source.next_frame(),
        }
    }

    /// Jump to a frame index, e.g. when resuming after a pause.
    pub fn seek(&mut self, frame_index: u64) -> Result<()> {
        match &mut self.backend {
            FileBackend::Synthetic(source) => source.seek(frame_index),
        }
    }

    /// Total frame count, when the backend knows it.
    pub fn total_frames(&self) -> Option<u64> {
        match &self.backend {
            FileBackend::Synthetic(source) => Some(source.total_frames),
        }
    }

    pub fn is_healthy(&self) -> bool {
        match &self.backend {
            FileBackend::Synthetic(_) => true,
        }
    }

    pub fn stats(&self) -> FileStats {
        match &self.backend {
            FileBackend::Synthetic(source) => source.stats(),
        }
    }
}

// ----------------------------------------------------------------------------
// Synthetic source (stub://) for tests
// ----------------------------------------------------------------------------

struct SyntheticFileSource {
    config: FileConfig,
    position: u64,
    frames_read: u64,
    total_frames: u64,
}

impl SyntheticFileSource {
    fn new(config: FileConfig) -> Self {
        // Ten seconds of synthetic footage at the configured rate.
        let total_frames = (config.target_fps as u64).max(1) * 10;
        Self {
            config,
            position: 0,
            frames_read: 0,
            total_frames,
        }
    }

    fn connect(&mut self) -> Result<()> {
        log::info!("FileSource: connected to {} (synthetic)", self.config.path);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        if self.position >= self.total_frames {
            return Ok(None);
        }
        let index = self.position;
        self.position += 1;
        self.frames_read += 1;

        let pixel_count = (self.config.width * self.config.height * 3) as usize;
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + index) % 256) as u8;
        }

        Ok(Some(VideoFrame {
            pixels,
            width: self.config.width,
            height: self.config.height,
            index,
        }))
    }

    fn seek(&mut self, frame_index: u64) -> Result<()> {
        if frame_index > self.total_frames {
            return Err(anyhow!(
                "seek past end: {} > {}",
                frame_index,
                self.total_frames
            ));
        }
        self.position = frame_index;
        Ok(())
    }

    fn stats(&self) -> FileStats {
        FileStats {
            frames_read: self.frames_read,
            path: self.config.path.clone(),
        }
    }
}

fn is_local_file_path(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }
    if path.starts_with("stub://") {
        return true;
    }
    !path.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FileConfig {
        FileConfig {
            path: "stub://walk".to_string(),
            target_fps: 5,
            width: 64,
            height: 48,
        }
    }

    #[test]
    fn synthetic_source_produces_then_ends() {
        let mut source = FileSource::new(config()).unwrap();
        source.connect().unwrap();

        let total = source.total_frames().unwrap();
        assert_eq!(total, 50);

        let mut count = 0;
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.width, 64);
            assert_eq!(frame.index, count);
            count += 1;
        }
        assert_eq!(count, total);
        assert_eq!(source.stats().frames_read, total);
    }

    #[test]
    fn seek_resumes_from_index() {
        let mut source = FileSource::new(config()).unwrap();
        source.seek(48).unwrap();
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.index, 48);
        assert!(source.seek(1000).is_err());
    }

    #[test]
    fn remote_urls_rejected() {
        let mut cfg = config();
        cfg.path = "rtsp://camera-1".to_string();
        assert!(FileSource::new(cfg).is_err());
    }
}
