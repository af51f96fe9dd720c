use crate::frame::builder::Frame;
use crate::sink::RenderSink;

/// In-memory sink keeping every presented frame.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<Frame>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presented frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Step indices of the presented frames, in order.
    pub fn indices(&self) -> Vec<usize> {
        self.frames.iter().map(|f| f.step_index).collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
