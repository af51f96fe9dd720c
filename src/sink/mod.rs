//! Rendering sinks: consumers of built frames.

pub(crate) mod raster;
pub(crate) mod recording;
pub(crate) mod svg;

use crate::frame::builder::Frame;

/// Drawing surface a [`PlaybackController`](crate::PlaybackController) presents frames to.
///
/// `present` receives every frame in transition order. Each frame fully replaces the previous
/// one; sinks never diff across frames.
pub trait RenderSink: Send {
    fn present(&mut self, frame: &Frame);
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn present(&mut self, frame: &Frame) {
        (**self).present(frame);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn present(&mut self, frame: &Frame) {
        (**self).present(frame);
    }
}
