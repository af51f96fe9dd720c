use std::time::Duration;

use crate::frame::builder::{Frame, FrameBuilder};
use crate::model::response::AlgorithmResponse;
use crate::sink::RenderSink;

/// Playback state. "Done" is `Paused` at the last index, not a separate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlaybackState {
    /// At index 0, never started.
    #[default]
    Idle,
    /// Auto-advance timer running.
    Playing,
    /// Timer inactive; the index holds its position.
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackOpts {
    /// Auto-advance period.
    pub interval_ms: u64,
    /// Restart the auto-advance period when the user steps while playing.
    pub restart_timer_on_step: bool,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            restart_timer_on_step: false,
        }
    }
}

impl PlaybackOpts {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Recurring auto-advance timer, driven by the host clock through
/// [`PlaybackController::advance`].
#[derive(Clone, Copy, Debug)]
struct AutoAdvance {
    interval: Duration,
    remaining: Duration,
}

impl AutoAdvance {
    fn start(interval: Duration) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    fn restart(&mut self) {
        self.remaining = self.interval;
    }
}

/// Step navigation and timer-driven auto-advance over one immutable response.
///
/// The controller owns the index, the state and the only auto-advance timer. Every transition
/// rebuilds the frame for the current index and presents it to the sink. Time does not pass on
/// its own: the host calls [`advance`](Self::advance) with elapsed time, serialized with the
/// navigation calls, so a cancelled timer can never fire again.
pub struct PlaybackController<'a, S: RenderSink> {
    response: &'a AlgorithmResponse,
    builder: FrameBuilder,
    sink: S,
    opts: PlaybackOpts,
    index: usize,
    state: PlaybackState,
    timer: Option<AutoAdvance>,
    frame: Frame,
}

impl<'a, S: RenderSink> PlaybackController<'a, S> {
    /// Start `Idle` at index 0 and present the initial frame.
    pub fn new(response: &'a AlgorithmResponse, builder: FrameBuilder, mut sink: S) -> Self {
        let opts = builder.config().playback;
        let frame = builder.build(response, 0);
        sink.present(&frame);
        Self {
            response,
            builder,
            sink,
            opts,
            index: 0,
            state: PlaybackState::Idle,
            timer: None,
            frame,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn has_active_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn can_step_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.response
            .last_index()
            .is_some_and(|last| self.index < last)
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frame
    }

    pub fn response(&self) -> &AlgorithmResponse {
        self.response
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Time left until the next auto-advance tick, if the timer runs.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.timer.map(|t| t.remaining)
    }

    /// Start auto-advance. At the last index this resolves to `Paused` without advancing; on an
    /// empty trace it does nothing.
    pub fn play(&mut self) {
        let Some(last) = self.response.last_index() else {
            tracing::debug!("play ignored: empty trace");
            return;
        };
        self.cancel_timer();
        if self.index >= last {
            self.transition(PlaybackState::Paused, "play at last step");
            return;
        }
        self.timer = Some(AutoAdvance::start(self.opts.interval()));
        self.transition(PlaybackState::Playing, "play");
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_timer();
        self.transition(PlaybackState::Paused, "pause");
    }

    /// Play/pause button.
    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance one step. Leaves Playing/Paused unchanged.
    pub fn step_forward(&mut self) {
        if !self.can_step_forward() {
            return;
        }
        self.index += 1;
        self.after_step("step forward");
    }

    pub fn step_back(&mut self) {
        if !self.can_step_back() {
            return;
        }
        self.index -= 1;
        self.after_step("step back");
    }

    /// Back to index 0, `Paused`, timer cancelled.
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.index = 0;
        self.transition(PlaybackState::Paused, "reset");
    }

    /// Auto-advance to the end. Same as [`play`](Self::play), except that it does nothing when
    /// already at the last index.
    pub fn show_solution(&mut self) {
        if self.can_step_forward() {
            self.play();
        }
    }

    /// Let `elapsed` pass on the auto-advance clock. Returns the number of ticks that fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut budget = elapsed;
        let mut fired = 0;
        while let Some(timer) = self.timer.as_mut() {
            if budget < timer.remaining {
                timer.remaining -= budget;
                break;
            }
            budget -= timer.remaining;
            timer.restart();
            fired += 1;
            self.tick();
        }
        fired
    }

    fn tick(&mut self) {
        let Some(last) = self.response.last_index() else {
            self.cancel_timer();
            return;
        };
        if self.index < last {
            self.index += 1;
        }
        tracing::trace!(index = self.index, "auto-advance tick");
        if self.index >= last {
            self.cancel_timer();
            self.transition(PlaybackState::Paused, "reached last step");
        } else {
            self.present();
        }
    }

    fn after_step(&mut self, reason: &'static str) {
        if self.opts.restart_timer_on_step
            && let Some(timer) = self.timer.as_mut()
        {
            timer.restart();
        }
        let state = match self.state {
            PlaybackState::Idle => PlaybackState::Paused,
            other => other,
        };
        self.transition(state, reason);
    }

    fn transition(&mut self, state: PlaybackState, reason: &'static str) {
        tracing::debug!(from = ?self.state, to = ?state, index = self.index, reason, "playback transition");
        self.state = state;
        self.present();
    }

    fn present(&mut self) {
        self.frame = self.builder.build(self.response, self.index);
        self.sink.present(&self.frame);
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }
}

impl<S: RenderSink> Drop for PlaybackController<'_, S> {
    fn drop(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!(index = self.index, "auto-advance timer cancelled on teardown");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
