use super::*;
use crate::config::VizConfig;
use crate::sink::recording::RecordingSink;

fn response(steps: usize) -> AlgorithmResponse {
    let steps: Vec<String> = (0..steps)
        .map(|i| format!(r#"{{"title": "s{i}", "data": [{i}, 1]}}"#))
        .collect();
    AlgorithmResponse::from_json_str(&format!(
        r#"{{"title": "t", "steps": [{}]}}"#,
        steps.join(",")
    ))
    .unwrap()
}

fn controller(r: &AlgorithmResponse, opts: PlaybackOpts) -> PlaybackController<'_, RecordingSink> {
    let cfg = VizConfig {
        playback: opts,
        ..VizConfig::default()
    };
    PlaybackController::new(r, FrameBuilder::new(cfg), RecordingSink::new())
}

const TICK: Duration = Duration::from_millis(2000);

#[test]
fn starts_idle_and_presents_first_frame() {
    let r = response(3);
    let c = controller(&r, PlaybackOpts::default());
    assert_eq!(c.state(), PlaybackState::Idle);
    assert_eq!(c.index(), 0);
    assert_eq!(c.sink().indices(), vec![0]);
    assert!(!c.can_step_back());
    assert!(c.can_step_forward());
}

#[test]
fn ticks_advance_and_stop_at_the_end() {
    let r = response(3);
    let mut c = controller(&r, PlaybackOpts::default());
    c.play();
    assert!(c.is_playing());
    assert_eq!(c.advance(Duration::from_millis(1999)), 0);
    assert_eq!(c.index(), 0);
    assert_eq!(c.time_until_tick(), Some(Duration::from_millis(1)));
    assert_eq!(c.advance(Duration::from_millis(1)), 1);
    assert_eq!(c.index(), 1);
    assert_eq!(c.advance(TICK * 5), 1);
    assert_eq!(c.index(), 2);
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(!c.has_active_timer());
    assert_eq!(c.sink().indices(), vec![0, 0, 1, 2]);
}

#[test]
fn pause_cancels_pending_tick() {
    let r = response(3);
    let mut c = controller(&r, PlaybackOpts::default());
    c.play();
    c.advance(Duration::from_millis(1500));
    c.pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.advance(TICK * 3), 0);
    assert_eq!(c.index(), 0);
}

#[test]
fn pause_when_not_playing_is_a_no_op() {
    let r = response(2);
    let mut c = controller(&r, PlaybackOpts::default());
    c.pause();
    assert_eq!(c.state(), PlaybackState::Idle);
    assert_eq!(c.sink().frames().len(), 1);
}

#[test]
fn replaying_restarts_the_single_timer() {
    let r = response(4);
    let mut c = controller(&r, PlaybackOpts::default());
    c.play();
    c.advance(Duration::from_millis(1500));
    c.play();
    assert_eq!(c.time_until_tick(), Some(TICK));
    assert_eq!(c.advance(TICK), 1);
    assert_eq!(c.index(), 1);
}

#[test]
fn stepping_keeps_state_and_timer_phase_by_default() {
    let r = response(4);
    let mut c = controller(&r, PlaybackOpts::default());
    c.play();
    c.advance(Duration::from_millis(500));
    c.step_forward();
    assert!(c.is_playing());
    assert_eq!(c.index(), 1);
    assert_eq!(c.time_until_tick(), Some(Duration::from_millis(1500)));
}

#[test]
fn stepping_can_restart_the_timer() {
    let r = response(4);
    let opts = PlaybackOpts {
        restart_timer_on_step: true,
        ..PlaybackOpts::default()
    };
    let mut c = controller(&r, opts);
    c.play();
    c.advance(Duration::from_millis(500));
    c.step_forward();
    assert_eq!(c.time_until_tick(), Some(TICK));
}

#[test]
fn stepping_from_idle_pauses() {
    let r = response(3);
    let mut c = controller(&r, PlaybackOpts::default());
    c.step_forward();
    assert_eq!(c.state(), PlaybackState::Paused);
    c.step_back();
    assert_eq!(c.index(), 0);
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn toggle_flips_between_playing_and_paused() {
    let r = response(3);
    let mut c = controller(&r, PlaybackOpts::default());
    c.toggle_play();
    assert!(c.is_playing());
    c.toggle_play();
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn show_solution_runs_to_the_end() {
    let r = response(3);
    let mut c = controller(&r, PlaybackOpts::default());
    c.show_solution();
    assert!(c.is_playing());
    c.advance(TICK * 10);
    assert_eq!(c.index(), 2);
    assert_eq!(c.state(), PlaybackState::Paused);

    let frames = c.sink().frames().len();
    c.show_solution();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.sink().frames().len(), frames);
}

#[test]
fn single_step_trace_resolves_play_to_paused() {
    let r = response(1);
    let mut c = controller(&r, PlaybackOpts::default());
    c.play();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert!(!c.has_active_timer());
    assert_eq!(c.index(), 0);
}

#[test]
fn empty_trace_has_nothing_to_play() {
    let r = response(0);
    let mut c = controller(&r, PlaybackOpts::default());
    c.play();
    c.step_forward();
    assert_eq!(c.state(), PlaybackState::Idle);
    assert!(!c.can_step_forward());
    assert_eq!(c.sink().frames().len(), 1);
}

#[test]
fn interval_is_at_least_one_millisecond() {
    let opts = PlaybackOpts {
        interval_ms: 0,
        ..PlaybackOpts::default()
    };
    assert_eq!(opts.interval(), Duration::from_millis(1));
}
