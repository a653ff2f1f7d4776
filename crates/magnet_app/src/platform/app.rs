use std::collections::VecDeque;
use std::time::Instant;

use magnet_core::{update, Msg, PopupState, PopupViewModel, StatusKind};

use super::effects::EffectRunner;

/// Drives the popup state machine: every message goes through `update`,
/// and resulting effects are handed to the runner.
pub struct PopupSession {
    state: PopupState,
    runner: EffectRunner,
    last_tick: Instant,
}

impl PopupSession {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: PopupState::new(),
            runner,
            last_tick: Instant::now(),
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            self.advance_clock();
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
    }

    /// Waits until every engine request issued so far has been answered.
    pub fn settle(&mut self) {
        while let Some(msg) = self.runner.next_msg() {
            self.dispatch(msg);
        }
    }

    pub fn view(&self) -> PopupViewModel {
        self.state.view()
    }

    /// True when the last status line is an error.
    pub fn ended_in_error(&self) -> bool {
        self.state
            .view()
            .status
            .is_some_and(|status| status.kind == StatusKind::Error)
    }

    fn advance_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        let state = std::mem::take(&mut self.state);
        let (state, _effects) = update(state, Msg::Tick { elapsed });
        self.state = state;
    }
}
