use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use magnet_core::{Effect, Msg};
use magnet_engine::{EngineEvent, EngineHandle, PageTarget, SettingsStore};

/// Executes effects from `update`: settings reads happen inline, everything
/// else goes to the engine and comes back later as an `EngineEvent`.
pub struct EffectRunner {
    engine: EngineHandle,
    page: PageTarget,
    store: Arc<dyn SettingsStore>,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, page: PageTarget, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            engine,
            page,
            store,
            in_flight: 0,
        }
    }

    /// Runs `effects`; returns messages that are available immediately.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadSettings => match self.store.load() {
                    Ok(settings) => immediate.push(Msg::SettingsLoaded(settings)),
                    Err(err) => {
                        engine_warn!("Could not load settings: {}", err);
                        immediate.push(Msg::SettingsLoaded(Default::default()));
                    }
                },
                Effect::ScanActivePage => {
                    engine_info!("Scanning {}", self.page.describe());
                    self.engine.scan(self.page.clone());
                    self.in_flight += 1;
                }
                Effect::SubmitLinks { urls, category } => {
                    engine_info!(
                        "Submitting {} link(s), category={:?}",
                        urls.len(),
                        category
                    );
                    self.engine.submit(urls, category);
                    self.in_flight += 1;
                }
                Effect::SaveSettings(settings) => {
                    self.engine.save_settings(settings);
                    self.in_flight += 1;
                }
                Effect::TestConnection => {
                    self.engine.test_connection();
                    self.in_flight += 1;
                }
            }
        }
        immediate
    }

    /// Blocks for the next engine result; `None` when nothing is pending.
    pub fn next_msg(&mut self) -> Option<Msg> {
        while self.in_flight > 0 {
            let event = self.engine.recv()?;
            self.in_flight -= 1;
            if let Some(msg) = event_to_msg(event) {
                return Some(msg);
            }
        }
        None
    }
}

pub fn event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::ScanCompleted(Ok(links)) => Some(Msg::ScanFinished(links)),
        EngineEvent::ScanCompleted(Err(err)) => {
            engine_warn!("Scan unavailable: {}", err);
            Some(Msg::ScanUnavailable {
                reason: err.to_string(),
            })
        }
        EngineEvent::SubmitCompleted(Ok(report)) => Some(Msg::SubmitFinished(report)),
        EngineEvent::SubmitCompleted(Err(message)) => Some(Msg::SubmitFailed(message)),
        EngineEvent::ConnectionTested(result) => Some(Msg::ConnectionTested(result)),
        EngineEvent::SettingsSaved(Ok(())) => Some(Msg::SettingsSaved),
        EngineEvent::SettingsSaved(Err(message)) => Some(Msg::SettingsSaveFailed(message)),
        // Badge counts belong to the badge flow, not the popup.
        EngineEvent::LinksCounted { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnet_engine::ScanUnavailable;

    #[test]
    fn unavailable_scan_becomes_informational_msg() {
        let msg = event_to_msg(EngineEvent::ScanCompleted(Err(
            ScanUnavailable::RestrictedOrigin("about:blank".to_string()),
        )));
        assert_eq!(
            msg,
            Some(Msg::ScanUnavailable {
                reason: "restricted origin about:blank".to_string()
            })
        );
    }

    #[test]
    fn badge_counts_are_not_popup_messages() {
        assert_eq!(event_to_msg(EngineEvent::LinksCounted { count: 3 }), None);
    }
}
