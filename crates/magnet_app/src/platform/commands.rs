use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use engine_logging::{engine_debug, mask_secret};
use magnet_core::{badge_text, ConnectionSettings, Msg, BADGE_COLOR};
use magnet_engine::{EngineConfig, EngineEvent, EngineHandle, PageTarget, SettingsStore};

use crate::cli::{Cli, CliCommand, SettingsAction};

use super::app::PopupSession;
use super::effects::EffectRunner;
use super::persistence::RonSettingsStore;
use super::ui::render::render;

const BADGE_TIMEOUT: Duration = Duration::from_secs(60);

pub fn run(cli: Cli) -> Result<ExitCode> {
    let store = Arc::new(RonSettingsStore::new(cli.settings.clone()));
    engine_debug!("Settings file {:?}", store.path());

    match cli.command {
        CliCommand::Scan { page, filter } => {
            let mut session = open_popup(store, &page)?;
            if let Some(filter) = filter {
                session.dispatch(Msg::FilterChanged(filter));
            }
            print!("{}", render(&session.view()));
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Add {
            page,
            filter,
            select,
            all,
            category,
        } => {
            let mut session = open_popup(store, &page)?;
            if let Some(filter) = filter {
                session.dispatch(Msg::FilterChanged(filter));
            }
            for msg in selection_msgs(all, &select, session.view().rows.len())? {
                session.dispatch(msg);
            }
            session.dispatch(Msg::CategoryChanged(category));
            session.dispatch(Msg::SubmitClicked);
            session.settle();
            finish(&session)
        }
        CliCommand::Badge { page } => {
            let engine = start_engine(store)?;
            engine.count_links(PageTarget::from_arg(&page));
            match engine.recv_timeout(BADGE_TIMEOUT) {
                Some(EngineEvent::LinksCounted { count }) => {
                    println!("{}\t{BADGE_COLOR}", badge_text(count));
                    Ok(ExitCode::SUCCESS)
                }
                Some(other) => bail!("unexpected engine event: {other:?}"),
                None => bail!("timed out counting links on {page}"),
            }
        }
        CliCommand::Test => {
            let mut session = idle_session(store)?;
            session.dispatch(Msg::TestConnectionClicked);
            session.settle();
            finish(&session)
        }
        CliCommand::Settings { action } => match action {
            SettingsAction::Show => {
                let settings = store.load().context("reading settings")?;
                println!("file:     {}", store.path().display());
                println!("webuiUrl: {}", settings.webui_url);
                println!("username: {}", settings.username);
                println!("password: {}", mask_secret(&settings.password));
                Ok(ExitCode::SUCCESS)
            }
            SettingsAction::Set {
                url,
                username,
                password,
            } => {
                let current = store.load().context("reading settings")?;
                let edited = ConnectionSettings::new(
                    url.unwrap_or(current.webui_url),
                    username.unwrap_or(current.username),
                    password.unwrap_or(current.password),
                );
                let mut session = idle_session(store)?;
                session.dispatch(Msg::SettingsEdited(edited));
                session.dispatch(Msg::SaveSettingsClicked);
                session.settle();
                finish(&session)
            }
        },
    }
}

fn start_engine(store: Arc<RonSettingsStore>) -> Result<EngineHandle> {
    let store: Arc<dyn SettingsStore> = store;
    EngineHandle::new(EngineConfig::with_store(store)).context("starting engine")
}

/// Session for a page: settings loaded and the first scan finished.
fn open_popup(store: Arc<RonSettingsStore>, page: &str) -> Result<PopupSession> {
    let target = PageTarget::from_arg(page);
    let runner = EffectRunner::new(start_engine(store.clone())?, target, store);
    let mut session = PopupSession::new(runner);
    session.dispatch(Msg::PopupOpened);
    session.settle();
    Ok(session)
}

/// Session with settings loaded but no page to scan.
fn idle_session(store: Arc<RonSettingsStore>) -> Result<PopupSession> {
    let target = PageTarget::Html(String::new());
    let runner = EffectRunner::new(start_engine(store.clone())?, target, store.clone());
    let mut session = PopupSession::new(runner);
    let settings = store.load().context("reading settings")?;
    session.dispatch(Msg::SettingsLoaded(settings));
    Ok(session)
}

/// Messages that select `--all` visible rows and then the 1-based `rows`.
/// Rows are selected, never toggled.
fn selection_msgs(all: bool, rows: &[usize], row_count: usize) -> Result<Vec<Msg>> {
    let mut msgs = Vec::new();
    if all {
        msgs.push(Msg::SelectAllVisible(true));
    }
    for &row in rows {
        if row == 0 || row > row_count {
            bail!("row {row} is out of range (1..={row_count})");
        }
        msgs.push(Msg::LinkSelected {
            index: row - 1,
            selected: true,
        });
    }
    Ok(msgs)
}

fn finish(session: &PopupSession) -> Result<ExitCode> {
    print!("{}", render(&session.view()));
    if session.ended_in_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
