use std::fmt::Write;

use magnet_core::{PopupViewModel, StatusKind, StatusView};

/// Renders the link list, a summary line, and the status line if any.
pub fn render(view: &PopupViewModel) -> String {
    let mut out = String::new();

    if let Some(message) = view.empty_message {
        let _ = writeln!(out, "{message}");
    }

    for row in view.visible_rows() {
        let check = if row.selected { 'x' } else { ' ' };
        let _ = write!(out, "{:>3}. [{}] {}", row.index + 1, check, row.name);
        if let Some(mark) = row.outcome_mark() {
            let _ = write!(out, "  {mark}");
        }
        out.push('\n');
    }

    if !view.rows.is_empty() {
        let hidden = view.rows.len() - view.visible_count;
        let _ = write!(
            out,
            "{} shown, {} selected",
            view.visible_count, view.selected_count
        );
        if hidden > 0 {
            let _ = write!(out, " ({hidden} hidden by filter {:?})", view.filter);
        }
        out.push('\n');
    }

    if let Some(status) = &view.status {
        let _ = writeln!(out, "{}", render_status(status));
    }
    out
}

pub fn render_status(status: &StatusView) -> String {
    let tag = match status.kind {
        StatusKind::Success => "ok",
        StatusKind::Error => "error",
        StatusKind::Info => "info",
    };
    format!("[{tag}] {}", status.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnet_core::{
        update, ConnectionSettings, LinkOutcome, MagnetLink, Msg, PopupState, SubmissionReport,
        SubmitOutcome,
    };
    use pretty_assertions::assert_eq;

    fn link(name: &str, c: char) -> MagnetLink {
        MagnetLink {
            url: format!("magnet:?xt=urn:btih:{}", c.to_string().repeat(40)),
            name: name.to_string(),
        }
    }

    fn run(msgs: Vec<Msg>) -> PopupState {
        msgs.into_iter()
            .fold(PopupState::new(), |state, msg| update(state, msg).0)
    }

    #[test]
    fn empty_page_renders_placeholder() {
        let state = run(vec![Msg::ScanRequested, Msg::ScanFinished(Vec::new())]);
        assert_eq!(render(&state.view()), "No magnet links found on this page.\n");
    }

    #[test]
    fn filtered_rows_are_hidden_and_counted() {
        let state = run(vec![
            Msg::ScanFinished(vec![link("Ubuntu ISO", 'a'), link("Debian ISO", 'b')]),
            Msg::FilterChanged("debian".to_string()),
            Msg::SelectAllVisible(true),
        ]);

        assert_eq!(
            render(&state.view()),
            "  2. [x] Debian ISO\n1 shown, 1 selected (1 hidden by filter \"debian\")\n"
        );
    }

    #[test]
    fn outcomes_and_status_are_rendered() {
        let a = link("One", 'a');
        let b = link("Two", 'b');
        let state = run(vec![
            Msg::SettingsLoaded(ConnectionSettings::new("http://nas:8080", "admin", "pw")),
            Msg::ScanFinished(vec![a.clone(), b.clone()]),
            Msg::SelectAllVisible(true),
            Msg::SubmitClicked,
            Msg::SubmitFinished(SubmissionReport::new(vec![
                LinkOutcome {
                    url: a.url,
                    outcome: SubmitOutcome::Success,
                },
                LinkOutcome {
                    url: b.url,
                    outcome: SubmitOutcome::Failure { status: Some(415) },
                },
            ])),
        ]);

        assert_eq!(
            render(&state.view()),
            "  1. [x] One  \u{2714}\n  2. [x] Two  \u{2718}\n2 shown, 2 selected\n[error] Added 1, failed 1 torrent(s)\n"
        );
    }
}
