#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    /// `status` is `None` when no HTTP response was received.
    Failure { status: Option<u16> },
}

impl SubmitOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmitOutcome::Success
        } else {
            SubmitOutcome::Failure {
                status: Some(status),
            }
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, SubmitOutcome::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub url: String,
    pub outcome: SubmitOutcome,
}

/// Result of one submission round, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionReport {
    pub outcomes: Vec<LinkOutcome>,
}

impl SubmissionReport {
    pub fn new(outcomes: Vec<LinkOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|item| item.outcome.is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome_for(&self, url: &str) -> Option<SubmitOutcome> {
        self.outcomes
            .iter()
            .find(|item| item.url == url)
            .map(|item| item.outcome)
    }

    pub fn status_message(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Successfully added {} torrent(s) to qBittorrent",
                self.outcomes.len()
            )
        } else {
            format!(
                "Added {}, failed {} torrent(s)",
                self.succeeded(),
                self.failed()
            )
        }
    }
}
