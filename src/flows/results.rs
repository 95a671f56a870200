use eyre::Result;
use log::{info, warn};

use crate::api::client::JobSource;
use crate::models::job::JobListing;

/// Listing carried from the search view, grown in place by "load more" and
/// owning the detail-overlay selection. Never persisted; it dies with the
/// view that holds it.
///
/// Invariant: `jobs` never contains two entries with the same
/// (title, company) pair.
#[derive(Debug, Default)]
pub struct ResultsSession {
    pub jobs: Vec<JobListing>,
    pub selected: Option<usize>,
    pub loading_more: bool,
    /// One-shot message carried over navigation, e.g. a failed submit.
    pub notice: Option<String>,
}

impl ResultsSession {
    pub fn new(jobs: Vec<JobListing>) -> Self {
        ResultsSession {
            jobs,
            selected: None,
            loading_more: false,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }

    /// Appends only candidates whose (title, company) pair is not already
    /// present. Existing entries are never reordered or removed; incoming
    /// ones keep their relative order. Returns how many were added.
    pub fn merge_unique(&mut self, incoming: Vec<JobListing>) -> usize {
        let before = self.jobs.len();
        for job in incoming {
            if !self.jobs.iter().any(|j| j.dedup_key() == job.dedup_key()) {
                self.jobs.push(job);
            }
        }
        self.jobs.len() - before
    }

    /// Fetches the backend's additional cached candidates and merges them
    /// in. On failure the current listing stays exactly as it was.
    pub async fn load_more<A: JobSource>(&mut self, api: &A) -> Result<usize> {
        self.loading_more = true;
        let fetched = api.fetch_more().await;
        self.loading_more = false;

        match fetched {
            Ok(more) => {
                let added = self.merge_unique(more);
                info!("load more appended {} new jobs", added);
                Ok(added)
            }
            Err(e) => {
                warn!("load more failed, keeping current listing: {}", e);
                Err(e)
            }
        }
    }

    /// Opens the detail overlay for one job. Only one may be open at a time.
    pub fn select(&mut self, index: usize) -> Option<&JobListing> {
        if index < self.jobs.len() {
            self.selected = Some(index);
        }
        self.jobs.get(index)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_job(&self) -> Option<&JobListing> {
        self.jobs.get(self.selected?)
    }
}
