use eyre::Result;
use log::{error, info};

use crate::api::client::JobSource;
use crate::flows::results::ResultsSession;
use crate::models::job::SearchFilters;

/// Checks the form before anything touches the network: the resume file
/// first, then both text filters. Messages are shown to the user as-is.
pub fn validate(filters: &SearchFilters) -> Result<()> {
    if !filters.resume.is_file() {
        return Err(eyre::eyre!("Please upload your resume."));
    }
    if filters.title.trim().is_empty() || filters.location.trim().is_empty() {
        return Err(eyre::eyre!("Please enter job title and location."));
    }
    Ok(())
}

/// Search form submission. Validation failures abort; a backend failure is
/// logged and carried to the results view as a notice, with the listing
/// defaulting to empty so the user still lands somewhere useful.
pub struct SearchFlow<'a, A> {
    api: &'a A,
    pub loading: bool,
}

impl<'a, A: JobSource> SearchFlow<'a, A> {
    pub fn new(api: &'a A) -> Self {
        SearchFlow {
            api,
            loading: false,
        }
    }

    pub async fn submit(&mut self, filters: &SearchFilters) -> Result<ResultsSession> {
        validate(filters)?;

        self.loading = true;
        let fetched = self.api.submit_resume(filters).await;
        self.loading = false;

        let session = match fetched {
            Ok(results) => {
                info!("search produced {} matches", results.len());
                ResultsSession::new(results)
            }
            Err(e) => {
                error!("failed to match jobs: {}", e);
                ResultsSession::new(Vec::new())
                    .with_notice("Failed to match jobs. Please check backend.")
            }
        };

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::api::client::testing::{StubSource, job};
    use crate::models::job::ExperienceBucket;

    fn temp_resume(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jobmatch-{}-{}", std::process::id(), name));
        fs::write(&path, b"resume bytes").unwrap();
        path
    }

    fn filters(resume: PathBuf, title: &str, location: &str) -> SearchFilters {
        SearchFilters {
            resume,
            title: title.to_string(),
            location: location.to_string(),
            experience: ExperienceBucket::OneToThree,
        }
    }

    #[tokio::test]
    async fn missing_resume_aborts_before_any_call() {
        let api = StubSource::with(vec![job("A", "X")]);
        let mut flow = SearchFlow::new(&api);

        let missing = std::env::temp_dir().join("jobmatch-does-not-exist.pdf");
        let result = flow
            .submit(&filters(missing, "Data Scientist", "California"))
            .await;

        assert!(result.is_err());
        assert_eq!(api.calls(), 0);
        assert!(!flow.loading);
    }

    #[tokio::test]
    async fn blank_title_or_location_aborts_before_any_call() {
        let api = StubSource::with(vec![job("A", "X")]);
        let mut flow = SearchFlow::new(&api);
        let resume = temp_resume("blank-fields");

        let no_title = flow.submit(&filters(resume.clone(), "  ", "California")).await;
        let no_location = flow.submit(&filters(resume.clone(), "Data Scientist", "")).await;

        assert!(no_title.is_err());
        assert!(no_location.is_err());
        assert_eq!(api.calls(), 0);

        fs::remove_file(resume).unwrap();
    }

    #[tokio::test]
    async fn valid_submission_carries_results_to_session() {
        let api = StubSource::with(vec![job("A", "X")]);
        let mut flow = SearchFlow::new(&api);
        let resume = temp_resume("valid");

        let session = flow
            .submit(&filters(resume.clone(), "Data Scientist", "California"))
            .await
            .unwrap();

        assert_eq!(api.calls(), 1);
        assert_eq!(session.jobs.len(), 1);
        assert_eq!(session.jobs[0].dedup_key(), ("A", "X"));
        assert!(session.notice.is_none());

        fs::remove_file(resume).unwrap();
    }

    #[tokio::test]
    async fn backend_failure_yields_empty_session_with_notice() {
        let api = StubSource::failing();
        let mut flow = SearchFlow::new(&api);
        let resume = temp_resume("backend-down");

        let session = flow
            .submit(&filters(resume.clone(), "Data Scientist", "California"))
            .await
            .unwrap();

        assert!(session.jobs.is_empty());
        assert!(session.notice.is_some());
        assert!(!flow.loading);

        fs::remove_file(resume).unwrap();
    }
}
