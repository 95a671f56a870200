use eyre::Result;
use log::{debug, info};
use reqwest::multipart::{Form, Part};

use crate::models::job::{JobListing, MatchResponse, SearchFilters};

/// The three calls the matching backend exposes. Flows depend on this trait
/// rather than on the HTTP client so tests can drive them with canned data.
#[allow(async_fn_in_trait)]
pub trait JobSource {
    /// `POST {base}/match` with the resume file and the filter fields.
    async fn submit_resume(&self, filters: &SearchFilters) -> Result<Vec<JobListing>>;
    /// `GET {base}/match/more` for additional cached candidates.
    async fn fetch_more(&self) -> Result<Vec<JobListing>>;
    /// `GET {base}/jobs/random` for a general listing.
    async fn fetch_random(&self) -> Result<Vec<JobListing>>;
}

/// Stateless request/response wrapper around the backend. No retries, no
/// batching; every failure propagates to the caller.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        ApiClient {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get_results(&self, path: &str) -> Result<Vec<JobListing>> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        let body: MatchResponse = response.json().await?;
        debug!("{} returned {} listings", path, body.results.len());
        Ok(body.results)
    }
}

impl JobSource for ApiClient {
    async fn submit_resume(&self, filters: &SearchFilters) -> Result<Vec<JobListing>> {
        info!("submitting resume for matching: {}", filters.resume.display());

        let bytes = tokio::fs::read(&filters.resume).await?;
        let file_name = filters
            .resume
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("resume")
            .to_string();

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("title", filters.title.clone())
            .text("location", filters.location.clone())
            .text("experience", filters.experience.as_str());

        let response = self
            .client
            .post(format!("{}/match", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let body: MatchResponse = response.json().await?;
        info!("match returned {} listings", body.results.len());
        Ok(body.results)
    }

    async fn fetch_more(&self) -> Result<Vec<JobListing>> {
        self.get_results("/match/more").await
    }

    async fn fetch_random(&self) -> Result<Vec<JobListing>> {
        self.get_results("/jobs/random").await
    }
}
