use eyre::Result;
use log::{debug, info, warn};

use crate::api::client::JobSource;
use crate::models::job::JobListing;
use crate::storage::Storage;

/// Manual refreshes are suppressed for this long after the last one.
pub const REFRESH_COOLDOWN_MS: i64 = 60 * 1000;

pub const CACHE_KEY: &str = "job_feed_cache";
pub const LAST_REFRESH_KEY: &str = "job_feed_last_refresh";

/// Feed view state: the last fetched listing plus the refresh cooldown
/// bookkeeping. The listing survives restarts through the injected storage;
/// the cooldown is a pure function of the persisted timestamp, so callers
/// pass the current time in and no background timer is needed.
pub struct FeedFlow<'a, A, S> {
    api: &'a A,
    storage: &'a S,
    pub jobs: Vec<JobListing>,
    pub loading: bool,
    last_refresh: Option<i64>,
}

impl<'a, A: JobSource, S: Storage> FeedFlow<'a, A, S> {
    pub fn new(api: &'a A, storage: &'a S) -> Self {
        let last_refresh = load_last_refresh(storage);
        FeedFlow {
            api,
            storage,
            jobs: Vec::new(),
            loading: false,
            last_refresh,
        }
    }

    /// View-entry logic: a force-refresh signal always fetches; otherwise a
    /// non-empty cached listing is served without any network call, and only
    /// an empty or unreadable cache triggers a fetch.
    pub async fn enter(&mut self, force_refresh: bool, now_ms: i64) -> Result<()> {
        if force_refresh {
            return self.fetch_and_store_jobs(true, now_ms).await;
        }

        match load_cached_jobs(self.storage) {
            Some(cached) if !cached.is_empty() => {
                debug!("serving {} jobs from cache", cached.len());
                self.jobs = cached;
                Ok(())
            }
            _ => self.fetch_and_store_jobs(true, now_ms).await,
        }
    }

    /// Replaces the in-memory listing and the persisted cache with a fresh
    /// fetch, then stamps the refresh time. Without `force` the call is a
    /// no-op while the cooldown window is open. A failed fetch leaves the
    /// listing, the cache and the timestamp untouched.
    pub async fn fetch_and_store_jobs(&mut self, force: bool, now_ms: i64) -> Result<()> {
        if !force
            && let Some(last) = self.last_refresh
            && now_ms - last < REFRESH_COOLDOWN_MS
        {
            debug!(
                "refresh suppressed, cooldown has {}ms left",
                REFRESH_COOLDOWN_MS - (now_ms - last)
            );
            return Ok(());
        }

        self.loading = true;
        let fetched = self.api.fetch_random().await;
        self.loading = false;

        let jobs = match fetched {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("feed fetch failed, keeping previous listing: {}", e);
                return Err(e);
            }
        };

        // An empty result still replaces the cache.
        self.jobs = jobs;
        self.storage
            .set(CACHE_KEY, &serde_json::to_string(&self.jobs)?)?;
        self.last_refresh = Some(now_ms);
        self.storage.set(LAST_REFRESH_KEY, &now_ms.to_string())?;

        info!("feed refreshed with {} jobs", self.jobs.len());
        Ok(())
    }

    /// Refresh action from the user. Ignored while a fetch is in flight; the
    /// cooldown guard in `fetch_and_store_jobs` handles the rest.
    pub async fn manual_refresh(&mut self, now_ms: i64) -> Result<()> {
        if self.loading {
            return Ok(());
        }
        self.fetch_and_store_jobs(false, now_ms).await
    }

    /// Whole seconds left before a manual refresh is allowed again, clamped
    /// at zero. Zero when no refresh has happened yet.
    pub fn cooldown_remaining(&self, now_ms: i64) -> i64 {
        match self.last_refresh {
            Some(last) => {
                let remaining_ms = REFRESH_COOLDOWN_MS - (now_ms - last);
                ((remaining_ms + 999) / 1000).max(0)
            }
            None => 0,
        }
    }

    pub fn refresh_blocked(&self, now_ms: i64) -> bool {
        self.loading || self.cooldown_remaining(now_ms) > 0
    }

    /// Label for the manual refresh control.
    pub fn refresh_label(&self, now_ms: i64) -> String {
        if self.loading {
            return "Refreshing...".to_string();
        }
        match self.cooldown_remaining(now_ms) {
            0 => "Refresh Feed".to_string(),
            seconds => format!("Available in {}s", seconds),
        }
    }
}

fn load_last_refresh<S: Storage>(storage: &S) -> Option<i64> {
    storage.get(LAST_REFRESH_KEY)?.trim().parse().ok()
}

/// A corrupt cache reads as no cache at all.
fn load_cached_jobs<S: Storage>(storage: &S) -> Option<Vec<JobListing>> {
    serde_json::from_str(&storage.get(CACHE_KEY)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::testing::{StubSource, job};
    use crate::storage::MemoryStorage;

    const T0: i64 = 1_700_000_000_000;

    #[tokio::test]
    async fn entry_without_cache_fetches_once() {
        let api = StubSource::with(vec![job("A", "X")]);
        let storage = MemoryStorage::default();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();

        assert_eq!(api.calls(), 1);
        assert_eq!(flow.jobs.len(), 1);
        assert!(storage.get(CACHE_KEY).is_some());
        assert_eq!(storage.get(LAST_REFRESH_KEY).as_deref(), Some(&*T0.to_string()));
    }

    #[tokio::test]
    async fn entry_with_cache_fetches_nothing() {
        let api = StubSource::with(vec![job("A", "X")]);
        let storage = MemoryStorage::default();
        storage
            .set(
                CACHE_KEY,
                &serde_json::to_string(&vec![job("Cached", "Corp")]).unwrap(),
            )
            .unwrap();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();

        assert_eq!(api.calls(), 0);
        assert_eq!(flow.jobs[0].title, "Cached");
    }

    #[tokio::test]
    async fn entry_with_force_refresh_ignores_cache() {
        let api = StubSource::with(vec![job("Fresh", "X")]);
        let storage = MemoryStorage::default();
        storage
            .set(
                CACHE_KEY,
                &serde_json::to_string(&vec![job("Stale", "Corp")]).unwrap(),
            )
            .unwrap();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(true, T0).await.unwrap();

        assert_eq!(api.calls(), 1);
        assert_eq!(flow.jobs[0].title, "Fresh");
    }

    #[tokio::test]
    async fn corrupt_cache_reads_as_absent() {
        let api = StubSource::with(vec![job("A", "X")]);
        let storage = MemoryStorage::default();
        storage.set(CACHE_KEY, "not json at all").unwrap();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();

        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn cached_listing_round_trips_in_order() {
        let fetched = vec![job("B", "Y"), job("A", "X"), job("C", "Z")];
        let api = StubSource::with(fetched.clone());
        let storage = MemoryStorage::default();

        let mut first = FeedFlow::new(&api, &storage);
        first.enter(false, T0).await.unwrap();

        let idle = StubSource::default();
        let mut second = FeedFlow::new(&idle, &storage);
        second.enter(false, T0 + 1_000).await.unwrap();

        assert_eq!(idle.calls(), 0);
        assert_eq!(second.jobs, fetched);
    }

    #[tokio::test]
    async fn manual_refresh_is_noop_during_cooldown() {
        let api = StubSource::with(vec![job("A", "X")]).then(vec![job("B", "Y")]);
        let storage = MemoryStorage::default();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();
        let cached_before = storage.get(CACHE_KEY);

        flow.manual_refresh(T0 + 30_000).await.unwrap();

        assert_eq!(api.calls(), 1);
        assert_eq!(flow.jobs[0].title, "A");
        assert_eq!(storage.get(CACHE_KEY), cached_before);
        assert_eq!(storage.get(LAST_REFRESH_KEY).as_deref(), Some(&*T0.to_string()));
    }

    #[tokio::test]
    async fn manual_refresh_proceeds_after_cooldown() {
        let api = StubSource::with(vec![job("A", "X")]).then(vec![job("B", "Y")]);
        let storage = MemoryStorage::default();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();
        flow.manual_refresh(T0 + REFRESH_COOLDOWN_MS).await.unwrap();

        assert_eq!(api.calls(), 2);
        assert_eq!(flow.jobs[0].title, "B");
        assert_eq!(
            storage.get(LAST_REFRESH_KEY).as_deref(),
            Some(&*(T0 + REFRESH_COOLDOWN_MS).to_string())
        );
    }

    #[tokio::test]
    async fn manual_refresh_allowed_when_never_refreshed() {
        let api = StubSource::with(vec![job("A", "X")]);
        let storage = MemoryStorage::default();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.manual_refresh(T0).await.unwrap();

        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn cooldown_counts_down_to_zero() {
        let api = StubSource::with(vec![job("A", "X")]);
        let storage = MemoryStorage::default();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();

        assert_eq!(flow.cooldown_remaining(T0), 60);
        assert_eq!(flow.cooldown_remaining(T0 + 30_000), 30);
        assert_eq!(flow.cooldown_remaining(T0 + 59_001), 1);
        assert_eq!(flow.cooldown_remaining(T0 + 59_999), 1);
        assert_eq!(flow.cooldown_remaining(T0 + 60_000), 0);
        assert_eq!(flow.cooldown_remaining(T0 + 90_000), 0);
    }

    #[tokio::test]
    async fn cooldown_is_zero_without_prior_refresh() {
        let api = StubSource::default();
        let storage = MemoryStorage::default();
        let flow = FeedFlow::new(&api, &storage);

        assert_eq!(flow.cooldown_remaining(T0), 0);
        assert_eq!(flow.refresh_label(T0), "Refresh Feed");
    }

    #[tokio::test]
    async fn refresh_label_tracks_cooldown() {
        let api = StubSource::with(vec![job("A", "X")]);
        let storage = MemoryStorage::default();

        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(false, T0).await.unwrap();

        assert_eq!(flow.refresh_label(T0 + 15_000), "Available in 45s");
        assert_eq!(flow.refresh_label(T0 + 60_000), "Refresh Feed");
        assert!(flow.refresh_blocked(T0 + 15_000));
        assert!(!flow.refresh_blocked(T0 + 60_000));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_state() {
        let storage = MemoryStorage::default();
        let seeded = serde_json::to_string(&vec![job("Old", "Corp")]).unwrap();
        storage.set(CACHE_KEY, &seeded).unwrap();
        storage.set(LAST_REFRESH_KEY, &T0.to_string()).unwrap();

        let api = StubSource::failing();
        let mut flow = FeedFlow::new(&api, &storage);
        let result = flow.enter(true, T0 + 120_000).await;

        assert!(result.is_err());
        assert!(!flow.loading);
        assert_eq!(storage.get(CACHE_KEY).as_deref(), Some(&*seeded));
        assert_eq!(storage.get(LAST_REFRESH_KEY).as_deref(), Some(&*T0.to_string()));
    }

    #[tokio::test]
    async fn empty_fetch_still_replaces_cache() {
        let storage = MemoryStorage::default();
        storage
            .set(
                CACHE_KEY,
                &serde_json::to_string(&vec![job("Old", "Corp")]).unwrap(),
            )
            .unwrap();

        let api = StubSource::with(Vec::new());
        let mut flow = FeedFlow::new(&api, &storage);
        flow.enter(true, T0).await.unwrap();

        assert!(flow.jobs.is_empty());
        assert_eq!(storage.get(CACHE_KEY).as_deref(), Some("[]"));
    }
}
