use chrono::Utc;
use eyre::Result;
use log::debug;

use crate::api::client::ApiClient;
use crate::flows::feed::FeedFlow;
use crate::flows::results::ResultsSession;
use crate::flows::search::SearchFlow;
use crate::models::job::{ExperienceBucket, SearchFilters};
use crate::storage::FileStorage;
use crate::views::card::{self, CardAction};
use crate::views::{detail, pages};

/// The navigable views. Transient state rides on the route itself, the way
/// the flows expect it, never in a global.
#[derive(Debug)]
pub enum Route {
    Landing,
    Feed { refresh: bool },
    Search,
    Results(Option<ResultsSession>),
    Job,
    Exit,
}

/// Maps a startup view name onto a route. Anything unknown lands on the
/// landing page.
pub fn parse_view(view: &str, refresh: bool) -> Route {
    match view.to_lowercase().as_str() {
        "feed" => Route::Feed { refresh },
        "search" => Route::Search,
        "result" | "results" => Route::Results(None),
        "job" => Route::Job,
        _ => Route::Landing,
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Interactive navigation loop over the views. One user action triggers at
/// most one network operation; every view hands back the next route.
pub struct App {
    api: ApiClient,
    storage: FileStorage,
}

impl App {
    pub fn new(api: ApiClient, storage: FileStorage) -> Self {
        App { api, storage }
    }

    pub async fn run(&self, start: Route) -> Result<()> {
        let mut route = start;
        loop {
            debug!("entering route: {:?}", route);
            route = match route {
                Route::Landing => self.landing()?,
                Route::Feed { refresh } => self.feed(refresh).await?,
                Route::Search => self.search().await?,
                Route::Results(session) => self.results(session).await?,
                Route::Job => self.job_fallback()?,
                Route::Exit => return Ok(()),
            };
        }
    }

    fn landing(&self) -> Result<Route> {
        pages::landing();
        loop {
            let input = pages::prompt("[f]eed, [s]earch or [q]uit: ")?;
            match input.to_lowercase().as_str() {
                "f" | "feed" => return Ok(Route::Feed { refresh: false }),
                "s" | "search" => return Ok(Route::Search),
                "q" | "quit" => return Ok(Route::Exit),
                _ => pages::alert("Unknown option."),
            }
        }
    }

    async fn feed(&self, refresh: bool) -> Result<Route> {
        let mut flow = FeedFlow::new(&self.api, &self.storage);

        // The force-refresh signal is consumed right here; redraws of the
        // same view below never repeat it.
        if let Err(e) = flow.enter(refresh, now_ms()).await {
            pages::alert(&format!("Could not load the feed: {}", e));
        }

        loop {
            pages::feed_header();
            if flow.jobs.is_empty() {
                println!("No jobs cached yet.\n");
            }
            for job in &flow.jobs {
                println!(
                    "{}",
                    card::render(job, CardAction::Apply(job.apply_link.as_deref()))
                );
            }

            let label = flow.refresh_label(now_ms());
            let input = pages::prompt(&format!("[r] {} | [s]earch | [b]ack | [q]uit: ", label))?;
            match input.to_lowercase().as_str() {
                "r" => {
                    if flow.refresh_blocked(now_ms()) {
                        continue;
                    }
                    if let Err(e) = flow.manual_refresh(now_ms()).await {
                        pages::alert(&format!("Refresh failed, keeping the previous listing: {}", e));
                    }
                }
                "s" | "search" => return Ok(Route::Search),
                "b" | "back" => return Ok(Route::Landing),
                "q" | "quit" => return Ok(Route::Exit),
                _ => pages::alert("Unknown option."),
            }
        }
    }

    async fn search(&self) -> Result<Route> {
        pages::search_header();
        let mut flow = SearchFlow::new(&self.api);

        loop {
            let resume = pages::prompt("Resume file path (empty to go back): ")?;
            if resume.is_empty() {
                return Ok(Route::Landing);
            }
            let title = pages::prompt("Job title: ")?;
            let location = pages::prompt("Location: ")?;
            let experience = prompt_experience()?;

            let filters = SearchFilters {
                resume: resume.into(),
                title,
                location,
                experience,
            };

            println!("Matching...");
            match flow.submit(&filters).await {
                Ok(session) => return Ok(Route::Results(Some(session))),
                Err(e) => pages::alert(&e.to_string()),
            }
        }
    }

    async fn results(&self, session: Option<ResultsSession>) -> Result<Route> {
        let Some(mut session) = session else {
            pages::no_search_data();
            loop {
                let input = pages::prompt("[s]earch or [q]uit: ")?;
                match input.to_lowercase().as_str() {
                    "s" | "search" => return Ok(Route::Search),
                    "q" | "quit" => return Ok(Route::Exit),
                    _ => pages::alert("Unknown option."),
                }
            }
        };

        if let Some(notice) = session.notice.take() {
            pages::alert(&notice);
        }

        loop {
            pages::results_header();
            if session.jobs.is_empty() {
                println!("No matched jobs found. Try another search.\n");
            }
            for (idx, job) in session.jobs.iter().enumerate() {
                println!("{}", card::render(job, CardAction::Select(idx + 1)));
            }

            let more_label = if session.loading_more { "Loading..." } else { "Load More" };
            let input = pages::prompt(&format!(
                "job number | [m] {} | [s]earch | [q]uit: ",
                more_label
            ))?;
            match input.to_lowercase().as_str() {
                "m" | "more" => {
                    if let Err(e) = session.load_more(&self.api).await {
                        pages::alert(&format!("Could not load more jobs: {}", e));
                    }
                }
                "s" | "search" => return Ok(Route::Search),
                "q" | "quit" => return Ok(Route::Exit),
                other => match other.parse::<usize>() {
                    Ok(number) if number >= 1 => {
                        // Detail overlay: render the selected job, wait, close.
                        if session.select(number - 1).is_some() {
                            if let Some(job) = session.selected_job() {
                                println!("{}", detail::render(job));
                            }
                            pages::prompt("Press Enter to close: ")?;
                            session.close_detail();
                        } else {
                            pages::alert("No such job in the list.");
                        }
                    }
                    _ => pages::alert("Unknown option."),
                },
            }
        }
    }

    /// The job-detail route reached directly, with no selection carried in.
    fn job_fallback(&self) -> Result<Route> {
        pages::no_job_selected();
        pages::prompt("Press Enter to continue: ")?;
        Ok(Route::Results(None))
    }
}

fn prompt_experience() -> Result<ExperienceBucket> {
    loop {
        let raw = pages::prompt("Experience [0, 1-3, 3-5, 5+] (default 0): ")?;
        if raw.is_empty() {
            return Ok(ExperienceBucket::Zero);
        }
        match raw.parse() {
            Ok(bucket) => return Ok(bucket),
            Err(_) => pages::alert("Please pick one of 0, 1-3, 3-5 or 5+."),
        }
    }
}
