use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One job offer as the matching backend returns it. Only `title` and
/// `company` are guaranteed to be present; everything else depends on which
/// endpoint produced the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub apply_link: Option<String>,
    pub score: Option<f64>,
    pub summary: Option<String>,
    pub evidence_image: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl JobListing {
    /// Identity used to spot duplicates within one results session. The pair
    /// is not globally unique, but it is treated as unique per session.
    pub fn dedup_key(&self) -> (&str, &str) {
        (self.title.as_str(), self.company.as_str())
    }
}

/// Wire shape shared by all three backend endpoints: a JSON object whose
/// `results` field may be missing entirely, in which case it reads as empty.
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub results: Vec<JobListing>,
}

/// Experience bucket the backend's `/match` endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBucket {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5+")]
    FivePlus,
}

impl ExperienceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceBucket::Zero => "0",
            ExperienceBucket::OneToThree => "1-3",
            ExperienceBucket::ThreeToFive => "3-5",
            ExperienceBucket::FivePlus => "5+",
        }
    }
}

impl fmt::Display for ExperienceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceBucket {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(ExperienceBucket::Zero),
            "1-3" => Ok(ExperienceBucket::OneToThree),
            "3-5" => Ok(ExperienceBucket::ThreeToFive),
            "5+" => Ok(ExperienceBucket::FivePlus),
            other => Err(eyre::eyre!("unknown experience bucket: {}", other)),
        }
    }
}

/// Search form contents. Lives only for the duration of one submission.
#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub resume: PathBuf,
    pub title: String,
    pub location: String,
    pub experience: ExperienceBucket,
}
