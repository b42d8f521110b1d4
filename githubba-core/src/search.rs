//! Builds GitHub search requests for the two feed strategies.

use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::FeedType;

/// Results per page requested from the search API.
pub const PER_PAGE: u32 = 30;

/// Star ranges the random feed samples from.
pub const STAR_BUCKETS: &[&str] = &[
    "10..50",
    "50..100",
    "100..500",
    "500..1000",
    "1000..5000",
    "5000..20000",
    ">=20000",
];

/// Highest page the random feed will jump to.
pub const RANDOM_MAX_PAGE: u32 = 10;

/// How far back the new feed looks.
pub const NEW_FEED_WINDOW_DAYS: i64 = 30;

/// Minimum stars for the new feed, to keep empty repositories out.
pub const NEW_FEED_MIN_STARS: &str = ">=5";

/// The `q` parameter of a search, field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub stars: String,
    pub language: Option<String>,
    pub created: Option<String>,
}

impl SearchCriteria {
    /// Renders the criteria as a search query string.
    pub fn to_query(&self) -> String {
        let mut query = format!("stars:{}", self.stars);
        if let Some(language) = self.language.as_deref().filter(|l| !l.trim().is_empty()) {
            let language = language.trim();
            if language.contains(char::is_whitespace) {
                query.push_str(&format!(" language:\"{language}\""));
            } else {
                query.push_str(&format!(" language:{language}"));
            }
        }
        if let Some(created) = &self.created {
            query.push_str(&format!(" created:{created}"));
        }
        query
    }
}

/// A fully specified search API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub criteria: SearchCriteria,
    pub sort: Option<&'static str>,
    pub order: Option<&'static str>,
    pub page: u32,
    pub per_page: u32,
}

impl SearchRequest {
    /// Query-string pairs for the `/search/repositories` endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.criteria.to_query())];
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_owned()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.to_owned()));
        }
        pairs.push(("per_page", self.per_page.to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs
    }
}

/// Produces successive page requests for one feed session.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    feed: FeedType,
    language: Option<String>,
    today: NaiveDate,
    next_page: u32,
    rng: StdRng,
}

impl FeedQuery {
    /// The same `seed` always yields the same sequence of random-feed pages.
    pub fn new(feed: FeedType, language: Option<String>, today: NaiveDate, seed: u64) -> Self {
        let language = language.filter(|l| !l.trim().is_empty());
        Self { feed, language, today, next_page: 1, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn feed(&self) -> FeedType {
        self.feed
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// The request for the next page of this session.
    ///
    /// The new feed walks pages in order; the random feed draws a fresh star
    /// bucket and page every time.
    pub fn next_request(&mut self) -> SearchRequest {
        match self.feed {
            FeedType::Random => {
                let bucket = STAR_BUCKETS[self.rng.gen_range(0..STAR_BUCKETS.len())];
                let page = self.rng.gen_range(1..=RANDOM_MAX_PAGE);
                SearchRequest {
                    criteria: SearchCriteria {
                        stars: bucket.to_owned(),
                        language: self.language.clone(),
                        created: None,
                    },
                    sort: None,
                    order: None,
                    page,
                    per_page: PER_PAGE,
                }
            }
            FeedType::New => {
                let since = self.today - ChronoDuration::days(NEW_FEED_WINDOW_DAYS);
                let page = self.next_page;
                self.next_page += 1;
                SearchRequest {
                    criteria: SearchCriteria {
                        stars: NEW_FEED_MIN_STARS.to_owned(),
                        language: self.language.clone(),
                        created: Some(format!(">={}", since.format("%Y-%m-%d"))),
                    },
                    sort: Some("created"),
                    order: Some("desc"),
                    page,
                    per_page: PER_PAGE,
                }
            }
        }
    }
}
