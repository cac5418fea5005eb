use std::collections::{BTreeMap, HashMap};

use crate::models::analytics::{
    ActivityEntry, AnalyticsReport, LanguageShare, MonthlyCommits, RepoSize, TopRepo,
};
use crate::models::{Event, Repository};

pub const TOP_REPOS_LIMIT: usize = 5;
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Reduces repositories and events into an [`AnalyticsReport`].
///
/// Pure: the same inputs always give the same report.
pub fn generate_analytics(repos: &[Repository], events: &[Event]) -> AnalyticsReport {
    let mut total_stars = 0;
    let mut total_forks = 0;
    let mut languages = LanguageCounter::default();
    let mut repo_size_data = Vec::with_capacity(repos.len());
    let mut top_repos = Vec::with_capacity(repos.len());

    for repo in repos {
        total_stars += repo.stargazers_count;
        total_forks += repo.forks_count;

        if let Some(language) = repo.declared_language() {
            languages.add(language);
        }

        repo_size_data.push(RepoSize {
            name: repo.name.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
        });

        top_repos.push(TopRepo {
            name: repo.name.clone(),
            stars: repo.stargazers_count,
            url: repo.html_url.clone(),
        });
    }

    // sort_by is stable, so equal star counts keep input order
    top_repos.sort_by(|a, b| b.stars.cmp(&a.stars));
    top_repos.truncate(TOP_REPOS_LIMIT);

    let mut total_commits = 0;
    let mut monthly_commits: BTreeMap<String, u64> = BTreeMap::new();
    let mut recent_activity = Vec::with_capacity(events.len());

    for event in events {
        if event.is_push() {
            let commit_count = event.commit_count();
            total_commits += commit_count;

            if let Some(month) = event.created_at.as_deref().and_then(month_key) {
                *monthly_commits.entry(month).or_insert(0) += commit_count;
            }
        }

        recent_activity.push(ActivityEntry {
            event_type: event.event_type.clone(),
            repo_name: event.repo_name().map(str::to_string),
            created_at: event.created_at.clone(),
        });
    }

    // Missing timestamps compare as "" and land at the end
    recent_activity.sort_by(|a, b| {
        let a = a.created_at.as_deref().unwrap_or("");
        let b = b.created_at.as_deref().unwrap_or("");
        b.cmp(a)
    });
    recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

    let commit_data = monthly_commits
        .into_iter()
        .map(|(month, commit_count)| MonthlyCommits { month, commit_count })
        .collect();

    AnalyticsReport {
        total_stars,
        total_forks,
        total_commits,
        language_data: languages.into_shares(),
        commit_data,
        repo_size_data,
        recent_activity,
        top_repos,
    }
}

/// `YYYY-MM` prefix of an ISO-8601 timestamp.
fn month_key(created_at: &str) -> Option<String> {
    if created_at.is_empty() {
        return None;
    }
    Some(created_at.chars().take(7).collect())
}

/// Rounds to two decimals, ties to even, using the exact binary value of
/// `value` (so 3.125 becomes 3.12 and 96.875 becomes 96.88).
fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let biased_exp = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if biased_exp == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exp - 1075)
    };

    // Already an integer, nothing after the decimal point
    if exp >= 0 {
        return value;
    }

    // value * 100 == scaled / 2^shift exactly
    let scaled = mantissa as u128 * 100;
    let shift = (-exp) as u32;
    let hundredths = if shift >= 127 {
        0
    } else {
        let quotient = scaled >> shift;
        let remainder = scaled - (quotient << shift);
        let half = 1u128 << (shift - 1);
        if remainder > half || (remainder == half && quotient % 2 == 1) {
            quotient + 1
        } else {
            quotient
        }
    };

    (hundredths as f64 / 100.0).copysign(value)
}

/// Counts repositories per language, remembering first-seen order.
#[derive(Default)]
struct LanguageCounter {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl LanguageCounter {
    fn add(&mut self, language: &str) {
        match self.counts.get_mut(language) {
            Some(count) => *count += 1,
            None => {
                self.order.push(language.to_string());
                self.counts.insert(language.to_string(), 1);
            }
        }
    }

    fn into_shares(mut self) -> Vec<LanguageShare> {
        let total = self.counts.values().sum::<u64>().max(1) as f64;

        self.order
            .into_iter()
            .map(|name| {
                let count = self.counts.remove(&name).unwrap_or_default();
                LanguageShare {
                    percentage: round_to_hundredths(count as f64 / total * 100.0),
                    name,
                    count,
                }
            })
            .collect()
    }
}
