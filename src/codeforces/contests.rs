use super::api::{ApiClient, Result};
use super::types::{Contest, ContestJson};

pub const NEXT_CONTEST_WINDOW_HOURS: i64 = 7 * 24;

pub struct ContestCatalog<'a> {
    api: &'a ApiClient,
}

impl<'a> ContestCatalog<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        ContestCatalog { api }
    }

    pub fn fetch_contest_list(&self) -> Result<Vec<ContestJson>> {
        log::info!("Start to retrieve the contest list from Codeforces");
        let contests: Vec<ContestJson> = self.api.call("contest.list", &[])?;
        log::info!("{} contests retrieved", contests.len());
        Ok(contests)
    }

    /// Contests starting within `hours_limit` hours of `now`, nearest first.
    pub fn list_upcoming(&self, hours_limit: i64, now: i64) -> Result<Vec<Contest>> {
        let contests: Vec<Contest> = self.fetch_contest_list()?.iter().filter_map(ContestJson::to_contest).collect();
        Ok(select_upcoming(&contests, hours_limit, now))
    }

    pub fn next_one(&self, hours_limit: i64, now: i64) -> Result<Option<Contest>> {
        Ok(self.list_upcoming(hours_limit, now)?.into_iter().next())
    }
}

/// Keeps contests with `0 <= start - now <= hours_limit * 3600` and orders them by start time.
///
/// The upstream list order is undocumented, so every entry is checked instead of
/// stopping at the first past contest.
pub fn select_upcoming(contests: &[Contest], hours_limit: i64, now: i64) -> Vec<Contest> {
    let limit = hours_limit * 3600;
    let mut upcoming: Vec<Contest> = contests
        .iter()
        .filter(|contest| {
            let countdown = contest.countdown(now);
            (0..=limit).contains(&countdown)
        })
        .cloned()
        .collect();
    upcoming.sort_by_key(|contest| (contest.start_time, contest.id));
    upcoming
}
