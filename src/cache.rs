use crate::codeforces::api::{ApiClient, Result};
use crate::codeforces::contests::{ContestCatalog, NEXT_CONTEST_WINDOW_HOURS};
use crate::codeforces::rating_changes::{ChangeOrder, RatingChangeAggregator, RatingChangeReport};
use crate::codeforces::ratings::{RatingBoard, Standings, StandingsOrder};
use crate::codeforces::types::{Contest, Handle};

/// What one successful refresh cycle produced.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Contests starting within the widest window any command asks for.
    pub upcoming: Vec<Contest>,
    pub standings: Standings,
    pub changes: RatingChangeReport,
    pub refreshed_at: i64,
}

#[derive(Debug, Default)]
pub struct UpdateCache {
    last_success_time: Option<i64>,
    snapshot: Option<Snapshot>,
}

impl UpdateCache {
    pub fn last_success_time(&self) -> Option<i64> {
        self.last_success_time
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn store(&mut self, snapshot: Snapshot) {
        self.last_success_time = Some(snapshot.refreshed_at);
        self.snapshot = Some(snapshot);
    }
}

/// Runs one catalog, board and rating change cycle.
///
/// Contest and standings failures abort the cycle; rating change failures are
/// per handle and only show up in the report's skipped list.
pub fn refresh(api: &ApiClient, handles: &[Handle], now: i64) -> Result<Snapshot> {
    log::info!("Start to refresh Codeforces data for {} handles", handles.len());
    let upcoming = ContestCatalog::new(api).list_upcoming(NEXT_CONTEST_WINDOW_HOURS, now)?;
    let standings = RatingBoard::new(api).current_standings(handles, StandingsOrder::ByRating)?;
    let changes = RatingChangeAggregator::new(api).latest_shared_contest_changes(handles, ChangeOrder::ByRatingDrop);
    log::info!(
        "Refresh finished: {} contests, {} users, {} rating changes",
        upcoming.len(),
        standings.users.len(),
        changes.changes.len()
    );

    Ok(Snapshot {
        upcoming,
        standings,
        changes,
        refreshed_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeforces::api::testing::{ok, StaticFetcher};

    const NOW: i64 = 1_700_000_000;

    fn handles() -> Vec<Handle> {
        vec![Handle::new("a".to_string()).unwrap()]
    }

    #[test]
    fn test_successful_refresh_updates_last_success_time() {
        let contests = format!(r#"[{{"id":1,"name":"Round 1","durationSeconds":7200,"startTimeSeconds":{}}}]"#, NOW + 3600);
        let api = StaticFetcher::new()
            .route("contest.list", &[], 200, &ok(&contests))
            .route("user.info", &[], 200, &ok(r#"[{"handle":"a","rating":1500,"rank":"specialist"}]"#))
            .route(
                "user.rating",
                &[],
                200,
                &ok(r#"[{"contestId":1,"contestName":"Round 0","handle":"a","rank":3,"ratingUpdateTimeSeconds":100,"oldRating":1480,"newRating":1500}]"#),
            )
            .into_client();

        let mut cache = UpdateCache::default();
        assert_eq!(cache.last_success_time(), None);

        let snapshot = refresh(&api, &handles(), NOW).unwrap();
        cache.store(snapshot);
        assert_eq!(cache.last_success_time(), Some(NOW));
        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot.upcoming.len(), 1);
        assert_eq!(snapshot.standings.users.len(), 1);
        assert_eq!(snapshot.changes.changes.len(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut cache = UpdateCache::default();
        cache.store(Snapshot {
            refreshed_at: NOW - 60,
            ..Default::default()
        });

        let api = StaticFetcher::new().route("contest.list", &[], 500, "").into_client();
        assert!(refresh(&api, &handles(), NOW).is_err());
        assert_eq!(cache.last_success_time(), Some(NOW - 60));
    }
}
