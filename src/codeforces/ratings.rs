use super::api::{ApiClient, FetchError, Result};
use super::types::{Handle, User, UserJson};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsOrder {
    ByRating,
    ByHandle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    pub users: Vec<User>,
    /// Entries returned upstream without the fields a standing needs (unrated users).
    pub dropped: usize,
}

pub struct RatingBoard<'a> {
    api: &'a ApiClient,
}

impl<'a> RatingBoard<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        RatingBoard { api }
    }

    pub fn current_standings(&self, handles: &[Handle], order: StandingsOrder) -> Result<Standings> {
        if handles.is_empty() {
            return Ok(Standings::default());
        }
        let joined = handles.iter().map(|h| h.to_string()).collect::<Vec<String>>().join(";");
        log::info!("Fetch user info for {} handles", handles.len());
        let entries: Vec<serde_json::Value> = self.api.call("user.info", &[("handles", joined)])?;

        let mut standings = Standings::default();
        for entry in entries {
            match serde_json::from_value::<UserJson>(entry) {
                Ok(user) => standings.users.push(User {
                    handle: user.handle,
                    rating: user.rating,
                    rank: user.rank,
                }),
                Err(e) => {
                    log::debug!("dropping user entry: {}", e);
                    standings.dropped += 1;
                }
            }
        }
        if standings.dropped > 0 {
            log::info!("{} users without a rating were dropped", standings.dropped);
        }

        sort_users(&mut standings.users, order);
        Ok(standings)
    }

    /// Asks Codeforces whether `handle` is a registered user.
    ///
    /// Unknown handles come back as HTTP 400 with a FAILED body; other failures are errors.
    pub fn handle_exists(&self, handle: &Handle) -> Result<bool> {
        match self.api.call::<Vec<serde_json::Value>>("user.info", &[("handles", handle.to_string())]) {
            Ok(entries) => Ok(!entries.is_empty()),
            Err(FetchError::HttpStatus(400)) => Ok(false),
            Err(FetchError::Upstream(comment)) if comment.contains("not found") => Ok(false),
            Err(e) => Err(e),
        }
    }
}

pub fn sort_users(users: &mut [User], order: StandingsOrder) {
    match order {
        StandingsOrder::ByRating => users.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| a.handle.to_lowercase().cmp(&b.handle.to_lowercase()))
        }),
        StandingsOrder::ByHandle => users.sort_by_key(|user| user.handle.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeforces::api::testing::{ok, StaticFetcher};

    fn handles(names: &[&str]) -> Vec<Handle> {
        names.iter().map(|n| Handle::new(n.to_string()).unwrap()).collect()
    }

    const USERS: &str = r#"[
        {"handle":"bob","rating":1900,"rank":"candidate master"},
        {"handle":"newbie42"},
        {"handle":"Alice","rating":1900,"rank":"candidate master"},
        {"handle":"carol","rating":2400,"rank":"international master"}
    ]"#;

    #[test]
    fn test_unrated_entry_is_dropped_and_rest_sorted_by_rating() {
        let api = StaticFetcher::new()
            .route("user.info", &[("handles", "bob;newbie42;Alice;carol")], 200, &ok(USERS))
            .into_client();
        let standings = RatingBoard::new(&api)
            .current_standings(&handles(&["bob", "newbie42", "Alice", "carol"]), StandingsOrder::ByRating)
            .unwrap();
        let order: Vec<&str> = standings.users.iter().map(|u| u.handle.as_str()).collect();
        assert_eq!(order, vec!["carol", "Alice", "bob"]);
        assert_eq!(standings.dropped, 1);

        for pair in standings.users.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.rating > b.rating || (a.rating == b.rating && a.handle.to_lowercase() <= b.handle.to_lowercase()));
        }
    }

    #[test]
    fn test_sort_by_handle_ignores_case() {
        let api = StaticFetcher::new().route("user.info", &[], 200, &ok(USERS)).into_client();
        let standings = RatingBoard::new(&api)
            .current_standings(&handles(&["bob", "newbie42", "Alice", "carol"]), StandingsOrder::ByHandle)
            .unwrap();
        let order: Vec<&str> = standings.users.iter().map(|u| u.handle.as_str()).collect();
        assert_eq!(order, vec!["Alice", "bob", "carol"]);
    }

    #[test]
    fn test_empty_handle_set_makes_no_request() {
        let fetcher = StaticFetcher::new();
        let log = fetcher.request_log();
        let api = fetcher.into_client();
        let standings = RatingBoard::new(&api).current_standings(&[], StandingsOrder::ByRating).unwrap();
        assert!(standings.users.is_empty());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_handle_fails_whole_batch() {
        let body = r#"{"status":"FAILED","comment":"handles: User with handle nobody_here not found"}"#;
        let api = StaticFetcher::new().route("user.info", &[], 400, body).into_client();
        assert!(RatingBoard::new(&api)
            .current_standings(&handles(&["nobody_here"]), StandingsOrder::ByRating)
            .is_err());
    }

    #[test]
    fn test_handle_exists() {
        let not_found = r#"{"status":"FAILED","comment":"handles: User with handle typo0 not found"}"#;
        let api = StaticFetcher::new()
            .route("user.info", &[("handles", "tourist")], 200, &ok(r#"[{"handle":"tourist","rating":3800,"rank":"legendary grandmaster"}]"#))
            .route("user.info", &[("handles", "fresh_account")], 200, &ok(r#"[{"handle":"fresh_account"}]"#))
            .route("user.info", &[("handles", "typo0")], 400, not_found)
            .route("user.info", &[("handles", "typo1")], 200, &not_found.replace("typo0", "typo1"))
            .route("user.info", &[("handles", "busy")], 503, "")
            .into_client();
        let board = RatingBoard::new(&api);
        assert!(board.handle_exists(&handles(&["tourist"])[0]).unwrap());
        assert!(board.handle_exists(&handles(&["fresh_account"])[0]).unwrap());
        assert!(!board.handle_exists(&handles(&["typo0"])[0]).unwrap());
        assert!(!board.handle_exists(&handles(&["typo1"])[0]).unwrap());
        assert!(matches!(board.handle_exists(&handles(&["busy"])[0]), Err(FetchError::HttpStatus(503))));
    }
}
