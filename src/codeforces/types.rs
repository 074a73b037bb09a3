use nutype::nutype;
use serde::Deserialize;

pub const CONTEST_URL_PREFIX: &str = "https://codeforces.com/contests/";

/// A Codeforces username as accepted on the watch list.
#[nutype(
    sanitize(trim),
    validate(
        not_empty,
        len_char_max = 24,
        predicate = |handle| handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    ),
    derive(Debug, Clone, PartialEq, Eq, Hash, AsRef, Display, Serialize, Deserialize)
)]
pub struct Handle(String);

impl Handle {
    pub fn matches(&self, other: &Handle) -> bool {
        self.as_ref().eq_ignore_ascii_case(other.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    pub name: String,
    pub id: i64,
    pub start_time: i64,
    pub duration_seconds: i64,
    pub url: String,
}

impl Contest {
    pub fn new(id: i64, name: String, start_time: i64, duration_seconds: i64) -> Self {
        Contest {
            url: format!("{}{}", CONTEST_URL_PREFIX, id),
            name,
            id,
            start_time,
            duration_seconds,
        }
    }

    /// Seconds until the start; negative once the contest has begun.
    pub fn countdown(&self, now: i64) -> i64 {
        self.start_time - now
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub handle: String,
    pub rating: i32,
    pub rank: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingChange {
    pub contest_id: i64,
    pub contest_name: String,
    pub handle: String,
    pub rank: i32,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingChange {
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub contest_id: i64,
    pub index: String,
    pub name: String,
    pub difficulty: Option<i32>,
}

// Wire formats of the Codeforces API results.

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContestJson {
    pub id: i64,
    pub name: String,
    pub duration_seconds: i64,
    pub start_time_seconds: Option<i64>,
}

impl ContestJson {
    /// Contests without a scheduled start have nothing to count down to.
    pub fn to_contest(&self) -> Option<Contest> {
        let start_time = self.start_time_seconds?;
        Some(Contest::new(self.id, self.name.clone(), start_time, self.duration_seconds))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserJson {
    pub handle: String,
    pub rating: i32,
    pub rank: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RatingChangeJson {
    pub contest_id: i64,
    pub contest_name: String,
    pub handle: String,
    pub rank: i32,
    pub rating_update_time_seconds: i64,
    pub old_rating: i32,
    pub new_rating: i32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProblemJson {
    pub contest_id: Option<i64>,
    pub index: String,
    pub name: String,
    pub rating: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StandingsJson {
    pub contest: ContestJson,
    pub problems: Vec<ProblemJson>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_is_trimmed_and_validated() {
        let handle = Handle::new("  tourist ".to_string()).unwrap();
        assert_eq!(handle.as_ref(), "tourist");
        assert!(Handle::new("".to_string()).is_err());
        assert!(Handle::new("has space".to_string()).is_err());
        assert!(Handle::new("a".repeat(25)).is_err());
        assert!(Handle::new("Um_nik".to_string()).is_ok());
    }

    #[test]
    fn test_handle_matches_ignores_case() {
        let a = Handle::new("Petr".to_string()).unwrap();
        let b = Handle::new("petr".to_string()).unwrap();
        assert!(a.matches(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_countdown_is_recomputed_from_now() {
        let contest = Contest::new(1900, "Codeforces Round".to_string(), 10_000, 7200);
        assert_eq!(contest.countdown(6_400), 3_600);
        assert_eq!(contest.countdown(10_600), -600);
        assert_eq!(contest.url, "https://codeforces.com/contests/1900");
    }

    #[test]
    fn test_contest_without_start_time_is_skipped() {
        let json: ContestJson = serde_json::from_str(r#"{"id":5,"name":"TBD","durationSeconds":7200,"phase":"BEFORE"}"#).unwrap();
        assert!(json.to_contest().is_none());
    }
}
