use super::api::{ApiClient, Result};
use super::types::{Contest, Problem, StandingsJson};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestProblems {
    pub contest: Contest,
    pub problems: Vec<Problem>,
}

pub struct ProblemSetFetcher<'a> {
    api: &'a ApiClient,
}

impl<'a> ProblemSetFetcher<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        ProblemSetFetcher { api }
    }

    fn fetch_standings(&self, contest_id: i64) -> Result<StandingsJson> {
        // a single standings row is enough; only the embedded contest and problems are used
        self.api.call(
            "contest.standings",
            &[
                ("contestId", contest_id.to_string()),
                ("from", "1".to_string()),
                ("count", "1".to_string()),
            ],
        )
    }

    /// Contest metadata with its problems, or `None` when the contest can't be fetched.
    pub fn contest_problems(&self, contest_id: i64) -> Option<ContestProblems> {
        let standings = match self.fetch_standings(contest_id) {
            Ok(standings) => standings,
            Err(e) => {
                log::warn!("failed to fetch problems of contest {}: {}", contest_id, e);
                return None;
            }
        };

        let contest = match standings.contest.to_contest() {
            Some(contest) => contest,
            None => {
                log::warn!("contest {} has no start time, problems are listed without one", contest_id);
                Contest::new(standings.contest.id, standings.contest.name, 0, standings.contest.duration_seconds)
            }
        };
        let problems = standings
            .problems
            .into_iter()
            .map(|problem| Problem {
                contest_id: problem.contest_id.unwrap_or(contest.id),
                index: problem.index,
                name: problem.name,
                difficulty: problem.rating,
            })
            .collect();
        log::info!("Problems of contest {} retrieved", contest.id);

        Some(ContestProblems { contest, problems })
    }
}
