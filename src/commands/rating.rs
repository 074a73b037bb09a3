use crate::codeforces::rating_changes::{sort_changes, ChangeOrder};
use crate::codeforces::ratings::{sort_users, StandingsOrder};
use crate::commands::say_chunked;
use crate::utils::format::{rating_change_report, standings_lines, updated_footer};
use crate::{Context, Error};

#[derive(Debug, poise::ChoiceParameter)]
pub enum RatingOrderChoice {
    #[name = "Rating"]
    Rating,
    #[name = "Handle"]
    Handle,
}

#[derive(Debug, poise::ChoiceParameter)]
pub enum ChangeOrderChoice {
    #[name = "Delta"]
    Delta,
    #[name = "Rank"]
    Rank,
}

/// Show current ratings of the watched handles.
#[poise::command(prefix_command, slash_command)]
pub async fn rating(
    ctx: Context<'_>,
    #[description = "sort order"] order: Option<RatingOrderChoice>,
) -> Result<(), Error> {
    let order = match order {
        Some(RatingOrderChoice::Handle) => StandingsOrder::ByHandle,
        _ => StandingsOrder::ByRating,
    };
    let text = {
        let cache = ctx.data().cache.lock().await;
        let body = match cache.snapshot() {
            None => "No data yet, try `/cf update`.".to_string(),
            Some(snapshot) if snapshot.standings.users.is_empty() => "No rated users on the watch list.".to_string(),
            Some(snapshot) => {
                let mut users = snapshot.standings.users.clone();
                sort_users(&mut users, order);
                standings_lines(&users, &snapshot.changes.changes)
            }
        };
        format!("{}\n\n{}", body, updated_footer(cache.last_success_time()))
    };
    say_chunked(ctx, &text).await
}

/// Show how the watched handles did in their latest shared contest.
#[poise::command(prefix_command, slash_command)]
pub async fn change(
    ctx: Context<'_>,
    #[description = "sort order"] order: Option<ChangeOrderChoice>,
) -> Result<(), Error> {
    let order = match order {
        Some(ChangeOrderChoice::Rank) => ChangeOrder::ByRank,
        _ => ChangeOrder::ByRatingDrop,
    };
    let text = {
        let cache = ctx.data().cache.lock().await;
        let report = cache.snapshot().map(|snapshot| {
            let mut report = snapshot.changes.clone();
            sort_changes(&mut report.changes, order);
            report
        });
        let body = report
            .as_ref()
            .and_then(rating_change_report)
            .unwrap_or_else(|| "No information.".to_string());
        format!("{}\n\n{}", body, updated_footer(cache.last_success_time()))
    };
    say_chunked(ctx, &text).await
}
