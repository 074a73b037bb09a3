use crate::codeforces::contests::{select_upcoming, NEXT_CONTEST_WINDOW_HOURS};
use crate::commands::{now, say_chunked};
use crate::utils::format::{contest_block, contest_list, updated_footer};
use crate::{Context, Error};

/// Show Codeforces contests starting within the next hours.
#[poise::command(prefix_command, slash_command)]
pub async fn contests(
    ctx: Context<'_>,
    #[description = "hours ahead, at most 168"] hours: Option<i64>,
) -> Result<(), Error> {
    // the cached list only reaches a week ahead
    let hours = hours.unwrap_or(ctx.data().contest_window_hours).clamp(1, NEXT_CONTEST_WINDOW_HOURS);
    let text = {
        let cache = ctx.data().cache.lock().await;
        let body = match cache.snapshot() {
            None => "No data yet, try `/cf update`.".to_string(),
            Some(snapshot) => {
                let now = now();
                let upcoming = select_upcoming(&snapshot.upcoming, hours, now);
                if upcoming.is_empty() {
                    format!("No Codeforces contests in the next {} hours.", hours)
                } else {
                    contest_list(&upcoming, now)
                }
            }
        };
        format!("{}\n\n{}", body, updated_footer(cache.last_success_time()))
    };
    say_chunked(ctx, &text).await
}

/// Show the next Codeforces contest within a week.
#[poise::command(prefix_command, slash_command)]
pub async fn next(ctx: Context<'_>) -> Result<(), Error> {
    let text = {
        let cache = ctx.data().cache.lock().await;
        let now = now();
        let body = match cache
            .snapshot()
            .and_then(|snapshot| select_upcoming(&snapshot.upcoming, NEXT_CONTEST_WINDOW_HOURS, now).into_iter().next())
        {
            Some(contest) => contest_block(&contest, now),
            None => "No Codeforces contests in the next 7 days.".to_string(),
        };
        format!("{}\n\n{}", body, updated_footer(cache.last_success_time()))
    };
    say_chunked(ctx, &text).await
}
