use crate::codeforces::problems::ProblemSetFetcher;
use crate::commands::say_chunked;
use crate::utils::format::problem_set;
use crate::{Context, Error};
use std::sync::Arc;

/// Show the problems of a Codeforces contest.
#[poise::command(prefix_command, slash_command)]
pub async fn problems(
    ctx: Context<'_>,
    #[description = "contest id"] contest_id: i64,
) -> Result<(), Error> {
    ctx.defer().await?;
    let api = Arc::clone(&ctx.data().api);
    let result = tokio::task::spawn_blocking(move || ProblemSetFetcher::new(&api).contest_problems(contest_id)).await?;
    match result {
        Some(set) => say_chunked(ctx, &problem_set(&set)).await,
        None => {
            ctx.say("Failed to fetch the problems, check that the contest id is valid.").await?;
            Ok(())
        }
    }
}
