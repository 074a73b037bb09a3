use crate::utils::format::format_timestamp;
use crate::{refresh_cache, Context, Error};

/// Refresh contests, ratings and rating changes now.
#[poise::command(prefix_command, slash_command)]
pub async fn update(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;
    match refresh_cache(ctx.data()).await {
        Ok(time) => {
            ctx.say(format!("Updated successfully at {}.", format_timestamp(time))).await?;
        }
        Err(e) => {
            log::error!("manual refresh failed: {}", e);
            ctx.say(format!("Update failed: {}", e)).await?;
        }
    }
    Ok(())
}
