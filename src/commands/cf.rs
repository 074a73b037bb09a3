use crate::{Context, Error};

use crate::commands::contests::{contests, next};
use crate::commands::help::help;
use crate::commands::problems::problems;
use crate::commands::rating::{change, rating};
use crate::commands::update::update;
use crate::commands::watch::{add, handles, remove};

#[poise::command(
    prefix_command,
    slash_command,
    subcommands("contests", "next", "rating", "change", "problems", "update", "add", "remove", "handles", "help")
)]
pub async fn cf(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}
