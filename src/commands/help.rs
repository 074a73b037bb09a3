use crate::{Context, Error};
use serde::Deserialize;

use poise::serenity_prelude as serenity;

#[derive(Deserialize, Debug)]
struct CommandDescription {
    usage: String,
    description: Vec<String>,
}

/// Display a list of all available commands and their usage.
#[poise::command(prefix_command, slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let help_obj: Vec<CommandDescription> = serde_json::from_str(include_str!("../assets/commands.json"))?;

    let mut embed = serenity::CreateEmbed::default().title("help");
    for i in help_obj {
        embed = embed.field(i.usage, i.description.join("\n"), false);
    }

    let response = poise::CreateReply::default().embed(embed).ephemeral(true);

    ctx.send(response).await?;

    Ok(())
}
