pub mod cf;

pub mod contests;
pub mod help;
pub mod problems;
pub mod rating;
pub mod update;
pub mod watch;

use crate::{Context, Error};

/// Discord rejects messages longer than this many characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Splits a reply on line boundaries into chunks Discord will accept.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = vec![];
    let mut current = String::new();
    for line in text.lines() {
        let mut line = line.to_string();
        // a single overlong line is cut on char boundaries
        while line.chars().count() > limit {
            let head: String = line.chars().take(limit).collect();
            line = line.chars().skip(limit).collect();
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.push(head);
        }
        let needed = if current.is_empty() { line.chars().count() } else { current.chars().count() + 1 + line.chars().count() };
        if needed > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(&line);
    }
    if !current.trim().is_empty() {
        chunks.push(current);
    }
    chunks
}

pub async fn say_chunked(ctx: Context<'_>, text: &str) -> Result<(), Error> {
    for chunk in split_message(text, MESSAGE_LIMIT) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
