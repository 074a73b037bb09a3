use crate::codeforces::ratings::RatingBoard;
use crate::codeforces::types::Handle;
use crate::store::{AddOutcome, HandleStore, RemoveOutcome};
use crate::{Context, Error};
use std::sync::Arc;

/// Add handles to the watch list.
#[poise::command(prefix_command, slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "handles separated by spaces"] handles: String,
) -> Result<(), Error> {
    ctx.defer().await?;
    let api = Arc::clone(&ctx.data().api);
    let store = Arc::clone(&ctx.data().store);
    // each handle is checked against Codeforces, so the whole batch runs off the async threads
    let lines = tokio::task::spawn_blocking(move || {
        let board = RatingBoard::new(&api);
        let mut store = store.blocking_lock();
        handles
            .split_whitespace()
            .map(|raw| add_line(&board, &mut *store, raw))
            .collect::<Vec<String>>()
    })
    .await?;
    ctx.say(reply_text(lines)).await?;
    Ok(())
}

fn add_line(board: &RatingBoard, store: &mut impl HandleStore, raw: &str) -> String {
    let Ok(handle) = Handle::new(raw.to_string()) else {
        return format!("`{}` is not a valid handle", raw);
    };
    if store.get().iter().any(|h| h.matches(&handle)) {
        return format!("{} is already in the list", raw);
    }
    match board.handle_exists(&handle) {
        Ok(true) => {}
        Ok(false) => return format!("{} was not found on Codeforces", raw),
        Err(e) => {
            log::warn!("could not look up {}: {}", raw, e);
            return format!("Could not check {} on Codeforces, try again later", raw);
        }
    }
    match store.add(handle) {
        Ok(AddOutcome::Added) => format!("Welcome {}!", raw),
        Ok(AddOutcome::AlreadyPresent) => format!("{} is already in the list", raw),
        Err(e) => {
            log::error!("failed to save the watch list: {}", e);
            format!("Failed to save {}", raw)
        }
    }
}

/// Remove handles from the watch list.
#[poise::command(prefix_command, slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "handles separated by spaces"] handles: String,
) -> Result<(), Error> {
    let mut store = ctx.data().store.lock().await;
    let mut lines = vec![];
    for raw in handles.split_whitespace() {
        let Ok(handle) = Handle::new(raw.to_string()) else {
            lines.push(format!("{} is not in the list", raw));
            continue;
        };
        match store.remove(&handle) {
            Ok(RemoveOutcome::Removed) => lines.push(format!("Removed {}, see you!", raw)),
            Ok(RemoveOutcome::NotPresent) => lines.push(format!("{} is not in the list", raw)),
            Err(e) => {
                log::error!("failed to save the watch list: {}", e);
                lines.push(format!("Failed to save the removal of {}", raw));
            }
        }
    }
    drop(store);
    ctx.say(reply_text(lines)).await?;
    Ok(())
}

/// Show the watch list.
#[poise::command(prefix_command, slash_command)]
pub async fn handles(ctx: Context<'_>) -> Result<(), Error> {
    let handles = ctx.data().store.lock().await.get();
    let text = if handles.is_empty() {
        "The watch list is empty.".to_string()
    } else {
        handles.iter().map(|h| h.to_string()).collect::<Vec<String>>().join(", ")
    };
    ctx.say(text).await?;
    Ok(())
}

fn reply_text(lines: Vec<String>) -> String {
    if lines.is_empty() {
        "No handles given.".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeforces::api::testing::{ok, StaticFetcher};
    use crate::store::{StoreError, RemoveOutcome};

    #[derive(Default)]
    struct MemoryStore {
        handles: Vec<Handle>,
    }

    impl HandleStore for MemoryStore {
        fn get(&self) -> Vec<Handle> {
            self.handles.clone()
        }

        fn add(&mut self, handle: Handle) -> Result<AddOutcome, StoreError> {
            self.handles.push(handle);
            Ok(AddOutcome::Added)
        }

        fn remove(&mut self, _handle: &Handle) -> Result<RemoveOutcome, StoreError> {
            Ok(RemoveOutcome::NotPresent)
        }
    }

    #[test]
    fn test_unknown_handle_is_not_added() {
        let body = r#"{"status":"FAILED","comment":"handles: User with handle typo0 not found"}"#;
        let api = StaticFetcher::new()
            .route("user.info", &[("handles", "typo0")], 400, body)
            .route("user.info", &[("handles", "tourist")], 200, &ok(r#"[{"handle":"tourist","rating":3800,"rank":"legendary grandmaster"}]"#))
            .into_client();
        let board = RatingBoard::new(&api);
        let mut store = MemoryStore::default();

        assert_eq!(add_line(&board, &mut store, "typo0"), "typo0 was not found on Codeforces");
        assert!(store.get().is_empty());

        assert_eq!(add_line(&board, &mut store, "tourist"), "Welcome tourist!");
        assert_eq!(store.get().len(), 1);
    }

    #[test]
    fn test_duplicate_and_invalid_handles_skip_the_lookup() {
        let fetcher = StaticFetcher::new();
        let log = fetcher.request_log();
        let api = fetcher.into_client();
        let board = RatingBoard::new(&api);
        let mut store = MemoryStore {
            handles: vec![Handle::new("Petr".to_string()).unwrap()],
        };

        assert_eq!(add_line(&board, &mut store, "petr"), "petr is already in the list");
        assert_eq!(add_line(&board, &mut store, "has,comma"), "`has,comma` is not a valid handle");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_lookup_failure_is_reported_and_not_added() {
        let api = StaticFetcher::new().route("user.info", &[], 503, "").into_client();
        let board = RatingBoard::new(&api);
        let mut store = MemoryStore::default();
        assert_eq!(add_line(&board, &mut store, "tourist"), "Could not check tourist on Codeforces, try again later");
        assert!(store.get().is_empty());
    }
}
