use super::api::{ApiClient, Result};
use super::types::{Handle, RatingChange, RatingChangeJson};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrder {
    /// Ascending by `old - new`: the biggest gain leads and the biggest drop comes last.
    ByRatingDrop,
    ByRank,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingChangeReport {
    /// Deltas of the anchor contest; every entry has the same contest id.
    pub changes: Vec<RatingChange>,
    /// Handles that produced no usable history.
    pub skipped: Vec<String>,
}

impl RatingChangeReport {
    pub fn contest_name(&self) -> Option<&str> {
        self.changes.first().map(|change| change.contest_name.as_str())
    }
}

pub struct RatingChangeAggregator<'a> {
    api: &'a ApiClient,
}

impl<'a> RatingChangeAggregator<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        RatingChangeAggregator { api }
    }

    pub fn fetch_history(&self, handle: &Handle) -> Result<Vec<RatingChangeJson>> {
        self.api.call("user.rating", &[("handle", handle.to_string())])
    }

    /// Deltas of the contest the group was most recently rated in.
    ///
    /// A handle whose own latest contest is not that contest is left out.
    pub fn latest_shared_contest_changes(&self, handles: &[Handle], order: ChangeOrder) -> RatingChangeReport {
        let mut latest = Vec::with_capacity(handles.len());
        let mut skipped = Vec::new();

        for handle in handles {
            log::info!("Fetch rating history of {}", handle);
            match self.fetch_history(handle) {
                Ok(history) => match history.into_iter().max_by_key(|record| record.rating_update_time_seconds) {
                    Some(record) => latest.push(record),
                    None => {
                        log::info!("{} has no rated contests", handle);
                        skipped.push(handle.to_string());
                    }
                },
                Err(e) => {
                    log::warn!("skip {}: {}", handle, e);
                    skipped.push(handle.to_string());
                }
            }
        }

        let mut changes = select_anchor_changes(latest);
        sort_changes(&mut changes, order);
        RatingChangeReport { changes, skipped }
    }
}

/// Picks the anchor contest out of per-handle latest records and keeps only its entries.
///
/// Handles are reported the way Codeforces spells them, not as they were typed.
/// The anchor is the record with the greatest update time, ties going to the larger
/// contest id, so the result does not depend on the order handles were fetched in.
pub fn select_anchor_changes(latest: Vec<RatingChangeJson>) -> Vec<RatingChange> {
    let anchor = latest
        .iter()
        .map(|record| (record.rating_update_time_seconds, record.contest_id))
        .max();
    let Some((_, anchor_id)) = anchor else {
        return Vec::new();
    };

    latest
        .into_iter()
        .filter(|record| record.contest_id == anchor_id)
        .map(|record| RatingChange {
            contest_id: record.contest_id,
            contest_name: record.contest_name,
            handle: record.handle,
            rank: record.rank,
            old_rating: record.old_rating,
            new_rating: record.new_rating,
        })
        .collect()
}

pub fn sort_changes(changes: &mut [RatingChange], order: ChangeOrder) {
    match order {
        ChangeOrder::ByRatingDrop => changes.sort_by_key(|change| change.old_rating - change.new_rating),
        ChangeOrder::ByRank => changes.sort_by_key(|change| change.rank),
    }
}
