use std::ops::RangeInclusive;

use indexmap::IndexMap;
use serde::Serialize;

/// One emote and where it is placed in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteToken {
    pub emote_id: String,
    /// Raw placement strings such as `"0-4"`, in message order.
    pub placements: Vec<String>,
}

/// Emote ID -> placements, in first-seen order.
///
/// A repeated emote ID replaces the placements stored for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmoteOffsets {
    entries: IndexMap<String, Vec<String>>,
}

impl EmoteOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the placements for `emote_id`.
    pub fn insert(&mut self, emote_id: String, placements: Vec<String>) {
        self.entries.insert(emote_id, placements);
    }

    /// Look up the placements for an emote ID.
    pub fn get(&self, emote_id: &str) -> Option<&[String]> {
        self.entries.get(emote_id).map(Vec::as_slice)
    }

    pub fn contains(&self, emote_id: &str) -> bool {
        self.entries.contains_key(emote_id)
    }

    /// `(emote_id, placements)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(id, placements)| (id.as_str(), placements.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for EmoteOffsets {
    type Item = EmoteToken;
    type IntoIter = std::iter::Map<
        indexmap::map::IntoIter<String, Vec<String>>,
        fn((String, Vec<String>)) -> EmoteToken,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let to_token: fn((String, Vec<String>)) -> EmoteToken = |(emote_id, placements)| EmoteToken {
            emote_id,
            placements,
        };
        self.entries.into_iter().map(to_token)
    }
}

/// Parse an emote offset string into an [`EmoteOffsets`] map.
///
/// Absent or empty input yields an empty map. Entries without a `:`
/// or with nothing after it are skipped. Placements are kept verbatim.
pub fn parse_emote_offsets(raw: Option<&str>) -> EmoteOffsets {
    let mut offsets = EmoteOffsets::new();
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return offsets;
    };

    for entry in raw.split('/') {
        // Only the first two `:`-separated fields count; anything after a second `:` is ignored.
        let mut fields = entry.split(':');
        let (Some(emote_id), Some(placements)) = (fields.next(), fields.next()) else {
            continue;
        };
        if placements.is_empty() {
            continue;
        }
        offsets.insert(
            emote_id.to_string(),
            placements.split(',').map(str::to_string).collect(),
        );
    }

    offsets
}

/// Parse a single `"start-end"` placement into an inclusive character range.
///
/// Returns `None` when either bound is not a number or `start > end`.
pub fn parse_placement_range(placement: &str) -> Option<RangeInclusive<usize>> {
    let (start, end) = placement.split_once('-')?;
    let start: usize = start.trim().parse().ok()?;
    let end: usize = end.trim().parse().ok()?;
    (start <= end).then_some(start..=end)
}
