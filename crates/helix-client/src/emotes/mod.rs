//! Chat emote offsets.
//!
//! Chat metadata carries emote placements as a compact string:
//! `<emote id>:<start>-<end>,<start>-<end>/<emote id>:...`.
//! Entries that do not fit that shape are dropped rather than reported.

mod offsets;

pub use offsets::{EmoteOffsets, EmoteToken, parse_emote_offsets, parse_placement_range};
