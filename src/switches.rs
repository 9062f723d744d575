//! Switch detection on normalized tag sequences.

use crate::tags::{Direction, Tag};

/// Mark each position where the core language changes.
///
/// Only the two core languages (English and Arabizi) are tracked; every
/// other tag is transparent, so `English, Shared, Arabizi` still yields a
/// switch on the Arabizi token. The output has one entry per input tag.
pub fn detect_switches(tags: &[Tag]) -> Vec<Option<Direction>> {
    let mut last_core: Option<Tag> = None;
    tags.iter()
        .map(|&tag| {
            let event = match (last_core, tag) {
                (Some(Tag::English), Tag::Arabizi) => Some(Direction::EnglishToSecond),
                (Some(Tag::Arabizi), Tag::English) => Some(Direction::SecondToEnglish),
                _ => None,
            };
            if tag.is_core() {
                last_core = Some(tag);
            }
            event
        })
        .collect()
}

/// Keep only the first of two switches on adjacent tokens.
///
/// Sweeps left to right over the already-updated sequence, so in a run of
/// switches every second one survives.
pub fn suppress_adjacent(switches: &mut [Option<Direction>]) {
    for i in 1..switches.len() {
        if switches[i].is_some() && switches[i - 1].is_some() {
            switches[i] = None;
        }
    }
}

/// [`detect_switches`] followed by [`suppress_adjacent`].
pub fn switch_events(tags: &[Tag]) -> Vec<Option<Direction>> {
    let mut switches = detect_switches(tags);
    suppress_adjacent(&mut switches);
    switches
}
