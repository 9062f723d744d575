//! Label normalization.
//!
//! Shared tokens are annotated per word, so a multi-word shared expression
//! shows up as a run of shared tags. Before switch detection the runs are
//! collapsed and ambiguous Shared-Other tags are folded into a neighbouring
//! Shared-Arabic/Shared-English tag. The stages run in a fixed order:
//!
//! 1. [`collapse_shared_runs`]
//! 2. [`absorb_other_after_named`]
//! 3. [`absorb_other_before_named`]

use crate::error::{Error, Result};
use crate::tags::Tag;

/// Canonicalize one utterance's tag sequence.
///
/// The output is a subsequence of the input (nothing is reordered or
/// inserted). Fails on an empty sequence.
pub fn normalize(tags: &[Tag]) -> Result<Vec<Tag>> {
    if tags.is_empty() {
        return Err(Error::EmptyUtterance);
    }
    let collapsed = collapse_shared_runs(tags);
    let absorbed = absorb_other_after_named(&collapsed);
    Ok(absorb_other_before_named(&absorbed))
}

/// Stage 1: drop a shared tag equal to the tag right before it in `tags`.
/// Different shared categories are left alone.
pub fn collapse_shared_runs(tags: &[Tag]) -> Vec<Tag> {
    let mut out = Vec::with_capacity(tags.len());
    for (i, &tag) in tags.iter().enumerate() {
        if i > 0 && tag.is_shared() && tags[i - 1] == tag {
            continue;
        }
        out.push(tag);
    }
    out
}

/// Stage 2: drop Shared-Other when it directly follows a named shared tag.
pub fn absorb_other_after_named(tags: &[Tag]) -> Vec<Tag> {
    let mut out = Vec::with_capacity(tags.len());
    for (i, &tag) in tags.iter().enumerate() {
        if i > 0 && tag == Tag::SharedOther && tags[i - 1].is_named_shared() {
            continue;
        }
        out.push(tag);
    }
    out
}

/// Stage 3: drop Shared-Other when it directly precedes a named shared tag.
/// The last tag is always kept.
pub fn absorb_other_before_named(tags: &[Tag]) -> Vec<Tag> {
    let mut out = Vec::with_capacity(tags.len());
    for (i, &tag) in tags.iter().enumerate() {
        let absorbed = tag == Tag::SharedOther
            && tags.get(i + 1).is_some_and(|next| next.is_named_shared());
        if !absorbed {
            out.push(tag);
        }
    }
    out
}
