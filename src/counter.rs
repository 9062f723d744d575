//! Corpus-wide tallies for the summary report.

use crate::corpus::{Corpus, Utterance};
use crate::tags::{Direction, Language, SharedKind, Tag};

/// Running totals from one pass over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTotals {
    pub sentences: u64,
    pub tokens: u64,
    /// Annotated switch events of either direction.
    pub switches_both: u64,
    switches: [u64; 2],
    languages: [u64; 5],
    shared: [u64; 3],
    /// Tokens whose tag has no language category (named shared tags, unknown codes).
    pub uncategorized: u64,
    /// Shared-English directly next to Shared-Arabic after run merging.
    /// Tallied but not printed in the report.
    pub shared_expressions: u64,
}

impl ReportTotals {
    pub fn switches(&self, direction: Direction) -> u64 {
        self.switches[direction.code() as usize - 1]
    }

    pub fn language(&self, language: Language) -> u64 {
        self.languages[language.index()]
    }

    pub fn shared(&self, kind: SharedKind) -> u64 {
        self.shared[kind.index()]
    }

    /// Sum over the shared categories ("All Shared" in the report).
    pub fn all_shared(&self) -> u64 {
        self.shared.iter().sum()
    }

    /// Fold one utterance into the totals.
    pub fn add_utterance(&mut self, utterance: &Utterance) {
        self.sentences += 1;
        self.count_switches(&utterance.cs);
        self.tokens += utterance.langs.len() as u64;
        self.count_languages(&utterance.langs);
        self.count_shared_expressions(&utterance.langs);
    }

    fn count_switches(&mut self, events: &[i64]) {
        for direction in events.iter().filter_map(|&code| Direction::from_code(code)) {
            self.switches[direction.code() as usize - 1] += 1;
            self.switches_both += 1;
        }
    }

    fn count_languages(&mut self, tags: &[Tag]) {
        for tag in tags {
            match tag.language() {
                Some(language) => self.languages[language.index()] += 1,
                None => self.uncategorized += 1,
            }
        }
    }

    fn count_shared_expressions(&mut self, tags: &[Tag]) {
        let merged = merge_shared_expressions(tags);
        for (i, tag) in merged.iter().enumerate() {
            let Some(kind) = tag.shared_kind() else {
                continue;
            };
            self.shared[kind.index()] += 1;
            if i > 0 && is_cross_named_pair(merged[i - 1], *tag) {
                self.shared_expressions += 1;
            }
        }
    }
}

fn is_cross_named_pair(prev: Tag, cur: Tag) -> bool {
    matches!(
        (prev, cur),
        (Tag::SharedEnglish, Tag::SharedArabic) | (Tag::SharedArabic, Tag::SharedEnglish)
    )
}

/// Merge multi-token shared expressions: first English-side runs
/// (Shared-English/Shared-Other), then Arabic-side runs (Shared-Arabic/Shared-Other)
/// on the already merged list.
pub fn merge_shared_expressions(tags: &[Tag]) -> Vec<Tag> {
    let english = join_same(tags, Tag::SharedEnglish, Tag::SharedOther);
    join_same(&english, Tag::SharedArabic, Tag::SharedOther)
}

/// Drop every tag in `{a, b}` whose predecessor (in `tags`) is also in `{a, b}`.
pub fn join_same(tags: &[Tag], a: Tag, b: Tag) -> Vec<Tag> {
    let in_group = |t: Tag| t == a || t == b;
    tags.iter()
        .enumerate()
        .filter(|&(i, &tag)| !(i > 0 && in_group(tag) && in_group(tags[i - 1])))
        .map(|(_, &tag)| tag)
        .collect()
}

/// Single pass over every utterance, conversation order then utterance order.
pub fn count_all(corpus: &Corpus) -> ReportTotals {
    let mut totals = ReportTotals::default();
    for utterance in corpus.utterances() {
        totals.add_utterance(utterance);
    }
    totals
}
