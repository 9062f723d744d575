//! Windowed association between shared tokens and nearby switches.
//!
//! Every interior token of every utterance (first and last excluded) is
//! classified twice: is its normalized tag in the shared set, and does a
//! switch of a wanted direction occur within `gap` tokens in the wanted
//! area. The resulting 2x2 table feeds a Fisher exact test and a relative
//! rate `P(near | shared) / P(near | not shared)`.

use log::debug;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::stats::fisher_exact;
use crate::switches::switch_events;
use crate::tags::{Area, Direction, DirectionSet, SIGNIFICANCE_LEVEL, SharedSet, Tag};

/// One point of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestConfig {
    pub gap: usize,
    pub area: Area,
    pub shared: SharedSet,
    pub directions: DirectionSet,
}

impl TestConfig {
    fn validate(&self) -> Result<()> {
        if self.gap == 0 {
            return Err(Error::InvalidGap(self.gap));
        }
        if self.shared.is_empty() {
            return Err(Error::EmptySharedSet);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    pub shared_near: u64,
    pub other_near: u64,
    pub shared_far: u64,
    pub other_far: u64,
}

impl ContingencyTable {
    pub fn total(&self) -> u64 {
        self.shared_near + self.other_near + self.shared_far + self.other_far
    }

    /// `[[shared near, shared far], [other near, other far]]`
    pub fn as_matrix(&self) -> [[u64; 2]; 2] {
        [
            [self.shared_near, self.shared_far],
            [self.other_near, self.other_far],
        ]
    }

    fn add(&mut self, shared: bool, near: bool) {
        match (shared, near) {
            (true, true) => self.shared_near += 1,
            (false, true) => self.other_near += 1,
            (true, false) => self.shared_far += 1,
            (false, false) => self.other_far += 1,
        }
    }

    /// `P(near | shared) / P(near | not shared)`.
    ///
    /// Undefined when either row is empty or no non-shared token is near a
    /// switch; that is reported as an error rather than a NaN/inf.
    pub fn relative_rate(&self) -> Result<f64> {
        let shared_total = self.shared_near + self.shared_far;
        let other_total = self.other_near + self.other_far;
        if shared_total == 0 || other_total == 0 || self.other_near == 0 {
            return Err(Error::UndefinedRate {
                shared_near: self.shared_near,
                shared_far: self.shared_far,
                other_near: self.other_near,
                other_far: self.other_far,
            });
        }
        let shared_rate = self.shared_near as f64 / shared_total as f64;
        let other_rate = self.other_near as f64 / other_total as f64;
        Ok(shared_rate / other_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    pub p_value: f64,
    pub odds_ratio: Option<f64>,
    pub relative_rate: f64,
    pub table: ContingencyTable,
}

impl TestResult {
    pub fn significant(&self) -> bool {
        self.p_value <= SIGNIFICANCE_LEVEL
    }
}

/// Is there a wanted switch within `gap` tokens of `ind` on the `area` side(s)?
/// Windows are clipped to the sequence.
pub fn near_switch(
    switches: &[Option<Direction>],
    ind: usize,
    gap: usize,
    area: Area,
    directions: DirectionSet,
) -> bool {
    let hit = |k: usize| switches[k].is_some_and(|d| directions.contains(d));
    let before = || (ind.saturating_sub(gap)..ind).any(hit);
    let end = switches.len().min(ind.saturating_add(gap).saturating_add(1));
    let after = || (ind + 1..end).any(hit);
    match area {
        Area::Before => before(),
        Area::After => after(),
        Area::Around => before() || after(),
    }
}

#[derive(Debug, Clone)]
struct PreparedUtterance {
    tags: Vec<Tag>,
    switches: Vec<Option<Direction>>,
}

/// A corpus with every utterance normalized and switch-marked once, ready
/// to be tested under many configurations.
#[derive(Debug, Clone)]
pub struct SwitchTester {
    utterances: Vec<PreparedUtterance>,
}

impl SwitchTester {
    /// Fails on the first empty utterance.
    pub fn new(corpus: &Corpus) -> Result<Self> {
        let utterances = corpus
            .utterances()
            .map(|utt| {
                let tags = normalize(&utt.langs)?;
                let switches = switch_events(&tags);
                Ok(PreparedUtterance { tags, switches })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SwitchTester { utterances })
    }

    /// Number of interior tokens (after normalization) across the corpus.
    pub fn interior_tokens(&self) -> u64 {
        self.utterances
            .iter()
            .map(|u| u.tags.len().saturating_sub(2) as u64)
            .sum()
    }

    pub fn count_table(&self, config: &TestConfig) -> Result<ContingencyTable> {
        config.validate()?;
        let mut table = ContingencyTable::default();
        for utt in &self.utterances {
            let len = utt.tags.len();
            for ind in 1..len.saturating_sub(1) {
                let shared = config.shared.contains(utt.tags[ind]);
                let near = near_switch(&utt.switches, ind, config.gap, config.area, config.directions);
                table.add(shared, near);
            }
        }
        Ok(table)
    }

    pub fn test(&self, config: &TestConfig) -> Result<TestResult> {
        let table = self.count_table(config)?;
        let fisher = fisher_exact(table.as_matrix())?;
        let relative_rate = table.relative_rate()?;
        debug!(
            "gap={} area={:?} shared={} directions={:?}: {:?} rr={:.4} p={:.4e}",
            config.gap,
            config.area,
            config.shared.label(),
            config.directions,
            table,
            relative_rate,
            fisher.p_value
        );
        Ok(TestResult {
            p_value: fisher.p_value,
            odds_ratio: fisher.odds_ratio,
            relative_rate,
            table,
        })
    }
}

/// One-off test on a corpus. Prefer [`SwitchTester`] for sweeps.
pub fn test(corpus: &Corpus, config: &TestConfig) -> Result<TestResult> {
    SwitchTester::new(corpus)?.test(config)
}
