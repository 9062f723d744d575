//! Corpus loading.
//!
//! A corpus file is a JSON object mapping conversation ids to ordered
//! utterances:
//!
//! ```json
//! {"c1": [{"langs": ["1", "1", "0", "0"], "cs": [1]}]}
//! ```
//!
//! Conversations keep file order so every pass over the corpus is
//! deterministic.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::tags::Tag;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Utterance {
    /// One language tag per token.
    pub langs: Vec<Tag>,
    /// Annotated code-switch events (`1` or `2`; other values are ignored by the tallies).
    pub cs: Vec<i64>,
}

impl Utterance {
    pub fn new(langs: Vec<Tag>, cs: Vec<i64>) -> Self {
        Utterance { langs, cs }
    }

    pub fn len(&self) -> usize {
        self.langs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.langs.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    conversations: IndexMap<String, Vec<Utterance>>,
}

impl Corpus {
    /// Read and parse a corpus file. Both I/O failures and malformed
    /// records (missing `langs`/`cs`) abort the load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus: Corpus = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded {}: {} conversations, {} utterances",
            path.display(),
            corpus.conversation_count(),
            corpus.utterance_count()
        );
        Ok(corpus)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| Error::Json {
            path: "<memory>".into(),
            source,
        })
    }

    pub fn from_conversations<I, K>(conversations: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<Utterance>)>,
        K: Into<String>,
    {
        Corpus {
            conversations: conversations
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    pub fn conversations(&self) -> impl Iterator<Item = (&str, &[Utterance])> {
        self.conversations
            .iter()
            .map(|(id, utts)| (id.as_str(), utts.as_slice()))
    }

    /// All utterances, conversation by conversation, in file order.
    pub fn utterances(&self) -> impl Iterator<Item = &Utterance> {
        self.conversations.values().flatten()
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    pub fn utterance_count(&self) -> usize {
        self.conversations.values().map(Vec::len).sum()
    }

    pub fn token_count(&self) -> usize {
        self.utterances().map(Utterance::len).sum()
    }
}
