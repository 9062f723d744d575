//! Tag alphabet and the fixed labels shared by counting, testing and plotting.
//!
//! Codes are compared by equality only. The alphabet is:
//!
//! | code | tag            |
//! |------|----------------|
//! | `0`  | Arabizi (first core language) |
//! | `1`  | English (second core language) |
//! | `2`  | French         |
//! | `3`  | Arabic script  |
//! | `4`  | Shared-Other (tallied as "Other" among languages) |
//! | `6`  | Shared-Arabic  |
//! | `7`  | Shared-English |
//!
//! Anything else (including the unused slot `5`) is [`Tag::Unknown`].

use serde::{Deserialize, Serialize};

/// Name of the corpus' non-English core language as it appears in labels.
pub const SECOND_LANG: &str = "Arabic";

/// p-values at or below this are marked significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Relative rate under the null hypothesis.
pub const NULL_RATE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Tag {
    Arabizi,
    English,
    French,
    Arabic,
    SharedOther,
    SharedArabic,
    SharedEnglish,
    Unknown,
}

impl Tag {
    pub fn from_code(code: &str) -> Tag {
        match code {
            "0" => Tag::Arabizi,
            "1" => Tag::English,
            "2" => Tag::French,
            "3" => Tag::Arabic,
            "4" => Tag::SharedOther,
            "6" => Tag::SharedArabic,
            "7" => Tag::SharedEnglish,
            _ => Tag::Unknown,
        }
    }

    pub fn code(self) -> Option<&'static str> {
        match self {
            Tag::Arabizi => Some("0"),
            Tag::English => Some("1"),
            Tag::French => Some("2"),
            Tag::Arabic => Some("3"),
            Tag::SharedOther => Some("4"),
            Tag::SharedArabic => Some("6"),
            Tag::SharedEnglish => Some("7"),
            Tag::Unknown => None,
        }
    }

    /// Parse a sequence of raw codes.
    pub fn parse_all<S: AsRef<str>>(codes: &[S]) -> Vec<Tag> {
        codes.iter().map(|c| Tag::from_code(c.as_ref())).collect()
    }

    pub fn shared_kind(self) -> Option<SharedKind> {
        match self {
            Tag::SharedOther => Some(SharedKind::Other),
            Tag::SharedEnglish => Some(SharedKind::English),
            Tag::SharedArabic => Some(SharedKind::Arabic),
            _ => None,
        }
    }

    pub fn is_shared(self) -> bool {
        self.shared_kind().is_some()
    }

    /// Shared-Arabic or Shared-English, i.e. a shared tag tied to a core language.
    pub fn is_named_shared(self) -> bool {
        matches!(self, Tag::SharedArabic | Tag::SharedEnglish)
    }

    /// One of the two languages whose alternation counts as a switch.
    pub fn is_core(self) -> bool {
        matches!(self, Tag::Arabizi | Tag::English)
    }

    /// Language category used by the token tallies. Code `4` doubles as "Other".
    pub fn language(self) -> Option<Language> {
        match self {
            Tag::Arabizi => Some(Language::Arabizi),
            Tag::English => Some(Language::English),
            Tag::French => Some(Language::French),
            Tag::Arabic => Some(Language::Arabic),
            Tag::SharedOther => Some(Language::Other),
            _ => None,
        }
    }
}

impl From<String> for Tag {
    fn from(code: String) -> Self {
        Tag::from_code(&code)
    }
}

impl From<&str> for Tag {
    fn from(code: &str) -> Self {
        Tag::from_code(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Arabizi,
    English,
    French,
    Arabic,
    Other,
}

impl Language {
    /// Report order.
    pub const ALL: [Language; 5] = [
        Language::Arabizi,
        Language::English,
        Language::French,
        Language::Arabic,
        Language::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::Arabizi => "Arabizi",
            Language::English => "English",
            Language::French => "French",
            Language::Arabic => "Arabic",
            Language::Other => "Other",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SharedKind {
    Other,
    English,
    Arabic,
}

impl SharedKind {
    /// Report order.
    pub const ALL: [SharedKind; 3] = [SharedKind::Other, SharedKind::English, SharedKind::Arabic];

    pub fn label(self) -> &'static str {
        match self {
            SharedKind::Other => "Shared Other",
            SharedKind::English => "Shared English",
            SharedKind::Arabic => "Shared Arabic",
        }
    }

    pub fn tag(self) -> Tag {
        match self {
            SharedKind::Other => Tag::SharedOther,
            SharedKind::English => Tag::SharedEnglish,
            SharedKind::Arabic => Tag::SharedArabic,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Direction of a code-switch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// English followed by the second language (event code `1`).
    EnglishToSecond,
    /// Second language followed by English (event code `2`).
    SecondToEnglish,
}

impl Direction {
    pub fn from_code(code: i64) -> Option<Direction> {
        match code {
            1 => Some(Direction::EnglishToSecond),
            2 => Some(Direction::SecondToEnglish),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::EnglishToSecond => 1,
            Direction::SecondToEnglish => 2,
        }
    }

    pub fn label(self) -> String {
        match self {
            Direction::EnglishToSecond => format!("English->{SECOND_LANG}"),
            Direction::SecondToEnglish => format!("{SECOND_LANG}->English"),
        }
    }
}

/// Which switch directions a proximity test looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectionSet {
    Both,
    Only(Direction),
}

impl DirectionSet {
    /// Plot order.
    pub const ALL: [DirectionSet; 3] = [
        DirectionSet::Both,
        DirectionSet::Only(Direction::EnglishToSecond),
        DirectionSet::Only(Direction::SecondToEnglish),
    ];

    pub fn contains(self, direction: Direction) -> bool {
        match self {
            DirectionSet::Both => true,
            DirectionSet::Only(d) => d == direction,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DirectionSet::Both => "All Switches",
            DirectionSet::Only(Direction::EnglishToSecond) => "EN->AR Switches",
            DirectionSet::Only(Direction::SecondToEnglish) => "AR->EN Switches",
        }
    }

    /// Line color as RGB.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            DirectionSet::Both => (0x8A, 0xC9, 0x26),
            DirectionSet::Only(Direction::EnglishToSecond) => (0xFF, 0xCA, 0x3A),
            DirectionSet::Only(Direction::SecondToEnglish) => (0xFF, 0x59, 0x5E),
        }
    }
}

/// Where a switch must lie, relative to a token, to count as "near".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Area {
    /// Switch within `gap` tokens before the token.
    Before,
    /// Switch within `gap` tokens on either side.
    Around,
    /// Switch within `gap` tokens after the token.
    After,
}

impl Area {
    /// Areas drawn on the propensity plots.
    pub const PLOTTED: [Area; 2] = [Area::After, Area::Around];

    pub fn label(self) -> &'static str {
        match self {
            Area::Before => "Preceding",
            Area::Around => "Near",
            Area::After => "Following",
        }
    }

    pub fn dashed(self) -> bool {
        matches!(self, Area::Around)
    }
}

/// Which shared categories count as "shared" in a proximity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharedSet {
    kinds: [bool; 3],
}

impl SharedSet {
    pub const ALL_SHARED: SharedSet = SharedSet { kinds: [true; 3] };
    pub const OTHER: SharedSet = SharedSet {
        kinds: [true, false, false],
    };
    pub const ENGLISH: SharedSet = SharedSet {
        kinds: [false, true, false],
    };
    pub const ARABIC: SharedSet = SharedSet {
        kinds: [false, false, true],
    };

    /// Plot order.
    pub const PLOTTED: [SharedSet; 4] = [
        SharedSet::ALL_SHARED,
        SharedSet::ENGLISH,
        SharedSet::ARABIC,
        SharedSet::OTHER,
    ];

    pub fn of(kinds: &[SharedKind]) -> SharedSet {
        let mut set = SharedSet { kinds: [false; 3] };
        for kind in kinds {
            set.kinds[kind.index()] = true;
        }
        set
    }

    pub fn is_empty(self) -> bool {
        !self.kinds.iter().any(|&k| k)
    }

    pub fn kinds(self) -> impl Iterator<Item = SharedKind> {
        SharedKind::ALL
            .into_iter()
            .filter(move |k| self.kinds[k.index()])
    }

    pub fn contains(self, tag: Tag) -> bool {
        tag.shared_kind().is_some_and(|k| self.kinds[k.index()])
    }

    pub fn label(self) -> String {
        if self == SharedSet::ALL_SHARED {
            return "All Shared Items".to_string();
        }
        self.kinds()
            .map(|k| k.label().replace(' ', "-"))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// File-name fragment.
    pub fn slug(self) -> String {
        if self == SharedSet::ALL_SHARED {
            return "all_shared".to_string();
        }
        self.kinds()
            .map(|k| k.label().to_lowercase().replace(' ', "_"))
            .collect::<Vec<_>>()
            .join("_")
    }
}
