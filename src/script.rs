//! Unicode script lookup over a static table of codepoint ranges.
//!
//! Ranges are half-open: `(start, end)` covers `start..end`. A [`ScriptTable`]
//! flattens the ranges of every descriptor into one sorted list and answers
//! lookups by binary search.

use alloc::boxed::Box;
use alloc::vec::Vec;

use once_cell::race::OnceBox;

use crate::error::ScriptError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Ltr,
    Rtl,
    Ttb,
}

/// Static record describing a writing system.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScriptDescriptor {
    pub name: &'static str,
    pub ranges: &'static [(u32, u32)],
    pub direction: Direction,
    /// Approximate year of origin; negative values are BCE.
    pub year: i32,
    pub living: bool,
    pub link: &'static str,
}

impl ScriptDescriptor {
    #[inline]
    pub fn contains(&self, codepoint: u32) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| start <= codepoint && codepoint < end)
    }
}

#[derive(Copy, Clone, Debug)]
struct RangeEntry {
    start: u32,
    end: u32,
    script: &'static ScriptDescriptor,
}

/// Sorted, disjoint codepoint ranges mapped back to their scripts.
#[derive(Clone, Debug)]
pub struct ScriptTable {
    entries: Vec<RangeEntry>,
}

/// Number of characters of one script found in a piece of text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptCount {
    pub script: &'static ScriptDescriptor,
    pub count: usize,
}

impl ScriptTable {
    /// Builds a lookup table, rejecting empty or overlapping ranges.
    pub fn new(scripts: &'static [ScriptDescriptor]) -> Result<Self, ScriptError> {
        let mut entries: Vec<RangeEntry> = scripts
            .iter()
            .flat_map(|script| {
                script
                    .ranges
                    .iter()
                    .map(move |&(start, end)| RangeEntry { start, end, script })
            })
            .collect();
        entries.sort_unstable_by_key(|entry| entry.start);

        let empty = entries.iter().find(|entry| entry.start >= entry.end);
        let overlap = entries
            .windows(2)
            .find(|pair| pair[1].start < pair[0].end)
            .map(|pair| &pair[1]);
        if let Some(bad) = empty.or(overlap) {
            tracing::debug!(
                script = bad.script.name,
                start = bad.start,
                end = bad.end,
                "rejected script range"
            );
            return Err(ScriptError::InvalidRange {
                script: bad.script.name,
                start: bad.start,
                end: bad.end,
            });
        }

        tracing::debug!(
            scripts = scripts.len(),
            ranges = entries.len(),
            "script table built"
        );
        Ok(Self { entries })
    }

    /// The built-in table over [`SCRIPTS`], built on first use.
    pub fn builtin() -> &'static ScriptTable {
        static BUILTIN: OnceBox<ScriptTable> = OnceBox::new();
        BUILTIN.get_or_init(|| {
            Box::new(ScriptTable::new(SCRIPTS).expect("built-in script ranges are disjoint"))
        })
    }

    /// Number of ranges in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, codepoint: u32) -> Option<&'static ScriptDescriptor> {
        let after = self
            .entries
            .partition_point(|entry| entry.start <= codepoint);
        let entry = self.entries[..after].last()?;
        (codepoint < entry.end).then_some(entry.script)
    }

    /// Per-script character counts in order of first appearance.
    ///
    /// Characters outside every range (spaces, digits, punctuation) are skipped.
    pub fn count_by_script(&self, text: &str) -> Vec<ScriptCount> {
        let mut counts: Vec<ScriptCount> = Vec::new();
        for script in text.chars().filter_map(|c| self.lookup(c as u32)) {
            match counts.iter_mut().find(|seen| seen.script == script) {
                Some(seen) => seen.count += 1,
                None => counts.push(ScriptCount { script, count: 1 }),
            }
        }
        counts
    }

    /// Writing direction covering the most characters of `text`.
    ///
    /// Ties go to the direction encountered first. `None` when no character
    /// belongs to a known script.
    pub fn dominant_direction(&self, text: &str) -> Option<Direction> {
        let mut totals: Vec<(Direction, usize)> = Vec::new();
        for ScriptCount { script, count } in self.count_by_script(text) {
            match totals.iter_mut().find(|(dir, _)| *dir == script.direction) {
                Some((_, total)) => *total += count,
                None => totals.push((script.direction, count)),
            }
        }
        totals
            .into_iter()
            .fold(None, |best: Option<(Direction, usize)>, (dir, total)| match best {
                Some((_, top)) if top >= total => best,
                _ => Some((dir, total)),
            })
            .map(|(dir, _)| dir)
    }
}

pub fn script_of(codepoint: u32) -> Option<&'static ScriptDescriptor> {
    ScriptTable::builtin().lookup(codepoint)
}

#[inline]
pub fn script_of_char(c: char) -> Option<&'static ScriptDescriptor> {
    script_of(c as u32)
}

pub fn count_by_script(text: &str) -> Vec<ScriptCount> {
    ScriptTable::builtin().count_by_script(text)
}

pub fn dominant_direction(text: &str) -> Option<Direction> {
    ScriptTable::builtin().dominant_direction(text)
}

pub static SCRIPTS: &[ScriptDescriptor] = &[
    ScriptDescriptor {
        name: "Latin",
        ranges: &[
            (65, 91),
            (97, 123),
            (170, 171),
            (186, 187),
            (192, 215),
            (216, 247),
            (248, 697),
            (736, 741),
            (7424, 7462),
            (7468, 7517),
            (7522, 7526),
            (7531, 7544),
            (7545, 7615),
            (7680, 7936),
            (8305, 8306),
            (8319, 8320),
            (8336, 8349),
            (8490, 8492),
            (8498, 8499),
            (8526, 8527),
            (8544, 8585),
            (11360, 11392),
            (42786, 42888),
            (42891, 42927),
            (42928, 42936),
            (42999, 43008),
            (43824, 43867),
            (43868, 43877),
            (64256, 64263),
            (65313, 65339),
            (65345, 65371),
        ],
        direction: Direction::Ltr,
        year: -700,
        living: false,
        link: "https://en.wikipedia.org/wiki/Latin_script",
    },
    ScriptDescriptor {
        name: "Greek",
        ranges: &[
            (880, 884),
            (885, 888),
            (890, 894),
            (895, 896),
            (900, 901),
            (902, 903),
            (904, 907),
            (908, 909),
            (910, 930),
            (931, 994),
            (1008, 1024),
            (7462, 7467),
            (7517, 7522),
            (7526, 7531),
            (7615, 7616),
            (7936, 7958),
            (7960, 7966),
            (7968, 8006),
            (8008, 8014),
            (8016, 8024),
            (8025, 8026),
            (8027, 8028),
            (8029, 8030),
            (8031, 8062),
            (8064, 8117),
            (8118, 8133),
            (8134, 8148),
            (8150, 8156),
            (8157, 8176),
            (8178, 8181),
            (8182, 8191),
            (8486, 8487),
            (43877, 43878),
            (65856, 65935),
            (65952, 65953),
            (119296, 119366),
        ],
        direction: Direction::Ltr,
        year: -750,
        living: true,
        link: "https://en.wikipedia.org/wiki/Greek_alphabet",
    },
    ScriptDescriptor {
        name: "Cyrillic",
        ranges: &[
            (1024, 1157),
            (1159, 1328),
            (7296, 7305),
            (7467, 7468),
            (7544, 7545),
            (11744, 11776),
            (42560, 42656),
            (65070, 65072),
        ],
        direction: Direction::Ltr,
        year: 950,
        living: true,
        link: "https://en.wikipedia.org/wiki/Cyrillic_script",
    },
    ScriptDescriptor {
        name: "Hebrew",
        ranges: &[
            (1425, 1480),
            (1488, 1515),
            (1520, 1525),
            (64285, 64311),
            (64312, 64317),
            (64318, 64319),
            (64320, 64322),
            (64323, 64325),
            (64326, 64336),
        ],
        direction: Direction::Rtl,
        year: -1000,
        living: true,
        link: "https://en.wikipedia.org/wiki/Hebrew_alphabet",
    },
    ScriptDescriptor {
        name: "Arabic",
        ranges: &[
            (1536, 1541),
            (1542, 1548),
            (1549, 1563),
            (1566, 1567),
            (1568, 1600),
            (1601, 1611),
            (1622, 1648),
            (1649, 1757),
            (1758, 1792),
            (1872, 1920),
            (2208, 2229),
            (2230, 2238),
            (2260, 2274),
            (2275, 2304),
            (64336, 64450),
            (64467, 64830),
            (64848, 64912),
            (64914, 64968),
            (65008, 65022),
            (65136, 65141),
            (65142, 65277),
            (69216, 69247),
        ],
        direction: Direction::Rtl,
        year: 400,
        living: true,
        link: "https://en.wikipedia.org/wiki/Arabic_script",
    },
    ScriptDescriptor {
        name: "Han",
        ranges: &[
            (11904, 11930),
            (11931, 12020),
            (12032, 12246),
            (12293, 12294),
            (12295, 12296),
            (12321, 12330),
            (12344, 12348),
            (13312, 19894),
            (19968, 40939),
            (63744, 64110),
            (64112, 64218),
            (131072, 173783),
            (173824, 177973),
            (177984, 178206),
            (178208, 183970),
            (183984, 191457),
            (194560, 195102),
        ],
        direction: Direction::Ttb,
        year: -1100,
        living: true,
        link: "https://en.wikipedia.org/wiki/Chinese_characters",
    },
    ScriptDescriptor {
        name: "Hiragana",
        ranges: &[(12353, 12439), (12445, 12448), (110593, 110879), (127488, 127489)],
        direction: Direction::Ttb,
        year: 800,
        living: true,
        link: "https://en.wikipedia.org/wiki/Hiragana",
    },
];
