//! Keyword-membership sentiment for market headlines.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Bullish single-word market vocabulary.
pub(crate) const MARKET_POSITIVE: &[&str] = &[
    "beat", "beats", "beating", "exceed", "exceeds", "exceeded", "exceeding", "surge", "surges",
    "surged", "soar", "soars", "soared", "rally", "rallies", "rallied", "jump", "jumps", "jumped",
    "spike", "spikes", "spiked", "pop", "pops", "popped", "gain", "gains", "gained", "advance",
    "advances", "advanced", "rise", "rises", "rose", "upbeat", "bull", "bullish", "optimism",
    "optimistic", "confidence", "confident", "strong", "strength", "robust", "resilient",
    "resilience", "record", "high", "highs", "profit", "profits", "profitable", "profitability",
    "margin", "margins", "expand", "expands", "expanded", "expanding", "growth", "growing",
    "accelerate", "accelerates", "accelerated", "accelerating", "outperform", "outperforms",
    "outperformed", "outperforming", "upgrade", "upgrades", "upgraded", "upgrading", "overweight",
    "buy", "buying", "accumulate", "accumulating", "initiate", "initiates", "initiated",
    "initiating", "guidance", "raise", "raises", "raised", "raising", "hike", "hikes", "hiked",
    "dividend", "dividends", "increase", "increases", "increased", "increasing", "buyback",
    "buybacks", "repurchase", "repurchases",
];

/// Bearish single-word market vocabulary.
pub(crate) const MARKET_NEGATIVE: &[&str] = &[
    "miss", "misses", "missed", "missing", "lag", "lags", "lagged", "lagging", "plunge", "plunges",
    "plunged", "plunging", "tumble", "tumbles", "tumbled", "tumbling", "drop", "drops", "dropped",
    "dropping", "fall", "falls", "fell", "falling", "slump", "slumps", "slumped", "slumping",
    "slide", "slides", "slid", "sliding", "decline", "declines", "declined", "declining",
    "selloff", "selloffs", "weak", "weakness", "soft", "softness", "bear", "bearish", "pessimism",
    "pessimistic", "fear", "loss", "losses", "unprofitable", "compression", "compress",
    "compressed", "cut", "cuts", "cutting", "lower", "lowers", "lowered", "lowering", "reduce",
    "reduces", "reduced", "reducing", "downgrade", "downgrades", "downgraded", "downgrading",
    "underperform", "underperforms", "underperformed", "underperforming", "warning", "recall",
    "recalls", "recalled", "restructuring", "layoff", "layoffs", "furlough", "furloughs",
    "bankruptcy", "insolvency", "default", "defaults", "defaulted", "dilution", "dilutive",
    "lawsuit", "lawsuits", "probe", "probes", "investigation", "investigations", "fraud",
    "scandal", "resign", "resigns", "resigned", "resignation",
];

/// Positive and negative word sets. Entries are stored lowercased.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Lexicon {
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: positive.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// The curated market vocabulary (about a hundred words per side).
    #[must_use]
    pub fn market() -> Self {
        Self::new(MARKET_POSITIVE, MARKET_NEGATIVE)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::market()
    }
}

/// Result of a lexicon pass over one text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexiconScore {
    /// `1`, `0`, or `-1`: the sign of `positive.len() - negative.len()`.
    pub score: i8,
    /// Matched positive tokens in encounter order, repeats included.
    pub positive: Vec<String>,
    /// Matched negative tokens in encounter order, repeats included.
    pub negative: Vec<String>,
    /// Both sides matched at least once.
    pub ambiguous: bool,
}

/// Scores text by counting lexicon hits over `\w+` tokens.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tokenizes lowercased `text` and tallies every token occurrence against
    /// both word sets. Phrases are never matched; a word present in both sets
    /// counts on both sides.
    #[must_use]
    pub fn score(&self, text: &str) -> LexiconScore {
        let lower = text.to_lowercase();
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for token in WORD_RE.find_iter(&lower).map(|m| m.as_str()) {
            if self.lexicon.positive.contains(token) {
                positive.push(token.to_owned());
            }
            if self.lexicon.negative.contains(token) {
                negative.push(token.to_owned());
            }
        }

        let score = match positive.len().cmp(&negative.len()) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        };
        let ambiguous = !positive.is_empty() && !negative.is_empty();

        LexiconScore {
            score,
            positive,
            negative,
            ambiguous,
        }
    }
}
