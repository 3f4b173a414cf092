//! Sentence-level polarity voting.
//!
//! Text is split into sentences on `.`, `!`, and `?`. Each sentence receives
//! a compound score in `[-1, 1]` and is bucketed as positive, neutral, or
//! negative. The text is labeled positive or negative only when that bucket
//! holds a supermajority of sentences; everything else, ties included, is
//! neutral.

use sentiprice_core::SentimentLabel;
use vader_sentiment::SentimentIntensityAnalyzer;

/// A pretrained sentence-polarity capability.
pub trait CompoundScorer {
    /// Compound polarity of one sentence, in `[-1, 1]`.
    fn compound(&self, sentence: &str) -> f64;
}

impl<F> CompoundScorer for F
where
    F: Fn(&str) -> f64,
{
    fn compound(&self, sentence: &str) -> f64 {
        self(sentence)
    }
}

/// VADER lexicon-and-rule compound scorer.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundScorer for VaderScorer {
    fn compound(&self, sentence: &str) -> f64 {
        self.analyzer
            .polarity_scores(sentence)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityThresholds {
    /// A sentence is positive at `compound >= cutoff`, negative at
    /// `compound <= -cutoff`.
    pub sentence_cutoff: f64,
    /// Fraction of sentences one side needs to label the whole text.
    pub supermajority: f64,
}

impl Default for PolarityThresholds {
    fn default() -> Self {
        Self {
            sentence_cutoff: 0.3,
            supermajority: 0.7,
        }
    }
}

/// Outcome of classifying one text, with the per-bucket sentence tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarityVerdict {
    pub label: SentimentLabel,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl PolarityVerdict {
    /// `1`, `0`, or `-1`, mirroring the label.
    #[must_use]
    pub fn score(&self) -> i8 {
        self.label.score()
    }

    #[must_use]
    pub fn sentences(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

pub struct PolarityClassifier<S = VaderScorer> {
    scorer: S,
    thresholds: PolarityThresholds,
}

impl PolarityClassifier<VaderScorer> {
    /// VADER with the default 0.3 / 0.7 thresholds.
    #[must_use]
    pub fn vader() -> Self {
        Self::new(VaderScorer::new(), PolarityThresholds::default())
    }
}

impl<S: CompoundScorer> PolarityClassifier<S> {
    pub fn new(scorer: S, thresholds: PolarityThresholds) -> Self {
        Self { scorer, thresholds }
    }

    /// Classifies `text` by supermajority sentence vote.
    ///
    /// Text with no non-blank sentence is neutral with zero tallies.
    pub fn classify(&self, text: &str) -> PolarityVerdict {
        let cutoff = self.thresholds.sentence_cutoff;
        let (mut positive, mut neutral, mut negative) = (0usize, 0usize, 0usize);

        for sentence in split_sentences(text) {
            let compound = self.scorer.compound(sentence);
            if compound >= cutoff {
                positive += 1;
            } else if compound <= -cutoff {
                negative += 1;
            } else {
                neutral += 1;
            }
        }

        let total = positive + neutral + negative;
        let label = if total == 0 {
            SentimentLabel::Neutral
        } else if self.has_supermajority(positive, total) {
            SentimentLabel::Positive
        } else if self.has_supermajority(negative, total) {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        PolarityVerdict {
            label,
            positive,
            neutral,
            negative,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn has_supermajority(&self, count: usize, total: usize) -> bool {
        count as f64 / total as f64 >= self.thresholds.supermajority
    }
}

/// Sentence candidates split on `.`, `!`, `?`, with blank pieces dropped.
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?']).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores sentences by a leading marker so tallies are fully controlled.
    fn marker_scorer(sentence: &str) -> f64 {
        match sentence.trim().chars().next() {
            Some('+') => 0.8,
            Some('-') => -0.8,
            Some('^') => 0.3,
            Some('v') => -0.3,
            _ => 0.0,
        }
    }

    fn classifier() -> PolarityClassifier<fn(&str) -> f64> {
        PolarityClassifier::new(marker_scorer as fn(&str) -> f64, PolarityThresholds::default())
    }

    #[test]
    fn empty_text_is_neutral_zero() {
        let v = classifier().classify("");
        assert_eq!(v.label, SentimentLabel::Neutral);
        assert_eq!(v.score(), 0);
        assert_eq!(v.sentences(), 0);
    }

    #[test]
    fn punctuation_only_text_is_neutral_zero() {
        let v = classifier().classify(" ... !? .  ");
        assert_eq!(v.label, SentimentLabel::Neutral);
        assert_eq!(v.sentences(), 0);
    }

    #[test]
    fn seventy_percent_positive_is_positive() {
        let v = classifier().classify("+a. +b. +c. +d. +e. +f. +g. x. y. z.");
        assert_eq!(v.positive, 7);
        assert_eq!(v.sentences(), 10);
        assert_eq!(v.label, SentimentLabel::Positive);
        assert_eq!(v.score(), 1);
    }

    #[test]
    fn below_seventy_percent_is_neutral() {
        let v = classifier().classify("+a. +b. x. y.");
        assert_eq!(v.label, SentimentLabel::Neutral);
    }

    #[test]
    fn negative_supermajority_is_negative() {
        let v = classifier().classify("-a! -b? -c. x");
        assert_eq!(v.negative, 3);
        assert_eq!(v.label, SentimentLabel::Negative);
        assert_eq!(v.score(), -1);
    }

    #[test]
    fn even_split_defaults_to_neutral() {
        let v = classifier().classify("+a. -b.");
        assert_eq!(v.label, SentimentLabel::Neutral);
    }

    #[test]
    fn cutoff_is_inclusive_on_both_sides() {
        let v = classifier().classify("^a. vb. ^c.");
        assert_eq!(v.positive, 2);
        assert_eq!(v.negative, 1);
        assert_eq!(v.neutral, 0);
    }

    #[test]
    fn single_positive_sentence_is_positive() {
        let v = classifier().classify("+ only one sentence");
        assert_eq!(v.label, SentimentLabel::Positive);
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let strict = PolarityClassifier::new(
            marker_scorer as fn(&str) -> f64,
            PolarityThresholds {
                sentence_cutoff: 0.9,
                supermajority: 0.5,
            },
        );
        let v = strict.classify("+a. +b.");
        assert_eq!(v.neutral, 2);
        assert_eq!(v.label, SentimentLabel::Neutral);
    }

    #[test]
    fn vader_scores_clear_sentiment() {
        let vader = VaderScorer::new();
        assert!(vader.compound("This is a great, wonderful and excellent day") >= 0.3);
        assert!(vader.compound("This is a terrible, horrible and awful disaster") <= -0.3);
    }

    #[test]
    fn vader_classifier_labels_uniformly_positive_text() {
        let v = PolarityClassifier::vader()
            .classify("What a great result. The team did an excellent job! Wonderful news.");
        assert_eq!(v.label, SentimentLabel::Positive);
    }
}
