//! Bounded feedback history that nudges future classifications.
//!
//! Every caller verdict is kept as a term set plus the category it judged;
//! later analyses replay the history and nudge the score of categories whose
//! recorded text is similar to the new text. State is process-local and never
//! persisted.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::Feedback;
use crate::scoring::jaccard;

/// One recorded classification verdict
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub category: String,
    pub feedback: Feedback,
    /// Normalized term set of the text that was classified
    pub terms: HashSet<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Bounded log of classification verdicts plus a coarse counter map
#[derive(Debug)]
pub struct FeedbackHistory {
    records: VecDeque<FeedbackRecord>,
    counts: HashMap<String, u32>,
    capacity: usize,
}

impl FeedbackHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            counts: HashMap::new(),
            capacity,
        }
    }

    /// Append a verdict, trimming the oldest record past capacity
    pub fn record(&mut self, category: &str, feedback: Feedback, terms: HashSet<String>) {
        self.records.push_back(FeedbackRecord {
            category: category.to_string(),
            feedback,
            terms,
            recorded_at: Utc::now(),
        });
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }

        let key = format!("{}-{}", category, feedback.as_str());
        *self.counts.entry(key).or_insert(0) += 1;
        debug!(category, feedback = feedback.as_str(), "Recorded classification feedback");
    }

    /// Replay the history against a new text.
    ///
    /// Each record whose term set overlaps the new terms beyond
    /// `similarity_threshold` (Jaccard) nudges its category by ±`nudge`.
    /// The summed nudge is clamped to [-1, 1] before the engine weights it.
    pub fn adjustment(
        &self,
        category: &str,
        terms: &HashSet<String>,
        similarity_threshold: f32,
        nudge: f32,
    ) -> f32 {
        let mut total = 0.0f32;
        for record in &self.records {
            if record.category != category {
                continue;
            }
            if jaccard(&record.terms, terms) <= similarity_threshold {
                continue;
            }
            total += match record.feedback {
                Feedback::Correct => nudge,
                Feedback::Incorrect => -nudge,
            };
        }
        total.clamp(-1.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counters keyed by `"{category}-{feedback}"`
    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }
}
