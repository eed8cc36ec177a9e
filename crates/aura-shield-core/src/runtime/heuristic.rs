// crates/aura-shield-core/src/runtime/heuristic.rs
// ============================================================================
// Module: Aura Shield Heuristic Tag Classifier
// Description: Built-in keyword-lexicon tag inference over notification text.
// Purpose: Provide a default TagClassifier without external model deps.
// Dependencies: aho-corasick, thiserror, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The heuristic classifier maps notification text to catalog tags via
//! per-tag literal keyword sets compiled into a single Aho-Corasick automaton
//! (ASCII case-insensitive, one pass over the text). It is intentionally
//! simple: hosts with a real inference engine inject their own
//! [`TagClassifier`] and this module never runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use thiserror::Error;

use crate::core::Notification;
use crate::core::TagId;
use crate::interfaces::TagClassifier;

// ============================================================================
// SECTION: Builtin Lexicon
// ============================================================================

/// Build-time lexicon table: `(tag id, literal keyword)`.
const BUILTIN_LEXICON: &[(&str, &str)] = &[
    ("security", "otp"),
    ("security", "one-time"),
    ("security", "passcode"),
    ("security", "verification code"),
    ("security", "sign-in"),
    ("security", "security alert"),
    ("security", "password"),
    ("security", "2fa"),
    ("finance", "payment"),
    ("finance", "transaction"),
    ("finance", "debited"),
    ("finance", "credited"),
    ("finance", "invoice"),
    ("finance", "balance"),
    ("finance", "transfer"),
    ("personal", "sent you a message"),
    ("personal", "messaged you"),
    ("personal", "missed call"),
    ("reminders", "reminder"),
    ("reminders", "appointment"),
    ("reminders", "due today"),
    ("reminders", "event starting"),
    ("work", "assigned to you"),
    ("work", "meeting"),
    ("work", "review requested"),
    ("work", "mentioned you in"),
    ("promotions", "sale"),
    ("promotions", "discount"),
    ("promotions", "coupon"),
    ("promotions", "% off"),
    ("promotions", "offer ends"),
    ("social", "liked your"),
    ("social", "commented on"),
    ("social", "started following"),
    ("social", "friend request"),
    ("news", "breaking"),
    ("news", "headlines"),
    ("news", "daily digest"),
];

// ============================================================================
// SECTION: Heuristic Classifier
// ============================================================================

/// Lexicon construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// Automaton compilation failed.
    #[error("keyword lexicon build failed: {0}")]
    Build(String),
    /// A lexicon entry is empty.
    #[error("keyword lexicon entries must not be empty")]
    EmptyEntry,
}

/// Keyword-lexicon tag classifier.
///
/// # Invariants
/// - `pattern_tags[i]` is the tag for automaton pattern `i`.
#[derive(Debug, Clone)]
pub struct HeuristicTagClassifier {
    /// Compiled multi-pattern automaton over all lexicon literals.
    automaton: AhoCorasick,
    /// Tag owning each pattern, indexed by pattern id.
    pattern_tags: Vec<TagId>,
}

impl HeuristicTagClassifier {
    /// Builds the classifier from the builtin lexicon.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] when automaton compilation fails.
    pub fn builtin() -> Result<Self, LexiconError> {
        let entries: Vec<(TagId, String)> = BUILTIN_LEXICON
            .iter()
            .map(|(tag, literal)| (TagId::new(*tag), (*literal).to_string()))
            .collect();
        Self::from_lexicon(&entries)
    }

    /// Builds the classifier from explicit `(tag, literal)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] on empty entries or compilation failure.
    pub fn from_lexicon(entries: &[(TagId, String)]) -> Result<Self, LexiconError> {
        let mut literals = Vec::with_capacity(entries.len());
        let mut pattern_tags = Vec::with_capacity(entries.len());
        for (tag, literal) in entries {
            if literal.is_empty() {
                return Err(LexiconError::EmptyEntry);
            }
            literals.push(literal.as_str());
            pattern_tags.push(tag.clone());
        }
        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(&literals)
            .map_err(|err| LexiconError::Build(err.to_string()))?;
        Ok(Self {
            automaton,
            pattern_tags,
        })
    }

    /// Collects the tags whose literals occur in the text.
    fn scan(&self, text: &str, out: &mut BTreeSet<TagId>) {
        for found in self.automaton.find_overlapping_iter(text) {
            if let Some(tag) = self.pattern_tags.get(found.pattern().as_usize()) {
                out.insert(tag.clone());
            }
        }
    }
}

impl TagClassifier for HeuristicTagClassifier {
    fn tags_for(&self, notification: &Notification) -> BTreeSet<TagId> {
        let mut tags = BTreeSet::new();
        self.scan(&notification.title, &mut tags);
        self.scan(&notification.content, &mut tags);
        tags
    }
}
