// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label selection policy
//!
//! Reduces the classifier's candidate list to a single label using an
//! ordered rule chain. The first rule that matches wins:
//!
//! 1. `high-confidence` - first candidate at or above the threshold
//! 2. `instance` - first candidate with a located instance
//! 3. `first` - the candidate at index 0
//!
//! Rule order and threshold are configurable. A non-empty input always
//! yields a label: if no configured rule matches, index 0 is used.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::types::{CandidateLabel, SelectedLabel};

/// Default confidence at which a label overrides every other rule
pub const DEFAULT_HIGH_CONFIDENCE_THRESHOLD: f32 = 99.0;

/// One step of the selection chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionRule {
    HighConfidence,
    InstanceBearing,
    First,
}

impl SelectionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionRule::HighConfidence => "high-confidence",
            SelectionRule::InstanceBearing => "instance",
            SelectionRule::First => "first",
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionRule {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high-confidence" | "high_confidence" => Ok(SelectionRule::HighConfidence),
            "instance" | "instances" => Ok(SelectionRule::InstanceBearing),
            "first" => Ok(SelectionRule::First),
            other => Err(PolicyError::UnknownRule(other.to_string())),
        }
    }
}

/// Errors raised when building a selection policy
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Unknown selection rule '{0}', expected one of: high-confidence, instance, first")]
    UnknownRule(String),

    #[error("Selection policy must contain at least one rule")]
    Empty,

    #[error("Selection rule '{0}' is listed more than once")]
    DuplicateRule(SelectionRule),

    #[error("Selection rule '{0}' is unreachable after 'first'")]
    UnreachableRule(SelectionRule),

    #[error("High-confidence threshold must be between 0 and 100, got {0}")]
    ThresholdOutOfRange(f32),
}

/// Ordered rule chain used to pick one label
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPolicy {
    rules: Vec<SelectionRule>,
    high_confidence_threshold: f32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                SelectionRule::HighConfidence,
                SelectionRule::InstanceBearing,
                SelectionRule::First,
            ],
            high_confidence_threshold: DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
        }
    }
}

impl SelectionPolicy {
    /// Build a validated policy
    pub fn new(rules: Vec<SelectionRule>, high_confidence_threshold: f32) -> Result<Self, PolicyError> {
        if rules.is_empty() {
            return Err(PolicyError::Empty);
        }

        if !(0.0..=100.0).contains(&high_confidence_threshold) {
            return Err(PolicyError::ThresholdOutOfRange(high_confidence_threshold));
        }

        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].contains(rule) {
                return Err(PolicyError::DuplicateRule(*rule));
            }
        }

        if let Some(pos) = rules.iter().position(|r| *r == SelectionRule::First) {
            if let Some(rule) = rules.get(pos + 1) {
                return Err(PolicyError::UnreachableRule(*rule));
            }
        }

        Ok(Self {
            rules,
            high_confidence_threshold,
        })
    }

    /// Parse a comma-separated rule list such as `high-confidence,instance,first`
    pub fn parse(rules: &str, high_confidence_threshold: f32) -> Result<Self, PolicyError> {
        let rules = rules
            .split(',')
            .filter(|r| !r.trim().is_empty())
            .map(SelectionRule::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rules, high_confidence_threshold)
    }

    /// The earlier two-rule policy: located objects first, then index 0
    pub fn instance_first() -> Self {
        Self {
            rules: vec![SelectionRule::InstanceBearing, SelectionRule::First],
            high_confidence_threshold: DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    pub fn high_confidence_threshold(&self) -> f32 {
        self.high_confidence_threshold
    }

    /// Pick one label from the candidates
    ///
    /// Returns `None` only when `candidates` is empty.
    pub fn select(&self, candidates: &[CandidateLabel]) -> Option<SelectedLabel> {
        self.select_index(candidates)
            .map(|index| SelectedLabel::from(&candidates[index]))
    }

    /// Index of the winning candidate
    pub fn select_index(&self, candidates: &[CandidateLabel]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }

        let matched = self
            .rules
            .iter()
            .find_map(|rule| self.apply(*rule, candidates));

        Some(matched.unwrap_or(0))
    }

    fn apply(&self, rule: SelectionRule, candidates: &[CandidateLabel]) -> Option<usize> {
        match rule {
            SelectionRule::HighConfidence => candidates.iter().position(|c| {
                c.confidence
                    .map(|confidence| confidence >= self.high_confidence_threshold)
                    .unwrap_or(false)
            }),
            SelectionRule::InstanceBearing => candidates.iter().position(|c| c.has_instances()),
            SelectionRule::First => Some(0),
        }
    }
}
