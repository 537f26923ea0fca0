// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Selection policy tests
//!
//! Exercises the public selection API with classifier-shaped input
//! (as deserialized from provider JSON) and checks that:
//! - The first label at or above the threshold wins
//! - Otherwise the first located object wins
//! - Otherwise the first label wins
//! - Empty input selects nothing

use fabstir_image_labeler::labels::{CandidateLabel, SelectedLabel, SelectionPolicy};

fn candidates(json: &str) -> Vec<CandidateLabel> {
    serde_json::from_str(json).expect("valid candidate JSON")
}

fn expected(name: &str, category: &str, confidence: u8) -> Option<SelectedLabel> {
    Some(SelectedLabel {
        name: name.to_string(),
        category: category.to_string(),
        confidence,
    })
}

#[cfg(test)]
mod selection_policy_tests {
    use super::*;

    #[test]
    fn test_high_confidence_over_instance() {
        let input = candidates(
            r#"[
                {"name": "Cat", "confidence": 97.2, "categories": [],
                 "instances": [{"boundingBox": {"width": 0.5, "height": 0.5, "left": 0.1, "top": 0.1}}]},
                {"name": "Animal", "confidence": 99.5, "categories": [{"name": "Pets"}], "instances": []}
            ]"#,
        );

        assert_eq!(
            SelectionPolicy::default().select(&input),
            expected("Animal", "Pets", 99)
        );
    }

    #[test]
    fn test_instance_over_fallback() {
        let input = candidates(
            r#"[
                {"name": "Sky", "confidence": 80, "categories": [{"name": "Weather"}], "instances": []},
                {"name": "Dog", "confidence": 85, "categories": [{"name": "Animals"}], "instances": [{}]}
            ]"#,
        );

        assert_eq!(
            SelectionPolicy::default().select(&input),
            expected("Dog", "Animals", 85)
        );
    }

    #[test]
    fn test_fallback_to_first() {
        let input = candidates(r#"[{"name": "Sky", "confidence": 80, "categories": [], "instances": []}]"#);

        assert_eq!(
            SelectionPolicy::default().select(&input),
            expected("Sky", "", 80)
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(SelectionPolicy::default().select(&candidates("[]")), None);
    }

    #[test]
    fn test_sparse_label_defaults() {
        let input = candidates(r#"[{}]"#);

        assert_eq!(SelectionPolicy::default().select(&input), expected("", "", 0));
    }

    #[test]
    fn test_floored_confidence() {
        let input = candidates(r#"[{"name": "Plant", "confidence": 87.9}]"#);

        assert_eq!(
            SelectionPolicy::default().select(&input).map(|l| l.confidence),
            Some(87)
        );
    }

    #[test]
    fn test_every_non_empty_input_selects_one() {
        let pool = [
            CandidateLabel::new("A", 50.0),
            CandidateLabel::new("B", 99.0),
            CandidateLabel::new("C", 70.0).with_category("Things"),
            CandidateLabel::default(),
        ];
        let policies = [
            SelectionPolicy::default(),
            SelectionPolicy::instance_first(),
            SelectionPolicy::parse("high-confidence", 99.0).unwrap(),
            SelectionPolicy::parse("instance", 99.0).unwrap(),
        ];

        for policy in &policies {
            for len in 1..=pool.len() {
                let index = policy.select_index(&pool[..len]);
                assert!(matches!(index, Some(i) if i < len));
            }
        }
    }
}
