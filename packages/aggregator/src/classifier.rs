//! Feedback Classification
//!
//! Classifies an attestation as positive or negative from the position of a
//! zero run in its calldata. Every payload lands in exactly one bucket.

use serde::{Deserialize, Serialize};

use crate::decoder::{strip_hex_prefix, PayloadLayout};

/// Polarity of an attestation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Positive,
    Negative,
}

impl FeedbackType {
    /// Returns the serialized name
    pub fn name(&self) -> &'static str {
        match self {
            FeedbackType::Positive => "positive",
            FeedbackType::Negative => "negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, FeedbackType::Positive)
    }
}

/// Check whether the negative-feedback zero run sits at the flag offset
///
/// # Arguments
/// * `input` - Transaction input data as a hex string
/// * `layout` - Payload layout giving the flag offset and run length
///
/// # Returns
/// `true` only if the full run of `'0'` digits is present at the offset
pub fn has_negative_marker(input: &str, layout: &PayloadLayout) -> bool {
    let hex_data = strip_hex_prefix(input).as_bytes();
    let start = layout.feedback_offset;
    let end = start + layout.feedback_zero_run_len;

    if layout.feedback_zero_run_len == 0 || hex_data.len() < end {
        return false;
    }
    hex_data[start..end].iter().all(|b| *b == b'0')
}

/// Classify the feedback polarity of an attestation payload
///
/// Payloads without the negative marker, including ones too short to carry
/// it, are positive.
pub fn classify_feedback(input: &str, layout: &PayloadLayout) -> FeedbackType {
    if has_negative_marker(input, layout) {
        FeedbackType::Negative
    } else {
        FeedbackType::Positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTOR: &str = "5a1a7b2c";

    // ==================== has_negative_marker tests ====================

    #[test]
    fn test_negative_marker_all_zero_input() {
        let input = format!("0x{}", "0".repeat(8 + 64));
        assert!(has_negative_marker(&input, &PayloadLayout::V1));
    }

    #[test]
    fn test_negative_marker_absent_for_true_flag() {
        let input = format!("0x{}{:064x}", SELECTOR, 1);
        assert!(!has_negative_marker(&input, &PayloadLayout::V1));
    }

    #[test]
    fn test_negative_marker_requires_full_run() {
        // 63 zeros then a non-zero digit
        let input = format!("0x{}{}1", SELECTOR, "0".repeat(63));
        assert!(!has_negative_marker(&input, &PayloadLayout::V1));
    }

    #[test]
    fn test_negative_marker_ignores_zero_runs_elsewhere() {
        let input = format!("0x{}{:064x}{}", SELECTOR, 1, "0".repeat(128));
        assert!(!has_negative_marker(&input, &PayloadLayout::V1));
    }

    #[test]
    fn test_negative_marker_without_prefix() {
        let input = format!("{}{}", SELECTOR, "0".repeat(64));
        assert!(has_negative_marker(&input, &PayloadLayout::V1));
    }

    #[test]
    fn test_negative_marker_short_input() {
        let input = format!("0x{}{}", SELECTOR, "0".repeat(10));
        assert!(!has_negative_marker(&input, &PayloadLayout::V1));
    }

    #[test]
    fn test_negative_marker_custom_layout() {
        let layout = PayloadLayout {
            feedback_offset: 0,
            feedback_zero_run_len: 4,
            ..PayloadLayout::V1
        };
        assert!(has_negative_marker("0x0000ff", &layout));
        assert!(!has_negative_marker("0x000fff", &layout));
    }

    // ==================== classify_feedback tests ====================

    #[test]
    fn test_classify_all_zero_input_is_negative() {
        let input = format!("0x{}", "0".repeat(512));
        assert_eq!(classify_feedback(&input, &PayloadLayout::V1), FeedbackType::Negative);
    }

    #[test]
    fn test_classify_mixed_input_is_positive() {
        let input = format!(
            "0x{}{:064x}{:064x}{:064x}",
            SELECTOR, 1, 0x40, 20
        );
        assert_eq!(classify_feedback(&input, &PayloadLayout::V1), FeedbackType::Positive);
    }

    #[test]
    fn test_classify_empty_input_is_positive() {
        assert_eq!(classify_feedback("", &PayloadLayout::V1), FeedbackType::Positive);
        assert_eq!(classify_feedback("0x", &PayloadLayout::V1), FeedbackType::Positive);
    }

    #[test]
    fn test_classify_malformed_input_is_positive() {
        let input = format!("0x{}", "zz".repeat(64));
        assert_eq!(classify_feedback(&input, &PayloadLayout::V1), FeedbackType::Positive);
    }

    #[test]
    fn test_classify_multibyte_input_does_not_panic() {
        let input = "é".repeat(80);
        assert_eq!(classify_feedback(&input, &PayloadLayout::V1), FeedbackType::Positive);
    }

    // ==================== FeedbackType tests ====================

    #[test]
    fn test_feedback_type_name() {
        assert_eq!(FeedbackType::Positive.name(), "positive");
        assert_eq!(FeedbackType::Negative.name(), "negative");
    }

    #[test]
    fn test_feedback_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FeedbackType::Positive).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&FeedbackType::Negative).unwrap(), "\"negative\"");
    }

    #[test]
    fn test_feedback_type_is_positive() {
        assert!(FeedbackType::Positive.is_positive());
        assert!(!FeedbackType::Negative.is_positive());
    }
}
