use serde::{Deserialize, Serialize};

/// How `cn_extract_tags` treats purely numeric tokens
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DigitPolicy {
    /// Skip every numeric token
    #[default]
    SuppressAll,
    /// Keep the first numeric token of a sentence, skip the rest
    AllowFirst,
}

/// Tunables shared by both extractors
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tokens with fewer characters than this (after trimming) are dropped
    pub min_token_chars: usize,
    /// Numeric token handling in the CN variant
    pub digit_policy: DigitPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_token_chars: 2,
            digit_policy: DigitPolicy::SuppressAll,
        }
    }
}
