// src/services/classifier.rs

//! Campaign classifier service.
//!
//! Rules run in a fixed order and every rule is evaluated. A rule that fires
//! overwrites the decision of the rules before it, so exclusion rules can
//! always veto an inclusion, and the generic-label/length rule has the final
//! word.

use crate::models::{CampaignCandidate, ClassifierConfig};

/// A classification rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Nothing is a campaign unless a later rule says so
    Default,
    /// URL contains a campaign-likely pattern
    CampaignUrl,
    /// Label contains the campaign marker term
    CampaignMarker,
    /// URL or label contains an exclusion keyword
    ExcludedKeyword,
    /// Label is generic or too short
    WeakLabel,
}

impl Rule {
    /// All rules in evaluation order.
    pub const ORDER: [Rule; 5] = [
        Rule::Default,
        Rule::CampaignUrl,
        Rule::CampaignMarker,
        Rule::ExcludedKeyword,
        Rule::WeakLabel,
    ];
}

/// Final decision and the last rule that set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub included: bool,
    pub rule: Rule,
}

/// Lowercased views of a candidate, computed once per evaluation.
struct Subject<'a> {
    label: &'a str,
    label_lower: String,
    url_lower: String,
}

/// Decides whether a harvested link is a genuine campaign entry.
#[derive(Debug, Clone)]
pub struct CampaignClassifier {
    valid_url_patterns: Vec<String>,
    campaign_marker: String,
    exclude_keywords: Vec<String>,
    generic_labels: Vec<String>,
    min_label_chars: usize,
}

impl CampaignClassifier {
    /// Build a classifier from configured rules.
    pub fn new(config: &ClassifierConfig) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };

        Self {
            valid_url_patterns: lower(&config.valid_url_patterns),
            campaign_marker: config.campaign_marker.clone(),
            exclude_keywords: lower(&config.exclude_keywords),
            generic_labels: lower(&config.generic_labels),
            min_label_chars: config.min_label_chars,
        }
    }

    /// Whether the candidate should be kept.
    pub fn is_campaign(&self, candidate: &CampaignCandidate) -> bool {
        self.evaluate(candidate).included
    }

    /// Run every rule in order and report the final decision.
    pub fn evaluate(&self, candidate: &CampaignCandidate) -> Decision {
        let label = candidate.label.trim();
        let subject = Subject {
            label,
            label_lower: label.to_lowercase(),
            url_lower: candidate.absolute_url.to_lowercase(),
        };

        let mut decision = Decision {
            included: false,
            rule: Rule::Default,
        };
        for rule in Rule::ORDER {
            if let Some(included) = self.apply(rule, &subject) {
                decision = Decision { included, rule };
            }
        }
        decision
    }

    /// `Some(verdict)` when the rule fires, `None` when it leaves the decision alone.
    fn apply(&self, rule: Rule, subject: &Subject<'_>) -> Option<bool> {
        match rule {
            Rule::Default => Some(false),
            Rule::CampaignUrl => self
                .valid_url_patterns
                .iter()
                .any(|p| subject.url_lower.contains(p.as_str()))
                .then_some(true),
            Rule::CampaignMarker => (!self.campaign_marker.is_empty()
                && subject.label.contains(self.campaign_marker.as_str()))
            .then_some(true),
            Rule::ExcludedKeyword => self
                .exclude_keywords
                .iter()
                .any(|k| {
                    subject.url_lower.contains(k.as_str())
                        || subject.label_lower.contains(k.as_str())
                })
                .then_some(false),
            Rule::WeakLabel => {
                let generic = self.generic_labels.iter().any(|g| *g == subject.label_lower);
                let short = subject.label.chars().count() < self.min_label_chars;
                (generic || short).then_some(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CampaignClassifier {
        CampaignClassifier::new(&ClassifierConfig::default())
    }

    fn candidate(label: &str, url: &str) -> CampaignCandidate {
        CampaignCandidate::new("test", label, url)
    }

    #[test]
    fn excluded_by_default() {
        let decision = classifier().evaluate(&candidate(
            "楽天市場トップページへようこそ",
            "https://www.rakuten.co.jp/shop/",
        ));
        assert!(!decision.included);
        assert_eq!(decision.rule, Rule::Default);
    }

    #[test]
    fn included_by_url_pattern() {
        let decision = classifier().evaluate(&candidate(
            "楽天スーパーSALE開催決定のお知らせ",
            "https://event.rakuten.co.jp/campaign/supersale/",
        ));
        assert!(decision.included);
        assert_eq!(decision.rule, Rule::CampaignUrl);
    }

    #[test]
    fn included_by_marker_without_url_pattern() {
        let decision = classifier().evaluate(&candidate(
            "お買い物マラソン ポイント最大キャンペーン",
            "https://www.rakuten.co.jp/marathon/",
        ));
        assert!(decision.included);
        assert_eq!(decision.rule, Rule::CampaignMarker);
    }

    #[test]
    fn exclusion_keyword_vetoes_marker() {
        let decision = classifier().evaluate(&candidate(
            "キャンペーン参加規約についての説明",
            "https://www.rakuten.co.jp/campaign/policy/",
        ));
        assert!(!decision.included);
        assert_eq!(decision.rule, Rule::ExcludedKeyword);
    }

    #[test]
    fn exclusion_keyword_in_url_vetoes_marker_label() {
        let decision = classifier().evaluate(&candidate(
            "期間限定のポイント還元キャンペーン",
            "https://www.rakuten.co.jp/help/point/",
        ));
        assert!(!decision.included);
    }

    #[test]
    fn generic_label_vetoes_url_pattern() {
        let decision = classifier().evaluate(&candidate(
            "Click Here",
            "https://point.rakuten.co.jp/campaign/abc/",
        ));
        assert!(!decision.included);
        assert_eq!(decision.rule, Rule::WeakLabel);
    }

    #[test]
    fn short_label_vetoes_marker() {
        // 7 characters, below the default threshold of 10
        let decision = classifier().evaluate(&candidate(
            "春キャンペーン",
            "https://point.rakuten.co.jp/campaign/spring/",
        ));
        assert!(!decision.included);
        assert_eq!(decision.rule, Rule::WeakLabel);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let config = ClassifierConfig {
            min_label_chars: 8,
            ..ClassifierConfig::default()
        };
        let classifier = CampaignClassifier::new(&config);
        // 8 characters, 24 bytes
        assert!(classifier.is_campaign(&candidate(
            "秋キャンペーン中",
            "https://point.rakuten.co.jp/campaign/autumn/",
        )));
    }

    #[test]
    fn configured_pattern_includes_summer_campaign() {
        let config = ClassifierConfig {
            valid_url_patterns: vec!["campaign.example.co.jp".to_string()],
            min_label_chars: 5,
            ..ClassifierConfig::default()
        };
        let classifier = CampaignClassifier::new(&config);
        assert!(classifier.is_campaign(&candidate(
            "夏のキャンペーン",
            "https://campaign.example.co.jp/summer",
        )));
    }

    #[test]
    fn policy_page_is_excluded() {
        let config = ClassifierConfig {
            min_label_chars: 1,
            ..ClassifierConfig::default()
        };
        let classifier = CampaignClassifier::new(&config);
        assert!(!classifier.is_campaign(&candidate(
            "利用規約",
            "https://www.example.co.jp/policy",
        )));
    }
}
