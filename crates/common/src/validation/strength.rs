use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0..=39 => StrengthLabel::Weak,
            40..=69 => StrengthLabel::Medium,
            _ => StrengthLabel::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Medium => "Medium",
            StrengthLabel::Strong => "Strong",
        }
    }

    /// Style class used when rendering the meter
    pub fn class(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "weak",
            StrengthLabel::Medium => "medium",
            StrengthLabel::Strong => "strong",
        }
    }
}

/// Password strength descriptor. An empty password has score 0 and no label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: Option<StrengthLabel>,
}

impl PasswordStrength {
    /// `"Weak"`, `"Medium"`, `"Strong"` or `""`
    pub fn label_str(&self) -> &'static str {
        self.label.map(|l| l.as_str()).unwrap_or("")
    }

    /// `"weak"`, `"medium"`, `"strong"` or `""`
    pub fn class(&self) -> &'static str {
        self.label.map(|l| l.class()).unwrap_or("")
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{} ({}/100)", label.as_str(), self.score),
            None => write!(f, "-"),
        }
    }
}

/// Additive strength score.
///
/// +25 for 8+ characters, +15 more for 12+, then +15 for each of lowercase, uppercase,
/// digit and any other character. Capped at 100.
pub fn score_password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: None,
        };
    }

    let len = password.chars().count();
    let mut score: u32 = 0;
    if len >= 8 {
        score += 25;
    }
    if len >= 12 {
        score += 15;
    }

    let classes = [
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    score += 15 * classes.iter().filter(|present| **present).count() as u32;

    let score = score.min(100) as u8;
    PasswordStrength {
        score,
        label: Some(StrengthLabel::from_score(score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let s = score_password_strength("");
        assert_eq!(s.score, 0);
        assert_eq!(s.label_str(), "");
        assert_eq!(s.class(), "");
    }

    #[test]
    fn test_short_lowercase_is_weak() {
        let s = score_password_strength("abc");
        assert_eq!(s.score, 15);
        assert_eq!(s.label_str(), "Weak");
        assert_eq!(s.class(), "weak");
    }

    #[test]
    fn test_all_classes_is_strong() {
        let s = score_password_strength("Abcdef12!");
        assert_eq!(s.score, 85);
        assert_eq!(s.label_str(), "Strong");
    }

    #[test]
    fn test_thresholds() {
        // 25 + 15 = 40
        assert_eq!(score_password_strength("abcdefgh").label_str(), "Medium");
        // 15 + 15 + 15 = 45
        assert_eq!(score_password_strength("aB1").label_str(), "Medium");
        // 25 + 15 + 15 = 55
        assert_eq!(score_password_strength("abcdefg1").score, 55);
        assert_eq!(score_password_strength("abcdefg1").label_str(), "Medium");
        // 25 + 15 + 15 + 15 = 70
        assert_eq!(score_password_strength("abcdeFgh12").score, 70);
        assert_eq!(score_password_strength("abcdeFgh12").label_str(), "Strong");
        // 25 + 15 + 15 + 15 + 15 = 85
        assert_eq!(score_password_strength("abcdefgh12!!").score, 85);
    }

    #[test]
    fn test_score_caps_at_100() {
        let s = score_password_strength("Correct-Horse-Battery-9");
        assert_eq!(s.score, 100);
        assert_eq!(s.label_str(), "Strong");
    }

    #[test]
    fn test_length_counts_characters() {
        // 8 chars, 16 bytes: other class only
        let s = score_password_strength("éééééééé");
        assert_eq!(s.score, 25 + 15);
    }
}
