//! Introduction template and the check that gates the confirmation button.
//!
//! An introduction passes when, after trimming, it starts with `Name:`,
//! contains the remaining labels in order (anything may sit between them,
//! newlines included) and is at least `min_length` characters long.
//! Labels are compared ASCII case-insensitively; member text is never altered.

/// Labels every introduction must contain, in this order.
/// `Age :` carries a space before the colon on purpose.
pub const REQUIRED_LABELS: [&str; 6] = [
    "Name:",
    "Age :",
    "Favourite Game RN:",
    "Experience:",
    "Hope:",
    "Fun fact:",
];

/// The block members copy from the format channel
pub const COPYABLE_TEMPLATE: &str =
    "Name: \nAge :\nFavourite Game RN:\nExperience: \nHope:\nFun fact:";

/// Outcome of checking one introduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCheck {
    Passed,
    /// First label that is absent, out of order, or (for `Name:`) not leading
    MissingLabel(&'static str),
    TooShort { length: usize, min_length: usize },
}

impl FormatCheck {
    pub fn passed(&self) -> bool {
        matches!(self, FormatCheck::Passed)
    }
}

#[derive(Debug, Clone)]
pub struct FormatValidator {
    min_length: usize,
}

impl FormatValidator {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    #[cfg(test)]
    pub fn is_valid(&self, text: &str) -> bool {
        self.check(text).passed()
    }

    pub fn check(&self, text: &str) -> FormatCheck {
        let content = text.trim();

        if let Some(label) = first_missing_label(content) {
            return FormatCheck::MissingLabel(label);
        }

        let length = content.chars().count();
        if length < self.min_length {
            return FormatCheck::TooShort {
                length,
                min_length: self.min_length,
            };
        }

        FormatCheck::Passed
    }
}

/// Walk the labels in order over an ASCII-lowercased copy. Lowercasing only
/// ASCII keeps byte offsets identical to the input.
fn first_missing_label(content: &str) -> Option<&'static str> {
    let folded = content.to_ascii_lowercase();
    let mut cursor = 0;

    for (i, label) in REQUIRED_LABELS.iter().enumerate() {
        let needle = label.to_ascii_lowercase();
        let rest = &folded[cursor..];

        let found = if i == 0 {
            rest.starts_with(&needle).then_some(0)
        } else {
            rest.find(&needle)
        };

        match found {
            Some(offset) => cursor += offset + needle.len(),
            None => return Some(label),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "Name: Aisyah\nAge : 21\nFavourite Game RN: Valorant\nExperience: 3 years ranked\nHope: Find a team\nFun fact: I collect keyboards";

    fn validator() -> FormatValidator {
        FormatValidator::new(50)
    }

    #[test]
    fn test_complete_introduction_passes() {
        assert_eq!(validator().check(GOOD), FormatCheck::Passed);
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let shouting = "NAME: Aisyah\nAGE : 21\nFAVOURITE GAME RN: Valorant\nEXPERIENCE: 3 years\nHOPE: a team\nFUN FACT: keyboards";
        assert!(validator().is_valid(shouting));

        let lower = GOOD.to_lowercase();
        assert!(validator().is_valid(&lower));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let padded = format!("\n\n   {}   \n", GOOD);
        assert!(validator().is_valid(&padded));
    }

    #[test]
    fn test_trailing_content_allowed() {
        let text = format!("{}\n\nSee you all in game!", GOOD);
        assert!(validator().is_valid(&text));
    }

    #[test]
    fn test_values_may_span_lines() {
        let text = "Name: Aisyah\nAge : 21\nFavourite Game RN:\n- Valorant\n- Dota 2\nExperience:\nplenty\nHope: a team\nFun fact: none";
        assert!(validator().is_valid(text));
    }

    #[test]
    fn test_leading_content_rejected() {
        let text = format!("Hello everyone!\n{}", GOOD);
        assert_eq!(validator().check(&text), FormatCheck::MissingLabel("Name:"));
    }

    #[test]
    fn test_age_label_needs_space_before_colon() {
        let text = GOOD.replace("Age :", "Age:");
        assert_eq!(validator().check(&text), FormatCheck::MissingLabel("Age :"));
    }

    #[test]
    fn test_each_missing_label_fails_regardless_of_length() {
        let padding = "x".repeat(200);
        for label in REQUIRED_LABELS {
            let text = format!("{}\n{}", GOOD.replace(label, ""), padding);
            assert!(
                !validator().is_valid(&text),
                "introduction without '{}' should fail",
                label
            );
        }
    }

    #[test]
    fn test_out_of_order_labels_fail() {
        let text = "Name: Aisyah\nFavourite Game RN: Valorant\nAge : 21\nExperience: 3 years ranked\nHope: Find a team\nFun fact: I collect keyboards";
        assert_eq!(
            validator().check(text),
            FormatCheck::MissingLabel("Favourite Game RN:")
        );
        assert!(!validator().is_valid(text));
    }

    #[test]
    fn test_short_introduction_fails() {
        let text = "Name: A\nAge : 5\nFavourite Game RN: X\nExperience: Y\nHope: Z\nFun fact: W";
        assert_eq!(text.chars().count(), 70);

        let strict = FormatValidator::new(80);
        assert_eq!(
            strict.check(text),
            FormatCheck::TooShort {
                length: 70,
                min_length: 80
            }
        );
    }

    #[test]
    fn test_bare_template_clears_default_threshold() {
        // the six labels alone are already 53 characters
        assert_eq!(COPYABLE_TEMPLATE.chars().count(), 60);
        assert!(validator().is_valid(COPYABLE_TEMPLATE));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let base = "Name: A\nAge : 5\nFavourite Game RN: X\nExperience: Y\nHope: Z\nFun fact: W";
        let strict = FormatValidator::new(72);

        let one_accent = format!("{}\u{e9}", base);
        assert_eq!(one_accent.chars().count(), 71);
        assert_eq!(one_accent.len(), 72);
        assert!(!strict.is_valid(&one_accent));

        let two_accents = format!("{}\u{e9}\u{e9}", base);
        assert!(strict.is_valid(&two_accents));
    }

    #[test]
    fn test_length_is_measured_after_trimming() {
        let base = "Name: A\nAge : 5\nFavourite Game RN: X\nExperience: Y\nHope: Z\nFun fact: W";
        let strict = FormatValidator::new(72);

        assert!(!strict.is_valid(&format!("{}{}", base, " ".repeat(10))));
        assert!(strict.is_valid(&format!("{}!!", base)));
    }
}
