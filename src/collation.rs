// 🔤 Thai Collation - Explicit locale-aware string ordering
// Reproduces the dictionary order Thai readers expect without relying on a
// runtime locale.
//
// Three levels, compared in order:
// 1. Primary: base letters. Leading vowels (เ แ โ ใ ไ) are swapped with the
//    consonant that follows them, tone marks and other diacritics are
//    skipped, Thai digits weigh the same as ASCII digits, Latin is caseless.
// 2. Secondary: the tone marks / diacritics, with their positions.
// 3. Tertiary: the original characters (case, digit script).
//
// Only strings that are identical compare Equal, so sorting is total.

use std::cmp::Ordering;

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

/// ก (U+0E01) ..= ฮ (U+0E2E)
fn is_thai_consonant(c: char) -> bool {
    ('\u{0E01}'..='\u{0E2E}').contains(&c)
}

/// เ แ โ ใ ไ - written before the consonant they follow in speech
fn is_leading_vowel(c: char) -> bool {
    ('\u{0E40}'..='\u{0E44}').contains(&c)
}

/// Mai taikhu, the four tone marks, thanthakhat, nikhahit and yamakkan
fn is_diacritic(c: char) -> bool {
    ('\u{0E47}'..='\u{0E4E}').contains(&c)
}

/// Thai digits ๐ ..= ๙
fn thai_digit_value(c: char) -> Option<u32> {
    if ('\u{0E50}'..='\u{0E59}').contains(&c) {
        Some(c as u32 - 0x0E50)
    } else {
        None
    }
}

fn primary_weight(c: char) -> u32 {
    if let Some(digit) = thai_digit_value(c) {
        return '0' as u32 + digit;
    }
    // Caseless at the primary level; multi-char lowercases keep the first.
    c.to_lowercase().next().unwrap_or(c) as u32
}

// ============================================================================
// SORT KEY
// ============================================================================

/// Precomputed collation key for one string.
///
/// Cheap to compare repeatedly; build once per element when sorting large
/// collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThaiSortKey {
    primary: Vec<u32>,
    secondary: Vec<(usize, u32)>,
    tertiary: Vec<u32>,
}

impl ThaiSortKey {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut primary = Vec::with_capacity(chars.len());
        let mut secondary = Vec::new();

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];

            if is_leading_vowel(c) && i + 1 < chars.len() && is_thai_consonant(chars[i + 1]) {
                primary.push(primary_weight(chars[i + 1]));
                primary.push(primary_weight(c));
                i += 2;
                continue;
            }

            if is_diacritic(c) {
                // Attach to the base letter written before it
                secondary.push((primary.len(), c as u32));
            } else {
                primary.push(primary_weight(c));
            }
            i += 1;
        }

        ThaiSortKey {
            primary,
            secondary,
            tertiary: chars.iter().map(|&c| c as u32).collect(),
        }
    }
}

impl Ord for ThaiSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.secondary.cmp(&other.secondary))
            .then_with(|| self.tertiary.cmp(&other.tertiary))
    }
}

impl PartialOrd for ThaiSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two strings in Thai dictionary order
pub fn thai_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    ThaiSortKey::new(a).cmp(&ThaiSortKey::new(b))
}

/// Compare optional strings; missing values sort after present ones
pub fn thai_compare_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => thai_compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        out.sort_by(|a, b| thai_compare(a, b));
        out
    }

    #[test]
    fn test_consonant_order() {
        assert_eq!(thai_compare("ก", "ข"), Ordering::Less);
        assert_eq!(thai_compare("ฮ", "ก"), Ordering::Greater);
        assert_eq!(thai_compare("ก", "ก"), Ordering::Equal);
    }

    #[test]
    fn test_leading_vowel_sorts_by_following_consonant() {
        // "เก" is keyed on ก, so it precedes "ขา" even though เ > ข by code point
        assert_eq!(thai_compare("เก", "ขา"), Ordering::Less);
        assert_eq!(sorted(&["ไก่", "กา", "ข"]), vec!["กา", "ไก่", "ข"]);
    }

    #[test]
    fn test_tone_marks_are_secondary() {
        // Tone marks only break ties between otherwise equal words
        assert_eq!(thai_compare("ก่า", "กาก"), Ordering::Less);
        assert_eq!(thai_compare("กา", "ก่า"), Ordering::Less);
        assert_ne!(thai_compare("ก่า", "ก้า"), Ordering::Equal);
    }

    #[test]
    fn test_province_names() {
        assert_eq!(
            sorted(&["เชียงใหม่", "กรุงเทพมหานคร", "ขอนแก่น", "ชลบุรี"]),
            vec!["กรุงเทพมหานคร", "ขอนแก่น", "ชลบุรี", "เชียงใหม่"]
        );
    }

    #[test]
    fn test_thai_and_ascii_digits_share_primary_weight() {
        assert_eq!(thai_compare("เขต ๑", "เขต 2"), Ordering::Less);
        assert_ne!(thai_compare("๑", "1"), Ordering::Equal);
    }

    #[test]
    fn test_latin_is_caseless_at_primary_level() {
        assert_eq!(thai_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(thai_compare("Zebra", "ก"), Ordering::Less);
    }

    #[test]
    fn test_optional_missing_sorts_last() {
        assert_eq!(thai_compare_opt(Some("ก"), None), Ordering::Less);
        assert_eq!(thai_compare_opt(None, Some("ก")), Ordering::Greater);
        assert_eq!(thai_compare_opt(None, None), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn equal_only_when_identical(a in "[ก-ฮเ-ไ่-๋a-zA-Z ]{0,8}", b in "[ก-ฮเ-ไ่-๋a-zA-Z ]{0,8}") {
            prop_assert_eq!(thai_compare(&a, &b) == Ordering::Equal, a == b);
        }

        #[test]
        fn antisymmetric(a in "[ก-ฮเ-ไ่-๋ ]{0,8}", b in "[ก-ฮเ-ไ่-๋ ]{0,8}") {
            prop_assert_eq!(thai_compare(&a, &b), thai_compare(&b, &a).reverse());
        }
    }
}
