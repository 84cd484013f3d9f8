use icu_normalizer::ComposingNormalizerBorrowed;

/// Canonical composition, so conjoining jamo sequences compare equal to
/// precomposed syllables.
pub fn nfc(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text)
        .into_owned()
}

/// Length in scalar values. Hangul syllables count as one.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
