use crate::keyboard::normalize::{char_len, nfc};

/// How one text-entry event was classified against the current target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// Not playing; the event was dropped.
    Ignored,
    /// Composition in progress; shown but not judged.
    Deferred,
    /// No live item; stored without scoring.
    Absorbed,
    /// The value equals the target word.
    Completed { correct_keys: u64 },
    /// The value is a prefix of the target. `correct_keys` may be zero.
    Progress { correct_keys: u64 },
    /// The value grew and is no longer a prefix of the target.
    Mistype,
    /// Not a prefix, but did not grow (e.g. a backspace).
    Invalid,
}

/// Text typed against the live item.
///
/// `typed_len` is the length of the last judged value and decides whether an
/// invalid edit grew the buffer. `prefix_len` is how many leading characters
/// of that value match the target; correct keys are paid for growth past it.
/// Composing changes move neither.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    value: String,
    typed_len: usize,
    prefix_len: usize,
    composing: bool,
}

impl InputBuffer {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn begin_composition(&mut self) {
        self.composing = true;
    }

    /// A change event. While composing only the display value moves.
    pub fn update(&mut self, raw: &str, target: Option<&str>) -> MatchResult {
        if self.composing {
            self.value = raw.to_string();
            return MatchResult::Deferred;
        }
        self.classify(raw, target)
    }

    /// Composition finished with `raw` as the field value.
    pub fn commit_text(&mut self, raw: &str, target: Option<&str>) -> MatchResult {
        self.composing = false;
        self.classify(raw, target)
    }

    /// Empties the field for the next item. An open composition stays open.
    pub fn reset(&mut self) {
        self.value.clear();
        self.typed_len = 0;
        self.prefix_len = 0;
    }

    /// Drops everything, including the composition state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn classify(&mut self, raw: &str, target: Option<&str>) -> MatchResult {
        let value = nfc(raw);
        let len = char_len(&value);

        let Some(word) = target else {
            self.value = value;
            self.typed_len = len;
            self.prefix_len = 0;
            return MatchResult::Absorbed;
        };

        if value == word {
            let correct_keys = char_len(word).saturating_sub(self.prefix_len) as u64;
            self.reset();
            return MatchResult::Completed { correct_keys };
        }

        let grew = len > self.typed_len;
        let previous_prefix = self.prefix_len;
        self.typed_len = len;
        self.prefix_len = common_prefix_len(&value, word);
        self.value = value;

        if word.starts_with(self.value.as_str()) {
            let correct_keys = len.saturating_sub(previous_prefix) as u64;
            MatchResult::Progress { correct_keys }
        } else if grew {
            MatchResult::Mistype
        } else {
            MatchResult::Invalid
        }
    }
}

fn common_prefix_len(value: &str, word: &str) -> usize {
    value
        .chars()
        .zip(word.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_invalid_then_valid_prefix() {
        let mut buf = InputBuffer::default();
        assert_eq!(buf.update("하", Some("학교")), MatchResult::Mistype);
        assert_eq!(
            buf.update("학", Some("학교")),
            MatchResult::Progress { correct_keys: 1 }
        );
        assert_eq!(buf.value(), "학");
    }

    #[test]
    fn exact_match_credits_uncounted_chars() {
        let mut buf = InputBuffer::default();
        buf.update("학", Some("학교"));
        assert_eq!(
            buf.update("학교", Some("학교")),
            MatchResult::Completed { correct_keys: 1 }
        );
        assert_eq!(buf.value(), "");
    }

    #[test]
    fn composed_commit_of_whole_word_credits_every_char() {
        let mut buf = InputBuffer::default();
        buf.begin_composition();
        assert_eq!(buf.update("ㅎ", Some("학교")), MatchResult::Deferred);
        assert_eq!(buf.update("학교", Some("학교")), MatchResult::Deferred);
        assert_eq!(buf.value(), "학교");
        assert_eq!(
            buf.commit_text("학교", Some("학교")),
            MatchResult::Completed { correct_keys: 2 }
        );
    }

    #[test]
    fn one_invalid_edit_is_one_mistype_regardless_of_width() {
        let mut buf = InputBuffer::default();
        assert_eq!(buf.update("xyz", Some("학교")), MatchResult::Mistype);
        assert_eq!(buf.value(), "xyz");
    }

    #[test]
    fn shrinking_never_scores() {
        let mut buf = InputBuffer::default();
        buf.update("학x", Some("학교"));
        assert_eq!(buf.update("학", Some("학교")), MatchResult::Progress { correct_keys: 0 });
        assert_eq!(buf.update("", Some("학교")), MatchResult::Progress { correct_keys: 0 });
    }

    #[test]
    fn backspace_within_invalid_text_is_not_a_mistype() {
        let mut buf = InputBuffer::default();
        buf.update("xy", Some("학교"));
        assert_eq!(buf.update("x", Some("학교")), MatchResult::Invalid);
        assert_eq!(buf.update("xz", Some("학교")), MatchResult::Mistype);
    }

    #[test]
    fn backspaced_prefix_is_credited_again_when_retyped() {
        let mut buf = InputBuffer::default();
        buf.update("학", Some("학교"));
        assert_eq!(buf.update("", Some("학교")), MatchResult::Progress { correct_keys: 0 });
        assert_eq!(buf.update("학", Some("학교")), MatchResult::Progress { correct_keys: 1 });
    }

    #[test]
    fn correcting_a_typo_pays_only_past_the_matching_part() {
        let mut buf = InputBuffer::default();
        assert_eq!(buf.update("학", Some("학교")), MatchResult::Progress { correct_keys: 1 });
        assert_eq!(buf.update("학x", Some("학교")), MatchResult::Mistype);
        // "학" was already paid; only "교" is new.
        assert_eq!(
            buf.update("학교", Some("학교")),
            MatchResult::Completed { correct_keys: 1 }
        );
    }

    #[test]
    fn reset_keeps_an_open_composition() {
        let mut buf = InputBuffer::default();
        buf.begin_composition();
        buf.update("ㅎ", Some("학교"));
        buf.reset();
        assert_eq!(buf.value(), "");
        assert!(buf.is_composing());
        assert_eq!(buf.update("ㅎ", Some("사과")), MatchResult::Deferred);

        buf.clear();
        assert!(!buf.is_composing());
    }

    #[test]
    fn no_target_absorbs_input() {
        let mut buf = InputBuffer::default();
        assert_eq!(buf.update("아무거나", None), MatchResult::Absorbed);
        assert_eq!(buf.value(), "아무거나");
    }

    #[test]
    fn decomposed_input_matches_precomposed_target() {
        let mut buf = InputBuffer::default();
        assert_eq!(
            buf.update("\u{1112}\u{1161}\u{11A8}\u{1100}\u{116D}", Some("학교")),
            MatchResult::Completed { correct_keys: 2 }
        );
    }
}
