/// One key of the two-set (dubeolsik) Hangul layout, as a compatibility jamo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jamo {
    Consonant(char),
    Vowel(char),
}

/// Maps a QWERTY key to its dubeolsik jamo. Shift only matters for the five
/// tense consonants and the two extra vowels.
pub fn jamo_for_key(key: char) -> Option<Jamo> {
    let jamo = match key {
        'Q' => Jamo::Consonant('ㅃ'),
        'W' => Jamo::Consonant('ㅉ'),
        'E' => Jamo::Consonant('ㄸ'),
        'R' => Jamo::Consonant('ㄲ'),
        'T' => Jamo::Consonant('ㅆ'),
        'O' => Jamo::Vowel('ㅒ'),
        'P' => Jamo::Vowel('ㅖ'),
        'A'..='Z' => return jamo_for_key(key.to_ascii_lowercase()),
        'q' => Jamo::Consonant('ㅂ'),
        'w' => Jamo::Consonant('ㅈ'),
        'e' => Jamo::Consonant('ㄷ'),
        'r' => Jamo::Consonant('ㄱ'),
        't' => Jamo::Consonant('ㅅ'),
        'y' => Jamo::Vowel('ㅛ'),
        'u' => Jamo::Vowel('ㅕ'),
        'i' => Jamo::Vowel('ㅑ'),
        'o' => Jamo::Vowel('ㅐ'),
        'p' => Jamo::Vowel('ㅔ'),
        'a' => Jamo::Consonant('ㅁ'),
        's' => Jamo::Consonant('ㄴ'),
        'd' => Jamo::Consonant('ㅇ'),
        'f' => Jamo::Consonant('ㄹ'),
        'g' => Jamo::Consonant('ㅎ'),
        'h' => Jamo::Vowel('ㅗ'),
        'j' => Jamo::Vowel('ㅓ'),
        'k' => Jamo::Vowel('ㅏ'),
        'l' => Jamo::Vowel('ㅣ'),
        'z' => Jamo::Consonant('ㅋ'),
        'x' => Jamo::Consonant('ㅌ'),
        'c' => Jamo::Consonant('ㅊ'),
        'v' => Jamo::Consonant('ㅍ'),
        'b' => Jamo::Vowel('ㅠ'),
        'n' => Jamo::Vowel('ㅜ'),
        'm' => Jamo::Vowel('ㅡ'),
        _ => return None,
    };
    Some(jamo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_selects_tense_consonant() {
        assert_eq!(jamo_for_key('r'), Some(Jamo::Consonant('ㄱ')));
        assert_eq!(jamo_for_key('R'), Some(Jamo::Consonant('ㄲ')));
    }

    #[test]
    fn shift_is_ignored_for_plain_keys() {
        assert_eq!(jamo_for_key('K'), jamo_for_key('k'));
        assert_eq!(jamo_for_key('M'), Some(Jamo::Vowel('ㅡ')));
    }

    #[test]
    fn non_letters_are_not_jamo() {
        assert_eq!(jamo_for_key('1'), None);
        assert_eq!(jamo_for_key(' '), None);
        assert_eq!(jamo_for_key('학'), None);
    }
}
