use crate::keyboard::ime::{ImeEvent, TextInput};
use crate::keyboard::layout::{Jamo, jamo_for_key};

const SYLLABLE_BASE: u32 = 0xAC00;
const JUNG_COUNT: u32 = 21;
const JONG_COUNT: u32 = 28;

const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
    'ㅍ', 'ㅎ',
];

const JUNGSEONG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ',
    'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

// Index 0 of the syllable formula is "no final", so position here is index - 1.
const JONGSEONG: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ', 'ㅂ',
    'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

const VOWEL_PAIRS: [(char, char, char); 7] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

const FINAL_PAIRS: [(char, char, char); 11] = [
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

fn combine(pairs: &[(char, char, char)], first: char, second: char) -> Option<char> {
    pairs
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, c)| c)
}

fn split(pairs: &[(char, char, char)], compound: char) -> Option<(char, char)> {
    pairs
        .iter()
        .find(|&&(_, _, c)| c == compound)
        .map(|&(a, b, _)| (a, b))
}

fn index_of(table: &[char], ch: char) -> Option<u32> {
    table.iter().position(|&c| c == ch).map(|i| i as u32)
}

/// The syllable currently being composed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Syllable {
    cho: Option<char>,
    jung: Option<char>,
    jong: Option<char>,
}

impl Syllable {
    fn is_empty(&self) -> bool {
        self.cho.is_none() && self.jung.is_none() && self.jong.is_none()
    }

    fn render(&self) -> Option<char> {
        match (self.cho, self.jung) {
            (Some(cho), Some(jung)) => {
                let l = index_of(&CHOSEONG, cho)?;
                let v = index_of(&JUNGSEONG, jung)?;
                let t = match self.jong {
                    Some(jong) => index_of(&JONGSEONG, jong)? + 1,
                    None => 0,
                };
                char::from_u32(SYLLABLE_BASE + (l * JUNG_COUNT + v) * JONG_COUNT + t)
            }
            (Some(cho), None) => Some(cho),
            (None, Some(jung)) => Some(jung),
            (None, None) => None,
        }
    }
}

/// Two-set Hangul input method. Keys are QWERTY characters; output mirrors
/// the composition events a platform IME would deliver.
#[derive(Clone, Debug, Default)]
pub struct HangulComposer {
    committed: String,
    pre: Syllable,
}

impl HangulComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preedit(&self) -> Option<char> {
        self.pre.render()
    }

    /// Finishes the current syllable, returning it.
    fn flush(&mut self) -> Option<char> {
        let done = self.pre.render();
        self.pre = Syllable::default();
        if let Some(ch) = done {
            self.committed.push(ch);
        }
        done
    }

    /// Applies one jamo. Returns true if a finished syllable was pushed out.
    fn feed(&mut self, jamo: Jamo) -> bool {
        let pre = self.pre;
        match jamo {
            Jamo::Consonant(c) => match (pre.cho, pre.jung, pre.jong) {
                (None, None, _) => {
                    self.pre.cho = Some(c);
                    false
                }
                (Some(_), Some(_), None) if index_of(&JONGSEONG, c).is_some() => {
                    self.pre.jong = Some(c);
                    false
                }
                (Some(_), Some(_), Some(jong)) => match combine(&FINAL_PAIRS, jong, c) {
                    Some(compound) => {
                        self.pre.jong = Some(compound);
                        false
                    }
                    None => self.restart_with(Syllable {
                        cho: Some(c),
                        ..Syllable::default()
                    }),
                },
                _ => self.restart_with(Syllable {
                    cho: Some(c),
                    ..Syllable::default()
                }),
            },
            Jamo::Vowel(v) => match (pre.cho, pre.jung, pre.jong) {
                (_, None, _) => {
                    self.pre.jung = Some(v);
                    false
                }
                (_, Some(jung), None) => match combine(&VOWEL_PAIRS, jung, v) {
                    Some(compound) => {
                        self.pre.jung = Some(compound);
                        false
                    }
                    None => self.restart_with(Syllable {
                        jung: Some(v),
                        ..Syllable::default()
                    }),
                },
                (_, Some(_), Some(jong)) => {
                    // The final consonant moves over to start the next syllable.
                    let (kept, moved) = match split(&FINAL_PAIRS, jong) {
                        Some((first, second)) => (Some(first), second),
                        None => (None, jong),
                    };
                    self.pre.jong = kept;
                    self.restart_with(Syllable {
                        cho: Some(moved),
                        jung: Some(v),
                        jong: None,
                    })
                }
            },
        }
    }

    fn restart_with(&mut self, next: Syllable) -> bool {
        let flushed = self.flush().is_some();
        self.pre = next;
        flushed
    }

    fn undo_jamo(&mut self) {
        if let Some(jong) = self.pre.jong {
            self.pre.jong = split(&FINAL_PAIRS, jong).map(|(first, _)| first);
        } else if let Some(jung) = self.pre.jung {
            self.pre.jung = split(&VOWEL_PAIRS, jung).map(|(first, _)| first);
        } else {
            self.pre.cho = None;
        }
    }
}

impl TextInput for HangulComposer {
    fn key(&mut self, key: char) -> Vec<ImeEvent> {
        let Some(jamo) = jamo_for_key(key) else {
            let mut events = self.commit();
            self.committed.push(key);
            events.push(ImeEvent::Change {
                value: self.value(),
                composing: false,
            });
            return events;
        };

        let was_composing = self.is_composing();
        let flushed = self.feed(jamo);
        let mut events = Vec::with_capacity(3);
        if flushed {
            events.push(ImeEvent::CompositionEnd {
                value: self.committed.clone(),
            });
        }
        if flushed || !was_composing {
            events.push(ImeEvent::CompositionStart);
        }
        events.push(ImeEvent::Change {
            value: self.value(),
            composing: true,
        });
        events
    }

    fn commit(&mut self) -> Vec<ImeEvent> {
        if self.flush().is_none() {
            return Vec::new();
        }
        vec![ImeEvent::CompositionEnd {
            value: self.committed.clone(),
        }]
    }

    fn backspace(&mut self) -> Vec<ImeEvent> {
        if self.is_composing() {
            self.undo_jamo();
            if self.pre.is_empty() {
                return vec![ImeEvent::CompositionEnd {
                    value: self.committed.clone(),
                }];
            }
            return vec![ImeEvent::Change {
                value: self.value(),
                composing: true,
            }];
        }
        if self.committed.pop().is_none() {
            return Vec::new();
        }
        vec![ImeEvent::Change {
            value: self.value(),
            composing: false,
        }]
    }

    fn clear_committed(&mut self) -> Vec<ImeEvent> {
        self.committed.clear();
        if !self.is_composing() {
            return Vec::new();
        }
        vec![
            ImeEvent::CompositionStart,
            ImeEvent::Change {
                value: self.value(),
                composing: true,
            },
        ]
    }

    fn reset(&mut self) {
        self.committed.clear();
        self.pre = Syllable::default();
    }

    fn value(&self) -> String {
        let mut value = self.committed.clone();
        if let Some(ch) = self.pre.render() {
            value.push(ch);
        }
        value
    }

    fn is_composing(&self) -> bool {
        !self.pre.is_empty()
    }
}
