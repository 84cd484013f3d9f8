use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::{Theme, ThemeColors};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    /// Under the pre-edit; judged once it is committed.
    Composing,
    Pending,
}

/// Per-character state of `word` given what has been typed so far.
pub fn char_states(word: &str, input: &str, composing: bool) -> Vec<CharState> {
    let typed: Vec<char> = input.chars().collect();
    let preedit_at = if composing { typed.len().checked_sub(1) } else { None };

    word.chars()
        .enumerate()
        .map(|(i, target)| match typed.get(i) {
            _ if Some(i) == preedit_at => CharState::Composing,
            Some(&ch) if ch == target => CharState::Correct,
            Some(_) => CharState::Incorrect,
            None => CharState::Pending,
        })
        .collect()
}

/// The target word coloured against the current input.
pub fn word_spans(word: &str, input: &str, composing: bool, colors: &ThemeColors) -> Vec<Span<'static>> {
    word.chars()
        .zip(char_states(word, input, composing))
        .map(|(ch, state)| {
            let style = match state {
                CharState::Correct => Style::default().fg(colors.text_correct()),
                CharState::Incorrect => Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg()),
                CharState::Composing => Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
                CharState::Pending => Style::default().fg(colors.fg()),
            };
            Span::styled(ch.to_string(), style.add_modifier(Modifier::BOLD))
        })
        .collect()
}

/// The text field. The pre-edit syllable is underlined.
pub struct InputLine<'a> {
    input: &'a str,
    composing: bool,
    valid: bool,
    theme: &'a Theme,
}

impl<'a> InputLine<'a> {
    pub fn new(input: &'a str, composing: bool, target: Option<&str>, theme: &'a Theme) -> Self {
        let committed = committed_part(input, composing);
        let valid = target.is_none_or(|word| word.starts_with(committed));
        Self {
            input,
            composing,
            valid,
            theme,
        }
    }
}

fn committed_part(input: &str, composing: bool) -> &str {
    if !composing {
        return input;
    }
    match input.char_indices().last() {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

impl Widget for InputLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let committed = committed_part(self.input, self.composing);
        let preedit = &self.input[committed.len()..];
        let text_style = Style::default().fg(if self.valid {
            colors.text_correct()
        } else {
            colors.text_incorrect()
        });

        let mut spans = vec![
            Span::styled(" ", Style::default()),
            Span::styled(committed.to_string(), text_style),
        ];
        if !preedit.is_empty() {
            spans.push(Span::styled(
                preedit.to_string(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::UNDERLINED),
            ));
        }
        spans.push(Span::styled(
            " ",
            Style::default().bg(colors.text_cursor_bg()),
        ));

        let block = Block::bordered()
            .title(" 입력 ")
            .border_style(Style::default().fg(if self.valid {
                colors.border_focused()
            } else {
                colors.error()
            }))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CharState::*;

    #[test]
    fn prefix_is_correct_rest_pending() {
        assert_eq!(char_states("학교", "학", false), vec![Correct, Pending]);
    }

    #[test]
    fn wrong_char_is_marked() {
        assert_eq!(char_states("학교", "하", false), vec![Incorrect, Pending]);
    }

    #[test]
    fn preedit_is_not_judged() {
        assert_eq!(char_states("학교", "학ㄱ", true), vec![Correct, Composing]);
        assert_eq!(char_states("학교", "하", true), vec![Composing, Pending]);
    }

    #[test]
    fn overflow_input_is_ignored() {
        assert_eq!(char_states("학", "학교", false), vec![Correct]);
    }

    #[test]
    fn committed_part_drops_preedit() {
        assert_eq!(committed_part("학교", true), "학");
        assert_eq!(committed_part("학교", false), "학교");
        assert_eq!(committed_part("", true), "");
    }

    #[test]
    fn invalid_committed_text_is_flagged() {
        let theme = Theme::default();
        assert!(InputLine::new("학ㄱ", true, Some("학교"), &theme).valid);
        assert!(!InputLine::new("하", false, Some("학교"), &theme).valid);
        assert!(InputLine::new("아무", false, None, &theme).valid);
    }
}
