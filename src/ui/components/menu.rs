use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::content::Course;
use crate::ui::theme::{Theme, ThemeColors};

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
    pub color: Option<String>,
}

impl MenuItem {
    pub fn from_course(index: usize, course: &Course) -> Self {
        let emoji = if course.emoji.is_empty() {
            String::new()
        } else {
            format!("{} ", course.emoji)
        };
        Self {
            key: (index + 1).to_string(),
            label: format!("{emoji}{} ({})", course.title, course.id),
            description: format!(
                "{}원 코스 · {}초 · {}",
                course.cost, course.time_limit, course.length_desc
            ),
            color: Some(course.color.clone()).filter(|c| !c.is_empty()),
        }
    }
}

/// Course list with a selection cursor.
pub struct Menu<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn courses(courses: &[Course], selected: usize, theme: &'a Theme) -> Self {
        Self {
            title: "코스 선택",
            subtitle: "원하는 코스를 고르세요",
            items: courses
                .iter()
                .enumerate()
                .map(|(i, c)| MenuItem::from_course(i, c))
                .collect(),
            selected,
            theme,
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.title,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.subtitle, Style::default().fg(colors.fg()))),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let item_color = item
                .color
                .as_deref()
                .map(ThemeColors::parse_color)
                .unwrap_or_else(|| colors.fg());

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("       {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected { colors.accent() } else { item_color })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

/// The idle screen.
pub struct TitleScreen<'a> {
    pub theme: &'a Theme,
}

impl Widget for TitleScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled("🍣 🍣 🍣", Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(Span::styled(
                "스시 타자",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "회전초밥 타자 게임",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] 시작하기   [q] 종료",
                Style::default().fg(colors.accent()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
