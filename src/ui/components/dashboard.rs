use std::collections::BTreeMap;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::content::ContentRegistry;
use crate::engine::stats::RoundStats;
use crate::ui::components::plate_bar::PlateBar;
use crate::ui::theme::Theme;

/// End-of-round summary.
pub struct Dashboard<'a> {
    pub stats: RoundStats,
    pub course_title: &'a str,
    pub cost: u32,
    pub score: u64,
    pub correct_keys: u64,
    pub mistypes: u64,
    pub misses: u32,
    pub plate_counts: &'a BTreeMap<u32, u32>,
    pub content: &'a ContentRegistry,
    pub theme: &'a Theme,
}

pub fn verdict(stats: &RoundStats) -> String {
    let amount = stats.profit_or_loss.unsigned_abs();
    if stats.is_profit() {
        format!("{amount}원 이득!")
    } else {
        format!("{amount}원 손해...")
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} 결과 ", self.course_title))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let verdict_color = if self.stats.is_profit() {
            colors.success()
        } else {
            colors.error()
        };
        Paragraph::new(Line::from(Span::styled(
            verdict(&self.stats),
            Style::default()
                .fg(verdict_color)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {label:<10}"), Style::default().fg(colors.fg())),
                Span::styled(
                    value,
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        Paragraph::new(row(
            "먹은 금액",
            format!("{}원 / 코스 {}원", self.score, self.cost),
        ))
        .render(layout[1], buf);
        Paragraph::new(row("정타 수", self.correct_keys.to_string())).render(layout[2], buf);
        Paragraph::new(row(
            "평균 타수",
            format!("{}회/초", self.stats.avg_keys_display()),
        ))
        .render(layout[3], buf);
        Paragraph::new(row("오타 수", self.mistypes.to_string())).render(layout[4], buf);
        Paragraph::new(row(
            "놓친 접시",
            format!("{}  ({}초 플레이)", self.misses, self.stats.actual_play_time),
        ))
        .render(layout[5], buf);

        PlateBar::new(self.plate_counts, self.content, self.score, self.theme)
            .render(layout[6], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [Esc/r] 다시하기  ", Style::default().fg(colors.accent())),
            Span::styled("[c] 코스 선택  ", Style::default().fg(colors.accent())),
            Span::styled("[t] 처음으로", Style::default().fg(colors.accent())),
        ]))
        .render(layout[7], buf);
    }
}
