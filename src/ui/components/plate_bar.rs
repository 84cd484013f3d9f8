use std::collections::BTreeMap;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::content::ContentRegistry;
use crate::ui::theme::{Theme, ThemeColors};

/// Plates eaten per price tier, cheapest first.
pub struct PlateBar<'a> {
    counts: &'a BTreeMap<u32, u32>,
    content: &'a ContentRegistry,
    score: u64,
    theme: &'a Theme,
}

impl<'a> PlateBar<'a> {
    pub fn new(
        counts: &'a BTreeMap<u32, u32>,
        content: &'a ContentRegistry,
        score: u64,
        theme: &'a Theme,
    ) -> Self {
        Self {
            counts,
            content,
            score,
            theme,
        }
    }
}

impl Widget for PlateBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {}원 ", self.score))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.counts.is_empty() || inner.width == 0 {
            return;
        }

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                self.counts
                    .keys()
                    .map(|_| Constraint::Ratio(1, self.counts.len() as u32))
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for ((price, count), cell) in self.counts.iter().zip(cells.iter()) {
            let plate_color = self
                .content
                .plate(*price)
                .map(|p| ThemeColors::parse_color(&p.color))
                .unwrap_or_else(|| colors.accent());
            let lines = vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(plate_color)),
                    Span::styled(format!("{price}원"), Style::default().fg(colors.text_pending())),
                ]),
                Line::from(Span::styled(
                    format!("× {count}"),
                    Style::default()
                        .fg(if *count > 0 { colors.fg() } else { colors.text_pending() })
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            Paragraph::new(lines).render(*cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_every_tier() {
        let content = ContentRegistry::load().unwrap();
        let theme = Theme::default();
        let mut counts: BTreeMap<u32, u32> = content.prices().into_iter().map(|p| (p, 0)).collect();
        counts.insert(2400, 3);

        let area = Rect::new(0, 0, 80, 4);
        let mut buf = Buffer::empty(area);
        PlateBar::new(&counts, &content, 7200, &theme).render(area, &mut buf);

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        for price in content.prices() {
            assert!(rows[1].contains(&price.to_string()), "missing {price}");
        }
        assert!(rows[2].contains("× 3"));
        assert!(rows[0].contains("7200"));
    }
}
