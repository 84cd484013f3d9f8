use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Widget};

use crate::session::game::ItemView;
use crate::ui::components::typing_area::word_spans;
use crate::ui::theme::Theme;

/// The belt lane. The live plate enters at the right edge and leaves at the
/// left edge as its travel progress goes from 0 to 1.
pub struct Conveyor<'a> {
    item: Option<&'a ItemView>,
    input: &'a str,
    composing: bool,
    plate_color: Option<Color>,
    bonus_seconds: Option<u32>,
    theme: &'a Theme,
}

impl<'a> Conveyor<'a> {
    pub fn new(item: Option<&'a ItemView>, input: &'a str, composing: bool, theme: &'a Theme) -> Self {
        Self {
            item,
            input,
            composing,
            plate_color: None,
            bonus_seconds: None,
            theme,
        }
    }

    pub fn plate_color(mut self, color: Option<Color>) -> Self {
        self.plate_color = color;
        self
    }

    pub fn bonus(mut self, seconds: Option<u32>) -> Self {
        self.bonus_seconds = seconds;
        self
    }
}

/// Left column of a plate `plate_width` wide on a lane `lane_width` wide.
pub fn plate_x(progress: f64, lane_width: u16, plate_width: u16) -> u16 {
    let travel = f64::from(lane_width.saturating_sub(plate_width));
    ((1.0 - progress.clamp(0.0, 1.0)) * travel).round() as u16
}

impl Widget for Conveyor<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 || inner.width < 8 {
            return;
        }

        let belt_y = inner.y + inner.height - 1;
        let belt: String = "▀".repeat(inner.width as usize);
        buf.set_string(inner.x, belt_y, &belt, Style::default().fg(colors.belt()));

        if let Some(seconds) = self.bonus_seconds {
            let text = format!(" +{seconds}초 추가! ");
            let line = Line::from(Span::styled(
                text,
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ));
            let x = inner.x + inner.width.saturating_sub(line.width() as u16) / 2;
            buf.set_line(x, inner.y, &line, inner.width);
        }

        let Some(item) = self.item else {
            return;
        };

        let word = Line::from(word_spans(&item.word, self.input, self.composing, colors));
        let price = Line::from(Span::styled(
            format!("{} {}원", item.emoji, item.price),
            Style::default().fg(colors.fg()),
        ));
        let plate_color = self.plate_color.unwrap_or_else(|| colors.accent());
        let dish_width = (word.width().max(price.width()) + 4) as u16;
        let dish_width = dish_width.min(inner.width);
        let dish = Line::from(Span::styled(
            "▄".repeat(dish_width as usize),
            Style::default().fg(plate_color),
        ));

        let x = inner.x + plate_x(item.progress, inner.width, dish_width);
        let center = |line: &Line| x + dish_width.saturating_sub(line.width() as u16) / 2;

        buf.set_line(center(&word), belt_y - 3, &word, dish_width);
        buf.set_line(center(&price), belt_y - 2, &price, dish_width);
        buf.set_line(x, belt_y - 1, &dish, dish_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::spawner::ItemId;

    #[test]
    fn plate_moves_right_to_left() {
        assert_eq!(plate_x(0.0, 50, 10), 40);
        assert_eq!(plate_x(0.5, 50, 10), 20);
        assert_eq!(plate_x(1.0, 50, 10), 0);
        assert_eq!(plate_x(2.0, 50, 10), 0);
        assert_eq!(plate_x(0.0, 8, 10), 0);
    }

    #[test]
    fn renders_word_and_bonus() {
        let theme = Theme::default();
        let item = ItemView {
            id: ItemId(0),
            word: "가방".to_string(),
            price: 1800,
            travel_secs: 10.0,
            emoji: "🍣".to_string(),
            progress: 0.0,
        };
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        Conveyor::new(Some(&item), "", false, &theme)
            .bonus(Some(2))
            .render(area, &mut buf);

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        let all = rows.join("\n");
        assert!(all.contains('가'));
        assert!(all.contains("1800원"));
        assert!(all.contains("+2"));
        assert!(all.contains('추'));
    }
}
