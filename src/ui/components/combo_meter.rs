use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Bonus each quarter of the meter pays out when it fills.
pub const SEGMENT_LABELS: [&str; 4] = ["+1s", "+1s", "+2s", "+3s"];

/// Four-segment combo gauge. `percent` is the fill in `[0, 100]`.
pub struct ComboMeter<'a> {
    pub percent: f64,
    pub combo: u32,
    pub theme: &'a Theme,
}

impl<'a> ComboMeter<'a> {
    pub fn new(percent: f64, combo: u32, theme: &'a Theme) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            combo,
            theme,
        }
    }
}

/// Cells of `width` covered by `percent`.
fn filled_cells(percent: f64, width: u16) -> u16 {
    ((percent / 100.0) * f64::from(width)).round() as u16
}

impl Widget for ComboMeter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" 콤보 {} ", self.combo))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled = filled_cells(self.percent, inner.width).min(inner.width);
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let segment = inner.width / SEGMENT_LABELS.len() as u16;
        if segment < 4 {
            return;
        }
        for (i, label) in SEGMENT_LABELS.iter().enumerate() {
            let seg_x = inner.x + segment * i as u16;
            let label_x = seg_x + segment.saturating_sub(label.len() as u16) / 2;
            let lit = label_x < inner.x + filled;
            let style = Style::default()
                .fg(if lit { colors.bg() } else { colors.text_pending() })
                .add_modifier(Modifier::BOLD);
            buf.set_string(label_x, inner.y, label, style);
            if i > 0 {
                buf[(seg_x, inner.y)].set_symbol("│");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_follows_percent() {
        assert_eq!(filled_cells(0.0, 40), 0);
        assert_eq!(filled_cells(25.0, 40), 10);
        assert_eq!(filled_cells(100.0, 40), 40);
    }

    #[test]
    fn renders_every_segment_label() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 42, 3);
        let mut buf = Buffer::empty(area);
        ComboMeter::new(50.0, 10, &theme).render(area, &mut buf);
        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol()).collect();
        assert_eq!(row.matches("+1s").count(), 2);
        assert!(row.contains("+2s"));
        assert!(row.contains("+3s"));
    }
}
