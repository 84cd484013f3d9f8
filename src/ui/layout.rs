use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Full,    // ≥24 rows: belt, input, plate bar
    Compact, // shorter terminals drop the plate bar
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.height >= 24 {
            LayoutTier::Full
        } else {
            LayoutTier::Compact
        }
    }

    pub fn show_plate_bar(&self) -> bool {
        *self == LayoutTier::Full
    }
}

/// Regions of the playing screen, top to bottom.
pub struct PlayLayout {
    pub header: Rect,
    pub belt: Rect,
    pub input: Rect,
    pub plates: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl PlayLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let mut constraints = vec![
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
        ];
        if tier.show_plate_bar() {
            constraints.push(Constraint::Length(4));
        }
        constraints.push(Constraint::Length(1));

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let (plates, footer) = if tier.show_plate_bar() {
            (Some(vertical[3]), vertical[4])
        } else {
            (None, vertical[3])
        };

        Self {
            header: vertical[0],
            belt: vertical[1],
            input: vertical[2],
            plates,
            footer,
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 16;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_terminal_drops_plate_bar() {
        let full = PlayLayout::new(Rect::new(0, 0, 80, 30));
        assert!(full.plates.is_some());
        assert_eq!(full.footer.y, 29);

        let compact = PlayLayout::new(Rect::new(0, 0, 80, 16));
        assert!(compact.plates.is_none());
        assert_eq!(compact.tier, LayoutTier::Compact);
    }

    #[test]
    fn hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[Esc] stop", "[Space] commit", "[Bksp] delete"], 30);
        assert_eq!(lines, vec![" [Esc] stop  [Space] commit", " [Bksp] delete"]);
    }

    #[test]
    fn popup_never_exceeds_area() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect(60, 70, area);
        assert_eq!(popup, area);
    }
}
