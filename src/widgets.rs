use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::geometry::column_of;
use crate::location::{Dropdown, LocationPicker};
use crate::range::{Handle, RangeSelector};

const DROPDOWN_ROWS: u16 = 8;

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

// --- Range selector ---

pub fn track_line(selector: &RangeSelector, width: u16, focused: bool) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }
    let (left, span) = selector.fill();
    let low_col = column_of(left, width);
    let high_col = column_of(left + span, width);

    let thumb = |handle: Handle| {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if focused && selector.active() == handle {
            style.fg(Color::Yellow)
        } else {
            style
        }
    };

    let spans: Vec<Span<'static>> = (0..width)
        .map(|col| {
            if col == low_col && col == high_col {
                Span::styled("◆", thumb(selector.active()))
            } else if col == low_col {
                Span::styled("●", thumb(Handle::Low))
            } else if col == high_col {
                Span::styled("●", thumb(Handle::High))
            } else if col > low_col && col < high_col {
                Span::raw("━")
            } else {
                Span::styled("─", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    Line::from(spans)
}

pub fn render_range(
    frame: &mut Frame,
    area: Rect,
    selector: &RangeSelector,
    title: &str,
    currency: &str,
    focused: bool,
) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(format!(" {} ", title))
        .title(Line::from(format!(" {} ", selector.label(currency))).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let track = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: inner.height.min(1),
    };
    frame.render_widget(Paragraph::new(track_line(selector, track.width, focused)), track);
    track
}

// --- Location picker ---

pub fn render_location_input(
    frame: &mut Frame,
    area: Rect,
    picker: &LocationPicker,
    title: &str,
    placeholder: &str,
    focused: bool,
) {
    let arrow = match picker.state() {
        Dropdown::Open => "▴",
        Dropdown::Closed => "▾",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(format!(" {} ", title))
        .title(Line::from(format!(" {} ", arrow)).right_aligned());

    let content = if picker.text().is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)))
    } else if focused {
        Line::from(vec![Span::raw(picker.text().to_string()), Span::raw("▏")])
    } else {
        Line::from(picker.text().to_string())
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

pub fn render_location_dropdown(frame: &mut Frame, anchor: Rect, picker: &LocationPicker) {
    if !picker.is_open() || picker.candidates().is_empty() {
        return;
    }
    let screen = frame.area();
    let below = screen.bottom().saturating_sub(anchor.bottom());
    let rows = (picker.candidates().len() as u16).min(DROPDOWN_ROWS);
    let height = (rows + 2).min(below);
    if height < 3 {
        return;
    }
    let area = Rect {
        x: anchor.x,
        y: anchor.bottom(),
        width: anchor.width,
        height,
    };

    let items: Vec<ListItem> = picker
        .candidates()
        .iter()
        .map(|c| {
            if c.is_placeholder() {
                ListItem::new(Span::styled(
                    c.city.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw(c.city.clone()),
                    Span::styled(format!("  {}", c.region), Style::default().fg(Color::DarkGray)),
                ]))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(picker.highlighted());

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CityDataset;
    use crate::location::LocationConfig;
    use crate::range::RangeConfig;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_track_line_marks_handles_and_fill() {
        let mut selector = RangeSelector::new(RangeConfig::default()).unwrap();
        selector.set_low(60);
        selector.set_high(80);

        // 11 cells: 60 -> col 2, 80 -> col 6
        let text = line_text(&track_line(&selector, 11, false));
        assert_eq!(text, "──●━━━●────");
    }

    #[test]
    fn test_track_line_overlapping_handles() {
        let mut selector = RangeSelector::new(RangeConfig::default()).unwrap();
        selector.set_low(99);
        let text = line_text(&track_line(&selector, 5, true));
        assert_eq!(text, "────◆");
    }

    #[test]
    fn test_render_range_shows_label_and_returns_track() {
        let selector = RangeSelector::new(RangeConfig::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let mut track = Rect::default();
        terminal
            .draw(|frame| {
                track = render_range(frame, frame.area(), &selector, "Salary Per Month", "₹", true);
            })
            .unwrap();

        assert_eq!(track, Rect::new(1, 1, 38, 1));
        let view = buffer_text(&terminal);
        assert!(view.contains("Salary Per Month"));
        assert!(view.contains("₹50k - ₹100k"));
    }

    #[test]
    fn test_dropdown_lists_candidates_and_placeholder() {
        let dataset = Arc::new(CityDataset::from_pairs([
            ("Karnataka", vec!["Bengaluru", "Mysuru"]),
            ("Delhi", vec!["New Delhi"]),
        ]));
        let mut picker = LocationPicker::new(LocationConfig { dataset, initial_query: None });
        picker.set_query("uru");

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| {
                let anchor = Rect::new(0, 0, 40, 3);
                render_location_input(frame, anchor, &picker, "Location", "Preferred Location", true);
                render_location_dropdown(frame, anchor, &picker);
            })
            .unwrap();
        let view = buffer_text(&terminal);
        assert!(view.contains("> Bengaluru"));
        assert!(view.contains("Mysuru  Karnataka"));

        picker.set_query("zzz");
        terminal
            .draw(|frame| {
                let anchor = Rect::new(0, 0, 40, 3);
                render_location_dropdown(frame, anchor, &picker);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("City Not Found"));
    }
}
