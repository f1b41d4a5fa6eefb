//! Builder screen rendering.
//!
//! Draws one frame from a [`BuilderSnapshot`]: the gradient preview
//! strip, the stop list, the generated CSS, and a status/help footer.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::color::{theme, Color};
use crate::state::BuilderSnapshot;
use crate::stops::ColorStop;

/// Render the whole builder screen.
pub fn render(snapshot: &BuilderSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let [preview, stops, css, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(2),
    ])
    .areas(area);

    render_preview(snapshot, preview, frame);
    render_stops(snapshot, stops, frame);
    render_css(snapshot, css, frame);
    render_footer(snapshot, footer, frame);
}

/// Sample the gradient axis at `t` (0–100) over position-sorted stops.
///
/// Between two stops the color is a linear mix; outside the outermost
/// stops the nearest stop's color is used. Returns `None` only for an
/// empty stop list.
pub fn sample_axis(sorted: &[ColorStop], t: f64) -> Option<Color> {
    let first = sorted.first()?;

    if t <= first.position {
        return Some(stop_color(first));
    }

    for pair in sorted.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.position {
            let span = b.position - a.position;
            if span <= f64::EPSILON {
                return Some(stop_color(b));
            }
            let amount = (t - a.position) / span;
            return Some(stop_color(a).mix(&stop_color(b), amount));
        }
    }

    sorted.last().map(stop_color)
}

// malformed stop colors render as black rather than breaking the frame
fn stop_color(stop: &ColorStop) -> Color {
    Color::from_hex(&stop.color).unwrap_or(Color::rgb(0, 0, 0))
}

fn panel_block(title: &str) -> Block<'_> {
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(theme::text::DISABLED.to_ratatui()))
        .title_style(Style::default().fg(theme::text::SECONDARY.to_ratatui()))
}

fn render_preview(snapshot: &BuilderSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let block = panel_block("gradient");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let sorted = snapshot.stops.sorted();
    let spans: Vec<Span> = (0..inner.width)
        .map(|x| {
            let t = if inner.width <= 1 {
                0.0
            } else {
                x as f64 * 100.0 / (inner.width - 1) as f64
            };
            let color = sample_axis(&sorted, t).unwrap_or(theme::background::BASE);
            Span::styled(" ", Style::default().bg(color.to_ratatui()))
        })
        .collect();

    let line = Line::from(spans);
    let lines: Vec<Line> = (0..inner.height).map(|_| line.clone()).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stops(snapshot: &BuilderSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let block = panel_block("stops");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .stops
        .stops()
        .iter()
        .enumerate()
        .map(|(index, stop)| {
            let selected = index == snapshot.selected;
            let marker = if selected { "▸ " } else { "  " };
            let pin = if stop.fixed { "• " } else { "  " };

            let text_style = if selected {
                Style::default()
                    .fg(theme::text::PRIMARY.to_ratatui())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::text::SECONDARY.to_ratatui())
            };

            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::accent::GREEN.to_ratatui())),
                Span::styled(pin, Style::default().fg(theme::accent::PURPLE.to_ratatui())),
                Span::styled("  ", Style::default().bg(stop_color(stop).to_ratatui())),
                Span::styled(
                    format!(" {}  {:>5.1}%", stop.color, stop.position),
                    text_style,
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_css(snapshot: &BuilderSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let block = panel_block("css");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let expression_style = Style::default().fg(theme::accent::GREEN.to_ratatui());
    let rule_style = Style::default().fg(theme::text::SECONDARY.to_ratatui());

    let mut lines = vec![
        Line::styled(snapshot.gradient_css(), expression_style),
        Line::from(""),
    ];
    lines.extend(
        snapshot
            .full_css()
            .lines()
            .map(|l| Line::styled(l.to_string(), rule_style)),
    );

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(snapshot: &BuilderSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let mut status = vec![Span::styled(
        format!(
            " {} · {} · {} · {} stops",
            snapshot.kind,
            snapshot.direction,
            snapshot.format,
            snapshot.stops.len()
        ),
        Style::default().fg(theme::text::PRIMARY.to_ratatui()),
    )];
    if snapshot.copied {
        status.push(Span::styled(
            "  copied!",
            Style::default()
                .fg(theme::status::SUCCESS.to_ratatui())
                .add_modifier(Modifier::BOLD),
        ));
    }

    let help = Line::styled(
        " q quit · tab select · +/- count · [ ] move · h/H s/S l/L adjust · \
         f fix · r random · e even · t type · d direction · m format · c/C copy",
        Style::default().fg(theme::text::DISABLED.to_ratatui()),
    );

    frame.render_widget(Paragraph::new(vec![Line::from(status), help]), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stop(color: &str, position: f64) -> ColorStop {
        ColorStop {
            id: format!("stop-{}", position),
            color: color.to_string(),
            position,
            fixed: false,
        }
    }

    #[test]
    fn test_sample_endpoints() {
        let sorted = vec![stop("#000000", 0.0), stop("#ffffff", 100.0)];

        assert_eq!(sample_axis(&sorted, 0.0), Some(Color::rgb(0, 0, 0)));
        assert_eq!(
            sample_axis(&sorted, 100.0),
            Some(Color::rgb(255, 255, 255))
        );
    }

    #[test]
    fn test_sample_interpolates() {
        let sorted = vec![stop("#000000", 0.0), stop("#ffffff", 100.0)];

        let mid = sample_axis(&sorted, 50.0).unwrap();
        assert_eq!(mid.rgb_components(), (128, 128, 128));
    }

    #[test]
    fn test_sample_clamps_outside_stops() {
        let sorted = vec![stop("#ff0000", 20.0), stop("#0000ff", 80.0)];

        assert_eq!(sample_axis(&sorted, 0.0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(sample_axis(&sorted, 100.0), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_sample_coincident_stops() {
        let sorted = vec![stop("#ff0000", 50.0), stop("#0000ff", 50.0)];

        // the sample point sits on both stops: the earlier one answers
        // for it, and past it the later one takes over
        assert_eq!(sample_axis(&sorted, 50.0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(sample_axis(&sorted, 60.0), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_sample_empty() {
        assert_eq!(sample_axis(&[], 50.0), None);
    }

    #[test]
    fn test_sample_malformed_color_is_black() {
        let sorted = vec![stop("nothex", 0.0), stop("nothex", 100.0)];
        assert_eq!(sample_axis(&sorted, 0.0), Some(Color::rgb(0, 0, 0)));
    }
}
