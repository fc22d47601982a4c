mod theme;

use crate::app::{AppModel, QUICK_ACTIONS};
use crate::domain::OutputLine;
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

pub use theme::Palette;

const PROMPT_USER: &str = "guest@cybersec";
const BUSY_LINE: &str = "[*] Processing...";

pub fn render(frame: &mut Frame, model: &AppModel) {
    let full_area = frame.area();
    if full_area.width == 0 || full_area.height == 0 {
        return;
    }

    let palette = &model.palette;
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        full_area,
    );

    let transcript_area = Rect {
        x: full_area.x,
        y: full_area.y,
        width: full_area.width,
        height: full_area.height.saturating_sub(1),
    };

    let lines = transcript_lines(model);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(transcript_area.height);
    let scroll_y = max_scroll.saturating_sub(model.scroll_from_bottom.min(max_scroll));

    let transcript = Paragraph::new(Text::from(lines))
        .style(
            Style::default()
                .fg(palette.foreground)
                .bg(palette.background),
        )
        .scroll((scroll_y, 0));
    frame.render_widget(transcript, transcript_area);

    place_cursor(frame, transcript_area, model, total, scroll_y);
    render_status_bar(frame, full_area, model);
}

/// Keeps the scroll offset within the transcript. Called before every draw;
/// the offset counts lines up from the bottom, zero meaning "follow".
pub fn clamp_scroll_state(model: &mut AppModel) {
    let (width, height) = model.terminal_size;
    if width == 0 || height == 0 {
        return;
    }

    let viewport = height.saturating_sub(1);
    let total = u16::try_from(transcript_line_count(model)).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(viewport);
    model.scroll_from_bottom = model.scroll_from_bottom.min(max_scroll);
}

fn transcript_line_count(model: &AppModel) -> usize {
    let mut count = 0usize;
    for entry in model.history.entries() {
        count += 1 + entry.outputs.len() + 1;
    }
    if model.busy.is_some() {
        count += 1;
    }
    count + 1
}

fn transcript_lines(model: &AppModel) -> Vec<Line<'static>> {
    let palette = &model.palette;
    let mut lines = Vec::with_capacity(transcript_line_count(model));

    for entry in model.history.entries() {
        lines.push(prompt_line(palette, &entry.command));
        for raw in &entry.outputs {
            lines.push(output_line(palette, raw));
        }
        lines.push(Line::raw(""));
    }

    if model.busy.is_some() {
        lines.push(Line::styled(
            BUSY_LINE.to_string(),
            Style::default().fg(palette.warn),
        ));
    }

    lines.push(prompt_line(palette, &model.editor.text));
    lines
}

fn prompt_line(palette: &Palette, text: &str) -> Line<'static> {
    let mut spans = prompt_spans(palette);
    spans.push(Span::styled(
        text.to_string(),
        Style::default().fg(palette.foreground),
    ));
    Line::from(spans)
}

fn prompt_spans(palette: &Palette) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            PROMPT_USER.to_string(),
            Style::default()
                .fg(palette.prompt_user)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(":".to_string(), Style::default().fg(palette.foreground)),
        Span::styled("~".to_string(), Style::default().fg(palette.prompt_path)),
        Span::styled("$ ".to_string(), Style::default().fg(palette.foreground)),
    ]
}

fn prompt_width() -> usize {
    UnicodeWidthStr::width(PROMPT_USER) + UnicodeWidthStr::width(":~$ ")
}

fn output_line(palette: &Palette, raw: &str) -> Line<'static> {
    match OutputLine::parse(raw) {
        OutputLine::Image { path } => Line::from(vec![
            Span::styled(
                "[image] ".to_string(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                path,
                Style::default()
                    .fg(palette.dim)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
        OutputLine::Text(text) => {
            Line::styled(text, Style::default().fg(palette.foreground))
        }
    }
}

fn place_cursor(frame: &mut Frame, area: Rect, model: &AppModel, total: u16, scroll_y: u16) {
    let input_row = total.saturating_sub(1);
    if input_row < scroll_y {
        return;
    }

    let row = input_row - scroll_y;
    if row >= area.height {
        return;
    }

    let before_cursor = model
        .editor
        .text
        .chars()
        .take(model.editor.cursor)
        .collect::<String>();
    let column = prompt_width() + UnicodeWidthStr::width(before_cursor.as_str());
    if column >= area.width as usize {
        return;
    }

    frame.set_cursor_position(Position::new(
        area.x + column as u16,
        area.y + row,
    ));
}

fn render_status_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    if area.height == 0 {
        return;
    }

    let palette = &model.palette;
    let bar_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };

    let mut left = match &model.notice {
        Some(notice) => notice.clone(),
        None => format!(" {} ", model.theme_name),
    };
    if let Some(command) = &model.busy {
        left.push_str(&format!("  running: {command}"));
    }
    if !model.pending.is_empty() {
        left.push_str(&format!("  queued: {}", model.pending.len()));
    }

    let hints = QUICK_ACTIONS
        .iter()
        .map(|(binding, command)| format!("{binding} {command}"))
        .collect::<Vec<_>>()
        .join("  ");
    let right = format!("{hints}  Ctrl+C quit ");

    let left_style = if model.notice.is_some() {
        Style::default().fg(palette.warn)
    } else {
        Style::default().fg(palette.dim)
    };

    let gap = (bar_area.width as usize)
        .saturating_sub(UnicodeWidthStr::width(left.as_str()))
        .saturating_sub(UnicodeWidthStr::width(right.as_str()));

    let spans = vec![
        Span::styled(left, left_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(palette.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.background)),
        bar_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HistoryEntry, default_theme};

    fn model() -> AppModel {
        let theme = default_theme();
        AppModel::new(Palette::from_theme(&theme), theme.name)
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn line_count_matches_built_lines() {
        let mut model = model();
        model
            .history
            .push(HistoryEntry::new("team", "a\nb\nc"));
        model.busy = Some("weather".to_string());

        assert_eq!(transcript_lines(&model).len(), transcript_line_count(&model));
    }

    #[test]
    fn image_marker_lines_render_as_image_references() {
        let mut model = model();
        model.history.push(HistoryEntry::new(
            "info-coordinators priya",
            "IMAGE:/team/priya.jpg\n\nName : Priya Sharma",
        ));

        let lines = transcript_lines(&model);
        let rendered = lines.iter().map(line_text).collect::<Vec<_>>();
        assert!(rendered.contains(&"[image] /team/priya.jpg".to_string()));
        assert!(!rendered.iter().any(|line| line.contains("IMAGE:")));
    }

    #[test]
    fn clamp_limits_scroll_to_transcript_height() {
        let mut model = model();
        model.terminal_size = (80, 24);
        model.scroll_from_bottom = 500;
        for index in 0..40 {
            model
                .history
                .push(HistoryEntry::new(format!("echo {index}"), "line"));
        }

        clamp_scroll_state(&mut model);
        let total = transcript_line_count(&model) as u16;
        assert!(model.scroll_from_bottom <= total.saturating_sub(23));
    }

    #[test]
    fn busy_line_appears_only_while_in_flight() {
        let mut model = model();
        let idle = transcript_lines(&model)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        assert!(!idle.contains(&BUSY_LINE.to_string()));

        model.busy = Some("weather".to_string());
        let busy = transcript_lines(&model)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        assert!(busy.contains(&BUSY_LINE.to_string()));
    }
}
