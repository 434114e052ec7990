//! Terminal rendering: text area with gutter and syntax colors, status
//! bar, and the message/prompt line.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line as UiLine, Span},
    widgets::Paragraph,
    Frame,
};

use termod_session::Session;
use termod_syntax::{tokenize, TokenCategory};

/// Rows reserved below the text area: status bar plus message line.
const CHROME_ROWS: u16 = 2;

/// Width of the line-number gutter in cells, including the trailing
/// separator space. Zero when line numbers are off.
pub fn gutter_width(session: &Session) -> usize {
    if !session.options().line_numbers {
        return 0;
    }
    let digits = session.current_doc().line_count().to_string().len();
    digits.max(3) + 1
}

/// Text-area size for a terminal of the given dimensions.
pub fn text_viewport(session: &Session, width: u16, height: u16) -> (usize, usize) {
    let w = (width as usize).saturating_sub(gutter_width(session)).max(1);
    let h = (height as usize).saturating_sub(CHROME_ROWS as usize).max(1);
    (w, h)
}

pub fn draw(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    if area.height <= CHROME_ROWS {
        return;
    }

    let text_area = Rect::new(area.x, area.y, area.width, area.height - CHROME_ROWS);
    let status_area = Rect::new(area.x, text_area.bottom(), area.width, 1);
    let message_area = Rect::new(area.x, status_area.bottom(), area.width, 1);

    draw_text(frame, session, text_area);
    draw_status(frame, session, status_area);
    draw_message(frame, session, message_area);
    place_cursor(frame, session, text_area, message_area);
}

fn draw_text(frame: &mut Frame, session: &Session, area: Rect) {
    let doc = session.current_doc();
    let gutter = gutter_width(session);
    let text_width = (area.width as usize).saturating_sub(gutter);
    let syntax = session.options().syntax_highlighting;

    let mut rows: Vec<UiLine> = Vec::with_capacity(area.height as usize);
    for row in 0..area.height as usize {
        let idx = doc.scroll_y + row;
        let mut spans: Vec<Span> = Vec::new();
        match doc.line(idx) {
            Some(line) => {
                if gutter > 0 {
                    spans.push(Span::styled(
                        format!("{:>width$} ", idx + 1, width = gutter - 1),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                spans.extend(content_spans(line.as_str(), syntax, doc.scroll_x, text_width));
            }
            // Past-the-end filler rows
            None => spans.push(Span::styled("~", Style::default().fg(Color::DarkGray))),
        }
        rows.push(UiLine::from(spans));
    }

    frame.render_widget(Paragraph::new(rows), area);
}

/// Styled spans for the visible slice of one line, honoring horizontal
/// scroll. Colors come from the line-local classifier when syntax
/// highlighting is on.
fn content_spans(text: &str, syntax: bool, scroll_x: usize, width: usize) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let mut colors = vec![Color::Reset; chars.len()];
    if syntax {
        let mut pos = 0;
        for token in tokenize(text) {
            let color = category_color(token.category);
            for slot in colors.iter_mut().skip(pos).take(token.len) {
                *slot = color;
            }
            pos += token.len;
        }
    }

    // Group consecutive same-color characters into spans
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_color = Color::Reset;
    for (ch, color) in chars.into_iter().zip(colors).skip(scroll_x).take(width) {
        if color != run_color && !run.is_empty() {
            spans.push(Span::styled(
                std::mem::take(&mut run),
                Style::default().fg(run_color),
            ));
        }
        run_color = color;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, Style::default().fg(run_color)));
    }
    spans
}

fn category_color(category: TokenCategory) -> Color {
    match category {
        TokenCategory::Keyword => Color::Magenta,
        TokenCategory::Special => Color::Cyan,
        TokenCategory::String => Color::Green,
        TokenCategory::Number => Color::Yellow,
        TokenCategory::Comment => Color::DarkGray,
        TokenCategory::Operator => Color::LightBlue,
        TokenCategory::Call => Color::Blue,
        TokenCategory::None => Color::Reset,
    }
}

fn draw_status(frame: &mut Frame, session: &Session, area: Rect) {
    let doc = session.current_doc();
    let left = format!(
        " {} | {}{}",
        session.mode().as_str(),
        doc.title(),
        if doc.is_modified() { " [+]" } else { "" }
    );
    let right = format!(
        "Ln {}, Col {} | {}/{} ",
        doc.cursor_y + 1,
        doc.cursor_x + 1,
        session.current_index() + 1,
        session.buffer_count()
    );
    let pad = (area.width as usize).saturating_sub(left.chars().count() + right.chars().count());
    let bar = format!("{}{}{}", left, " ".repeat(pad), right);

    let style = Style::default()
        .bg(Color::DarkGray)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(bar).style(style), area);
}

/// Bottom row: the active prompt wins over a transient status message.
fn draw_message(frame: &mut Frame, session: &Session, area: Rect) {
    let text = session
        .prompt_line()
        .or_else(|| session.status_message().map(str::to_string))
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(text), area);
}

fn place_cursor(frame: &mut Frame, session: &Session, text_area: Rect, message_area: Rect) {
    if let Some(prompt) = session.prompt_line() {
        let x = message_area.x + prompt.chars().count() as u16;
        frame.set_cursor_position((x.min(message_area.right().saturating_sub(1)), message_area.y));
        return;
    }

    let doc = session.current_doc();
    let gutter = gutter_width(session) as u16;
    let line = doc.current_line();
    // Screen columns, not char indices: wide glyphs left of the cursor
    // shift it further right.
    let x = line.width_to(doc.cursor_x).saturating_sub(line.width_to(doc.scroll_x));
    let y = doc.cursor_y.saturating_sub(doc.scroll_y);
    frame.set_cursor_position((text_area.x + gutter + x as u16, text_area.y + y as u16));
}
