use ratatui::{prelude::*, widgets::*};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Simple JSON syntax highlighting, one output line per input line.
/// Keys are cyan, string values green, numbers and brackets yellow,
/// literals magenta.
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                flush_plain(&mut spans, &mut plain);
                let start = i;
                i += 1;
                while i < chars.len() {
                    match chars[i] {
                        '\\' => i += 2,
                        '"' => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                i = i.min(chars.len());

                let token: String = chars[start..i].iter().collect();
                let is_key = chars[i..].iter().find(|c| !c.is_whitespace()) == Some(&':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(token, Style::default().fg(color)));
            }
            ':' => {
                flush_plain(&mut spans, &mut plain);
                spans.push(Span::styled(":", Style::default().fg(Color::White)));
                i += 1;
            }
            '{' | '}' | '[' | ']' => {
                flush_plain(&mut spans, &mut plain);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
                i += 1;
            }
            '-' | '0'..='9' => {
                flush_plain(&mut spans, &mut plain);
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_digit() || matches!(chars[i], '-' | '+' | '.' | 'e' | 'E'))
                {
                    i += 1;
                }
                let number: String = chars[start..i].iter().collect();
                spans.push(Span::styled(number, Style::default().fg(Color::Yellow)));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if matches!(word.as_str(), "true" | "false" | "null") {
                    flush_plain(&mut spans, &mut plain);
                    spans.push(Span::styled(word, Style::default().fg(Color::Magenta)));
                } else {
                    plain.push_str(&word);
                }
            }
            _ => {
                plain.push(c);
                i += 1;
            }
        }
    }

    flush_plain(&mut spans, &mut plain);
    Line::from(spans)
}

fn flush_plain(spans: &mut Vec<Span<'static>>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span::raw(std::mem::take(plain)));
    }
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Plain text lines, no styling
pub fn plain_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|line| Line::from(line.to_string())).collect()
}

/// Elapsed time as shown next to the status
pub fn format_elapsed(elapsed_ms: f64) -> String {
    format!("{:.2} ms", elapsed_ms)
}

/// Column and row of a byte offset into `text`, both counted in chars
pub fn cursor_cell(text: &str, cursor: usize) -> (usize, usize) {
    let before = text.get(..cursor).unwrap_or(text);
    let row = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (before[line_start..].chars().count(), row)
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_always_shows_two_decimals() {
        assert_eq!(format_elapsed(3.0), "3.00 ms");
        assert_eq!(format_elapsed(12.35), "12.35 ms");
    }

    #[test]
    fn status_classes_have_distinct_colors() {
        assert_eq!(status_color(204), Color::Green);
        assert_eq!(status_color(404), Color::Red);
        assert_eq!(status_color(503), Color::Magenta);
    }

    #[test]
    fn highlight_keeps_one_line_per_input_line() {
        let lines = highlight_json("{\n  \"ok\": true\n}");
        assert_eq!(lines.len(), 3);
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  \"ok\": true");
    }

    #[test]
    fn cursor_cell_counts_chars_not_bytes() {
        let url = "https://ex.com/café/x";
        assert_eq!(cursor_cell(url, url.len()), (21, 0));
        assert_eq!(cursor_cell("", 0), (0, 0));
    }

    #[test]
    fn cursor_cell_follows_newlines() {
        let body = "{\n  \"ä\": 1";
        assert_eq!(cursor_cell(body, body.len()), (8, 1));
        assert_eq!(cursor_cell(body, 2), (0, 1));
    }

    fn span_color(line: &Line, content: &str) -> Option<Color> {
        line.spans
            .iter()
            .find(|s| s.content == content)
            .and_then(|s| s.style.fg)
    }

    #[test]
    fn keys_and_string_values_are_colored_whole() {
        let lines = highlight_json(r#"  "ok": "yes","#);
        assert_eq!(span_color(&lines[0], r#""ok""#), Some(Color::Cyan));
        assert_eq!(span_color(&lines[0], r#""yes""#), Some(Color::Green));
        assert_eq!(span_color(&lines[0], ":"), Some(Color::White));
    }

    #[test]
    fn escaped_quotes_stay_inside_the_string() {
        let lines = highlight_json(r#"  "msg": "say \"hi\"""#);
        assert_eq!(span_color(&lines[0], r#""msg""#), Some(Color::Cyan));
        assert_eq!(span_color(&lines[0], r#""say \"hi\"""#), Some(Color::Green));
    }

    #[test]
    fn key_detection_looks_at_the_current_string() {
        let lines = highlight_json(r#"["a", "b"]"#);
        assert_eq!(span_color(&lines[0], r#""a""#), Some(Color::Green));
        assert_eq!(span_color(&lines[0], r#""b""#), Some(Color::Green));
    }

    #[test]
    fn numbers_and_literals_are_colored() {
        let lines = highlight_json(r#"  "n": -1.5e3, "t": true, "z": null"#);
        assert_eq!(span_color(&lines[0], "-1.5e3"), Some(Color::Yellow));
        assert_eq!(span_color(&lines[0], "true"), Some(Color::Magenta));
        assert_eq!(span_color(&lines[0], "null"), Some(Color::Magenta));
    }
}
