pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::session::FinishReason;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// `M:SS`, rounding partial seconds up so the clock never shows 0:00 early
pub fn format_remaining(ms: u64) -> String {
    let secs = ms.div_ceil(1000);
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Playing => render_playing(self, area, buf),
            AppState::Score => render_score(self, area, buf),
        }
    }
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let clock = if app.session().config().timer.is_some() {
        let style = if app.view.remaining_ms <= 10_000 {
            bold().fg(Color::Red)
        } else {
            bold()
        };
        Span::styled(format_remaining(app.view.remaining_ms), style)
    } else {
        Span::styled("untimed", dim())
    };

    let score_style = match app.view.score {
        s if s > 0 => bold().fg(Color::Green),
        s if s < 0 => bold().fg(Color::Red),
        _ => bold(),
    };

    Paragraph::new(Line::from(vec![
        clock,
        Span::raw("   "),
        Span::styled(format!("score {}", app.view.score), score_style),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM))
    .render(chunks[0], buf);

    let word = app.view.word.as_deref().unwrap_or("");
    let rule = "─".repeat(word.width());
    let mut lines = vec![Line::default(); (chunks[1].height / 2).saturating_sub(1) as usize];
    lines.push(Line::from(Span::styled(word.to_string(), bold().fg(Color::Cyan))));
    lines.push(Line::from(Span::styled(rule, dim())));

    Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(c)orrect / enter    (s)kip / space    (q)uit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

fn render_score(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(area);

    let reason = match app.finish_reason {
        Some(FinishReason::TimeUp) => Span::styled("time's up!", bold().fg(Color::Yellow)),
        Some(FinishReason::OutOfWords) => {
            Span::styled("no words left!", bold().fg(Color::Magenta))
        }
        None => Span::raw(""),
    };

    let mut lines = vec![Line::default(); (chunks[0].height / 2).saturating_sub(3) as usize];
    lines.push(Line::from(Span::styled("Game finished.", bold())));
    lines.push(Line::from(reason));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::raw("final score "),
        Span::styled(
            app.final_score.unwrap_or_default().to_string(),
            bold().fg(Color::Green),
        ),
    ]));
    if app.rounds_played > 1 {
        lines.push(Line::from(Span::styled(
            format!("round {}", app.rounds_played),
            dim(),
        )));
    }

    Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" guessword "))
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        "(r)etry / enter    (q)uit / esc",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::session::SessionConfig;
    use crate::vocabulary::Vocabulary;
    use crate::word_supply::ExhaustionPolicy;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(60_000), "1:00");
        assert_eq!(format_remaining(59_000), "0:59");
        assert_eq!(format_remaining(1), "0:01");
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(125_000), "2:05");
    }

    #[test]
    fn test_render_playing_shows_word_and_clock() {
        let vocab = Vocabulary::from_words("one", ["zebra"]).unwrap();
        let app = App::new(vocab, SessionConfig::default()).unwrap();

        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("zebra"));
        assert!(text.contains("1:00"));
        assert!(text.contains("score 0"));
    }

    #[test]
    fn test_render_score_screen() {
        let vocab = Vocabulary::from_words("one", ["zebra"]).unwrap();
        let config = SessionConfig {
            timer: None,
            exhaustion: ExhaustionPolicy::Finish,
        };
        let mut app = App::new(vocab, config).unwrap();
        app.handle_action(Action::Correct);

        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Game finished."));
        assert!(text.contains("no words left!"));
        assert!(text.contains("final score 1"));
    }
}
