use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState, QuizView};
use crate::celebration::ConfettiField;
use crate::session::Outcome;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.view.state {
            AppState::Start => render_start(area, buf),
            AppState::Question => render_question(&self.view, area, buf),
            AppState::Results => render_results(&self.view, area, buf),
        }

        // Confetti goes on top of whatever screen is showing.
        if self.view.confetti.is_active() {
            render_confetti(&self.view.confetti, area, buf);
        }
    }
}

fn render_start(area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(4) / 2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "あんざん",
        bold_style.fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "four quick questions: two additions, two subtractions",
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled("(enter) start / (esc)ape", italic_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

fn render_question(view: &QuizView, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let feedback_text = view
        .feedback
        .as_ref()
        .map(|f| f.text.as_str())
        .unwrap_or("");
    // Wide (CJK) feedback can wrap on narrow terminals; reserve enough rows.
    let feedback_lines =
        ((feedback_text.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let occupied = 5 + feedback_lines;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(occupied) / 2),
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Length(1), // problem
            Constraint::Length(1), // answer input
            Constraint::Length(feedback_lines),
            Constraint::Min(0),
        ])
        .split(area);

    Gauge::default()
        .ratio(view.progress.clamp(0.0, 1.0))
        .gauge_style(Style::default().fg(Color::Magenta))
        .label(format!("{:.0}%", view.progress * 100.0))
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(view.problem_text.clone(), bold_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        format!("{}▏", view.answer_input),
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    if let Some(feedback) = &view.feedback {
        let style = match feedback.outcome {
            Outcome::Correct => green_bold_style,
            Outcome::Incorrect => red_bold_style,
        };
        Paragraph::new(Span::styled(feedback.text.clone(), style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);
    }
}

fn render_results(view: &QuizView, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let Some(results) = view.results else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(8) / 2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("{}%", results.accuracy_percent),
        bold_style.fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("スコア {} / {}", results.score, results.total_questions),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled("(r)estart / (esc)ape", italic_style))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
}

/// Paint confetti particles directly into the buffer, fading with age.
fn render_confetti(confetti: &ConfettiField, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &confetti.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[particle.color_index % colors.len()];
        let brightness = particle.brightness();
        let style = if brightness > 0.7 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if brightness > 0.3 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::Config;

    fn muted_app() -> App {
        App::new(&Config { sound: false }, Some(3))
    }

    fn render_to_string(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        // Wide (CJK) glyphs occupy one cell plus blank filler cells; skip the
        // fillers so multi-width strings come out contiguous.
        let mut rendered = String::new();
        for y in 0..area.height {
            let mut x = 0;
            while x < area.width {
                let symbol = buffer[(x, y)].symbol();
                rendered.push_str(symbol);
                x += (symbol.width() as u16).max(1);
            }
        }
        rendered
    }

    #[test]
    fn start_screen_shows_title_and_legend() {
        let app = muted_app();
        let rendered = render_to_string(&app);

        assert!(rendered.contains("あんざん"));
        assert!(rendered.contains("(enter) start"));
    }

    #[test]
    fn question_screen_shows_problem_and_input_cursor() {
        let mut app = muted_app();
        app.start();
        let rendered = render_to_string(&app);

        assert!(rendered.contains("= ?"));
        assert!(rendered.contains('▏'));
    }

    #[test]
    fn feedback_line_appears_after_a_wrong_answer() {
        let mut app = muted_app();
        app.start();
        let expected = app.session.current_problem().unwrap().answer;
        app.view.answer_input = (expected + 1).to_string();
        app.submit();

        let rendered = render_to_string(&app);
        assert!(rendered.contains("ざんねん"));
        assert!(rendered.contains(&expected.to_string()));
    }

    #[test]
    fn results_screen_shows_accuracy_and_score() {
        let mut app = muted_app();
        app.start();
        for _ in 0..4 {
            let answer = app.session.current_problem().unwrap().answer;
            app.view.answer_input = answer.to_string();
            app.submit();
            for _ in 0..50 {
                app.on_tick();
                if !app.session.has_pending() {
                    break;
                }
            }
        }

        // Drop any remaining confetti so the overlay can't cover the digits.
        app.view.confetti.particles.clear();

        let rendered = render_to_string(&app);
        assert!(rendered.contains("100%"));
        assert!(rendered.contains("スコア 4 / 4"));
    }

    #[test]
    fn confetti_overlay_renders_on_top() {
        let mut app = muted_app();
        app.start();
        let answer = app.session.current_problem().unwrap().answer;
        app.view.answer_input = answer.to_string();
        app.submit();
        assert!(app.view.confetti.is_active());

        // Rendering with active confetti must not panic anywhere in bounds.
        let rendered = render_to_string(&app);
        assert!(!rendered.trim().is_empty());
    }
}
