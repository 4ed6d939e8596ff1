use crate::audio::{Cue, CueSink, TerminalBell};
use crate::celebration::{Burst, ConfettiField};
use crate::config::Config;
use crate::problem::Problem;
use crate::runtime::Intent;
use crate::session::{self, Outcome, QuizSession, Renderer, Results, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Question,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub outcome: Outcome,
    pub text: String,
}

/// What the screens currently show. Fed exclusively through the session's
/// `Renderer` seam, so the session itself never touches ratatui.
#[derive(Debug)]
pub struct QuizView {
    pub state: AppState,
    pub problem_text: String,
    pub progress: f64,
    pub answer_input: String,
    pub feedback: Option<Feedback>,
    pub results: Option<Results>,
    pub confetti: ConfettiField,
    pub term_size: (u16, u16),
}

impl Default for QuizView {
    fn default() -> Self {
        Self {
            state: AppState::Start,
            problem_text: String::new(),
            progress: 0.0,
            answer_input: String::new(),
            feedback: None,
            results: None,
            confetti: ConfettiField::new(),
            term_size: (80, 24),
        }
    }
}

impl Renderer for QuizView {
    fn render_problem(&mut self, problem: &Problem, progress: f64) {
        self.state = AppState::Question;
        self.problem_text = problem.display();
        self.progress = progress;
        self.answer_input.clear();
        self.feedback = None;
    }

    fn render_feedback(&mut self, outcome: Outcome, expected: i32) {
        let text = match outcome {
            Outcome::Correct => "正解！".to_string(),
            Outcome::Incorrect => format!("ざんねん… 正解は {expected} でした"),
        };
        self.feedback = Some(Feedback { outcome, text });
    }

    fn render_results(&mut self, results: &Results) {
        self.state = AppState::Results;
        self.progress = 1.0;
        self.results = Some(*results);
    }

    fn render_celebration(&mut self) {
        let (width, height) = self.term_size;
        self.confetti.burst(&Burst::PERFECT, width, height);
    }
}

/// The running application: one quiz session plus the view it projects onto
/// and the cue sink it rings.
pub struct App {
    pub session: QuizSession,
    pub view: QuizView,
    pub bell: TerminalBell,
}

impl App {
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        let session = match seed {
            Some(seed) => QuizSession::from_seed(seed),
            None => QuizSession::new(),
        };
        Self {
            session,
            view: QuizView::default(),
            bell: TerminalBell::new(config.sound),
        }
    }

    /// Begin or restart; this is the host's click trigger.
    pub fn start(&mut self) {
        self.bell.cue(Cue::Click);
        let events = self.session.start();
        self.apply(events);
    }

    /// Submit whatever is in the answer field. Unaccepted input leaves the
    /// field editable; an accepted answer clears it when the next problem
    /// renders.
    pub fn submit(&mut self) {
        let raw = self.view.answer_input.clone();
        let events = self.session.submit_answer(&raw);
        self.apply(events);
    }

    pub fn on_tick(&mut self) {
        let events = self.session.on_tick();
        self.apply(events);
        self.view.confetti.update();
    }

    /// True while something is animating and the host should redraw on tick.
    pub fn is_animating(&self) -> bool {
        self.view.confetti.is_active() || self.session.has_pending()
    }

    /// Apply one player intent against the current screen; returns false
    /// when the app should exit.
    pub fn handle(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Quit => return false,
            Intent::Confirm => match self.view.state {
                AppState::Start | AppState::Results => self.start(),
                AppState::Question => self.submit(),
            },
            Intent::Restart => {
                if self.view.state == AppState::Results {
                    self.start();
                }
            }
            Intent::Digit(c) => {
                // Answers never exceed two digits; cap the field anyway.
                if self.view.state == AppState::Question && self.view.answer_input.len() < 4 {
                    self.view.answer_input.push(c);
                }
            }
            Intent::Minus => {
                // A sign only makes sense at the front of the field.
                if self.view.state == AppState::Question && self.view.answer_input.is_empty() {
                    self.view.answer_input.push('-');
                }
            }
            Intent::Erase => {
                if self.view.state == AppState::Question {
                    self.view.answer_input.pop();
                }
            }
        }

        true
    }

    fn apply(&mut self, events: Vec<SessionEvent>) {
        // The original bursts confetti on every correct-answer cue, not just
        // on the celebration.
        for event in &events {
            if let SessionEvent::Cue(Cue::Correct) = event {
                let (width, height) = self.view.term_size;
                self.view.confetti.burst(&Burst::CORRECT, width, height);
            }
        }
        session::dispatch(&events, &mut self.view, &mut self.bell);
    }
}
