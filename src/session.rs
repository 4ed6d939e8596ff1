use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;

use crate::audio::{Cue, CueSink};
use crate::problem::Problem;
use crate::TICK_RATE_MS;

/// Fixed question count for every session: two addition, two subtraction.
pub const TOTAL_QUESTIONS: usize = 4;

/// How long feedback stays on screen before the next problem appears.
pub const FEEDBACK_DELAY_SECS: f64 = 1.0;

/// Extra delay between the results and the perfect-score celebration.
pub const CELEBRATION_DELAY_SECS: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Results {
    pub score: usize,
    pub total_questions: usize,
    pub accuracy_percent: u32,
}

/// Everything the session wants the outside world to know, in the order it
/// happened. The host drains these into its `Renderer` and `CueSink`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Problem { problem: Problem, progress: f64 },
    Feedback { outcome: Outcome, expected: i32 },
    Results(Results),
    Celebration,
    Cue(Cue),
}

/// Presentation collaborator. Implementations render however they like; the
/// session only guarantees the calls arrive in a consistent order and after
/// its own state is fully updated.
pub trait Renderer {
    fn render_problem(&mut self, problem: &Problem, progress: f64);
    fn render_feedback(&mut self, outcome: Outcome, expected: i32);
    fn render_results(&mut self, results: &Results);
    fn render_celebration(&mut self) {}
}

/// Route a batch of session events to the two collaborator seams.
pub fn dispatch(events: &[SessionEvent], renderer: &mut dyn Renderer, cues: &mut dyn CueSink) {
    for event in events {
        match event {
            SessionEvent::Problem { problem, progress } => {
                renderer.render_problem(problem, *progress)
            }
            SessionEvent::Feedback { outcome, expected } => {
                renderer.render_feedback(*outcome, *expected)
            }
            SessionEvent::Results(results) => renderer.render_results(results),
            SessionEvent::Celebration => renderer.render_celebration(),
            SessionEvent::Cue(cue) => cues.cue(*cue),
        }
    }
}

/// A delayed continuation, counted down by `on_tick`. There is at most one
/// outstanding at a time, and it lives inside the session, so a restart
/// cancels it wholesale rather than racing it.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Advance { secs_remaining: f64 },
    Celebrate { secs_remaining: f64 },
}

/// One quiz run: Idle until started, Running through `TOTAL_QUESTIONS`
/// problems, Finished once the last accepted answer's feedback delay expires.
/// `start()` is also the restart trigger and fully resets the session.
pub struct QuizSession {
    phase: Phase,
    question_index: usize,
    score: usize,
    current_problem: Option<Problem>,
    awaiting_result: bool,
    pending: Option<Pending>,
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("question_index", &self.question_index)
            .field("score", &self.score)
            .field("current_problem", &self.current_problem)
            .field("awaiting_result", &self.awaiting_result)
            .field("pending", &self.pending)
            .finish()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_rng(Box::new(rand::thread_rng()))
    }

    /// Reproducible problem sequence, used by `--seed` and the tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_rng(rng: Box<dyn RngCore>) -> Self {
        Self {
            phase: Phase::Idle,
            question_index: 0,
            score: 0,
            current_problem: None,
            awaiting_result: false,
            pending: None,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_problem(&self) -> Option<Problem> {
        self.current_problem
    }

    pub fn is_awaiting_result(&self) -> bool {
        self.awaiting_result
    }

    /// True while a delayed continuation is counting down; the host keeps
    /// ticking (and redrawing) as long as this holds.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin or restart a session. Callable from any phase. Dropping the
    /// pending continuation here is what keeps a rapid restart during the
    /// feedback window from advancing the fresh session with stale state.
    pub fn start(&mut self) -> Vec<SessionEvent> {
        self.pending = None;
        self.phase = Phase::Running;
        self.question_index = 0;
        self.score = 0;
        vec![self.next_problem()]
    }

    fn next_problem(&mut self) -> SessionEvent {
        let problem = Problem::generate(self.question_index, &mut *self.rng);
        self.current_problem = Some(problem);
        self.awaiting_result = false;
        SessionEvent::Problem {
            problem,
            progress: self.question_index as f64 / TOTAL_QUESTIONS as f64,
        }
    }

    /// Accept a typed answer for the current problem. Unparsable input and
    /// submissions arriving while the previous one's feedback delay is still
    /// running are silent no-ops, not errors.
    pub fn submit_answer(&mut self, raw: &str) -> Vec<SessionEvent> {
        if self.phase != Phase::Running || self.awaiting_result {
            return Vec::new();
        }
        let Some(problem) = self.current_problem else {
            return Vec::new();
        };
        let Ok(answer) = raw.trim().parse::<i32>() else {
            return Vec::new();
        };

        self.awaiting_result = true;
        self.question_index += 1;
        self.pending = Some(Pending::Advance {
            secs_remaining: FEEDBACK_DELAY_SECS,
        });

        if problem.check(answer) {
            self.score += 1;
            vec![
                SessionEvent::Cue(Cue::Correct),
                SessionEvent::Feedback {
                    outcome: Outcome::Correct,
                    expected: problem.answer,
                },
            ]
        } else {
            vec![
                SessionEvent::Cue(Cue::Wrong),
                SessionEvent::Feedback {
                    outcome: Outcome::Incorrect,
                    expected: problem.answer,
                },
            ]
        }
    }

    /// Advance the pending continuation by one tick. Fires the next problem,
    /// the results, or the celebration once its countdown expires.
    pub fn on_tick(&mut self) -> Vec<SessionEvent> {
        let Some(pending) = self.pending else {
            return Vec::new();
        };
        let dt = TICK_RATE_MS as f64 / 1000_f64;

        match pending {
            Pending::Advance { secs_remaining } => {
                let remaining = secs_remaining - dt;
                if remaining > 0.0 {
                    self.pending = Some(Pending::Advance {
                        secs_remaining: remaining,
                    });
                    return Vec::new();
                }
                self.pending = None;

                if self.question_index < TOTAL_QUESTIONS {
                    vec![self.next_problem()]
                } else {
                    self.finish()
                }
            }
            Pending::Celebrate { secs_remaining } => {
                let remaining = secs_remaining - dt;
                if remaining > 0.0 {
                    self.pending = Some(Pending::Celebrate {
                        secs_remaining: remaining,
                    });
                    return Vec::new();
                }
                self.pending = None;
                vec![SessionEvent::Celebration]
            }
        }
    }

    fn finish(&mut self) -> Vec<SessionEvent> {
        self.phase = Phase::Finished;
        let mut events = vec![SessionEvent::Results(self.results())];

        if self.score == TOTAL_QUESTIONS {
            // A perfect run gets the correct cue again plus a short-delayed
            // celebration notification.
            events.push(SessionEvent::Cue(Cue::Correct));
            self.pending = Some(Pending::Celebrate {
                secs_remaining: CELEBRATION_DELAY_SECS,
            });
        }

        events
    }

    pub fn results(&self) -> Results {
        Results {
            score: self.score,
            total_questions: TOTAL_QUESTIONS,
            accuracy_percent: ((100 * self.score) as f64 / TOTAL_QUESTIONS as f64).round() as u32,
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
