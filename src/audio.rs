use std::io::{self, Write};

/// Discrete audio/feedback trigger, decoupled from actual sound synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Correct,
    Wrong,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
        }
    }
}

/// Receives cue notifications from the session and the host.
pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

/// Rings the terminal bell for every cue. The terminal decides what a bell
/// sounds like; there is no synthesis here.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl CueSink for TerminalBell {
    fn cue(&mut self, _cue: Cue) {
        if self.enabled {
            let mut out = io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// Cue sink that swallows everything; used headless and with `--no-sound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn cue(&mut self, _cue: Cue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_names_match_the_wire_names() {
        assert_eq!(Cue::Click.name(), "click");
        assert_eq!(Cue::Correct.name(), "correct");
        assert_eq!(Cue::Wrong.name(), "wrong");
    }

    #[test]
    fn disabled_bell_and_silent_sink_accept_cues() {
        let mut bell = TerminalBell::new(false);
        let mut silent = Silent;

        for cue in [Cue::Click, Cue::Correct, Cue::Wrong] {
            bell.cue(cue);
            silent.cue(cue);
        }
    }
}
