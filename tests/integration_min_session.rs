// Smoke test against the compiled binary: play a few keystrokes into it
// through a pseudo terminal and make sure it comes up and shuts down
// cleanly. Nothing about the quiz outcome is asserted here; the headless
// tests cover that. This one exists to catch breakage in the terminal
// setup, the input thread, and the teardown path.
//
// expectrl's PTY allocation is Unix-only and CI runners often lack a
// usable terminal, so the test stays `#[ignore]`d. Locally:
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn quiz_starts_and_exits_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    // Debug binary built for this test run.
    let bin = assert_cmd::cargo::cargo_bin("anzan");
    let cmd = format!("{} --seed 1 --no-sound", bin.display());

    let mut p = spawn(cmd)?;

    // Let the alternate screen come up before typing at it.
    std::thread::sleep(Duration::from_millis(200));

    // Enter on the start screen begins a round.
    p.send("\r")?;

    // Any answer will do; it only has to be accepted and acknowledged.
    std::thread::sleep(Duration::from_millis(200));
    p.send("5\r")?;

    // ESC quits from every screen.
    std::thread::sleep(Duration::from_millis(200));
    p.send("\x1b")?;

    // A clean exit closes the PTY.
    p.expect(Eof)?;
    Ok(())
}
