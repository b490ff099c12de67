// src/ui/dialog.rs

use std::io::{self, BufRead, Write};

/// The possible outcomes when a confirmation prompt is closed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DialogResult {
    Ok,
    Cancel,
}

/// Prints `lines` and waits for the operator to confirm. Anything other than
/// an explicit yes (or end of input) cancels.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, lines: &[String]) -> io::Result<DialogResult> {
    for line in lines {
        writeln!(output, "{}", line)?;
    }
    write!(output, "Start now? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(DialogResult::Cancel);
    }
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "ok" => Ok(DialogResult::Ok),
        _ => Ok(DialogResult::Cancel),
    }
}

/// The pre-run instructions shown to the operator.
pub fn start_instructions(input: &str, countdown: u64) -> Vec<String> {
    vec![
        format!("About to paint {}.", input),
        "Open the scenario editor, go to map -> Elevation and click 'Direct'.".to_string(),
        "Make sure the map is 320m x 320m, unless continuing a map with its size taken from the file.".to_string(),
        format!("Once you confirm you have {}s to switch back to the editor.", countdown),
        "To stop the run, move the mouse cursor to one of the screen corners.".to_string(),
    ]
}
