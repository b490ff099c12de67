// src/ui/form.rs

//! Interactive start form, used when the binary is launched without
//! arguments.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const COUNTDOWN_CHOICES: [u64; 6] = [5, 10, 15, 20, 25, 30];
pub const DEFAULT_COUNTDOWN: u64 = 10;
pub const MIN_TIME_CHOICES: [f64; 4] = [0.05, 0.1, 0.15, 0.2];

/// Everything the form collects before a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub input: PathBuf,
    pub countdown: u64,
    pub start_size_from_file: bool,
    pub profile: String,
    pub min_time: f64,
}

/// Reads one answer. Returns `None` at end of input, the default for an
/// empty line.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str, default: &str) -> io::Result<Option<String>> {
    if default.is_empty() {
        write!(output, "{}: ", prompt)?;
    } else {
        write!(output, "{} [{}]: ", prompt, default)?;
    }
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim();
    Ok(Some(if answer.is_empty() { default.to_string() } else { answer.to_string() }))
}

/// Asks until `parse` accepts the answer.
fn ask_parsed<R, W, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
{
    loop {
        let Some(answer) = ask(input, output, prompt, default)? else {
            return Ok(None);
        };
        match parse(&answer) {
            Some(value) => return Ok(Some(value)),
            None => writeln!(output, "'{}' is not a valid choice.", answer)?,
        }
    }
}

/// Runs the form. Returns `None` when the operator leaves it (end of input
/// or `exit`).
pub fn run_form<R: BufRead, W: Write>(input: &mut R, output: &mut W, profiles: &[String]) -> io::Result<Option<FormValues>> {
    writeln!(output, "Terrain autopaint")?;
    writeln!(output, "Open the scenario editor. To set elevations go to map -> Elevation and click 'Direct'.")?;
    writeln!(output, "For terrain data stay on the first map menu page ('Ground 1', etc).")?;
    writeln!(output, "During the countdown switch back to the editor.")?;
    writeln!(output, "Type 'exit' at any prompt to leave.")?;
    writeln!(output)?;

    let default_profile = profiles.first().cloned().unwrap_or_default();
    let profile_prompt = format!("Profile ({})", profiles.join(", "));
    let Some(profile) = ask_parsed(input, output, &profile_prompt, &default_profile, |answer| {
        (answer == "exit" || profiles.iter().any(|p| p == answer)).then(|| answer.to_string())
    })?
    else {
        return Ok(None);
    };
    if profile == "exit" {
        return Ok(None);
    }

    let input_path = loop {
        let Some(answer) = ask(input, output, "CSV file", "")? else {
            return Ok(None);
        };
        match answer.as_str() {
            "exit" => return Ok(None),
            "" => writeln!(output, "Select a file before starting")?,
            path => break PathBuf::from(path),
        }
    };

    let countdown_prompt = format!("Countdown in seconds ({:?})", COUNTDOWN_CHOICES);
    let Some(countdown) = ask_parsed(input, output, &countdown_prompt, &DEFAULT_COUNTDOWN.to_string(), |answer| {
        answer.parse::<u64>().ok()
    })?
    else {
        return Ok(None);
    };

    let Some(start_size_from_file) = ask_parsed(
        input,
        output,
        "Take start size from file (only when continuing a map!) [y/n]",
        "n",
        |answer| match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        },
    )?
    else {
        return Ok(None);
    };

    let min_time_prompt = format!("Min. time between clicks in seconds ({:?}); only increase if clicks get skipped", MIN_TIME_CHOICES);
    let Some(min_time) = ask_parsed(input, output, &min_time_prompt, &MIN_TIME_CHOICES[0].to_string(), |answer| {
        answer.parse::<f64>().ok().filter(|t| t.is_finite() && *t >= 0.0)
    })?
    else {
        return Ok(None);
    };

    Ok(Some(FormValues {
        input: input_path,
        countdown,
        start_size_from_file,
        profile,
        min_time,
    }))
}
