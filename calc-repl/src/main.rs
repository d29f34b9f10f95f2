//! Terminal front end for the calculator core.
//!
//! Plays the role of the device's button layer: each whitespace-separated
//! token on a line is translated into key presses on the session, and the
//! display frame is printed after every line. A numeric token is replayed
//! digit by digit, exactly as if the keys had been pressed in order.

mod logging;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::warn;

use calc_core::{CalculatorSession, Key, Operator, TvmField};

/// Interactive financial calculator.
///
/// Reads key tokens from stdin (or a script file), one line at a time, and
/// prints the display after each line. Tokens: digits and numbers (`12.5`),
/// operators `+ - * / =`, `+/-`, `ce`, `ac`, `bs`, `sto`, `rcl`, field keys
/// `n i/y pv pmt fv`, `enter`, `cpt`, `up`, `down`, `bgn`, `irr`, `npv`,
/// plus the line commands `cf <flows...>`, `freq <P/Y> <C/Y>`, and `quit`.
#[derive(Parser, Debug)]
#[command(name = "calc-repl")]
#[command(version, about, long_about = None)]
struct Args {
    /// Read key tokens from a script file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print only the numeral line, not the words line
    #[arg(short, long, default_value_t = false)]
    numerals_only: bool,
}

fn main() -> Result<()> {
    logging::init("warn");
    let args = Args::parse();

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open script: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut session = CalculatorSession::new();
    print_frame(&session, args.numerals_only);

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        match run_line(&mut session, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(error) => {
                warn!(%error, %line, "rejected input line");
                continue;
            }
        }
        print_frame(&session, args.numerals_only);
    }

    Ok(())
}

/// Plays one input line into the session. Returns `Ok(false)` on `quit`.
fn run_line(
    session: &mut CalculatorSession,
    line: &str,
) -> Result<bool> {
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
        let lowered = token.to_ascii_lowercase();
        match lowered.as_str() {
            "quit" | "q" => return Ok(false),
            // Line commands consume the rest of the line.
            "cf" => {
                let flows = tokens
                    .map(|t| {
                        t.parse::<f64>()
                            .with_context(|| format!("bad cash flow: {t}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                session.set_cash_flows(flows);
                return Ok(true);
            }
            "freq" => {
                let py = parse_frequency(tokens.next())?;
                let cy = parse_frequency(tokens.next())?;
                session.set_frequencies(py, cy);
                return Ok(true);
            }
            _ => {
                for key in keys_for(token)? {
                    session.press(key)?;
                }
            }
        }
    }
    Ok(true)
}

fn parse_frequency(token: Option<&str>) -> Result<u32> {
    let token = token.context("freq needs <P/Y> <C/Y>")?;
    token
        .parse::<u32>()
        .with_context(|| format!("bad frequency: {token}"))
}

/// Translates one token into the key presses it stands for.
fn keys_for(token: &str) -> Result<Vec<Key>> {
    let upper = token.to_ascii_uppercase();
    if let Some(op) = Operator::parse(token) {
        return Ok(vec![Key::Operator(op)]);
    }
    if let Some(field) = TvmField::parse(&upper) {
        return Ok(vec![Key::Field(field)]);
    }

    let key = match upper.as_str() {
        "=" => Some(Key::Equals),
        "." => Some(Key::Decimal),
        "+/-" | "+-" => Some(Key::ToggleSign),
        "CE" => Some(Key::ClearEntry),
        "AC" | "CLR" => Some(Key::ClearAll),
        "BS" => Some(Key::Backspace),
        "STO" => Some(Key::Store),
        "RCL" => Some(Key::Recall),
        "ENTER" => Some(Key::Enter),
        "CPT" => Some(Key::Compute),
        "UP" => Some(Key::Up),
        "DOWN" => Some(Key::Down),
        "BGN" => Some(Key::ToggleTiming),
        "IRR" => Some(Key::Irr),
        "NPV" => Some(Key::Npv),
        _ => None,
    };
    if let Some(key) = key {
        return Ok(vec![key]);
    }

    // A bare number replays as individual digit and decimal presses.
    if token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Ok(token
            .chars()
            .map(|c| if c == '.' { Key::Decimal } else { Key::Digit(c) })
            .collect());
    }

    bail!("unknown key: {token}");
}

fn print_frame(
    session: &CalculatorSession,
    numerals_only: bool,
) {
    let frame = session.frame();
    let indicator = if frame.annuity_due { "  [BGN]" } else { "" };
    println!("{}{indicator}", frame.numeral);
    if !numerals_only {
        println!("  {}", frame.words);
    }
}
