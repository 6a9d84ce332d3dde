//! Interactive condition prompt for `lsa step`.

use std::io::{self, BufRead, Write};

use log::trace;

use lsa::{ConditionOracle, element::Element};

/// Asks for each condition value on `input`, writing prompts to `output`.
///
/// Accepts `0`/`1`, `n`/`y`, `f`/`t` and `false`/`true`; anything else is
/// asked again.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "t" | "true" => Some(true),
        "0" | "n" | "no" | "f" | "false" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> ConditionOracle for Prompt<R, W> {
    fn decide(&mut self, vertex: &Element) -> io::Result<bool> {
        loop {
            write!(self.output, "{} = ", vertex.id())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("no value given for `{}`", vertex.id()),
                ));
            }
            if let Some(value) = parse_answer(&line) {
                trace!(id:% = vertex.id(), value; "Condition answered");
                return Ok(value);
            }
            writeln!(self.output, "expected 0 or 1")?;
        }
    }
}
