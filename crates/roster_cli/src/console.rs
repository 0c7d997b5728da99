//! Line-oriented console session.
//!
//! # Responsibility
//! - Run the read-eval-print loop over any `BufRead`/`Write` pair.
//! - Answer disambiguation requests by reading a number from the same input.
//!
//! # Invariants
//! - Blank input, `cancel` or end of input cancels a pending choice.
//! - Any other invalid choice re-prompts instead of guessing.

use log::info;
use roster_core::{
    usage_lines, Choice, ContactService, Disambiguation, Disambiguator, Index, PersonRepository,
};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";
const CHOICE_PROMPT: &str = "Enter a number, or press Enter to cancel: ";

/// Console bound to one input and one output stream.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs commands until `exit` or end of input.
    pub fn run<P: PersonRepository>(&mut self, service: &mut ContactService<P>) -> io::Result<()> {
        writeln!(
            self.output,
            "{} contacts loaded. Type `help` for commands.",
            service.store().len()
        )?;

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            match line.trim() {
                "" => continue,
                "exit" => break,
                "help" => {
                    for usage in usage_lines() {
                        writeln!(self.output, "{usage}\n")?;
                    }
                    continue;
                }
                _ => {}
            }

            match service.execute_line(&line, self) {
                Ok(outcome) => {
                    writeln!(self.output, "{}", outcome.feedback)?;
                    if !service.store().filter().is_all() || line.trim() == "list" {
                        self.print_listing(service)?;
                    }
                }
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }

        info!("event=session_close module=cli status=ok");
        Ok(())
    }

    fn print_listing<P: PersonRepository>(
        &mut self,
        service: &ContactService<P>,
    ) -> io::Result<()> {
        for (position, person) in service.store().filtered_view().into_iter().enumerate() {
            writeln!(self.output, "{}. {person}", position + 1)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn ask(&mut self, request: &Disambiguation<'_>) -> io::Result<Choice> {
        writeln!(self.output, "{}", request.header())?;
        for line in request.numbered_lines() {
            writeln!(self.output, "{line}")?;
        }

        loop {
            write!(self.output, "{CHOICE_PROMPT}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(Choice::Cancelled);
            };
            let answer = line.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("cancel") {
                return Ok(Choice::Cancelled);
            }
            match answer.parse::<usize>().ok().and_then(Index::from_one_based) {
                Some(index) if index.zero_based() < request.candidates.len() => {
                    return Ok(Choice::Selected(index));
                }
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    request.candidates.len()
                )?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Disambiguator for Console<R, W> {
    fn choose(&mut self, request: &Disambiguation<'_>) -> Choice {
        // A broken terminal cannot confirm a deletion.
        self.ask(request).unwrap_or(Choice::Cancelled)
    }
}
