//! Interactive session entry.
//!
//! Asks for the date, the number of exercises and, per exercise, its name,
//! reps, weights and optional variant. Invalid answers are reported and the
//! question is asked again.

use chrono::NaiveDate;
use liftlog_core::{validate_sets, Catalog, Error, ExerciseRecord, Result, SessionRecord};
use std::io::{self, BufRead, Write};

pub struct SessionPrompt<'a, R, W> {
    input: R,
    output: W,
    catalog: &'a Catalog,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> SessionPrompt<'a, R, W> {
    pub fn new(input: R, output: W, catalog: &'a Catalog, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            catalog,
            today,
        }
    }

    /// Run the whole dialogue and return the entered session
    pub fn run(&mut self) -> Result<SessionRecord> {
        let date = self.ask_until("Enter date (YYYY-MM-DD) or leave blank for today: ", |s, today| {
            parse_date(s, today)
        })?;
        let count = self.ask_until("Enter number of exercises performed: ", |s, _| {
            parse_count(s)
        })?;

        let mut exercises = Vec::with_capacity(count);
        for i in 0..count {
            writeln!(self.output, "Exercise {}:", i + 1)?;
            exercises.push(self.ask_exercise()?);
        }

        Ok(SessionRecord { date, exercises })
    }

    fn ask_exercise(&mut self) -> Result<ExerciseRecord> {
        let name = loop {
            let answer = self.ask("  Enter exercise name: ")?.to_lowercase();
            match self.catalog.exercise(&answer) {
                Some(def) => break def.name.clone(),
                None => writeln!(
                    self.output,
                    "  Unknown exercise. Please enter a valid exercise name."
                )?,
            }
        };

        let (reps, weight) = loop {
            let reps = self.ask("  Enter reps (comma-separated): ")?;
            let weight = self.ask("  Enter weight (comma-separated): ")?;
            match parse_sets(&reps, &weight) {
                Ok(sets) => break sets,
                Err(e) => writeln!(self.output, "  {}", message(&e))?,
            }
        };

        let mut record = ExerciseRecord::new(name, reps, weight);
        record.grip = self.ask_optional(
            "  Enter grip [neutral / reverse...] (optional, press Enter to skip): ",
        )?;
        record.execution = self.ask_optional(
            "  Enter execution [simultaneous / sequential or custom] (optional, press Enter to skip): ",
        )?;
        record.equipment = self.ask_optional(
            "  Enter equipment [dumbbell / barbell / cable / machine / bodyweight...] (optional, press Enter to skip): ",
        )?;
        Ok(record)
    }

    fn ask_optional(&mut self, question: &str) -> Result<Option<String>> {
        let answer = self.ask(question)?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str, NaiveDate) -> Result<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer, self.today) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", message(&e))?,
            }
        }
    }

    /// Print a question and read one trimmed line
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before the session was complete",
            )));
        }
        Ok(line.trim().to_string())
    }
}

/// Error text without the error-kind prefix
fn message(e: &Error) -> String {
    match e {
        Error::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        Error::Validation("Invalid date format. Please use YYYY-MM-DD.".into())
    })
}

pub fn parse_count(input: &str) -> Result<usize> {
    match input.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as usize),
        Ok(_) => Err(Error::Validation(
            "Number of exercises must be positive.".into(),
        )),
        Err(_) => Err(Error::Validation(
            "Invalid number. Please enter a positive integer.".into(),
        )),
    }
}

/// Parse comma-separated reps and weights into a loggable set-group
pub fn parse_sets(reps: &str, weights: &str) -> Result<(Vec<u32>, Vec<f64>)> {
    let invalid =
        || Error::Validation("Invalid input for reps or weight. Please enter numbers only.".into());

    let reps = reps
        .split(',')
        .map(|r| r.trim().parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;
    let weights = weights
        .split(',')
        .map(|w| w.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;

    if reps.len() != weights.len() {
        return Err(Error::Validation(
            "Number of reps and weights must match.".into(),
        ));
    }
    validate_sets(&reps, &weights)?;
    Ok((reps, weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::build_default_catalog;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn run(script: &str) -> (Result<SessionRecord>, String) {
        let catalog = build_default_catalog();
        let mut output = Vec::new();
        let result =
            SessionPrompt::new(Cursor::new(script.to_string()), &mut output, &catalog, today())
                .run();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("", today()).unwrap(), today());
        assert_eq!(
            parse_date("2024-01-01", today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(parse_date("01/01/2024", today()).is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 2 ").unwrap(), 2);
        assert!(parse_count("0").is_err());
        assert!(parse_count("-3").is_err());
        assert!(parse_count("two").is_err());
    }

    #[test]
    fn test_parse_sets() {
        let (reps, weights) = parse_sets("10, 8,6", "60,65.5, 70").unwrap();
        assert_eq!(reps, vec![10, 8, 6]);
        assert_eq!(weights, vec![60.0, 65.5, 70.0]);

        assert!(parse_sets("10,8", "60").is_err());
        assert!(parse_sets("ten", "60").is_err());
        assert!(parse_sets("10", "-5").is_err());
    }

    #[test]
    fn test_full_dialogue() {
        let script = "2024-01-01\n1\nBench Press\n10,8,6\n60,65,70\nneutral\n\nsmith\n";
        let (session, _) = run(script);
        let session = session.unwrap();

        assert_eq!(session.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(session.exercises.len(), 1);
        let bench = &session.exercises[0];
        assert_eq!(bench.exercise_name, "bench press");
        assert_eq!(bench.reps, vec![10, 8, 6]);
        assert_eq!(bench.grip.as_deref(), Some("neutral"));
        assert_eq!(bench.execution, None);
        assert_eq!(bench.equipment.as_deref(), Some("smith"));
    }

    #[test]
    fn test_reprompts_on_invalid_answers() {
        let script = concat!(
            "yesterday\n",
            "\n",
            "zero\n",
            "1\n",
            "zercher carry\n",
            "squat\n",
            "5,5\n",
            "100\n",
            "5,5\n",
            "100,105\n",
            "\n\n\n",
        );
        let (session, output) = run(script);
        let session = session.unwrap();

        assert_eq!(session.date, today());
        assert_eq!(session.exercises[0].weight, vec![100.0, 105.0]);
        assert!(output.contains("Invalid date format"));
        assert!(output.contains("Invalid number"));
        assert!(output.contains("Unknown exercise"));
        assert!(output.contains("Number of reps and weights must match."));
    }

    #[test]
    fn test_eof_aborts() {
        let (session, _) = run("2024-01-01\n2\nsquat\n");
        assert!(matches!(session, Err(Error::Io(_))));
    }
}
