//! Interactive prompts
//!
//! [`Prompter`] wraps a line-oriented input and an output stream. Each
//! question is asked again until the answer passes its validator; there is no
//! retry limit. Answers are lowercased before validation and only the line
//! terminator is stripped.
//!
//! # Example
//!
//! ```
//! use bikeshare::prompt::Prompter;
//! use bikeshare::types::City;
//!
//! let input = b"boston\nChicago\nmarch\nall\n";
//! let mut prompter = Prompter::new(&input[..], Vec::new());
//! let selection = prompter.get_filters().unwrap();
//! assert_eq!(selection.city, City::Chicago);
//! ```

use crate::error::Result;
use crate::filters::{DayFilter, MonthFilter, Selection};
use crate::types::City;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info};

const CITY_QUESTION: &str = "Would you like to see data for Chicago, New York City, or Washington?";
const CITY_RETRY: &str = "Not an appropriate choice. Please select new choice of city:";
const MONTH_QUESTION: &str = "Which month? January, February, March, April, May, June or all";
const MONTH_RETRY: &str = "Not an appropriate choice. Please select another choice of month:";
const DAY_QUESTION: &str =
    "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or all";
const DAY_RETRY: &str = "Not an appropriate choice. Please select another choice of day:";
const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.";

/// Accept a lowercased answer naming a registered city
pub fn parse_city(answer: &str) -> Option<City> {
    City::from_str(answer).ok()
}

/// Accept `january`..`june` or `all`
pub fn parse_month(answer: &str) -> Option<MonthFilter> {
    MonthFilter::from_str(answer).ok()
}

/// Accept `monday`..`sunday` or `all`
pub fn parse_day(answer: &str) -> Option<DayFilter> {
    DayFilter::from_str(answer).ok()
}

/// Question-and-answer channel over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output stream, for writing reports between questions
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter and return its output
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question`, then read one answer, lowercased
    ///
    /// End of input is an `UnexpectedEof` error so a closed stdin cannot spin
    /// a re-prompt loop forever.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        let answer = line.trim_end_matches(['\n', '\r']).to_lowercase();
        debug!("Answer to '{}': '{}'", question.trim(), answer);
        Ok(answer)
    }

    /// Ask until `validate` accepts the answer
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        retry: &str,
        validate: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        let mut answer = self.ask(question)?;
        loop {
            if let Some(value) = validate(&answer) {
                return Ok(value);
            }
            answer = self.ask(retry)?;
        }
    }

    /// Ask for city, month and day
    pub fn get_filters(&mut self) -> Result<Selection> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let city = self.ask_until(CITY_QUESTION, CITY_RETRY, parse_city)?;
        let month = self.ask_until(MONTH_QUESTION, MONTH_RETRY, parse_month)?;
        let day = self.ask_until(DAY_QUESTION, DAY_RETRY, parse_day)?;

        writeln!(self.output, "{}", "-".repeat(40))?;

        let selection = Selection::new(city, month, day);
        info!("Selected {}", selection);
        Ok(selection)
    }

    /// True only when the answer is exactly `yes`
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self.ask(question)? == "yes")
    }

    /// Ask whether to start another session
    pub fn confirm_restart(&mut self) -> io::Result<bool> {
        self.confirm(RESTART_QUESTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_validators() {
        assert_eq!(parse_city("washington"), Some(City::Washington));
        assert_eq!(parse_city("dc"), None);
        assert_eq!(parse_month("june"), Some(MonthFilter::Only(Month::June)));
        assert_eq!(parse_month("july"), None);
        assert_eq!(parse_day("all"), Some(DayFilter::All));
        assert_eq!(parse_day("funday"), None);
    }

    #[test]
    fn test_get_filters_reprompts_until_valid() {
        let mut p = prompter("boston\nNew York City\n13\nJune\nsomeday\nFriday\n");
        let selection = p.get_filters().unwrap();

        assert_eq!(selection.city, City::NewYorkCity);
        assert_eq!(selection.month, MonthFilter::Only(Month::June));
        assert_eq!(selection.day, DayFilter::Only(Weekday::Fri));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches(CITY_RETRY).count(), 1);
        assert_eq!(output.matches(MONTH_RETRY).count(), 1);
        assert_eq!(output.matches(DAY_RETRY).count(), 1);
    }

    #[test]
    fn test_surrounding_whitespace_is_not_trimmed() {
        let mut p = prompter(" chicago\nchicago\nall\nall\n");
        let selection = p.get_filters().unwrap();
        assert_eq!(selection.city, City::Chicago);

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches(CITY_RETRY).count(), 1);
    }

    #[test]
    fn test_crlf_answers() {
        let mut p = prompter("washington\r\nall\r\nmonday\r\n");
        let selection = p.get_filters().unwrap();
        assert_eq!(selection.city, City::Washington);
        assert_eq!(selection.day, DayFilter::Only(Weekday::Mon));
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut p = prompter("boston\n");
        let err = p.get_filters().unwrap_err();
        assert!(matches!(err, crate::error::BikeshareError::Io(_)));
    }

    #[test]
    fn test_confirm_restart() {
        assert!(prompter("YES\n").confirm_restart().unwrap());
        assert!(!prompter("y\n").confirm_restart().unwrap());
        assert!(!prompter("no\n").confirm_restart().unwrap());
    }
}
