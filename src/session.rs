//! Interactive session loop
//!
//! One iteration asks for a selection, loads and filters the city's trips,
//! prints the four report sections, offers the raw rows, and then asks whether
//! to restart. Each iteration loads its own trips; nothing is cached between
//! iterations.

use crate::data_loader::DataLoader;
use crate::error::Result;
use crate::pager::display_data;
use crate::prompt::Prompter;
use crate::report::Reporter;
use std::io::{BufRead, Write};
use tracing::info;

/// Drives prompts, loading, reporting and paging until the user stops
pub struct Session<R, W> {
    loader: DataLoader,
    prompter: Prompter<R, W>,
    reporter: Reporter,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(loader: DataLoader, prompter: Prompter<R, W>, reporter: Reporter) -> Self {
        Self {
            loader,
            prompter,
            reporter,
        }
    }

    /// Run one full iteration
    pub fn run_once(&mut self) -> Result<()> {
        let selection = self.prompter.get_filters()?;
        let trips = self
            .loader
            .load_data(selection.city, selection.month, selection.day)?;

        self.reporter
            .report(self.prompter.output(), selection, &trips)?;
        display_data(
            &mut self.prompter,
            self.reporter.formatter(),
            &trips,
            selection.city,
        )?;
        Ok(())
    }

    /// Loop while the user answers `yes` to the restart question
    ///
    /// Returns the number of iterations run.
    pub fn run(&mut self) -> Result<usize> {
        let mut iterations = 0;
        loop {
            self.run_once()?;
            iterations += 1;
            if !self.prompter.confirm_restart()? {
                break;
            }
            info!("Restarting session");
        }
        Ok(iterations)
    }

    /// Consume the session and return its output stream
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}
