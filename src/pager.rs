//! Raw data pager
//!
//! Shows the filtered trips five rows at a time on request. A window is only
//! shown when it fits entirely inside the data: for 12 rows the pager shows
//! rows 0-4 and 5-9 and then stops.

use crate::error::Result;
use crate::output::OutputFormatter;
use crate::prompt::Prompter;
use crate::types::{City, Trip};
use std::io::{BufRead, Write};
use std::ops::Range;
use tracing::debug;

/// Rows shown per window
pub const PAGE_SIZE: usize = 5;

const FIRST_PAGE_QUESTION: &str = "Do you want to see 5 lines of raw data?";
const NEXT_PAGE_QUESTION: &str = "Do you want a further 5 lines?";

/// Consecutive, non-overlapping windows of [`PAGE_SIZE`] rows
///
/// # Example
/// ```
/// use bikeshare::pager::PageWindows;
///
/// let windows: Vec<_> = PageWindows::new(12).collect();
/// assert_eq!(windows, vec![0..5, 5..10]);
/// ```
#[derive(Debug, Clone)]
pub struct PageWindows {
    len: usize,
    start: usize,
}

impl PageWindows {
    pub fn new(len: usize) -> Self {
        Self { len, start: 0 }
    }
}

impl Iterator for PageWindows {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.start + PAGE_SIZE;
        if end > self.len {
            return None;
        }
        let window = self.start..end;
        self.start = end;
        Some(window)
    }
}

/// Offer the raw rows of `trips` window by window
///
/// The first answer must be `yes` to start. After each window, any answer
/// other than `no` moves on to the next one. Returns the windows shown.
pub fn display_data<R, W>(
    prompter: &mut Prompter<R, W>,
    formatter: &dyn OutputFormatter,
    trips: &[Trip],
    city: City,
) -> Result<Vec<Range<usize>>>
where
    R: BufRead,
    W: Write,
{
    let mut shown = Vec::new();
    if !prompter.confirm(FIRST_PAGE_QUESTION)? {
        return Ok(shown);
    }

    for window in PageWindows::new(trips.len()) {
        let rows = formatter.format_raw_rows(&trips[window.clone()], city);
        writeln!(prompter.output(), "{rows}")?;
        debug!("Displayed rows {:?}", window);
        shown.push(window);

        if prompter.ask(NEXT_PAGE_QUESTION)? == "no" {
            break;
        }
    }

    Ok(shown)
}
