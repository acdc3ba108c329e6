//! Interactive date-range input

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};

/// Ask until the answer parses as an integer
fn ask_number<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<i32> {
    loop {
        write!(output, "{}", question)?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read from stdin")?;
        if read == 0 {
            bail!("Input closed before a value for '{}' was given", question.trim());
        }

        match line.trim().parse::<i32>() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "'{}' is not a whole number, try again.", line.trim())?,
        }
    }
}

/// Ask for year, month and day until they form a real calendar date
pub fn ask_date<R: BufRead, W: Write>(input: &mut R, output: &mut W, which: &str) -> Result<NaiveDate> {
    loop {
        let year = ask_number(input, output, &format!("Enter {} year (YYYY): ", which))?;
        let month = ask_number(input, output, &format!("Enter {} month (MM): ", which))?;
        let day = ask_number(input, output, &format!("Enter {} day (DD): ", which))?;

        let date = u32::try_from(month)
            .ok()
            .zip(u32::try_from(day).ok())
            .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d));
        match date {
            Some(date) => return Ok(date),
            None => writeln!(output, "{}-{}-{} is not a valid date, try again.", year, month, day)?,
        }
    }
}

/// Start and end dates, inclusive; the end may not precede the start
pub fn ask_date_range<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(NaiveDate, NaiveDate)> {
    let start = ask_date(input, output, "Start")?;
    loop {
        let end = ask_date(input, output, "end")?;
        if end >= start {
            return Ok((start, end));
        }
        writeln!(output, "End date {} is before start date {}, try again.", end, start)?;
    }
}
