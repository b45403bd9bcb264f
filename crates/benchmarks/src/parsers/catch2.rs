//! Catch2 v2 console reporter output.
//!
//! Contract: results appear in sections introduced by a header and a
//! dashed separator. Every case occupies four lines:
//!
//! ```text
//! benchmark name                            samples       iterations    estimated
//!                                           mean          low mean      high mean
//!                                           std dev       low std dev   high std dev
//! -------------------------------------------------------------------------------
//! Fibonacci 20                                        100            2     8.4318 ms
//!                                               43.186 us     41.402 us     46.246 us
//!                                               11.719 us      7.847 us     17.747 us
//!
//! ```
//!
//! The name line ends with samples, iterations and the estimate; the first
//! column of the mean line is the value (kept in its own unit), the first
//! column of the std-dev line is the range. Long names are wrapped by the
//! reporter: lines preceding a case header are joined to its name. A
//! section ends at a blank line or a `---`/`===` rule between cases.
//! Deviations from this layout inside a section are reported as malformed
//! output rather than skipped.

use crate::error::ParseError;
use crate::number::parse_finite;
use crate::result::BenchmarkResult;
use benchgate_core::Tool;
use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::Peekable;
use std::str::Lines;

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^benchmark name +samples +iterations +estimated").expect("catch2 header pattern is valid")
});

// Not anchored: the name before the counts may be empty on a wrapped line.
static CASE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+) +(\d+) +\d+(?:\.\d+)? (?:ns|us|ms|s)\s*$").expect("catch2 case pattern is valid")
});

static STAT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ +(\d+(?:\.\d+)?) (ns|us|ms|s) +\d+(?:\.\d+)? (?:ns|us|ms|s) +\d+(?:\.\d+)? (?:ns|us|ms|s)")
        .expect("catch2 statistics pattern is valid")
});

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-+$").expect("catch2 separator pattern is valid"));

static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:-+|=+)$").expect("catch2 rule pattern is valid"));

/// Line reader that tracks 1-based line numbers.
struct Reader<'a> {
    lines: Peekable<Lines<'a>>,
    lnum: usize,
}

impl<'a> Reader<'a> {
    fn new(output: &'a str) -> Self {
        Self {
            lines: output.lines().peekable(),
            lnum: 0,
        }
    }

    fn next_line(&mut self) -> (Option<&'a str>, usize) {
        self.lnum += 1;
        (self.lines.next(), self.lnum)
    }

    fn is_done(&mut self) -> bool {
        self.lines.peek().is_none()
    }
}

fn malformed(detail: String) -> ParseError {
    ParseError::Malformed {
        tool: Tool::Catch2,
        detail,
    }
}

/// Parse Catch2 console output.
pub fn parse(output: &str) -> Result<Vec<BenchmarkResult>, ParseError> {
    let mut reader = Reader::new(output);
    let mut benches = Vec::new();

    while !reader.is_done() {
        let (line, _) = reader.next_line();
        let Some(line) = line else { break };
        if !SECTION_HEADER.is_match(line) {
            continue;
        }

        skip_to_separator(&mut reader)?;

        let mut cases = 0;
        while let Some(bench) = parse_case(&mut reader)? {
            cases += 1;
            benches.extend(bench);
        }
        if cases == 0 {
            return Err(malformed(
                "no benchmark found for bench suite, possibly mangled output".to_string(),
            ));
        }
    }

    Ok(benches)
}

fn skip_to_separator(reader: &mut Reader<'_>) -> Result<(), ParseError> {
    loop {
        match reader.next_line() {
            (Some(line), _) if SEPARATOR.is_match(line) => return Ok(()),
            (Some(_), _) => continue,
            (None, lnum) => {
                return Err(malformed(format!(
                    "separator '------' does not appear after benchmark suite at line {lnum}"
                )))
            }
        }
    }
}

fn ends_section(line: &str) -> bool {
    line.trim().is_empty() || RULE.is_match(line)
}

/// Parse one case. `Ok(None)` ends the section; `Ok(Some(None))` is a case
/// whose value was not a finite number.
fn parse_case(reader: &mut Reader<'_>) -> Result<Option<Option<BenchmarkResult>>, ParseError> {
    let mut name_parts = Vec::new();
    let (start_line, start_lnum, start) = loop {
        let (line, lnum) = reader.next_line();
        let line = match line {
            Some(line) if !ends_section(line) => line,
            _ if name_parts.is_empty() => return Ok(None),
            _ => {
                return Err(malformed(format!(
                    "benchmark name '{}' is not followed by its measurements at line {lnum}",
                    name_parts.join(" ")
                )))
            }
        };
        match CASE_HEADER.captures(line) {
            Some(caps) => break (line, lnum, caps),
            None => name_parts.push(line.trim()),
        }
    };

    let header_start = start.get(0).map_or(start_line.len(), |m| m.start());
    name_parts.push(start_line[..header_start].trim());
    let name = name_parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        return Err(malformed(format!("benchmark name is missing at line {start_lnum}")));
    }
    let extra = format!("{} samples\n{} iterations", &start[1], &start[2]);

    let (mean_line, mean_lnum) = reader.next_line();
    let mean = mean_line.and_then(|l| STAT_LINE.captures(l)).ok_or_else(|| {
        malformed(format!(
            "mean values cannot be retrieved for benchmark '{name}' on parsing input '{}' at line {mean_lnum}",
            mean_line.unwrap_or("EOF")
        ))
    })?;

    let (std_dev_line, std_dev_lnum) = reader.next_line();
    let std_dev = std_dev_line.and_then(|l| STAT_LINE.captures(l)).ok_or_else(|| {
        malformed(format!(
            "std-dev values cannot be retrieved for benchmark '{name}' on parsing '{}' at line {std_dev_lnum}",
            std_dev_line.unwrap_or("EOF")
        ))
    })?;

    match reader.next_line() {
        (Some(line), _) if line.trim().is_empty() => {}
        (_, lnum) => {
            return Err(malformed(format!(
                "empty line is not following after 'std dev' line of benchmark '{name}' at line {lnum}"
            )))
        }
    }

    let Some(value) = parse_finite(&mean[1]) else {
        return Ok(Some(None));
    };
    let bench = BenchmarkResult::new(name, value, &mean[2])
        .with_range(format!("± {}", &std_dev[1]))
        .with_extra(extra);
    Ok(Some(Some(bench)))
}
