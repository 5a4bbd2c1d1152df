use crate::config::types::{DEFAULT_MAX_DEPTH, DEFAULT_THREADS};
use crate::ConfigError;
use std::io::{BufRead, Write};

/// The three crawl inputs as typed by the user, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub url: String,
    pub depth: Option<String>,
    pub threads: Option<String>,
}

/// Parses a maximum depth, falling back to the default on bad input
///
/// Missing or blank input silently uses the default; anything that is not a
/// non-negative integer logs a warning first.
pub fn parse_depth(input: Option<&str>) -> u32 {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_MAX_DEPTH,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid depth '{}', defaulting to {}", raw, DEFAULT_MAX_DEPTH);
            DEFAULT_MAX_DEPTH
        }),
    }
}

/// Parses a worker count, falling back to the default on bad input
///
/// Zero is treated as malformed: a pool without slots could never run the
/// seed unit.
pub fn parse_threads(input: Option<&str>) -> usize {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_THREADS,
        Some(raw) => match raw.parse::<usize>() {
            Ok(threads) if threads > 0 => threads,
            _ => {
                tracing::warn!(
                    "Invalid thread count '{}', defaulting to {}",
                    raw,
                    DEFAULT_THREADS
                );
                DEFAULT_THREADS
            }
        },
    }
}

/// Collects the crawl inputs interactively, one line per prompt
///
/// # Arguments
///
/// * `reader` - Source of user input (stdin in the binary)
/// * `writer` - Where prompts are written (stdout in the binary)
///
/// # Returns
///
/// * `Ok(RawInputs)` - The raw lines; an exhausted reader yields empty values
/// * `Err(ConfigError::Io)` - Reading or prompting failed
pub fn prompt_inputs<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<RawInputs, ConfigError> {
    let url = prompt(&mut reader, &mut writer, "Enter the url (e.g., https://example.com): ")?
        .unwrap_or_default();
    let depth = prompt(&mut reader, &mut writer, "Enter the depth (e.g., 2): ")?;
    let threads = prompt(&mut reader, &mut writer, "Enter the number of threads (e.g., 4): ")?;

    Ok(RawInputs {
        url,
        depth,
        threads,
    })
}

fn prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> Result<Option<String>, ConfigError> {
    writeln!(writer, "{}", message)?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
