//! The read-analyze-print loop.
//!
//! Generic over its input and output so the whole session can be driven
//! from memory in tests.

use std::io::{BufRead, Write};

use clap::ValueEnum;
use macrodiff_sql::{analyze, AnalysisResult, SyntaxError};
use tracing::{debug, warn};

/// How results and diagnostics are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Table: ...` / `functionNames=[...]` lines.
    #[default]
    Text,
    /// One JSON object per statement.
    Json,
}

/// A configured shell session.
#[derive(Debug, Clone)]
pub struct Repl {
    prompt: String,
    format: OutputFormat,
}

impl Repl {
    /// Creates a session printing `prompt` before each line.
    #[must_use]
    pub fn new(prompt: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            prompt: prompt.into(),
            format,
        }
    }

    /// Reads statements line by line until end of input, `quit` or `exit`.
    ///
    /// Returns the number of statements analyzed, successful or not.
    ///
    /// # Errors
    ///
    /// Fails only on I/O errors; syntax errors are reported to `out` and the
    /// loop continues.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> anyhow::Result<usize> {
        let mut count = 0;
        let mut line = String::new();

        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            let statement = line.trim();
            if statement.is_empty() {
                continue;
            }
            if is_exit_command(statement) {
                debug!(command = statement, "leaving shell");
                break;
            }

            writeln!(out, "======> \"{statement}\"")?;
            self.execute(statement, out)?;
            count += 1;
        }

        Ok(count)
    }

    /// Analyzes one statement and prints the result or a diagnostic.
    ///
    /// Returns whether the statement parsed.
    ///
    /// # Errors
    ///
    /// Fails only if writing to `out` fails.
    pub fn execute<W: Write>(&self, sql: &str, out: &mut W) -> anyhow::Result<bool> {
        match analyze(sql) {
            Ok(result) => {
                self.write_result(&result, out)?;
                Ok(true)
            }
            Err(e) => {
                warn!(offset = e.offset(), "{e}");
                self.write_error(sql, &e, out)?;
                Ok(false)
            }
        }
    }

    fn write_result<W: Write>(&self, result: &AnalysisResult, out: &mut W) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{result}")?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(result)?)?,
        }
        Ok(())
    }

    fn write_error<W: Write>(
        &self,
        sql: &str,
        error: &SyntaxError,
        out: &mut W,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(out, "error: {error}")?;
                writeln!(out, "  {sql}")?;
                writeln!(out, "  {}^", " ".repeat(caret_column(sql, error.offset())))?;
            }
            OutputFormat::Json => {
                let kind = match error {
                    SyntaxError::Lex(_) => "lex",
                    SyntaxError::Parse(_) => "parse",
                };
                let body = serde_json::json!({
                    "error": kind,
                    "message": error.to_string(),
                    "offset": error.offset(),
                });
                writeln!(out, "{body}")?;
            }
        }
        Ok(())
    }
}

/// `quit` and `exit`, in any case, end the session.
fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// Character column of byte `offset` in `sql`, clamped to the line end.
fn caret_column(sql: &str, offset: usize) -> usize {
    let offset = offset.min(sql.len());
    sql.get(..offset).map_or(offset, |prefix| prefix.chars().count())
}
