use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use datamine::{DataError, DataResult};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Terminal front end for the exercises: styled output plus line input.
pub struct Console<R, W> {
    input: R,
    out: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, interactive: bool) -> Self {
        Console {
            input,
            out,
            interactive,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn heading(&mut self, text: impl Display) -> io::Result<()> {
        queue!(
            self.out,
            Print("\n"),
            SetForegroundColor(Color::Cyan),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n")
        )?;
        self.out.flush()
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn success(&mut self, text: impl Display) -> io::Result<()> {
        self.colored(Color::Green, text)
    }

    pub fn warning(&mut self, text: impl Display) -> io::Result<()> {
        self.colored(Color::Yellow, text)
    }

    pub fn failure(&mut self, text: impl Display) -> io::Result<()> {
        self.colored(Color::Red, text)
    }

    pub fn dim(&mut self, text: impl Display) -> io::Result<()> {
        self.colored(Color::DarkGrey, text)
    }

    fn colored(&mut self, color: Color, text: impl Display) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            Print("\n")
        )?;
        self.out.flush()
    }

    /// Ask a question and read one trimmed line.
    ///
    /// Returns `None` at end of input, and always when the console is not
    /// interactive.
    pub fn prompt(&mut self, question: impl Display) -> io::Result<Option<String>> {
        if !self.interactive {
            return Ok(None);
        }
        queue!(self.out, SetForegroundColor(Color::Magenta), Print(question), ResetColor)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Parse whitespace-separated numbers, requiring exactly `expected` of them.
pub fn parse_point(input: &str, expected: usize) -> DataResult<Vec<f64>> {
    let values = input
        .split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| DataError::InvalidArgument(format!("'{}' is not a number", tok)))
        })
        .collect::<DataResult<Vec<f64>>>()?;
    if values.len() != expected {
        return Err(DataError::DimensionMismatch(format!(
            "expected {} values, got {}",
            expected,
            values.len()
        )));
    }
    Ok(values)
}
