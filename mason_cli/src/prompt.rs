//! Validated console prompts with "back" navigation.
//!
//! All reads go through a [`Prompter`] over injected reader/writer handles,
//! so the whole interactive surface is testable against in-memory buffers.
//! Numeric prompts re-issue themselves on bad input and recognize `b`/`back`
//! as a step-back signal; multi-field entry is driven by [`NumericForm`], an
//! explicit field sequence where backing out of the first field cancels the
//! form.

use std::io::{self, BufRead, Write};

/// Outcome of a single prompt: a validated value, or a request to step back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<T> {
    Value(T),
    Back,
}

/// Console front-end over arbitrary read/write handles.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter { reader, writer }
    }

    /// Print a line to the operator.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    /// Issue a prompt and read one trimmed line. A closed input stream is an
    /// error: the session cannot continue without an operator.
    fn read_raw(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn is_back(input: &str) -> bool {
        input.eq_ignore_ascii_case("b") || input.eq_ignore_ascii_case("back")
    }

    /// Free-text prompt; the result may be empty.
    pub fn read_text(&mut self, prompt: &str) -> io::Result<String> {
        self.read_raw(prompt)
    }

    /// Numeric prompt with a minimum. Re-prompts until the entry parses and
    /// clears the minimum, or the operator steps back.
    pub fn read_f64(&mut self, prompt: &str, min: f64) -> io::Result<Entry<f64>> {
        loop {
            let input = self.read_raw(prompt)?;
            if Self::is_back(&input) {
                return Ok(Entry::Back);
            }
            match input.parse::<f64>() {
                Ok(value) if value >= min => return Ok(Entry::Value(value)),
                Ok(_) => self.say(&format!("Value must be at least {}", min))?,
                Err(_) => self.say("Please enter a number")?,
            }
        }
    }

    /// Whole-number prompt with a minimum.
    pub fn read_u32(&mut self, prompt: &str, min: u32) -> io::Result<Entry<u32>> {
        loop {
            let input = self.read_raw(prompt)?;
            if Self::is_back(&input) {
                return Ok(Entry::Back);
            }
            match input.parse::<u32>() {
                Ok(value) if value >= min => return Ok(Entry::Value(value)),
                Ok(_) => self.say(&format!("Value must be at least {}", min))?,
                Err(_) => self.say("Please enter a whole number")?,
            }
        }
    }

    /// Numeric prompt where an empty entry means "no value".
    pub fn read_optional_f64(
        &mut self,
        prompt: &str,
        min: f64,
    ) -> io::Result<Entry<Option<f64>>> {
        loop {
            let input = self.read_raw(prompt)?;
            if input.is_empty() {
                return Ok(Entry::Value(None));
            }
            if Self::is_back(&input) {
                return Ok(Entry::Back);
            }
            match input.parse::<f64>() {
                Ok(value) if value >= min => return Ok(Entry::Value(Some(value))),
                Ok(_) => self.say(&format!("Value must be at least {}", min))?,
                Err(_) => self.say("Please enter a number")?,
            }
        }
    }

    /// Yes/no prompt; anything other than `y` counts as no.
    pub fn read_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let input = self.read_raw(prompt)?;
        Ok(input.eq_ignore_ascii_case("y"))
    }
}

/// One field of a numeric form.
pub struct Field {
    pub label: &'static str,
    pub min: f64,
}

/// An ordered sequence of minimum-validated numeric fields, walked by index.
/// Stepping back moves to the previous field; stepping back from the first
/// field cancels the whole form.
pub struct NumericForm {
    fields: Vec<Field>,
}

impl NumericForm {
    pub fn new() -> Self {
        NumericForm { fields: Vec::new() }
    }

    pub fn with_field(mut self, label: &'static str, min: f64) -> Self {
        self.fields.push(Field { label, min });
        self
    }

    /// Walk the fields in order. `Ok(None)` means the operator backed out.
    pub fn run<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> io::Result<Option<Vec<f64>>> {
        let mut values = vec![0.0; self.fields.len()];
        let mut index = 0;
        while index < self.fields.len() {
            let field = &self.fields[index];
            match prompter.read_f64(field.label, field.min)? {
                Entry::Value(value) => {
                    values[index] = value;
                    index += 1;
                }
                Entry::Back if index == 0 => return Ok(None),
                Entry::Back => index -= 1,
            }
        }
        Ok(Some(values))
    }
}
