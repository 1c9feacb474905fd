//! Record formatting with `%(field)s` templates
//!
//! A template such as `%(asctime)s - %(name)s - %(levelname)-8s - %(message)s`
//! is compiled once into segments. Rendering then never fails and never
//! touches the record: the colored variant only wraps the rendered level and
//! source name in ANSI escapes, so stripping the escapes gives back exactly
//! the plain rendering.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use chrono::format::{Item, StrftimeItems};
use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    AscTime,
    Name,
    LevelName,
    LevelNo,
    Message,
    Thread,
    Process,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "asctime" => Some(Field::AscTime),
            "name" => Some(Field::Name),
            "levelname" => Some(Field::LevelName),
            "levelno" => Some(Field::LevelNo),
            "message" => Some(Field::Message),
            "thread" | "threadName" => Some(Field::Thread),
            "process" => Some(Field::Process),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        width: usize,
        left_align: bool,
    },
}

fn compile_template(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => literal.push('%'),
            Some('(') => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some(')') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(LoggerError::config(
                                "format",
                                format!("unterminated placeholder '%({}'", name),
                            ))
                        }
                    }
                }
                let field = Field::parse(&name).ok_or_else(|| {
                    LoggerError::config("format", format!("unknown field '{}'", name))
                })?;

                let left_align = chars.next_if_eq(&'-').is_some();
                let mut width = 0usize;
                while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                    width = width
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(digit.to_digit(10).unwrap_or(0) as usize))
                        .ok_or_else(|| {
                            LoggerError::config(
                                "format",
                                format!("width of field '{}' is too large", name),
                            )
                        })?;
                }
                match chars.next() {
                    Some('s') | Some('d') => {}
                    other => {
                        return Err(LoggerError::config(
                            "format",
                            format!(
                                "field '{}' must end with 's' or 'd', found {:?}",
                                name, other
                            ),
                        ))
                    }
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field {
                    field,
                    width,
                    left_align,
                });
            }
            other => {
                return Err(LoggerError::config(
                    "format",
                    format!("unsupported conversion after '%': {:?}", other),
                ))
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn check_date_format(date_format: &str) -> Result<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::config(
            "date_format",
            format!("invalid strftime specifier in '{}'", date_format),
        ));
    }
    Ok(())
}

/// Renders log entries through a compiled template.
///
/// The plain formatter feeds the file sink; the colored one feeds the console.
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    segments: Vec<Segment>,
    date_format: String,
    use_colors: bool,
}

impl RecordFormatter {
    /// Compile a formatter that emits no escape sequences
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown field,
    /// a malformed placeholder or an invalid strftime specifier.
    pub fn plain(format: &str, date_format: &str) -> Result<Self> {
        Self::compile(format, date_format, false)
    }

    /// Compile a formatter that colors the level name and source name
    ///
    /// # Examples
    ///
    /// ```
    /// use masterbot_logger::core::formatter::RecordFormatter;
    ///
    /// let formatter = RecordFormatter::colored("%(levelname)s %(message)s", "%H:%M:%S");
    /// assert!(formatter.is_ok());
    /// assert!(RecordFormatter::colored("%(nope)s", "%H").is_err());
    /// ```
    pub fn colored(format: &str, date_format: &str) -> Result<Self> {
        Self::compile(format, date_format, true)
    }

    fn compile(format: &str, date_format: &str, use_colors: bool) -> Result<Self> {
        check_date_format(date_format)?;
        Ok(Self {
            segments: compile_template(format)?,
            date_format: date_format.to_string(),
            use_colors,
        })
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Render an entry, appending its exception block on following lines
    pub fn format(&self, entry: &LogEntry) -> String {
        let mut out = String::with_capacity(64 + entry.message.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field {
                    field,
                    width,
                    left_align,
                } => {
                    let value = self.field_value(*field, entry);
                    let padded = if *left_align {
                        format!("{:<width$}", value, width = *width)
                    } else {
                        format!("{:>width$}", value, width = *width)
                    };
                    out.push_str(&self.colorize(*field, entry, padded));
                }
            }
        }

        if let Some(ref exception) = entry.exception {
            out.push('\n');
            out.push_str(exception);
        }
        out
    }

    fn field_value(&self, field: Field, entry: &LogEntry) -> String {
        match field {
            Field::AscTime => entry.timestamp.format(&self.date_format).to_string(),
            Field::Name => entry.name.to_string(),
            Field::LevelName => entry.level.to_str().to_string(),
            Field::LevelNo => entry.level.as_number().to_string(),
            Field::Message => entry.message.clone(),
            Field::Thread => entry.thread_name.clone(),
            Field::Process => entry.process_id.to_string(),
        }
    }

    // Escapes are written directly so the console sink stays colored when the
    // process has no terminal attached.
    fn colorize(&self, field: Field, entry: &LogEntry, text: String) -> String {
        if !self.use_colors {
            return text;
        }
        match field {
            Field::LevelName => paint(&text, entry.level.color_code(), true),
            Field::Name => paint(&text, Color::Blue, false),
            _ => text,
        }
    }
}

const RESET: &str = "\x1b[0m";

fn paint(text: &str, color: Color, bold: bool) -> String {
    let style = if bold { "1;" } else { "" };
    format!("\x1b[{}{}m{}{}", style, color.to_fg_str(), text, RESET)
}
