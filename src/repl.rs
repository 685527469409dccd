//! Interactive todo loop.
//!
//! A blocking read-eval-print loop over an in-memory list of titles. The
//! list lives only as long as the loop; nothing is persisted.
//!
//! ```text
//! Running --add / show / display / unknown--> Running
//! Running --exit / end of input-------------> Terminated
//! ```

use crate::error::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Main prompt. The spelling is user-visible text and kept as-is.
pub const PROMPT: &str = "Type add, show ot exit: ";

/// Prompt shown after `add`.
pub const ADD_PROMPT: &str = "Enter a todo:";

/// Reply to anything that isn't a command.
pub const UNKNOWN_COMMAND: &str = "You entered an unknown command.";

/// Printed once when the loop terminates.
pub const FAREWELL: &str = "Bye!";

/// A parsed line of loop input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Show,
    Exit,
    Unknown,
}

impl Command {
    /// Parse a command, ignoring surrounding whitespace. Case-sensitive.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "add" => Self::Add,
            "show" | "display" => Self::Show,
            "exit" => Self::Exit,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// The loop and the titles it has collected.
#[derive(Debug)]
pub struct TodoLoop<R, W> {
    input: R,
    output: W,
    items: Vec<String>,
    state: LoopState,
}

impl<R: BufRead, W: Write> TodoLoop<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            items: Vec::new(),
            state: LoopState::Running,
        }
    }

    /// Titles added so far, in insertion order, exactly as entered.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run until `exit` or end of input, then print the farewell.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        while self.state == LoopState::Running {
            self.step()?;
        }
        writeln!(self.output, "{FAREWELL}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prompt for and handle a single command.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn step(&mut self) -> Result<LoopState> {
        let Some(line) = self.prompt(PROMPT)? else {
            return self.end_of_input();
        };

        let command = Command::parse(&line);
        debug!(?command, "Dispatching loop command");

        match command {
            Command::Add => match self.prompt(ADD_PROMPT)? {
                Some(title) => self.items.push(title),
                None => return self.end_of_input(),
            },
            Command::Show => {
                for item in &self.items {
                    writeln!(self.output, "{}", title_case(item))?;
                }
            }
            Command::Exit => self.state = LoopState::Terminated,
            Command::Unknown => writeln!(self.output, "{UNKNOWN_COMMAND}")?,
        }

        Ok(self.state)
    }

    /// Closed input ends the loop like `exit`, after finishing the prompt line.
    fn end_of_input(&mut self) -> Result<LoopState> {
        debug!("Input closed, leaving loop");
        writeln!(self.output)?;
        self.state = LoopState::Terminated;
        Ok(self.state)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(read_line(&mut self.input)?)
    }
}

/// Read one line without its terminator. `None` at end of input.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Title-case a string for display, following Python's `str.title()`.
///
/// A cased letter takes its title-case form when the character before it
/// is not cased and is lowercased otherwise, so `"they're"` becomes
/// `"They'Re"`, `"2nd try"` becomes `"2Nd Try"` and `"ßa"` becomes `"Ssa"`.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        let cased = is_cased(c);
        if !cased {
            out.push(c);
        } else if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut out, c);
        }
        prev_cased = cased;
    }

    out
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase() || is_titlecase(c)
}

/// Letters in the Unicode `Lt` category.
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Push the title-case mapping of `c`.
///
/// Characters whose title form differs from their uppercase form are
/// listed explicitly. For the rest, a multi-character uppercase expansion
/// keeps only its first letter capitalized (`ß` -> `Ss`, `ﬁ` -> `Fi`).
fn push_titlecase(out: &mut String, c: char) {
    match c {
        // Latin digraphs: DŽ Dž dž, LJ Lj lj, NJ Nj nj, DZ Dz dz
        '\u{01C4}'..='\u{01C6}' => out.push('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => out.push('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => out.push('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => out.push('\u{01F2}'),
        // Greek with ypogegrammeni map to their prosgegrammeni forms
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            out.extend(char::from_u32(u32::from(c) + 8));
        }
        '\u{1FB3}' => out.push('\u{1FBC}'),
        '\u{1FC3}' => out.push('\u{1FCC}'),
        '\u{1FF3}' => out.push('\u{1FFC}'),
        // Apostrophe n
        '\u{0149}' => out.push_str("\u{02BC}N"),
        _ if is_titlecase(c) => out.push(c),
        _ => {
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        }
    }
}

/// Run the loop on the process's stdin and stdout.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn run_stdio() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut todo_loop = TodoLoop::new(stdin.lock(), stdout.lock());
    todo_loop.run()?;
    debug!(items = todo_loop.items().len(), "Loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Vec<String>, String) {
        let mut output = Vec::new();
        let mut todo_loop = TodoLoop::new(Cursor::new(script.as_bytes()), &mut output);
        todo_loop.run().unwrap();
        assert_eq!(todo_loop.state(), LoopState::Terminated);
        let items = todo_loop.items().to_vec();
        drop(todo_loop);
        (items, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("add"), Command::Add);
        assert_eq!(Command::parse("  show \n"), Command::Show);
        assert_eq!(Command::parse("display"), Command::Show);
        assert_eq!(Command::parse("exit"), Command::Exit);
        assert_eq!(Command::parse("Exit"), Command::Unknown);
        assert_eq!(Command::parse(""), Command::Unknown);
        assert_eq!(Command::parse("foo"), Command::Unknown);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("buy milk"), "Buy Milk");
        assert_eq!(title_case("BUY MILK"), "Buy Milk");
        assert_eq!(title_case("they're here"), "They'Re Here");
        assert_eq!(title_case("hello2world"), "Hello2World");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("  spaced  out "), "  Spaced  Out ");
    }

    #[test]
    fn test_title_case_uses_titlecase_mapping() {
        assert_eq!(title_case("ßa"), "Ssa");
        assert_eq!(title_case("ﬁsh and chips"), "Fish And Chips");
        assert_eq!(title_case("\u{01C6}a"), "\u{01C5}a");
        assert_eq!(title_case("\u{01C4}EMAL"), "\u{01C5}emal");
        assert_eq!(title_case("\u{1FB3}\u{03B2}"), "\u{1FBC}\u{03B2}");
        assert_eq!(title_case("\u{0149}ame"), "\u{02BC}Name");
    }

    #[test]
    fn test_title_case_treats_titlecase_letters_as_cased() {
        assert_eq!(title_case("\u{01C5}a"), "\u{01C5}a");
        assert_eq!(title_case("\u{01C5}A b"), "\u{01C5}a B");
        assert_eq!(title_case("a\u{01C5}"), "A\u{01C6}");
    }

    #[test]
    fn test_add_then_show_prints_title_case() {
        let (items, output) = run_script("add\nbuy milk\nshow\nexit\n");

        assert_eq!(items, vec!["buy milk"]);
        assert_eq!(
            output,
            format!("{PROMPT}{ADD_PROMPT}{PROMPT}Buy Milk\n{PROMPT}{FAREWELL}\n")
        );
    }

    #[test]
    fn test_display_is_alias_for_show() {
        let (_, output) = run_script("add\nwalk dog\ndisplay\nexit\n");
        assert!(output.contains("Walk Dog\n"));
    }

    #[test]
    fn test_unknown_command_continues() {
        let (items, output) = run_script("foo\nadd\nx\nexit\n");

        assert_eq!(items, vec!["x"]);
        assert!(output.starts_with(&format!("{PROMPT}{UNKNOWN_COMMAND}\n{PROMPT}")));
        assert!(output.ends_with(&format!("{FAREWELL}\n")));
    }

    #[test]
    fn test_exit_prints_farewell_only_once() {
        let (items, output) = run_script("exit\nadd\nignored\n");
        assert!(items.is_empty());
        assert_eq!(output, format!("{PROMPT}{FAREWELL}\n"));
    }

    #[test]
    fn test_items_stored_verbatim() {
        let (items, output) = run_script("add\n  MiXeD case  \nadd\n\nshow\nexit\n");

        // Empty titles are accepted; casing and spacing are preserved
        assert_eq!(items, vec!["  MiXeD case  ", ""]);
        assert!(output.contains("  Mixed Case  \n\n"));
    }

    #[test]
    fn test_commands_are_trimmed() {
        let (items, _) = run_script("  add \t\nx\n exit\n");
        assert_eq!(items, vec!["x"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (items, _) = run_script("add\r\nbuy milk\r\nexit\r\n");
        assert_eq!(items, vec!["buy milk"]);
    }

    #[test]
    fn test_show_preserves_insertion_order() {
        let (_, output) = run_script("add\nfirst\nadd\nsecond\nshow\nexit\n");
        let first = output.find("First").unwrap();
        let second = output.find("Second").unwrap();
        assert!(first < second);
    }

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_end_of_input_reports_write_errors() {
        let output = ShortWriter {
            budget: PROMPT.len(),
        };
        let mut todo_loop = TodoLoop::new(Cursor::new(&b""[..]), output);

        let err = todo_loop.step().unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }

    #[test]
    fn test_end_of_input_terminates() {
        let (items, output) = run_script("add\nlast one");
        assert_eq!(items, vec!["last one"]);
        assert!(output.ends_with(&format!("{PROMPT}\n{FAREWELL}\n")));

        let (items, output) = run_script("add\n");
        assert!(items.is_empty());
        assert_eq!(output, format!("{PROMPT}{ADD_PROMPT}\n{FAREWELL}\n"));
    }
}
