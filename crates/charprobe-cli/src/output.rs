use std::io::{IsTerminal, Write};
use std::path::Path;

use charprobe_core::ProbeResult;
use owo_colors::OwoColorize;

/// Prefix of the machine-parseable success line.
pub const CHAR_COUNT_PREFIX: &str = "CHAR_COUNT:";

pub const EXIT_FILE_NOT_FOUND: u8 = 2;
pub const EXIT_READ_FAILURE: u8 = 3;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    /// Color only when stdout is a terminal.
    pub fn detect() -> Self {
        Self(std::io::stdout().is_terminal())
    }

    pub fn enabled(&self) -> bool {
        self.0
    }
}

pub fn exit_code(result: &ProbeResult) -> u8 {
    match result {
        ProbeResult::Success(_) => 0,
        ProbeResult::FileNotFound => EXIT_FILE_NOT_FOUND,
        ProbeResult::ReadFailure(_) => EXIT_READ_FAILURE,
    }
}

/// Print the outcome of a probe.
///
/// The `CHAR_COUNT:` line and the `ERROR:` prefix are never colored.
pub fn print_result(
    w: &mut dyn Write,
    path: &Path,
    result: &ProbeResult,
    color: ColorMode,
) -> std::io::Result<()> {
    match result {
        ProbeResult::Success(count) => {
            writeln!(w, "{CHAR_COUNT_PREFIX}{count}")?;
            let summary = format!("Extracted {count} characters from '{}'.", path.display());
            if color.enabled() {
                writeln!(w, "{}", summary.green())
            } else {
                writeln!(w, "{summary}")
            }
        }
        ProbeResult::FileNotFound => {
            print_error(w, &format!("file not found: {}", path.display()), color)
        }
        ProbeResult::ReadFailure(message) => print_error(
            w,
            &format!("exception while reading PDF: {message}"),
            color,
        ),
    }
}

fn print_error(w: &mut dyn Write, message: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "ERROR: {}", message.red())
    } else {
        writeln!(w, "ERROR: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &ProbeResult, color: bool) -> String {
        let mut buf = Vec::new();
        print_result(&mut buf, Path::new("out/main.pdf"), result, ColorMode(color)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn success_prints_count_then_sentence() {
        let out = render(&ProbeResult::Success(42), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["CHAR_COUNT:42", "Extracted 42 characters from 'out/main.pdf'."]);
    }

    #[test]
    fn zero_count_line_is_exact() {
        let out = render(&ProbeResult::Success(0), false);
        assert_eq!(out.lines().next(), Some("CHAR_COUNT:0"));
    }

    #[test]
    fn color_never_touches_count_line() {
        let out = render(&ProbeResult::Success(7), true);
        assert!(out.starts_with("CHAR_COUNT:7\n"));
        assert!(out.lines().nth(1).unwrap().contains("Extracted 7 characters"));
    }

    #[test]
    fn not_found_names_the_path() {
        let out = render(&ProbeResult::FileNotFound, false);
        assert_eq!(out, "ERROR: file not found: out/main.pdf\n");
    }

    #[test]
    fn read_failure_includes_message() {
        let out = render(&ProbeResult::ReadFailure("no objects found".into()), true);
        assert!(out.starts_with("ERROR: "));
        assert!(out.contains("no objects found"));
        assert!(!out.contains(CHAR_COUNT_PREFIX));
    }

    #[test]
    fn exit_codes_distinguish_outcomes() {
        assert_eq!(exit_code(&ProbeResult::Success(3)), 0);
        assert_eq!(exit_code(&ProbeResult::FileNotFound), 2);
        assert_eq!(exit_code(&ProbeResult::ReadFailure(String::new())), 3);
    }
}
