//! Interactive Rhodus shell
//!
//! A line-oriented loop that reads commands or program text, checks the text
//! with the recognizer and prints `Success!` or a rendered diagnostic. Input
//! and output are generic so sessions can be driven from tests.

mod commands;

pub use commands::{Command, HELP};

use crate::config::{ShellConfig, RHODUS_VERSION};
use crate::diagnostic;
use crate::parser::events::NoEvents;
use crate::parser::{load_source, recognize, ParseError, Scanner};
use chrono::Local;
use crossterm::style::Stylize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;
use tracing::{debug, warn};

pub struct Shell<R, W> {
    config: ShellConfig,
    input: R,
    output: W,
    scanner: Scanner,
    should_quit: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(config: ShellConfig, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
            scanner: Scanner::new(),
            should_quit: false,
        }
    }

    /// Print the banner and process lines until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        debug!(scripts_dir = %self.config.scripts_dir.display(), "shell session started");
        self.welcome()?;

        let mut line = String::new();
        while !self.should_quit {
            write!(self.output, "{}", self.config.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            self.execute_line(line.trim_end_matches(|c: char| c == '\r' || c == '\n'))?;
        }

        debug!("shell session ended");
        Ok(())
    }

    /// Handle one line of input. Only output failures are returned; problems
    /// with the line itself are reported to the user.
    pub fn execute_line(&mut self, line: &str) -> io::Result<()> {
        match Command::parse(line) {
            Command::Quit => self.should_quit = true,
            Command::Run(path) => self.run_file(path)?,
            Command::List(path) => self.list_file(path)?,
            Command::Edit(path) => self.edit_file(path)?,
            Command::Dir => self.list_scripts()?,
            Command::Tokens(code) => self.show_tokens(code)?,
            Command::Help => self.help()?,
            Command::Code(code) => self.check_code("<input>", code)?,
            Command::Empty => {}
        }
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn welcome(&mut self) -> io::Result<()> {
        let banner = format!("Welcome to Rhodus, Version {}", RHODUS_VERSION);
        if self.config.color {
            writeln!(self.output, "{}", banner.bold())?;
        } else {
            writeln!(self.output, "{}", banner)?;
        }
        writeln!(
            self.output,
            "Date and Time: {}",
            Local::now().format("%b %e %H:%M:%S")
        )?;
        writeln!(self.output, "Type quit to exit")
    }

    fn check_code(&mut self, name: &str, source: &str) -> io::Result<()> {
        self.scanner.scan_string(source);
        match recognize(&mut self.scanner, NoEvents) {
            Ok(()) => self.success(),
            Err(err) => self.report(name, source, &err),
        }
    }

    fn run_file(&mut self, path: &str) -> io::Result<()> {
        match load_source(path) {
            Ok(source) => self.check_code(path, &source),
            Err(err) if err.is_not_found() => self.failure(&format!("File not found: {}", path)),
            Err(err) => self.failure(&err.to_string()),
        }
    }

    fn list_file(&mut self, path: &str) -> io::Result<()> {
        match load_source(path) {
            Ok(text) => {
                write!(self.output, "{}", text)?;
                if !text.is_empty() && !text.ends_with('\n') {
                    writeln!(self.output)?;
                }
                Ok(())
            }
            Err(err) if err.is_not_found() => self.failure(&format!("No such file: {}", path)),
            Err(err) => self.failure(&err.to_string()),
        }
    }

    /// Run the editor on `path` and wait for it to exit
    fn edit_file(&mut self, path: &str) -> io::Result<()> {
        let editor = self.config.editor.clone();
        let mut parts = editor.split_whitespace();
        let Some(program) = parts.next() else {
            return self.failure("no editor configured");
        };

        debug!(editor = program, path, "launching editor");
        match process::Command::new(program).args(parts).arg(path).status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => self.failure(&format!("editor exited with {}", status)),
            Err(err) => {
                warn!(editor = program, error = %err, "editor failed to start");
                self.failure(&format!("could not start editor '{}': {}", program, err))
            }
        }
    }

    fn list_scripts(&mut self) -> io::Result<()> {
        let dir = self.config.scripts_dir.clone();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                return self.failure(&format!(
                    "could not read directory '{}': {}",
                    dir.display(),
                    err
                ))
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        writeln!(self.output, "{}", dir.display())?;
        for name in names {
            writeln!(self.output, "  {}", name)?;
        }
        Ok(())
    }

    fn show_tokens(&mut self, code: &str) -> io::Result<()> {
        match Scanner::tokenize(code) {
            Ok(tokens) => {
                for token in tokens {
                    writeln!(self.output, "{}", token)?;
                }
                Ok(())
            }
            Err(err) => self.report("<input>", code, &ParseError::from(err)),
        }
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Commands:")?;
        for (usage, what) in HELP {
            writeln!(self.output, "  {:<14} {}", usage, what)?;
        }
        writeln!(self.output, "Any other line is checked as Rhodus code.")
    }

    fn success(&mut self) -> io::Result<()> {
        if self.config.color {
            writeln!(self.output, "{}", "Success!".green())
        } else {
            writeln!(self.output, "Success!")
        }
    }

    fn report(&mut self, name: &str, source: &str, err: &ParseError) -> io::Result<()> {
        debug!(%err, "input rejected");
        self.failure(&diagnostic::render(name, source, err))
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        if self.config.color {
            writeln!(self.output, "{}", message.red())
        } else {
            writeln!(self.output, "{}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rhodus-shell-{}-{}", process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn plain_config() -> ShellConfig {
        ShellConfig {
            scripts_dir: scratch_dir("scripts"),
            editor: "true".to_string(),
            prompt: ">> ".to_string(),
            color: false,
        }
    }

    fn session(input: &str) -> String {
        let mut shell = Shell::new(plain_config(), Cursor::new(input.to_string()), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn line_output(line: &str) -> String {
        let mut shell = Shell::new(plain_config(), Cursor::new(String::new()), Vec::new());
        shell.execute_line(line).unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_banner_and_quit() {
        let out = session("x = 1\nquit\ny = 2\n");
        assert!(out.starts_with("Welcome to Rhodus, Version 1.0\nDate and Time: "));
        assert!(out.contains("Type quit to exit\n>> Success!\n>> "));
        // nothing after quit is read
        assert_eq!(out.matches("Success!").count(), 1);
    }

    #[test]
    fn test_end_of_input_leaves() {
        let out = session("x = 1");
        assert!(out.ends_with(">> Success!\n>> \n"));
    }

    #[test]
    fn test_errors_keep_the_loop_going() {
        let out = session("x = (1\ny = 2\nquit\n");
        assert!(out.contains("error: expected ')', found end of file"));
        assert!(out.contains("--> <input>:1:7"));
        assert!(out.contains(">> Success!"));
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut shell = Shell::new(plain_config(), Cursor::new(String::new()), Vec::new());
        shell.execute_line("quit").unwrap();
        assert!(shell.should_quit());
    }

    #[test]
    fn test_tokens_command() {
        assert_eq!(
            line_output("tokens x = 1.5"),
            "identifier <x>\nspecial <'='>\nfloat <1.500000>\nend of stream <EOF>\n"
        );
    }

    #[test]
    fn test_tokens_lex_error() {
        let out = line_output("tokens a ! b");
        assert!(out.starts_with("error: "));
        assert!(out.contains("<input>:1:3"));
    }

    #[test]
    fn test_missing_files() {
        assert_eq!(line_output("run nope.rh"), "File not found: nope.rh\n");
        assert_eq!(line_output("list nope.rh"), "No such file: nope.rh\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_reports_load_error() {
        let dir = scratch_dir("unreadable").display().to_string();
        for command in ["run", "list"] {
            let out = line_output(&format!("{} {}", command, dir));
            assert!(
                out.starts_with(&format!("could not read '{}': ", dir)),
                "{:?}",
                out
            );
        }
    }

    #[test]
    fn test_run_and_list_file() {
        let path = scratch_dir("run").join("loop.rh");
        fs::write(&path, "for i = 1 to 3 do\n  println(i)\nend").unwrap();
        let path = path.display().to_string();

        assert_eq!(line_output(&format!("run {}", path)), "Success!\n");
        assert_eq!(
            line_output(&format!("list {}", path)),
            "for i = 1 to 3 do\n  println(i)\nend\n"
        );
    }

    #[test]
    fn test_run_reports_file_name() {
        let path = scratch_dir("bad").join("bad.rh");
        fs::write(&path, "while x do\n  y = 1\n").unwrap();
        let path = path.display().to_string();

        let out = line_output(&format!("run {}", path));
        assert!(out.starts_with("error: expected 'end', found end of file\n"));
        assert!(out.contains(&format!("{}:3:1", path)));
    }

    #[test]
    fn test_dir_is_sorted() {
        let config = plain_config();
        let dir = scratch_dir("dir");
        fs::write(dir.join("b.rh"), "").unwrap();
        fs::write(dir.join("a.rh"), "").unwrap();

        let mut shell = Shell::new(
            ShellConfig {
                scripts_dir: dir.clone(),
                ..config
            },
            Cursor::new(String::new()),
            Vec::new(),
        );
        shell.execute_line("dir").unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();

        assert_eq!(out, format!("{}\n  a.rh\n  b.rh\n", dir.display()));
    }

    #[test]
    fn test_help_lists_commands() {
        let out = line_output("help");
        for (usage, _) in HELP {
            assert!(out.contains(usage));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_waits_for_editor() {
        assert_eq!(line_output("edit whatever.rh"), "");
    }

    #[test]
    fn test_missing_editor() {
        let mut config = plain_config();
        config.editor = "rhodus-no-such-editor".to_string();
        let mut shell = Shell::new(config, Cursor::new(String::new()), Vec::new());
        shell.execute_line("edit a.rh").unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.starts_with("could not start editor 'rhodus-no-such-editor'"));
    }
}
