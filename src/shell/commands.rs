//! Shell command parsing

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Run(&'a str),
    List(&'a str),
    Edit(&'a str),
    Dir,
    Tokens(&'a str),
    Help,
    /// Anything that isn't a command is checked as program text
    Code(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        // `run = 2` assigns to a variable named run
        if rest.starts_with(|c: char| matches!(c, '=' | '[' | '(')) {
            return Command::Code(line);
        }

        match (word, rest.is_empty()) {
            ("quit", true) => Command::Quit,
            ("dir", true) => Command::Dir,
            ("help", true) => Command::Help,
            ("run", false) => Command::Run(rest),
            ("list", false) => Command::List(rest),
            ("edit", false) => Command::Edit(rest),
            ("tokens", _) => Command::Tokens(rest),
            _ => Command::Code(line),
        }
    }
}

pub const HELP: &[(&str, &str)] = &[
    ("run <file>", "check a script file"),
    ("list <file>", "print a script file"),
    ("edit <file>", "open a script file in the editor"),
    ("dir", "list the sample scripts directory"),
    ("tokens <code>", "show the tokens of a line of code"),
    ("help", "show this list"),
    ("quit", "leave the shell"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("  dir  "), Command::Dir);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("run  test1.rh "), Command::Run("test1.rh"));
        assert_eq!(Command::parse("list a.rh"), Command::List("a.rh"));
        assert_eq!(Command::parse("edit a.rh"), Command::Edit("a.rh"));
        assert_eq!(Command::parse("tokens x = 1"), Command::Tokens("x = 1"));
        assert_eq!(Command::parse(""), Command::Empty);
    }

    #[test]
    fn test_code_lines() {
        assert_eq!(Command::parse("x = 1"), Command::Code("x = 1"));
        // command words used as identifiers are program text
        assert_eq!(Command::parse("run = 2"), Command::Code("run = 2"));
        assert_eq!(Command::parse("dir(1)"), Command::Code("dir(1)"));
        assert_eq!(Command::parse("run"), Command::Code("run"));
    }
}
