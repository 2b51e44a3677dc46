use crate::destination::City;
use crate::error::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::BufRead;

/// Commands whose argument is a city name.
const CITY_COMMANDS: &[&str] = &["A", "l", "a", "r", "s", "u", "R"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Command,
    Argument,
}

pub trait LineSource {
    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self, prompt: Prompt) -> Result<Option<String>>;

    fn offer_destinations(&mut self, _names: Vec<String>) {}
}

pub struct Piped<R> {
    reader: R,
}

impl<R: BufRead> Piped<R> {
    pub fn new(reader: R) -> Self {
        Piped { reader }
    }
}

impl<R: BufRead> LineSource for Piped<R> {
    fn read_line(&mut self, _prompt: Prompt) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CityCompleter {
    pub destinations: Vec<String>,
}

impl Completer for CityCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        let Some((command, partial)) = typed.split_once(' ') else {
            return Ok((0, vec![]));
        };
        if !CITY_COMMANDS.contains(&command.trim_start()) {
            return Ok((0, vec![]));
        }

        let partial = partial.trim_start();
        let candidates = self
            .destinations
            .iter()
            .filter(|d| d.starts_with(partial))
            .map(|d| Pair {
                display: d.clone(),
                replacement: d.clone(),
            })
            .collect();

        Ok((pos - partial.len(), candidates))
    }
}

pub struct Interactive {
    editor: Editor<CityCompleter, DefaultHistory>,
}

impl Interactive {
    pub fn new() -> Result<Self> {
        let config = rustyline::Config::builder()
            .history_ignore_space(true)
            .completion_type(rustyline::CompletionType::List)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CityCompleter {
            destinations: vec![],
        }));
        Ok(Interactive { editor })
    }
}

impl LineSource for Interactive {
    fn read_line(&mut self, prompt: Prompt) -> Result<Option<String>> {
        let prompt = match prompt {
            Prompt::Command => ">> ",
            Prompt::Argument => ".. ",
        };
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn offer_destinations(&mut self, names: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.destinations = names;
        }
    }
}

/// Token reader over a line source. Arguments may continue on later lines.
pub struct Scanner<S> {
    source: S,
    line: Vec<char>,
    cursor: usize,
}

impl<S: LineSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Scanner {
            source,
            line: vec![],
            cursor: 0,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Next non-whitespace character.
    pub fn next_command(&mut self) -> Result<Option<char>> {
        let found = self.skip_until(Prompt::Command, |c| !c.is_whitespace())?;
        Ok(found.then(|| self.take()))
    }

    /// Skips to the first ASCII letter and takes the rest of that line.
    pub fn read_city(&mut self) -> Result<Option<City>> {
        if !self.skip_until(Prompt::Argument, |c| c.is_ascii_alphabetic())? {
            return Ok(None);
        }
        let rest = self.line[self.cursor..].iter().collect::<String>();
        self.cursor = self.line.len();
        Ok(Some(City::new(rest.trim_end())))
    }

    /// Next whitespace-delimited token as an integer. A token that is not an
    /// integer is consumed and reported as `None`, as is end of input.
    pub fn read_int(&mut self) -> Result<Option<i64>> {
        if !self.skip_until(Prompt::Argument, |c| !c.is_whitespace())? {
            return Ok(None);
        }
        let mut token = String::new();
        while let Some(c) = self.peek().filter(|c| !c.is_whitespace()) {
            token.push(c);
            self.cursor += 1;
        }
        Ok(token.parse().ok())
    }

    fn peek(&self) -> Option<char> {
        self.line.get(self.cursor).copied()
    }

    fn take(&mut self) -> char {
        let c = self.line[self.cursor];
        self.cursor += 1;
        c
    }

    fn skip_until(&mut self, prompt: Prompt, wanted: impl Fn(char) -> bool) -> Result<bool> {
        loop {
            while let Some(c) = self.peek() {
                if wanted(c) {
                    return Ok(true);
                }
                self.cursor += 1;
            }
            match self.source.read_line(prompt)? {
                Some(line) => {
                    self.line = line.chars().collect();
                    self.cursor = 0;
                }
                None => return Ok(false),
            }
        }
    }
}
