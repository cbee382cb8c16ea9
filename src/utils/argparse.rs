//! A small command-line argument parser
//!
//! Supports boolean flags (`--verbose`, `-v`), options taking a value
//! (`--name value`, `-n value`) and any number of positional arguments.
//! A lone `-` is positional, and everything after `--` is positional.

use std::collections::HashMap;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    String,
    Boolean,
}

#[derive(Debug, Clone)]
struct Argument {
    name: String,
    short: Option<char>,
    arg_type: ArgumentType,
    help: String,
}

#[derive(Debug)]
pub struct ArgumentParser {
    program: String,
    description: String,
    arguments: Vec<Argument>,
    positional: Option<(String, String)>,
}

#[derive(Debug, Default)]
pub struct Namespace {
    values: HashMap<String, String>,
    positionals: Vec<String>,
}

impl Namespace {
    /// Value given for the option `name`, if any
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether the boolean flag `name` was passed
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Positional arguments in the order they were given
    #[must_use]
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

impl ArgumentParser {
    pub fn new(program: &str, description: &str) -> Self {
        let mut parser = ArgumentParser {
            program: program.to_owned(),
            description: description.to_owned(),
            arguments: Vec::new(),
            positional: None,
        };
        parser.add_argument(
            "help",
            Some('h'),
            ArgumentType::Boolean,
            "Display this help message",
        );
        parser
    }

    pub fn add_argument(
        &mut self,
        name: &str,
        short: Option<char>,
        arg_type: ArgumentType,
        help: &str,
    ) -> &mut Self {
        self.arguments.push(Argument {
            name: name.to_owned(),
            short,
            arg_type,
            help: help.to_owned(),
        });
        self
    }

    /// Names the positional arguments for the usage text
    pub fn positionals(&mut self, name: &str, help: &str) -> &mut Self {
        self.positional = Some((name.to_owned(), help.to_owned()));
        self
    }

    /// Parses the arguments of the current process
    ///
    /// # Errors
    ///
    /// A message describing the first invalid argument.
    pub fn parse_cli(&self) -> Result<Namespace, String> {
        self.parse(std::env::args().skip(1))
    }

    /// Parses the given arguments, excluding the program name
    ///
    /// # Errors
    ///
    /// A message describing the first invalid argument.
    pub fn parse_args(&self, args: &[&str]) -> Result<Namespace, String> {
        self.parse(args.iter().map(|&x| x.to_owned()))
    }

    fn parse<I>(&self, mut args: I) -> Result<Namespace, String>
    where
        I: Iterator<Item = String>,
    {
        let mut parsed = Namespace::default();

        while let Some(arg) = args.next() {
            if arg == "--" {
                parsed.positionals.extend(args.by_ref());
                break;
            }

            let argument = if let Some(name) = arg.strip_prefix("--") {
                self.arguments.iter().find(|a| a.name == name)
            } else if let Some(short) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
                let mut chars = short.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.arguments.iter().find(|a| a.short == Some(c)),
                    _ => None,
                }
            } else {
                parsed.positionals.push(arg);
                continue;
            };

            let Some(argument) = argument else {
                return Err(format!("Unknown argument: {arg}"));
            };

            let value = match argument.arg_type {
                ArgumentType::Boolean => "true".to_owned(),
                ArgumentType::String => args
                    .next()
                    .ok_or_else(|| format!("Missing value for argument: {arg}"))?,
            };
            parsed.values.insert(argument.name.clone(), value);
        }

        if !parsed.positionals.is_empty() && self.positional.is_none() {
            return Err(format!(
                "Unexpected argument: {}",
                parsed.positionals[0]
            ));
        }

        Ok(parsed)
    }

    /// Help text listing every argument
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = format!("usage: {} [options]", self.program);
        if let Some((name, _)) = &self.positional {
            let _ = write!(out, " [{name}...]");
        }
        let _ = write!(out, "\n\n{}\n", self.description);

        if let Some((name, help)) = &self.positional {
            let _ = write!(out, "\npositional arguments:\n  {name:<20}{help}\n");
        }

        out.push_str("\noptions:\n");
        for arg in &self.arguments {
            let flag = match arg.short {
                Some(c) => format!("-{c}, --{}", arg.name),
                None => format!("    --{}", arg.name),
            };
            let flag = match arg.arg_type {
                ArgumentType::Boolean => flag,
                ArgumentType::String => format!("{flag} VALUE"),
            };
            let _ = writeln!(out, "  {flag:<20}{}", arg.help);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_parser() -> ArgumentParser {
        let mut parser = ArgumentParser::new("prog", "Test program");
        parser
            .add_argument("verbose", Some('v'), ArgumentType::Boolean, "Be loud")
            .add_argument("name", Some('n'), ArgumentType::String, "A name")
            .positionals("file", "Input files");
        parser
    }

    #[test]
    fn test_flags_and_positionals() {
        let args = make_parser()
            .parse_args(&["-v", "a.txt", "--name", "x", "-", "b.txt"])
            .unwrap();
        assert!(args.flag("verbose"));
        assert!(!args.flag("help"));
        assert_eq!(args.get("name"), Some("x"));
        assert_eq!(args.positionals(), ["a.txt", "-", "b.txt"]);
    }

    #[test]
    fn test_double_dash() {
        let args = make_parser().parse_args(&["--", "-v", "--help"]).unwrap();
        assert!(!args.flag("verbose"));
        assert_eq!(args.positionals(), ["-v", "--help"]);
    }

    #[test]
    fn test_errors() {
        let parser = make_parser();
        assert_eq!(
            parser.parse_args(&["--bogus"]).unwrap_err(),
            "Unknown argument: --bogus"
        );
        assert_eq!(
            parser.parse_args(&["-n"]).unwrap_err(),
            "Missing value for argument: -n"
        );
        assert!(parser.parse_args(&["-vn"]).is_err());
    }

    #[test]
    fn test_positionals_rejected_when_not_declared() {
        let parser = ArgumentParser::new("prog", "No positionals");
        assert_eq!(
            parser.parse_args(&["file"]).unwrap_err(),
            "Unexpected argument: file"
        );
    }

    #[test]
    fn test_usage() {
        let usage = make_parser().usage();
        assert!(usage.starts_with("usage: prog [options] [file...]"));
        assert!(usage.contains("-v, --verbose"));
        assert!(usage.contains("-n, --name VALUE"));
        assert!(usage.contains("-h, --help"));
    }
}
