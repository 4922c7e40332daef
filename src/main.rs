//! Command-line interface: read a document from stdin, tokenize it as
//! xml or json (auto-detected unless a flag says otherwise), then evaluate
//! each path expression given as an argument. Exit code 0 on success, 1
//! for usage problems or runs that raised warnings, 2 for lex errors.

use std::io::{self, Read};
use std::process;

use clap::{Arg, ArgAction, Command};
use lazy_static::lazy_static;
use regex::Regex;

use tagpath::{interpret, json, path, xml, PathError, Token, Trace};

lazy_static! {
    static ref XML_HINT: Regex = Regex::new(r"<\?xml|</|/>").unwrap();
    static ref JSON_HINT: Regex = Regex::new(r"[:{]").unwrap();
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Format {
    Xml,
    Json,
    Csv,
}

fn main() {
    env_logger::init();

    let matches = Command::new("tagpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluate path expressions over xml-like or json-like input from stdin")
        .arg_required_else_help(true)
        .arg(
            Arg::new("xml")
                .long("xml")
                .help("parse xml input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("parse json input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("parse csv input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("explain what code to use")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("trace in detail")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("expression")
                .help("path expressions to evaluate, e.g. /universe/galaxy[2]/world")
                .num_args(1..)
                .required(true),
        )
        .get_matches();

    let mut source = String::new();
    if io::stdin().read_to_string(&mut source).is_err() || source.trim().is_empty() {
        let err = PathError::input("no input was found on stdin, halting".to_string());
        eprintln!("{}", err);
        process::exit(1);
    }

    let trace = if matches.get_flag("trace") {
        Trace::stderr()
    } else {
        Trace::disabled()
    };

    let format = match requested_format(&matches) {
        Some(format) => format,
        None => match guess_format(&source) {
            Some(format) => format,
            None => {
                let err = PathError::input(
                    "could not guess the input format; pass --xml or --json".to_string(),
                );
                eprintln!("{}", err);
                process::exit(1);
            }
        },
    };

    let tokens: Vec<Token> = match format {
        Format::Xml => xml::tokenize(&source, &trace),
        Format::Json => json::tokenize(&source, &trace),
        Format::Csv => {
            eprintln!("sorry, csv input isn't implemented yet");
            process::exit(2);
        }
    };

    // A malformed document still yields the tokens before the error;
    // evaluate against them, but say so and fail the run.
    let lex_failed = match tokens.last() {
        Some(Token::Error { msg }) => {
            eprintln!("lex error: {}", msg);
            true
        }
        _ => false,
    };

    let warnings_before = path::warnings();
    let explain = matches.get_flag("explain");
    for (i, expression) in matches
        .get_many::<String>("expression")
        .expect("expression is required")
        .enumerate()
    {
        let value = interpret::evaluate(&tokens, expression, explain, &trace);
        println!("{}: path expression {:?} selected {:?}", i, expression, value);
    }

    if lex_failed {
        process::exit(2);
    }
    if path::warnings() > warnings_before {
        process::exit(1);
    }
}

fn requested_format(matches: &clap::ArgMatches) -> Option<Format> {
    let xml = matches.get_flag("xml");
    let json = matches.get_flag("json");
    let csv = matches.get_flag("csv");

    if xml {
        if json || csv {
            eprintln!("more than one of --xml, --json and --csv given, --xml taken");
        }
        Some(Format::Xml)
    } else if json {
        if csv {
            eprintln!("more than one of --json and --csv given, --json taken");
        }
        Some(Format::Json)
    } else if csv {
        Some(Format::Csv)
    } else {
        None
    }
}

fn guess_format(source: &str) -> Option<Format> {
    if XML_HINT.is_match(source) {
        Some(Format::Xml)
    } else if JSON_HINT.is_match(source) {
        Some(Format::Json)
    } else if source.contains(',') {
        Some(Format::Csv)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_xml_from_closing_tags() {
        assert_eq!(guess_format("<a>x</a>"), Some(Format::Xml));
        assert_eq!(guess_format("<a/>"), Some(Format::Xml));
        assert_eq!(guess_format("<?xml version=\"1.0\"?><a></a>"), Some(Format::Xml));
    }

    #[test]
    fn guesses_json_from_colons_or_braces() {
        assert_eq!(guess_format("a: \"x\""), Some(Format::Json));
        assert_eq!(guess_format("{ }"), Some(Format::Json));
    }

    #[test]
    fn guesses_csv_from_commas_alone() {
        assert_eq!(guess_format("a,b,c"), Some(Format::Csv));
    }

    #[test]
    fn gives_up_on_plain_text() {
        assert_eq!(guess_format("just words"), None);
    }
}
