use std::fs::File;
use std::io::{self, Write};

use mini_sha1::core::trace::LogObserver;
use mini_sha1::core::{digest_with_observer, Digest, Sha1Error};
use mini_sha1::utils::argparse::{ArgumentParser, ArgumentType, Namespace};

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parser = make_parser();
    let args = match parser.parse_cli() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{}", parser.usage());
            return EXIT_USAGE;
        }
    };

    if args.flag("help") {
        print!("{}", parser.usage());
        return EXIT_OK;
    }

    init_logger(&args);

    if args.positionals().is_empty() {
        return match hash_stdin() {
            Ok(digest) => {
                println!("{digest}");
                EXIT_OK
            }
            Err(err) => {
                eprintln!("mini_sha1: {err}");
                EXIT_FAILURE
            }
        };
    }

    let mut exit_code = EXIT_OK;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in args.positionals() {
        match hash_path(path) {
            Ok(digest) => {
                if writeln!(out, "{digest}  {path}").is_err() {
                    return EXIT_FAILURE;
                }
            }
            Err(msg) => {
                eprintln!("mini_sha1: {msg}");
                exit_code = EXIT_FAILURE;
            }
        }
    }
    exit_code
}

fn hash_stdin() -> Result<Digest, Sha1Error> {
    digest_with_observer(io::stdin().lock(), LogObserver)
}

fn hash_path(path: &str) -> Result<Digest, String> {
    if path == "-" {
        return hash_stdin().map_err(|e| format!("-: {e}"));
    }

    log::debug!("hashing {path}");
    let file = File::open(path).map_err(|e| format!("{path}: {e}"))?;
    digest_with_observer(file, LogObserver).map_err(|e| format!("{path}: {e}"))
}

/// `RUST_LOG` wins over `--verbose`, which wins over the default of `warn`
fn init_logger(args: &Namespace) {
    let default = if args.flag("verbose") { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn make_parser() -> ArgumentParser {
    let mut parser = ArgumentParser::new(
        "mini_sha1",
        "Print the SHA-1 digest of each FILE, or of standard input",
    );

    parser
        .add_argument(
            "verbose",
            Some('v'),
            ArgumentType::Boolean,
            "Trace every block, schedule and round to stderr",
        )
        .positionals("FILE", "Files to hash, `-` reads standard input");

    parser
}
