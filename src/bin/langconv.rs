//! Command-line front end for the language converter.
//!
//! Merges one or more JSON dictionary files into a target language, reads
//! input text from a file (or stdin when no file is given), converts it,
//! and writes the result to stdout.

use langconv::{ConvertOptions, Language, LanguageConverter};
use std::io::Read as _;

/// Uses the [`Display`](core::fmt::Display) formatter for an error even when
/// the [`Debug`](core::fmt::Debug) formatter is requested, so CLI failures
/// read as a message instead of a derived struct dump.
struct DisplayError(Box<dyn std::error::Error>);

impl core::fmt::Debug for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl<E: Into<Box<dyn std::error::Error>>> From<E> for DisplayError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

const USAGE: &str = "\
Usage: langconv --lang <code> --dict <path> [--dict <path> ...] [--fallback <code> ...] \
[--sequential-global] [--avoid-html-code] [<input-file>]

Reads text from <input-file>, or stdin if omitted, converts it to the
target language variant, and writes the result to stdout.";

fn main() -> Result<(), DisplayError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(());
    }

    let code: String = args
        .value_from_str("--lang")
        .map_err(|_| format!("missing required --lang argument\n\n{USAGE}"))?;
    let mut dicts: Vec<String> = Vec::new();
    while let Ok(path) = args.value_from_str::<_, String>("--dict") {
        dicts.push(path);
    }
    if dicts.is_empty() {
        return Err(format!("at least one --dict argument is required\n\n{USAGE}").into());
    }
    let mut fallbacks: Vec<String> = Vec::new();
    while let Ok(tag) = args.value_from_str::<_, String>("--fallback") {
        fallbacks.push(tag);
    }
    let sequential_global = args.contains("--sequential-global");
    let avoid_html_code = args.contains("--avoid-html-code");
    let input_file: Option<String> = args.opt_free_from_str()?;

    let text = match input_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let language = Language::from_files(code, &dicts, fallbacks)?;
    let converter = LanguageConverter::from_language(&language);
    let output = converter.convert(
        &text,
        ConvertOptions {
            sequential_global,
            avoid_html_code,
        },
    );
    print!("{output}");
    Ok(())
}
