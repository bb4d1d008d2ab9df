//! Visual Anchors CLI
//!
//! Usage:
//!   visual-anchors [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <FORMAT>  Output format: text or toml
//!   -s, --strict           Fail when a binding has no effect
//!   -v, --verbose          Log skipped bindings and hierarchy changes
//!   -g, --grammar          Show script grammar reference
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use visual_anchors::{run_with_config, ScriptConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Toml,
}

#[derive(Parser)]
#[command(name = "visual-anchors")]
#[command(about = "Reconcile anchor bindings against a view hierarchy")]
struct Cli {
    /// Input script (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output format for the resulting constraints
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Fail when a binding leaves the hierarchy untouched
    #[arg(short, long)]
    strict: bool,

    /// Log skipped bindings and constraint changes
    #[arg(short, long)]
    verbose: bool,

    /// Show script grammar reference
    #[arg(short, long)]
    grammar: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    if cli.grammar {
        print_grammar();
        return;
    }

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = ScriptConfig::new().with_strict(cli.strict);
    let session = match run_with_config(&source, &config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let report = session.report();
    match cli.format {
        Format::Text => print!("{}", report.render_text()),
        Format::Toml => match report.to_toml() {
            Ok(toml) => print!("{}", toml),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn print_intro() {
    println!(
        r#"Visual Anchors - reconcile anchor bindings against a view hierarchy

USAGE:
    visual-anchors [OPTIONS] [FILE]
    echo '<script>' | visual-anchors

OPTIONS:
    -f, --format     Output format (text, toml)
    -s, --strict     Fail when a binding has no effect
    -v, --verbose    Log skipped bindings and constraint changes
    -g, --grammar    Show script grammar reference
    -h, --help       Print help

QUICK START:
    echo 'view root  view a in root  a.fill = 10 + root.fill' | visual-anchors

This pins all four edges of `a` ten points inside `root`.
Run --grammar for syntax reference."#
    );
}

fn print_grammar() {
    println!(
        r#"VISUAL ANCHORS GRAMMAR
======================

VIEWS
-----
view name              Declare a top-level view
view name in parent    Declare a subview of parent

BINDINGS
--------
view.anchor = expression

Anchors: center_x, center_y, center, top, bottom, leading, trailing,
         fill, width, height
`center` and `fill` bind several edges at once and must be bound to
another anchor of the same kind.

EXPRESSIONS
-----------
other.top              Another view's anchor
other.top + 8          Offset (also -)
other.width * 0.5      Scale (also /)
10 + other.fill        Scalars may appear on either side
40                     Constant; short for 40 + myself
myself                 No second view (width and height only)
( ... )                Grouping

METHODS
-------
.ancestor(view)              Install on view instead of the common ancestor
.priority(250)               Priority between 0 and 1000 (default 1000)
.equal()                     == (default)
.less_than_or_equal()        <=
.greater_than_or_equal()     >=
.remove()                    Remove the matching constraint
.force_create()              Install without looking for a match

COMMENTS
--------
// line comment    /* block comment */"#
    );
}
