// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Command-line front-end: reads a comma-separated line of altitudes (from a
//! file or stdin), runs the solver, and writes one `v`/`u`/`_` token per
//! point to stdout.

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use los_prescan::{solve_with_regime, LosError, Regime};

/// Solve the Line-of-Sight visibility problem for a terrain profile.
#[derive(Parser)]
#[command(name = "los", version, about)]
struct Cli {
    /// Path to a file holding one comma-separated line of altitudes. Reads
    /// stdin when omitted.
    #[arg(short, long)]
    input: Option<String>,

    /// Number of worker threads. Defaults to the number of logical CPUs.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Force a specific scan regime instead of choosing automatically from
    /// `(N, P)`.
    #[arg(long, value_enum)]
    force_regime: Option<RegimeArg>,

    /// Emit `tracing` diagnostics to stderr (respects `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

/// Mirrors [`Regime`] so the binary can derive [`ValueEnum`] for it without
/// running into the orphan rule (neither the enum nor the trait is local to
/// this crate).
#[derive(Copy, Clone, ValueEnum)]
enum RegimeArg {
    Tree,
    Block,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Regime {
        match arg {
            RegimeArg::Tree => Regime::Tree,
            RegimeArg::Block => Regime::Block,
        }
    }
}

/// Splits a comma-separated line of altitudes into `i64`s, same contract as
/// the field it fills: the first token is the observer.
fn parse_altitudes(line: &str) -> Result<Vec<i64>, LosError> {
    line.trim()
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<i64>().map_err(|source| LosError::ParseAltitude {
                token: tok.to_string(),
                source,
            })
        })
        .collect()
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Renders the verdict as CSV: `_` for the observer, `v`/`u` for every other
/// point, one line, no trailing comma.
fn render(visible: &[bool]) -> String {
    let mut out = String::with_capacity(visible.len() * 2);
    out.push('_');
    for &v in &visible[1..] {
        out.push(',');
        out.push_str(if v { "v" } else { "u" });
    }
    out
}

fn run() -> Result<String, String> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let raw = read_input(cli.input.as_deref()).map_err(|e| format!("reading input: {e}"))?;
    let altitudes = parse_altitudes(&raw).map_err(|e| e.to_string())?;
    let workers = cli.workers.unwrap_or_else(num_cpus::get);
    let forced = cli.force_regime.map(Regime::from);

    let verdict = solve_with_regime(&altitudes, workers, forced).map_err(|e| e.to_string())?;
    Ok(render(&verdict.visible))
}

fn main() -> ExitCode {
    match run() {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("los: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test_los {
    use super::*;
    use regex::Regex;

    #[test]
    fn rendered_line_matches_the_expected_csv_shape() {
        let pattern = Regex::new(r"^_(,[vu])*$").unwrap();
        assert!(pattern.is_match(&render(&[false, true, false, true, true])));
        assert!(pattern.is_match(&render(&[false])));
    }

    #[test]
    fn parses_comma_separated_altitudes() {
        assert_eq!(parse_altitudes("2,4,6,8").unwrap(), vec![2, 4, 6, 8]);
    }

    #[test]
    fn tolerates_surrounding_whitespace_and_trailing_newline() {
        assert_eq!(parse_altitudes(" 1, 2 ,3\n").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_a_non_integer_token() {
        let err = parse_altitudes("1,two,3").unwrap_err();
        assert!(matches!(err, LosError::ParseAltitude { token, .. } if token == "two"));
    }

    #[test]
    fn renders_observer_as_underscore_and_rest_as_v_or_u() {
        let visible = vec![false, true, false, true];
        assert_eq!(render(&visible), "_,v,u,v");
    }

    #[test]
    fn renders_single_point_without_trailing_comma() {
        assert_eq!(render(&[false]), "_");
    }
}
