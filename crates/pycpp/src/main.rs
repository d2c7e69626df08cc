use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pycpp::{transpile_json, Dialect, TranspileOptions};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// pycpp: Python to C++ transpiler.
///
/// Reads a Python syntax tree as JSON (see scripts/py_ast_to_json.py) and
/// writes C++ source.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Input syntax tree (.json)
    input: PathBuf,

    /// Output C++ source file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Require annotations instead of emitting `auto`
    #[arg(long)]
    strict: bool,

    /// Keyword set that identifiers must not collide with
    #[arg(long, value_enum, default_value_t = DialectArg::Full)]
    dialect: DialectArg,

    /// More log output (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// C keywords only
    Narrow,
    /// C and C++ keywords
    Full,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Narrow => Dialect::Narrow,
            DialectArg::Full => Dialect::Full,
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("transpiling {}", cli.input.display());

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let options = TranspileOptions {
        strict_type_inference: cli.strict,
        dialect: cli.dialect.into(),
    };

    let cpp_code = transpile_json(&source, &options).context("transpilation failed")?;

    if let Some(output_path) = cli.output {
        fs::write(&output_path, &cpp_code)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        info!("wrote {}", output_path.display());
    } else {
        print!("{}", cpp_code);
    }

    info!("transpilation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["pycpp", "input.json"]);
        assert_eq!(cli.input, PathBuf::from("input.json"));
        assert!(cli.output.is_none());
        assert!(!cli.strict);
        assert_eq!(cli.dialect, DialectArg::Full);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "pycpp",
            "in.json",
            "-o",
            "out.cpp",
            "--strict",
            "--dialect",
            "narrow",
            "-vv",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("out.cpp")));
        assert!(cli.strict);
        assert_eq!(Dialect::from(cli.dialect), Dialect::Narrow);
        assert_eq!(cli.verbose, 2);
    }
}
