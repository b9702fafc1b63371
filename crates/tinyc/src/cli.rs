use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tinyc_backend::{Target, UnknownTarget};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The target to compile for, or `list` to print every target.
    #[arg(long, value_name = "NAME", value_parser = parse_target, default_value = "python3")]
    pub target: TargetArg,

    /// Log each compilation stage to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// The input file.
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetArg {
    List,
    Target(Target),
}

impl Cli {
    /// Parses arguments, also accepting the single-dash `-target` spelling.
    pub fn try_parse_args<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::try_parse_from(args.into_iter().map(normalize_arg))
    }
}

fn normalize_arg(arg: OsString) -> OsString {
    match arg.to_str() {
        Some(s) if s == "-target" || s.starts_with("-target=") => format!("-{s}").into(),
        _ => arg,
    }
}

fn parse_target(s: &str) -> Result<TargetArg, String> {
    if s == "list" {
        return Ok(TargetArg::List);
    }

    s.parse()
        .map(TargetArg::Target)
        .map_err(|err: UnknownTarget| {
            format!("{err}, run with `-target list` to see the available targets")
        })
}
