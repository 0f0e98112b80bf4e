// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Naiad CLI entrypoint.
//!
//! Runs the interactive TUI against a scratch directory. If no directory is
//! given, `~/.scratchpad` is used (and created on first save).

use std::error::Error;
use std::path::PathBuf;

use naiad::store::ScratchDir;

fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} [<scratch-dir>]\n  {program} --dir <scratch-dir>\n  {program} --help | --version\n\nIf scratch-dir/--dir is omitted, `~/.scratchpad` is used."
    )
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    dir: Option<String>,
    help: bool,
    version: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" => {
                if options.dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.dir = Some(dir);
            }
            "--help" => {
                if options.help {
                    return Err(());
                }
                options.help = true;
            }
            "--version" => {
                if options.version {
                    return Err(());
                }
                options.version = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.dir.is_some() {
                    return Err(());
                }
                options.dir = Some(arg);
            }
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "naiad".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                eprintln!("{}", usage(&program));
                std::process::exit(2);
            }
        };

        if options.help {
            println!("{}", usage(&program));
            return Ok(());
        }
        if options.version {
            println!("naiad {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let root = options
            .dir
            .map_or_else(ScratchDir::default_root, PathBuf::from);
        naiad::tui::run(root)
    })();

    if let Err(err) = result {
        eprintln!("naiad: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_positional_dir() {
        let options = parse_options(["some/dir".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_dir_flag() {
        let options = parse_options(["--dir".to_owned(), "some/dir".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_help_flag() {
        let options = parse_options(["--help".to_owned()].into_iter()).expect("parse options");
        assert!(options.help);
    }

    #[test]
    fn parses_version_flag() {
        let options = parse_options(["--version".to_owned()].into_iter()).expect("parse options");
        assert!(options.version);
    }

    #[test]
    fn parses_help_alongside_a_dir() {
        let options = parse_options(["some/dir".to_owned(), "--help".to_owned()].into_iter())
            .expect("parse options");
        assert!(options.help);
        assert_eq!(options.dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn rejects_duplicate_help_flags() {
        parse_options(["--help".to_owned(), "--help".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_dirs() {
        parse_options(["one".to_owned(), "two".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_dir_flags() {
        parse_options(
            ["--dir".to_owned(), ".".to_owned(), "--dir".to_owned(), "other".to_owned()]
                .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_positional_dir_with_dir_flag() {
        parse_options(["--dir".to_owned(), "one".to_owned(), "two".to_owned()].into_iter())
            .unwrap_err();
    }

    #[test]
    fn rejects_missing_dir_value() {
        parse_options(["--dir".to_owned()].into_iter()).unwrap_err();
    }
}
