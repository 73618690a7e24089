//! `unixperms` command line: diagnose why paths are not accessible.

use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::{App, Arg};
use log::debug;
use unixperms::{AccessDiagnostic, DiagnosticConfig, GroupSource, NativeFs, NativeIdentity};

type MyResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug)]
struct Config {
    paths: Vec<String>,
    info: bool,
    json: bool,
    group_source: GroupSource,
    diagnostic: DiagnosticConfig,
}

fn get_args() -> MyResult<Config> {
    let app = App::new("unixperms")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explain why the current user cannot read/write a path")
        .arg(
            Arg::with_name("paths")
                .value_name("PATH")
                .help("Files or directories to check")
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::with_name("info")
                .short("i")
                .long("info")
                .help("Print an inspection report instead of a diagnosis")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("no_sudo")
                .long("no-sudo")
                .help("Suggest plain `chmod` instead of `sudo chmod`")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Fail if group membership cannot be determined")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("groups")
                .short("g")
                .long("groups")
                .help("Ask the system `groups` command for group membership")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("groups_command")
                .long("groups-command")
                .value_name("PROGRAM")
                .help("Ask PROGRAM <user> for group membership instead of the group database")
                .takes_value(true)
                .conflicts_with("groups"),
        );
    #[cfg(feature = "serde")]
    let app = app.arg(
        Arg::with_name("json")
            .long("json")
            .help("Print results as JSON")
            .takes_value(false),
    );
    let matches = app.get_matches();

    let mut diagnostic = DiagnosticConfig::default().with_strict_group_lookup(matches.is_present("strict"));
    if matches.is_present("no_sudo") {
        diagnostic = diagnostic.with_chmod_command("chmod");
    }
    let group_source = match matches.value_of("groups_command") {
        Some(program) => GroupSource::Command {
            program: program.to_string(),
        },
        None if matches.is_present("groups") => GroupSource::groups_command(),
        None => GroupSource::Database,
    };

    Ok(Config {
        paths: matches.values_of_lossy("paths").unwrap_or_default(),
        info: matches.is_present("info"),
        json: matches.is_present("json"),
        group_source,
        diagnostic,
    })
}

/// Returns `Ok(true)` when every path is fully accessible.
fn run(config: Config) -> MyResult<bool> {
    debug!("{config:?}");
    let fs = NativeFs;
    let identity = NativeIdentity::with_group_source(config.group_source.clone());
    let diagnostic = AccessDiagnostic::new(&fs, &identity).with_config(config.diagnostic.clone());

    let mut all_ok = true;
    for name in &config.paths {
        let path = Path::new(name);
        if config.info {
            let report = diagnostic.inspect(path)?;
            if config.json {
                print_json(&report)?;
            } else {
                println!("{report}\n");
            }
            continue;
        }

        let issues = diagnostic.diagnose(path)?;
        all_ok &= issues.is_empty();
        if config.json {
            print_json(&issues)?;
        } else if issues.is_empty() {
            println!("{name}: access OK");
        } else {
            for issue in &issues {
                println!("{issue}");
                println!("  fix: {}", issue.suggestion);
            }
        }
    }
    Ok(all_ok)
}

#[cfg(feature = "serde")]
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> MyResult<()> {
    use unixperms::ToJson;
    println!("{}", value.to_json()?);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json<T: ?Sized>(_: &T) -> MyResult<()> {
    Err("JSON output requires the `serde` feature".into())
}

fn main() {
    env_logger::init();
    match get_args().and_then(run) {
        Ok(true) => {}
        Ok(false) => exit(2),
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    }
}
