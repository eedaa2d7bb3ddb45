//! The server takes no command-line arguments. Passing any prints the help text and the configuration the server
//! would start with, and the server does not start.
use std::{
    env::{self, VarError},
    fmt::Write,
};

const HELP_TEXT: &str = include_str!("./cli-help.txt");

/// Environment variables the server reads, in the order they are reported.
const CONFIG_VARS: [&str; 6] = [
    "RUST_LOG",
    "PSG_HOST",
    "PSG_PORT",
    "PSG_UPSTREAM_BASE",
    "PSG_HTTP_TIMEOUT_SECONDS",
    "PSG_LOG_UPSTREAM_BODIES",
];

/// Prints the help if any argument was given. Returns true when it did, and the caller should exit.
pub fn handle_command_line_args() -> bool {
    if !help_requested(env::args()) {
        return false;
    }
    println!("\n{HELP_TEXT}\n");
    print!("{}", describe_config(|name| env::var(name)));
    true
}

fn help_requested<I: IntoIterator<Item = String>>(args: I) -> bool {
    // The first item is the program name
    args.into_iter().nth(1).is_some()
}

fn describe_config<F>(lookup: F) -> String
where F: Fn(&str) -> Result<String, VarError> {
    let mut report = String::from("Configuration from the environment:\n");
    for name in CONFIG_VARS {
        let shown = match lookup(name) {
            Ok(value) => value,
            Err(VarError::NotPresent) => "(not set, using the default)".to_string(),
            Err(VarError::NotUnicode(raw)) => format!("(unreadable: {})", raw.to_string_lossy()),
        };
        let _ = writeln!(report, "  {name:<28} {shown}");
    }
    report
}
