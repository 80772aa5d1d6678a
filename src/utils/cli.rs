//! Command-line argument parsing and help for dirview.
//!
//! When invoked with no args/flags (dv), dirview simply browses the current directory.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub(crate) fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> CliAction {
    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: dirview accepts only one argument at a time.");
        eprintln!("Usage: dv [PATH] or dv [OPTION]");
        return CliAction::Exit;
    }

    match first.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" | "--keybind" | "--key" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("dirview {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"dirview - A small terminal directory browser with colored permissions

USAGE:
  dv [PATH]

PATH:
  Directory to open (defaults to current directory)

OPTIONS:
      --init              Generate a default configuration
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of dirview

ENVIRONMENT:
  DIRVIEW_CONFIG          Override the default config path
  DIRVIEW_LOG             Log file path, empty disables (filter with RUST_LOG)
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  go_up                     ["k", "Up"]
  go_down                   ["j", "Down"]
  go_parent                 ["h", "Left", "Backspace"]
  go_into_dir               ["l", "Right"]
  quit                      ["q", "Esc", "Ctrl+c"]
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}
