//! `panelcfg`: validate and convert display setup files

use std::process::ExitCode;

use panelcfg_tool::cli::{Command, EXIT_USAGE, USAGE};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command.run(),
        Err(e) => {
            eprintln!("panelcfg: {e}\n\n{USAGE}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}
