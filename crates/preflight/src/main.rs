use clap::Parser;
use std::panic;
use std::process::ExitCode;

use preflight::{setup_logging, usage_exit_code, Cli, INTERNAL_ERROR};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout, usage errors to stderr.
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    if let Err(e) = setup_logging(Some(&cli)) {
        eprintln!("Warning: Failed to initialize logging: {e}. Using default logging.");
    }

    panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .unwrap_or_else(|| panic::Location::caller());
        let message = match panic_info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match panic_info.payload().downcast_ref::<String>() {
                Some(s) => s.as_str(),
                None => "Unknown panic payload",
            },
        };

        log::error!(
            "PANIC: '{}' at {}:{}",
            message,
            location.file(),
            location.line()
        );
    }));

    match cli.run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::error!("Command execution error: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(INTERNAL_ERROR)
        }
    }
}
