use std::process::ExitCode;

use file_rename::RenameError;
use file_rename::cli;
use file_rename::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<RenameError>() {
            // The typed message already carries the io detail of its source.
            Some(re) => {
                out::print_error(&re.to_string());
                ExitCode::from(re.exit_code())
            }
            None => {
                out::print_error(&format!("{e:#}"));
                ExitCode::FAILURE
            }
        },
    }
}
