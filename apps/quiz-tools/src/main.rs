use std::process::ExitCode;

fn main() -> ExitCode {
    match quiz_tools::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            quiz_tools::exit_code(&err)
        }
    }
}
