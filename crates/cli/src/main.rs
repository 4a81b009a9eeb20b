use std::process::ExitCode;

fn main() -> ExitCode {
    weatherwear_cli::run()
}
