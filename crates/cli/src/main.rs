use std::process::ExitCode;

fn main() -> ExitCode {
    blockdeck_cli::run()
}
