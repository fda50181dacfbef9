use std::process::ExitCode;

fn main() -> ExitCode {
    sentiment_ledger_lib::run()
}
