use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    propcheck_lib::presentation::cli::run().await
}
