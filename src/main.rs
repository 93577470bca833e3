use slic_runner::cli::Cli;
use slic_runner::diagnostics::failure_output;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_normalized();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Run the main application logic from the library
    if let Err(e) = slic_runner::run(&cli) {
        let (line, code) = failure_output(&e, cli.json);
        eprintln!("{}", line);
        std::process::exit(code);
    }
}
