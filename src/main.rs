use symbol_usage::cli::{self, Cli};
use symbol_usage::config::Config;
use symbol_usage::errors::{EXIT_SUCCESS, SyError};
use symbol_usage::{logging, output, router};

fn main() {
    let code = match cli::parse().and_then(run) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => output::format_error(&err),
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<(), SyError> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(Some(&cwd))?;
    logging::init(&config.logging);
    router::dispatch(cli, &config)
}
