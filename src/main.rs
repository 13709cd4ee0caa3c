// Entrypoint for the attendance tool.
// - Keeps `main` small: parse arguments, build the HTTP client and hand
//   both to the prompt loop.

use std::io;
use std::process::exit;

use swipe_attendance::{api::ApiClient, config::SessionConfig, ui};

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let config = match SessionConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    let api = ApiClient::new()?;

    // Blocks until an exit keyword or end of input.
    ui::run(
        &config,
        &api,
        io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
}
