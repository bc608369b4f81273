use std::io::{self, Write};
use std::path::Path;

use log::error;
use qrgen::{prompt, request::defaults};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if let Err(e) = prompt::run(&mut input, &mut out, Path::new(defaults::OUTPUT_PATH)) {
        error!("generation failed: {e:?}");
        if let Err(flush_err) = out.flush() {
            error!("could not flush console: {flush_err}");
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = prompt::wait_for_enter(&mut input, &mut out) {
        error!("could not read from console: {e}");
    }
}
