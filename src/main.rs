//! rPunchcard main entrypoint.

use rpunchcard::run;
use rpunchcard::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
