use std::process::ExitCode;

use spin_demos::{demos::Textured, flow::run};

fn main() -> ExitCode {
    run::<Textured>()
}
