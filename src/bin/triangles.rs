use std::process::ExitCode;

use spin_demos::{demos::Triangles, flow::run};

fn main() -> ExitCode {
    run::<Triangles>()
}
