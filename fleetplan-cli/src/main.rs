//! Entry point for the fleet planning command-line interface.
#![forbid(unsafe_code)]

fn main() {
    match fleetplan_cli::run() {
        Ok(status) => std::process::exit(fleetplan_cli::exit_code(status)),
        Err(error) => {
            eprintln!("fleetplan: {error}");
            std::process::exit(1);
        }
    }
}
