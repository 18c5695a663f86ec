use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("outline_doc_core=info".parse().unwrap()),
        )
        .init();

    match outline_doc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("outline-doc error: {err}");
            process::exit(1);
        }
    }
}
