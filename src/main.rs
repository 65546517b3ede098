use std::process;

use taskfixer::cmd;

#[tokio::main]
async fn main() {
    match cmd::run_cmd().await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Command error: {e:#}");
            process::exit(1);
        }
    }
}
