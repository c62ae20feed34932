mod cli;

fn main() {
    if let Err(e) = cli::commands::run() {
        eprintln!("Error: {}", e);
        if !e.is_user_error() {
            eprintln!("Run with --verbose for details.");
        }
        std::process::exit(1);
    }
}
