fn main() {
    if let Err(err) = sita::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
