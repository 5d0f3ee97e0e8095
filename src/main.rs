fn main() {
    if let Err(err) = signature_rs::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
