fn main() {
    if let Err(e) = surf_host::init() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
