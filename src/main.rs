fn main() {
    let args = std::env::args().collect::<Vec<String>>();
    match fuzzylang::fuzzylang(args) {
        Ok(_) => {}
        Err(e) => println!("Error: {e}"),
    }
}
