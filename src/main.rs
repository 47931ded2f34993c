fn main() -> Result<(), Box<dyn std::error::Error>> {
    playloader::runtime::run()
}
