fn main() -> Result<(), Box<dyn std::error::Error>> {
    ecodash::main()
}
