use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    gbapp_examples::main()
}
