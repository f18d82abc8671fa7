use std::error::Error;

// Only the commit SHA is consumed, by `--version`.
fn main() -> Result<(), Box<dyn Error>> {
    let git = vergen_gitcl::GitclBuilder::default().sha(true).build()?;
    vergen_gitcl::Emitter::default()
        .add_instructions(&git)?
        .emit()?;
    Ok(())
}
