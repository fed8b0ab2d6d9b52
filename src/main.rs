fn main() -> anyhow::Result<()> {
    shapepad::run()?;
    Ok(())
}
