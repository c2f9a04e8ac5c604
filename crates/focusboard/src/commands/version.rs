pub fn run() -> anyhow::Result<()> {
    println!("focusboard {}", env!("CARGO_PKG_VERSION"));
    println!("Focus session filtering, charts and exports");
    Ok(())
}
