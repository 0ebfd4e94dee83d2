pub fn run() -> anyhow::Result<()> {
    println!("modelroute {}", env!("CARGO_PKG_VERSION"));
    println!("Model-tier routing and usage analytics for AI coding agents");
    Ok(())
}
