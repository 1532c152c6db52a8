#[cfg(feature = "gui")]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    ssdview::gui::run()?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("ssdview was built without the `gui` feature; nothing to run.");
    std::process::exit(1);
}
