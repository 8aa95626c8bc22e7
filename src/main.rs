fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("starting {}", raumplan::config::TITLE);

    let app = raumplan::default()?;
    app.run()?;
    Ok(())
}
