use shopkeep_demo::DemoConfig;

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::from_env()?;
    shopkeep_observability::init_with(config.log_format);

    let stdout = std::io::stdout();
    shopkeep_demo::run(config.discount_policy, &mut stdout.lock())?;
    Ok(())
}
