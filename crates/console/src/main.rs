use console::runtime::{boot, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (session, config) = boot::boot()?;
    run::run(session, config).await
}
