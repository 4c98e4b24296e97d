use anyhow::Result;
use log::info;
use smartshopr::config::Config;
use smartshopr::constants::ERROR_NO_API_KEY;
use smartshopr::logger;
use smartshopr::setup::setup_entry;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--init-config") {
        let path = Config::get_default_config_path()?;
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            Config::generate_default_config(&path)?;
            println!("✅ Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    if let Some(path) = logger::init(&config.logging)? {
        info!("Logging to {}", path.display());
    }

    // Check if API key is set
    let Ok(api_key) = config.api_key() else {
        eprintln!("{ERROR_NO_API_KEY}");
        eprintln!("\n💡 To use this app:");
        eprintln!("1. Create an API key in SmartShopr App → Settings → Home Assistant");
        eprintln!("2. Set it as environment variable: export {}=your_key_here", config.api.api_key_env);
        eprintln!("3. Run the app again to see your actual data!");
        return Ok(());
    };

    let integration = match setup_entry(&config, &api_key).await {
        Ok(integration) => integration,
        Err(e) => {
            eprintln!("❌ Setup failed ({}): {e}", e.code());
            return Ok(());
        }
    };

    let mut updates = integration.coordinator.subscribe();
    loop {
        let current = updates.borrow_and_update().clone();
        if let Some(snapshot) = current {
            println!(
                "🛒 {} lists, {} items, {} budgets (updated {})",
                snapshot.lists.len(),
                snapshot.item_count(),
                snapshot.budgets.len(),
                snapshot.fetched_at.format("%H:%M:%S")
            );
            for list in &integration.entities.lists {
                println!("  {} {}: {} items", list.icon(), list.name(), list.todo_items().len());
            }
            println!("  💶 {} this month", integration.entities.monthly_expenses.native_value());
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    integration.unload().await;
    Ok(())
}
