//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let from_file = path.exists();
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "from_file": from_file,
            "config": config,
        }));
        return Ok(());
    }

    if !from_file {
        output::warning(&format!("no config file at {}", path.display()));
    }
    output::section("Effective Configuration");
    output::field("Source", source_label(path, from_file));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Database");
    output::field("Path", &config.database.path);
    output::field("Pool size", config.database.pool_size);
    output::field("Busy timeout", format!("{} ms", config.database.busy_timeout_ms));

    output::section("Listing");
    output::field("Max page size", config.listing.max_page_size);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }
    output::success(&format!("{} is valid", path.display()));
    Ok(())
}

fn source_label(path: &Path, from_file: bool) -> String {
    if from_file {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", output::muted(path.display()))
    }
}
