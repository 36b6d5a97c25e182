//! Basic logger usage example
//!
//! Demonstrates tagged handles, fixed levels, timers, structured values,
//! errors, byte dumps and values that settle later.
//!
//! Run with: cargo run --example basic_usage -- -v

use mulog::prelude::*;
use serde_json::json;
use std::time::Duration;

fn main() -> Result<()> {
    let dir = std::env::temp_dir();
    let config = Config::default()
        .with_log_file(FileSinkConfig::at(dir.join("mulog-demo.jsonl")))
        .with_dump_file(FileSinkConfig::at(dir.join("mulog-demo.log")).with_verbosity(5));
    let logger = Logger::new(config)?;

    // Every level of the active style
    for child in logger.root().children() {
        let name = child.effective_level().name.clone();
        child.emit(format!("This is a {} message", name));
    }

    // Tags stack up; the parent handle is unchanged
    let server = logger.tag("server");
    server.info("Now listening on localhost:8000");
    server
        .tag("db")
        .at("warn")?
        .emit("Connection pool is 90% used")
        .emit("Connection pool is 95% used");

    // Structured values
    server.log(json!({
        "Objects": "like this one!",
        "Some stuff": 5,
        "nested": {"list": [1, 2, 3]},
    }));

    // Errors with their cause chain
    let error = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml");
    logger.tag("config").error(Arg::error(&error));

    // Timers
    let import = logger.tag("import").timer();
    std::thread::sleep(Duration::from_millis(120));
    import.success("Imported 1,204 rows");

    // Byte buffers
    logger.root().dump(b"Hello, \x00world!\n");

    // Values that settle later
    let lookup = PendingValue::resolving(async {
        std::thread::sleep(Duration::from_millis(250));
        "93.184.216.34"
    });
    logger
        .tag("dns")
        .emit_all(vec!["Resolving example.com:".into(), lookup.into()]);

    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    Ok(())
}
