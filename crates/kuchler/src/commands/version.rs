//! `kuchler version` -- print version and platform.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute the `kuchler version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;

    if ctx.json {
        output_json(&serde_json::json!({
            "version": VERSION,
            "os": os,
            "arch": arch,
        }));
    } else {
        println!("kuchler version {} {}/{}", VERSION, os, arch);
    }

    Ok(())
}
