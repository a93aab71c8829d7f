//! `kuchler config` -- show, get and set configuration values.

use anyhow::{Context, Result};

use kuchler_config::config::{load_file_config, save_config};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `kuchler config` command.
///
/// `show` and `get` report effective values (file plus environment). `set`
/// rewrites `config.yaml` from the file alone.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    let (data_dir, mut cfg) = ctx.config()?;

    match &args.command {
        ConfigCommands::Show => {
            let entries = cfg.entries();
            if ctx.json {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
                    .collect();
                output_json(&map);
            } else {
                for (key, value) in &entries {
                    println!("{} = {}", key, value);
                }
            }
        }

        ConfigCommands::Get(a) => {
            let value = cfg.get(&a.key)?;
            if ctx.json {
                output_json(&serde_json::json!({ "key": a.key, "value": value }));
            } else {
                println!("{}", value);
            }
        }

        ConfigCommands::Set(a) => {
            cfg = load_file_config(&data_dir)?;
            cfg.set(&a.key, &a.value)?;
            save_config(&data_dir, &cfg)
                .with_context(|| format!("failed to save configuration in {}", data_dir.display()))?;
            if ctx.json {
                output_json(&serde_json::json!({ "key": a.key, "value": cfg.get(&a.key)? }));
            } else if !ctx.quiet {
                println!("Set {} = {}", a.key, a.value);
            }
        }
    }

    Ok(())
}
