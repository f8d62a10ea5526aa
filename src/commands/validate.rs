use super::Host;
use super::common::CommonArgs;
use crate::Result;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Loads the configuration, applies overrides, and checks it is complete enough to run
/// a collection cycle.
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match args.common.resolve_config().and_then(|config| config.validate()) {
        Ok(()) => {
            let _ = writeln!(host.output(), "Configuration is valid");
            if let Some(path) = &args.common.config {
                let _ = writeln!(host.output(), "Config file: {path}");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
