use crate::context;
use crate::error::EngineError;
use crate::opt::{PontoonOpt, Subcommand};
use crate::EngineResult;

pub enum CliCommand {
    ValidateSchema,
}

impl CliCommand {
    /// Create a CLI command from a `PontoonOpt` instance.
    pub fn from_opt(opts: &PontoonOpt) -> Option<CliCommand> {
        match opts.subcommand.as_ref()? {
            Subcommand::ValidateSchema => Some(CliCommand::ValidateSchema),
        }
    }

    pub async fn execute(self, opts: &PontoonOpt) -> EngineResult<()> {
        match self {
            CliCommand::ValidateSchema => {
                if opts.schema.is_none() {
                    return Err(EngineError::Configuration(
                        "--schema is required for validate-schema".to_string(),
                    ));
                }

                let registry = context::load_schema(opts)?;
                let serialized = serde_json::to_string_pretty(&registry)?;

                println!("{serialized}");

                Ok(())
            }
        }
    }
}
