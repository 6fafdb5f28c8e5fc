use std::path::PathBuf;

use clap::Parser;

use crate::codegen::emitter::StatementOrdering;
use crate::error::GenError;
use crate::naming::{NamingConfig, RelationshipNaming};

/// Generate Entity Framework Core mapping classes from an extracted schema model.
#[derive(Parser, Debug)]
#[command(name = "efgen", version, about)]
pub struct Cli {
    /// Path to the schema model JSON document
    pub schema: PathBuf,

    /// Output generator to use (mapping, statements)
    #[arg(long, default_value = "mapping")]
    pub generator: String,

    /// Entity type suffix stripped from navigation and foreign key names
    #[arg(long, env = "EFGEN_SUFFIX", default_value = "")]
    pub suffix: String,

    /// Relationship naming mode (suffix, plural)
    #[arg(long, env = "EFGEN_RELATIONSHIP_NAMING", default_value = "plural")]
    pub relationship_naming: String,

    /// Statement group ordering (properties-first, indexes-first)
    #[arg(long, default_value = "properties-first")]
    pub ordering: String,

    /// Generator options (comma-delimited): document, noconstants, singlefile
    #[arg(long)]
    pub options: Option<String>,

    /// Entities to process by class name (comma-delimited)
    #[arg(long)]
    pub entities: Option<String>,

    /// Output directory, one file per entity (default: stdout)
    #[arg(long)]
    pub outdir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct GeneratorOptions {
    pub document: bool,
    pub include_constants: bool,
    pub single_file: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            document: false,
            include_constants: true,
            single_file: false,
        }
    }
}

impl Cli {
    /// Parse the comma-delimited --entities flag into a Vec of class names.
    pub fn entity_list(&self) -> Vec<String> {
        self.entities
            .as_deref()
            .map(|s| s.split(',').map(|t| t.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Parse the comma-delimited --options flag into structured options.
    pub fn generator_options(&self) -> GeneratorOptions {
        let mut opts = GeneratorOptions::default();
        if let Some(ref options_str) = self.options {
            for opt in options_str.split(',').map(|s| s.trim()) {
                match opt {
                    "document" => opts.document = true,
                    "noconstants" => opts.include_constants = false,
                    "singlefile" => opts.single_file = true,
                    "" => {}
                    _ => tracing::warn!("Unknown generator option: {}", opt),
                }
            }
        }
        opts
    }

    /// Build and validate the naming configuration.
    pub fn naming_config(&self) -> Result<NamingConfig, GenError> {
        let config = NamingConfig {
            suffix: self.suffix.clone(),
            relationship_naming: self.relationship_naming.parse::<RelationshipNaming>()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn statement_ordering(&self) -> Result<StatementOrdering, GenError> {
        self.ordering.parse()
    }
}
