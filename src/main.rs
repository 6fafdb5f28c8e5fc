mod cli;
mod codegen;
mod error;
mod loader;
mod naming;
mod schema;
#[cfg(test)]
mod testutil;
mod typemap;

use std::collections::BTreeSet;
use std::fs;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::codegen::csharp::MappingRenderer;
use crate::codegen::emitter::MappingEmitter;
use crate::codegen::json::StatementRenderer;
use crate::codegen::Renderer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Configuration errors surface before any entity is touched.
    let naming = cli.naming_config()?;
    let policy = naming.policy()?;
    let ordering = cli.statement_ordering()?;
    let options = cli.generator_options();

    let renderer: Box<dyn Renderer> = match cli.generator.as_str() {
        "mapping" => Box::new(MappingRenderer),
        "statements" => Box::new(StatementRenderer),
        other => {
            return Err(error::GenError::UnknownGenerator(other.to_string()).into());
        }
    };

    let schema = loader::load_schema(&cli.schema)?;
    let entities = loader::select_entities(&schema, &cli.entity_list());
    tracing::debug!(
        "Generating {} mappings ({} naming, {})",
        entities.len(),
        naming.relationship_naming,
        ordering
    );

    let emitter = MappingEmitter::new(&schema, policy.as_ref())
        .with_ordering(ordering)
        .with_constants(options.include_constants);

    // One output per mapping class, in schema order.
    let mut seen = BTreeSet::new();
    let mut outputs: Vec<(String, String)> = Vec::new();
    for entity in entities {
        let plan = emitter.emit(entity)?;
        if !seen.insert(plan.mapping_class.clone()) {
            return Err(error::GenError::invalid(
                &entity.entity_class,
                format!("mapping class {} is generated twice", plan.mapping_class),
            )
            .into());
        }
        let source = renderer.render(&plan, &options)?;
        tracing::debug!("Rendered {}", plan.mapping_class);
        outputs.push((plan.mapping_class, source));
    }

    match cli.outdir {
        Some(ref dir) => {
            fs::create_dir_all(dir)?;
            for (class, source) in &outputs {
                let path = dir.join(format!("{class}.{}", renderer.extension()));
                fs::write(&path, source)?;
                tracing::info!("Output written to {}", path.display());
            }
        }
        None => {
            let joined: Vec<&str> = outputs.iter().map(|(_, source)| source.as_str()).collect();
            print!("{}", joined.join("\n"));
        }
    }

    Ok(())
}
