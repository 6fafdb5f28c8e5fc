use crate::cli::GeneratorOptions;
use crate::codegen::statement::MappingPlan;
use crate::codegen::Renderer;
use crate::error::GenError;

/// Renders the abstract statement sequence itself, for snapshots and tooling.
pub struct StatementRenderer;

impl Renderer for StatementRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, plan: &MappingPlan, _options: &GeneratorOptions) -> Result<String, GenError> {
        let mut output = serde_json::to_string_pretty(plan)?;
        output.push('\n');
        Ok(output)
    }
}
