pub mod csharp;
pub mod emitter;
pub mod json;
pub mod predict;
pub mod statement;
pub mod usings;

use crate::cli::GeneratorOptions;
use crate::codegen::statement::MappingPlan;
use crate::error::GenError;

/// Trait for mapping plan renderers.
pub trait Renderer {
    /// File extension of one rendered plan, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, plan: &MappingPlan, options: &GeneratorOptions) -> Result<String, GenError>;
}

/// Strip one level of wrapping parentheses from a SQL default expression.
/// e.g. "(getdate())" -> "getdate()"
/// e.g. "((0))" -> "(0)"
/// e.g. "(1) + (2)" is left alone: the outer pair does not enclose the whole expression.
pub fn strip_outer_parens(expr: &str) -> &str {
    let s = expr.trim();
    if !(s.starts_with('(') && s.ends_with(')')) {
        return s;
    }

    let bytes = s.as_bytes();
    let mut depth = 0u32;
    let mut in_quotes = false;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\'' => in_quotes = !in_quotes,
            b'(' if !in_quotes => depth += 1,
            b')' if !in_quotes => {
                depth = depth.saturating_sub(1);
                // The opening paren closed before the end: not a wrapping pair.
                if depth == 0 && i + 1 < bytes.len() {
                    return s;
                }
            }
            _ => {}
        }
    }

    s[1..s.len() - 1].trim()
}

/// Render a string as a C# regular string literal, quotes included.
pub fn to_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a key selector body: `e.Id` or `new { e.A, e.B }`.
pub fn member_selector(param: &str, members: &[String]) -> String {
    match members {
        [single] => format!("{param}.{single}"),
        _ => {
            let parts: Vec<String> = members.iter().map(|m| format!("{param}.{m}")).collect();
            format!("new {{ {} }}", parts.join(", "))
        }
    }
}
