use std::collections::BTreeSet;

/// Collects and renders C# `using` directives.
///
/// `System` namespaces are rendered after the rest; each group is sorted for
/// deterministic output.
#[derive(Debug, Default)]
pub struct UsingCollector {
    namespaces: BTreeSet<String>,
}

impl UsingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `using {namespace};`. Empty namespaces are ignored.
    pub fn add(&mut self, namespace: &str) {
        if !namespace.is_empty() {
            self.namespaces.insert(namespace.to_string());
        }
    }

    /// Render all directives, one per line.
    ///
    /// Output order:
    /// 1. `Microsoft.*` and project namespaces
    /// 2. `System` and `System.*`
    pub fn render(&self) -> String {
        let (system, other): (Vec<&String>, Vec<&String>) = self
            .namespaces
            .iter()
            .partition(|ns| ns.as_str() == "System" || ns.starts_with("System."));

        other
            .into_iter()
            .chain(system)
            .map(|ns| format!("using {ns};"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
