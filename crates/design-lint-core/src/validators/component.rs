//! Component discovery and per-component raw-value checks.

use tracing::{debug, info};

use super::{AuditContext, AuditScope, Validator};
use crate::error::AuditError;
use crate::model::{ComponentNode, Page};
use crate::progress::ProgressSink;
use crate::scan::{scan_component, ComponentScan};
use crate::types::{AuditCheck, CheckStatus};

/// A component root and the page it was found on.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveredComponent<'a> {
    /// Component or component-set node.
    pub node: &'a ComponentNode,
    /// Owning page name.
    pub page_name: &'a str,
}

/// Finds every component and component set across `pages`.
///
/// Descent stops at a component root, so variants inside a set are scanned
/// as part of the set. Reports each page through
/// [`ProgressSink::on_progress`] and yields every `yield_every` nodes.
pub fn discover_components<'a>(
    pages: &'a [Page],
    yield_every: usize,
    progress: &mut dyn ProgressSink,
) -> Vec<DiscoveredComponent<'a>> {
    let mut found = Vec::new();
    let mut visited = 0usize;

    for (index, page) in pages.iter().enumerate() {
        progress.on_progress(&format!(
            "Scanning page {}/{}: {}",
            index + 1,
            pages.len(),
            page.name
        ));

        let mut stack: Vec<&ComponentNode> = page.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            visited += 1;
            if yield_every > 0 && visited % yield_every == 0 {
                progress.on_yield();
            }
            if node.is_component() {
                found.push(DiscoveredComponent {
                    node,
                    page_name: &page.name,
                });
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
    }

    debug!(components = found.len(), nodes = visited, "Discovered components");
    found
}

/// Renders a component scan as a check.
#[must_use]
pub fn component_check(scan: &ComponentScan, page_name: &str) -> AuditCheck {
    let check = format!("Component: {}", scan.component_name);
    if scan.is_fully_bound() {
        return AuditCheck::pass(
            check,
            format!("All {} node(s) use variables for visual properties", scan.nodes_scanned),
        )
        .on_page(page_name);
    }

    let counts = scan.counts();
    let tally: Vec<String> = counts
        .iter()
        .map(|(category, count)| format!("{category} {count}"))
        .collect();
    let hints: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(category, _)| category.remediation())
        .collect();

    AuditCheck::fail(
        check,
        format!(
            "{} hard-coded value(s) ({}). To fix: {}",
            scan.raw_values.len(),
            tally.join(", "),
            hints.join("; ")
        ),
    )
    .on_page(page_name)
}

/// Scans every component for hard-coded visual values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentBindings;

impl ComponentBindings {
    /// Validator name.
    pub const NAME: &'static str = "component-bindings";
}

impl Validator for ComponentBindings {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        "DL004"
    }

    fn description(&self) -> &'static str {
        "Components bind fills, strokes, radius, spacing, typography and effects to variables"
    }

    fn scope(&self) -> AuditScope {
        AuditScope::Component
    }

    fn failure_status(&self) -> CheckStatus {
        CheckStatus::Warning
    }

    fn validate(
        &self,
        ctx: &AuditContext<'_>,
        progress: &mut dyn ProgressSink,
    ) -> Result<Vec<AuditCheck>, AuditError> {
        let settings = &ctx.config.audit;
        let components =
            discover_components(&ctx.data.pages, settings.yield_every_nodes, progress);
        info!("Found {} component(s)", components.len());

        let mut checks = Vec::with_capacity(components.len());
        for (index, component) in components.iter().enumerate() {
            let scan = scan_component(component.node)?;
            checks.push(component_check(&scan, component.page_name));
            progress.on_yield();

            let done = index + 1;
            if settings.progress_every_components > 0
                && (done % settings.progress_every_components == 0 || done == components.len())
            {
                progress.on_progress(&format!("Validated {done}/{} components", components.len()));
            }
        }
        Ok(checks)
    }
}
