//! Player-facing text for puzzle answers.

use std::fmt::Write as _;

use emplaka_kernel::operators::operator_catalog::Operation;
use emplaka_search::node::NodeId;
use emplaka_search::registry::NodeRegistry;
use emplaka_search::solution::Solution;

use crate::plate::Plate;

/// Separator between operation labels on one line.
pub const CHAIN_SEPARATOR: &str = ",   ";

/// Operation labels joined with [`CHAIN_SEPARATOR`]. Empty chain, empty string.
#[must_use]
pub fn format_chain(chain: &[Operation]) -> String {
    chain
        .iter()
        .map(|op| op.label())
        .collect::<Vec<_>>()
        .join(CHAIN_SEPARATOR)
}

/// `Solutions for a ___ b = c ___ d:`
#[must_use]
pub fn render_header(plate: &Plate) -> String {
    let [a, b, c, d] = plate.digits;
    format!("Solutions for {a} ___ {b} = {c} ___ {d}:")
}

/// Numbered answer blocks. Non-answer (pair) solutions are skipped.
#[must_use]
pub fn render_answers(solutions: &[Solution]) -> String {
    let mut out = String::new();
    for (n, (solution, value)) in solutions
        .iter()
        .filter_map(|s| s.value().map(|v| (s, v)))
        .enumerate()
    {
        let _ = writeln!(out, "Solution #{}: {value}.", n + 1);
        let _ = writeln!(
            out,
            "\tReached from the left through:  {}",
            format_chain(&solution.left_chain)
        );
        let _ = writeln!(
            out,
            "\tReached from the right through: {}",
            format_chain(&solution.right_chain)
        );
        out.push('\n');
    }
    out
}

/// Every node `id` links to, with the chain that reaches it, in id order.
///
/// The node's own entry comes out with an empty chain.
#[must_use]
pub fn render_paths(registry: &NodeRegistry, id: NodeId) -> String {
    let node = registry.node(id);
    let mut out = format!("From {}, one can reach:\n", node.payload);
    for (&target, chain) in &node.links {
        let _ = writeln!(out, "\tNode: {},", registry.node(target).payload);
        let _ = writeln!(out, "\t\tthrough the operations: {}", format_chain(chain));
        out.push('\n');
    }
    out
}
