//! Mermaid `stateDiagram-v2` rendering.

use crate::core::{Event, State, TransitionTable};

const HEADER: &str = "stateDiagram-v2";
const TERMINAL: &str = "[*]";

/// Render `table` as a Mermaid state diagram starting at `initial`.
///
/// Layout, one item per line:
/// - an optional front-matter title block
/// - the `stateDiagram-v2` header
/// - the entry edge `[*] --> initial`
/// - one `from --> to: event` edge per transition, in table order
/// - one `state --> [*]` edge per terminal state
///
/// The output depends only on the table and the initial state, so two
/// renderings of the same machine are byte-identical.
pub fn mermaid<S: State, E: Event, C>(
    table: &TransitionTable<S, E, C>,
    initial: &S,
    title: Option<&str>,
) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(table.len() + 6);

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        lines.push("---".to_string());
        lines.push(format!("title: {title}"));
        lines.push("---".to_string());
    }

    lines.push(HEADER.to_string());
    lines.push(format!("  {TERMINAL} --> {}", initial.name()));

    for t in table {
        lines.push(format!(
            "  {} --> {}: {}",
            t.from.name(),
            t.to.name(),
            t.event.name()
        ));
    }

    for state in table.terminal_states() {
        lines.push(format!("  {} --> {TERMINAL}", state.name()));
    }

    lines.join("\n")
}
