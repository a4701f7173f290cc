use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Result, SearchOutcome, StateGraph, StateId};

/// Renders an explored state graph as a Graphviz DOT file
pub struct GraphVisualizer;

impl GraphVisualizer {
    /// Create a new graph visualizer
    pub fn new() -> Self {
        Self
    }

    /// Write the whole graph, highlighting the path to `goal` if there is one
    pub fn write_dot<W: Write>(
        &self,
        graph: &StateGraph,
        goal: Option<StateId>,
        out: &mut W,
    ) -> Result<()> {
        let path = goal.map(|id| graph.path_to(id)).unwrap_or_default();

        writeln!(out, "digraph StateSpace {{")?;
        writeln!(out, "    rankdir=LR;")?;
        writeln!(
            out,
            "    node [shape=box, style=filled, fillcolor=lightblue];"
        )?;
        writeln!(out, "    edge [fontsize=10];")?;

        for node in graph.iter() {
            let fill = if node.id() == graph.root() {
                ", fillcolor=lightgreen"
            } else if Some(node.id()) == goal {
                ", fillcolor=lightpink"
            } else {
                ""
            };
            writeln!(
                out,
                "    s{} [label=\"{}\\n{}\"{}];",
                node.id(),
                escape(&node.label()),
                escape(&node.state().to_string()),
                fill
            )?;
        }

        for node in graph.iter() {
            let (Some(from), Some(step)) = (node.predecessor(), node.step()) else {
                continue;
            };
            let on_path = path.windows(2).any(|w| w[0] == from && w[1] == node.id());
            let style = if on_path {
                ", color=red, penwidth=2.0"
            } else {
                ""
            };
            writeln!(
                out,
                "    s{} -> s{} [label=\"{}\"{}];",
                from,
                node.id(),
                escape(&step.label),
                style
            )?;
        }

        writeln!(out, "}}")?;
        Ok(())
    }

    /// Save the graph of a finished search to `filename`
    pub fn save_dot(&self, outcome: &SearchOutcome, filename: impl AsRef<Path>) -> Result<()> {
        let mut file = BufWriter::new(File::create(filename)?);
        self.write_dot(outcome.graph(), outcome.goal_id(), &mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl Default for GraphVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
