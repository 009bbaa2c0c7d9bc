// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Artifact emission: the transition graph and the gap histogram.
//!
//! Reporting side effects only; nothing here affects the verification
//! outcome. The graph is Graphviz DOT, one node per reachable state (labeled
//! with the state's canonical form), one edge per distinct `(from, to)`
//! transition, labeled with the causing allocation and colored by policy
//! branch. Output is sorted so identical runs produce identical artifacts.

use std::io::{self, Write};

use crate::engine::Reachable;
use crate::layout::{Alloc, TransitionKind};
use crate::ring::LayoutState;
use crate::verify::GapHistogram;

fn edge_color(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::GapReuse => "forestgreen",
        TransitionKind::AlignedTail => "black",
        TransitionKind::MisalignedTail => "firebrick",
    }
}

/// Write the explored universe as a DOT digraph.
pub fn write_dot(
    out: &mut dyn Write,
    reachable: &Reachable<LayoutState, Alloc>,
) -> io::Result<()> {
    let mut lines: Vec<String> = reachable
        .edges
        .iter()
        .map(|e| {
            format!(
                "  \"{}\" -> \"{}\" [label=\"alloc({})\", color=\"{}\"];",
                e.from,
                e.to,
                e.label.size,
                edge_color(e.label.kind)
            )
        })
        .collect();
    lines.sort();

    writeln!(out, "digraph {{")?;
    for line in &lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "}}")
}

/// Write the histogram of reachable states by total gap size.
pub fn write_histogram(out: &mut dyn Write, histogram: &GapHistogram) -> io::Result<()> {
    writeln!(out, "total-gaps  states")?;
    for (total, count) in histogram.buckets() {
        writeln!(out, "{:>10}  {}", total, count)?;
    }
    Ok(())
}
