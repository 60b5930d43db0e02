//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, RankFuseArgs};
use crate::error::Result;
use crate::fusion::result::{ExplainedHit, FusedResultSet};

/// Longest text preview shown in human output.
const PREVIEW_CHARS: usize = 60;

/// Print a fused ranking.
///
/// JSON output uses the parallel `nodes`/`similarities`/`ids` layout.
pub fn output_fused(fused: FusedResultSet, args: &RankFuseArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", render_fused_human(&fused, args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => output_json(&fused.into_query_result(), args),
    }
}

/// Print fused hits together with their score terms.
pub fn output_explained(explained: &[ExplainedHit], args: &RankFuseArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", render_explained_human(explained));
            Ok(())
        }
        OutputFormat::Json => output_json(&explained, args),
    }
}

fn output_json<T: Serialize>(value: &T, args: &RankFuseArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Render a fused ranking as a table.
pub fn render_fused_human(fused: &FusedResultSet, verbosity: u8) -> String {
    let mut out = String::new();
    if verbosity > 0 {
        out.push_str(&format!("Fused Results ({}):\n", fused.len()));
        out.push_str("═══════════════\n");
    }
    if fused.is_empty() {
        out.push_str("No results.\n");
        return out;
    }

    out.push_str(&format!("{:<5} {:<12} {:<20} {}\n", "Rank", "Score", "Id", "Text"));
    for (rank, hit) in fused.iter().enumerate() {
        out.push_str(&format!(
            "{:<5} {:<12.6} {:<20} {}\n",
            rank + 1,
            hit.score,
            hit.document.id,
            preview(&hit.document.node.text)
        ));
    }
    out
}

/// Render explained hits, one block per document.
pub fn render_explained_human(explained: &[ExplainedHit]) -> String {
    if explained.is_empty() {
        return "No results.\n".to_string();
    }

    let mut out = String::new();
    for (rank, entry) in explained.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (score {:.6})\n",
            rank + 1,
            entry.hit.document.id,
            entry.hit.score
        ));
        for contribution in &entry.contributions {
            out.push_str(&format!(
                "   set {} position {} -> {:.6}\n",
                contribution.set_index, contribution.position, contribution.value
            ));
        }
    }
    out
}

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}
