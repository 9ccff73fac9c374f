use serde::Deserialize;

use crate::block::Block;
use crate::line::{continues_table, is_separator_row, split_cells};

/// How the second line of a table run is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorPolicy {
    /// Always drop the second line, whatever it contains. A header plus a
    /// single data row with no separator therefore loses that row.
    #[default]
    Positional,
    /// Drop the second line only when it looks like `|---|---|`.
    Detect,
}

/// Consume a table run from the front of `lines`.
///
/// The first line is taken as the header row unconditionally; following
/// lines are taken while they contain a `|`. Returns the table and the number
/// of lines consumed, or `None` when the run is shorter than two lines.
pub fn accumulate(lines: &[&str], policy: SeparatorPolicy) -> Option<(Block, usize)> {
    let (first, rest) = lines.split_first()?;
    let len = 1 + rest.iter().take_while(|line| continues_table(line)).count();
    if len < 2 {
        return None;
    }

    let run = &lines[..len];
    let headers = split_cells(first).into_iter().map(str::to_owned).collect();

    let skip = match policy {
        SeparatorPolicy::Positional => 2,
        SeparatorPolicy::Detect if is_separator_row(run[1]) => 2,
        SeparatorPolicy::Detect => 1,
    };

    let rows = run[skip..]
        .iter()
        .map(|line| split_cells(line))
        .filter(|cells| !cells.is_empty())
        .map(|cells| cells.into_iter().map(str::to_owned).collect())
        .collect();

    Some((Block::Table { headers, rows }, len))
}
