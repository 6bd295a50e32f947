//! `add_index` statements.

use std::sync::Arc;

use crate::core::{ColumnTypeExtension, Index};

use super::literal::{quote_list, quote_str};

/// Render one `add_index` line per index, in the given order, followed by an
/// empty line when there is at least one index.
pub fn render_indexes(indexes: &[Index], extensions: &[Arc<dyn ColumnTypeExtension>]) -> Vec<String> {
    let mut lines: Vec<String> = indexes
        .iter()
        .map(|index| {
            let mut line = format!(
                "  add_index {}, {}, :name => {}",
                quote_str(&index.table),
                quote_list(&index.columns),
                quote_str(&index.name)
            );
            if index.is_unique {
                line.push_str(", :unique => true");
            }
            if index.is_spatial {
                line.push_str(", :spatial => true");
            }
            for qualifier in extensions.iter().flat_map(|ext| ext.index_qualifiers(index)) {
                line.push_str(", ");
                line.push_str(&qualifier);
            }
            line
        })
        .collect();

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
