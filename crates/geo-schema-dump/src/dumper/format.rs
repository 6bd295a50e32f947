//! Column alignment.
//!
//! Every column line of a table shares the same field widths, so attributes
//! line up vertically:
//!
//! ```text
//!     t.string "name", :limit => 80, :null => false
//!     t.point  "geom",               :null => false, :srid => 4326
//! ```

use super::spec::{AttributeKey, ColumnSpec};

/// Render column specs as aligned `t.<type> ...` lines.
///
/// Only keys used by at least one spec get a field. Field order comes from
/// [`AttributeKey::ALIGNED`], never from the order attributes were set in.
pub fn format_columns(specs: &[ColumnSpec]) -> Vec<String> {
    let keys: Vec<AttributeKey> = AttributeKey::ALIGNED
        .into_iter()
        .filter(|key| specs.iter().any(|spec| spec.contains(*key)))
        .collect();

    // value + ", "
    let widths: Vec<usize> = keys
        .iter()
        .map(|key| {
            specs
                .iter()
                .map(|spec| spec.get(*key).map_or(0, |v| v.chars().count() + 2))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let type_width = specs
        .iter()
        .map(|spec| spec.column_type().chars().count())
        .max()
        .unwrap_or(0);

    specs
        .iter()
        .map(|spec| {
            let mut line = format!("    t.{:<width$} ", spec.column_type(), width = type_width);
            for (key, width) in keys.iter().zip(&widths) {
                match spec.get(*key) {
                    Some(value) => {
                        let field = format!("{}, ", value);
                        line.push_str(&format!("{:<width$}", field, width = *width));
                    }
                    None => line.push_str(&" ".repeat(*width)),
                }
            }
            strip_trailing_separator(line)
        })
        .collect()
}

/// Drop a final `,` and any whitespace after it.
fn strip_trailing_separator(line: String) -> String {
    match line.trim_end().strip_suffix(',') {
        Some(stripped) => stripped.to_string(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnType;

    fn spec(name: &str, column_type: ColumnType, attrs: &[(AttributeKey, &str)]) -> ColumnSpec {
        let mut spec = ColumnSpec::new(name, column_type);
        for (key, value) in attrs {
            spec.set(*key, value);
        }
        spec
    }

    #[test]
    fn test_aligns_fields_across_columns() {
        let specs = vec![
            spec(
                "name",
                ColumnType::String,
                &[(AttributeKey::Limit, "255"), (AttributeKey::Null, "false")],
            ),
            spec("geom", ColumnType::Point, &[]),
        ];
        assert_eq!(
            format_columns(&specs),
            vec![
                "    t.string \"name\", :limit => 255, :null => false".to_string(),
                "    t.point  \"geom\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_fields_are_padded() {
        let specs = vec![
            spec("a", ColumnType::Integer, &[(AttributeKey::Null, "false")]),
            spec("path", ColumnType::LineString, &[(AttributeKey::Srid, "4326")]),
        ];
        let lines = format_columns(&specs);
        assert_eq!(
            lines[0],
            "    t.integer     \"a\",    :null => false"
        );
        assert_eq!(
            lines[1],
            "    t.line_string \"path\",                 :srid => 4326"
        );
    }

    #[test]
    fn test_key_insertion_order_does_not_matter() {
        let forward = vec![spec(
            "geom",
            ColumnType::Polygon,
            &[
                (AttributeKey::Null, "false"),
                (AttributeKey::Srid, "4326"),
                (AttributeKey::WithZ, "true"),
            ],
        )];
        let reversed = vec![spec(
            "geom",
            ColumnType::Polygon,
            &[
                (AttributeKey::WithZ, "true"),
                (AttributeKey::Srid, "4326"),
                (AttributeKey::Null, "false"),
            ],
        )];
        assert_eq!(format_columns(&forward), format_columns(&reversed));
        assert_eq!(
            format_columns(&forward)[0],
            "    t.polygon \"geom\", :null => false, :srid => 4326, :with_z => true"
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let specs = vec![
            spec("lat", ColumnType::Decimal, &[(AttributeKey::Precision, "9"), (AttributeKey::Scale, "6")]),
            spec("label", ColumnType::Text, &[(AttributeKey::Default, "\"n/a\"")]),
        ];
        assert_eq!(format_columns(&specs), format_columns(&specs));
    }

    #[test]
    fn test_no_columns_no_lines() {
        assert!(format_columns(&[]).is_empty());
    }
}
