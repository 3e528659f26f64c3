//! # Property Names, Records, and Tables
//!
//! Standard names for the properties used across the package (shape, load,
//! material), the flat name/value record produced by evaluation, and the
//! batch evaluation table.
//!
//! The categorization lists serve two purposes: a property looked up on a
//! structural object is delegated to the owning sub-object by category, and
//! batch evaluation sorts its columns into the fixed canonical order
//! (shape, material, load, component stresses, resultant stresses).

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Component stress names in canonical order
pub const COMPONENT_STRESSES: [&str; 11] = [
    "Sa",        // Direct axial stress
    "Svx",       // Direct shear stress in x-dir
    "Svy",       // Direct shear stress in y-dir
    "Txy_lr",    // Torsional stress at lower-right corner
    "Txy_ll",    // Torsional stress at lower-left corner
    "Txy_ur",    // Torsional stress at upper-right corner
    "Txy_ul",    // Torsional stress at upper-left corner
    "Sbx_low",   // Bending stress about x-x axis, lower max fiber
    "Sbx_high",  // Bending stress about x-x axis, upper max fiber
    "Sby_left",  // Bending stress about y-y axis, left-most max fiber
    "Sby_right", // Bending stress about y-y axis, right-most max fiber
];

/// Resultant stress names in canonical order
pub const RESULTANT_STRESSES: [&str; 6] = [
    "von_mises",
    "max_tensile",
    "max_shear",
    "max_bending",
    "membrane_plus_bending_min",
    "membrane_plus_bending_max",
];

/// Shape property names (record export keys) in canonical column order
pub const SHAPE_PROPS: [&str; 35] = [
    "label", "A", "w", "h", "t", "d", "r", "b", "s", "bf", "tf", "tw", "tnom", "tdes", "x", "y",
    "B", "Ht", "width", "height", "Ix", "Iy", "Sx", "Sy", "Zx", "Zy", "rx", "ry", "J", "cx_left",
    "cx_right", "cy_low", "cy_high", "cx_max", "cy_max",
];

/// Material property names (record export keys) in canonical column order
pub const MATERIAL_PROPS: [&str; 4] = ["E", "Fy", "Fu", "rho"];

/// Load property names (record export keys) in canonical column order
pub const LOAD_PROPS: [&str; 8] = [
    "f_x", "f_y", "f_z", "m_x", "m_y", "m_z", "primary", "secondary",
];

/// Material property aliases accepted by `Material::get`, beyond the
/// canonical export keys
pub const MATERIAL_ALIASES: [&str; 7] = ["E", "Fy", "YS", "Fu", "Futs", "UTS", "rho"];

/// Remove subscript underscores from a property name, so `f_x` and `fx`
/// (or `F_y` and `Fy`) resolve to the same property.
pub fn standardized(prop: &str) -> String {
    prop.replace('_', "")
}

/// Category a property name belongs to, used for delegating lookups on a
/// composite structural object to the owning sub-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropCategory {
    Shape,
    Load,
    Material,
}

/// Resolve a property name to its owning category, comparing with
/// underscores stripped.
pub fn prop_category(prop: &str) -> Option<PropCategory> {
    let std = standardized(prop);
    if SHAPE_PROPS.iter().any(|p| standardized(p) == std) {
        return Some(PropCategory::Shape);
    }
    if LOAD_PROPS.iter().any(|p| standardized(p) == std) {
        return Some(PropCategory::Load);
    }
    if MATERIAL_ALIASES.iter().any(|p| standardized(p) == std) {
        return Some(PropCategory::Material);
    }
    None
}

// ============================================================================
// Values and records
// ============================================================================

/// A numeric or textual result value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Num(f64),
    Text(String),
}

impl PropValue {
    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Num(v) => Some(*v),
            PropValue::Text(_) => None,
        }
    }

    /// Formatted representation (numbers through `nformat`)
    pub fn formatted(&self) -> String {
        match self {
            PropValue::Num(v) => nformat(*v),
            PropValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Num(v)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// An ordered name/value record of evaluation results.
///
/// Insertion order is preserved and duplicate names keep the first-seen
/// entry, so the record can be built by concatenating property sources
/// (component stresses, then shape, load, and material properties) without
/// clobbering earlier values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    entries: Vec<(String, Option<PropValue>)>,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; a duplicate name is ignored (first-seen wins)
    pub fn push(&mut self, name: impl Into<String>, value: Option<PropValue>) {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| *n == name) {
            return;
        }
        self.entries.push((name, value));
    }

    /// Append a present numeric value
    pub fn push_num(&mut self, name: impl Into<String>, value: f64) {
        self.push(name, Some(PropValue::Num(value)));
    }

    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Whether the record has an entry under this name (present or null)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&PropValue>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }

    /// Render as a two-column name/value text table
    pub fn to_table_string(&self) -> String {
        let width = self
            .entries
            .iter()
            .map(|(n, _)| n.len())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for (name, value) in &self.entries {
            let text = value
                .as_ref()
                .map(|v| v.formatted())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("{name:<width$}   {text}\n"));
        }
        out
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Batch evaluation table
// ============================================================================

/// Batch evaluation result: one row per evaluated object.
///
/// Columns that are null for every row are dropped, then columns are sorted
/// into the fixed canonical ordering (`Name`, shape properties, material
/// properties, load properties, component stresses, resultant stresses);
/// unrecognized columns trail in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct EvalTable {
    pub columns: Vec<String>,
    pub rows: Vec<ResultRecord>,
}

impl EvalTable {
    /// Assemble a table from per-object records, preserving row order
    pub fn from_records(rows: Vec<ResultRecord>) -> Self {
        // Union of column names, first-seen order
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for (name, _) in row.iter() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }

        // Drop columns with no value in any row
        columns.retain(|c| rows.iter().any(|r| r.get(c).is_some()));

        Self {
            columns: sort_columns(columns),
            rows,
        }
    }

    /// Cell value at (row, column name)
    pub fn value(&self, row: usize, column: &str) -> Option<&PropValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Render as an aligned text table with a header row
    pub fn render(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| {
                        row.get(c)
                            .map(|v| v.formatted())
                            .unwrap_or_else(|| "-".to_string())
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(c.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        out.push_str(&header.join("   "));
        out.push('\n');
        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(v, &w)| format!("{v:<w$}"))
                .collect();
            out.push_str(line.join("   ").trim_end());
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for EvalTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Sort column names into the canonical ordering; unrecognized names keep
/// their original relative order at the end.
pub fn sort_columns(columns: Vec<String>) -> Vec<String> {
    let canonical: Vec<&str> = std::iter::once("Name")
        .chain(SHAPE_PROPS)
        .chain(MATERIAL_PROPS)
        .chain(LOAD_PROPS)
        .chain(COMPONENT_STRESSES)
        .chain(RESULTANT_STRESSES)
        .collect();

    let mut sorted: Vec<String> = Vec::with_capacity(columns.len());
    for name in &canonical {
        if columns.iter().any(|c| c == name) {
            sorted.push(name.to_string());
        }
    }
    for name in columns {
        if !sorted.contains(&name) {
            sorted.push(name);
        }
    }
    sorted
}

// ============================================================================
// Numeric helpers
// ============================================================================

/// Format a number with magnitude-dependent decimals and thousands
/// separators:
///
/// ```text
/// 3498234.20394   =>  3,498,234
/// 324.23235       =>  324
/// 49.494          =>  49.5
/// 4.494           =>  4.49
/// 0.549494        =>  0.549
/// ```
pub fn nformat(number: f64) -> String {
    if !number.is_finite() {
        return number.to_string();
    }
    if number == 0.0 {
        return "0".to_string();
    }
    let magnitude = number.abs();
    if magnitude < 0.001 {
        format!("{number:.6}")
    } else if magnitude < 1.0 {
        format!("{number:.3}")
    } else if magnitude < 10.0 {
        format!("{number:.2}")
    } else if magnitude < 100.0 {
        format!("{number:.1}")
    } else if magnitude < 1000.0 {
        format!("{number:.0}")
    } else {
        group_thousands(&format!("{number:.0}"))
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Round `number` to the nearest multiple of `multiple`
pub fn round_to(number: f64, multiple: f64) -> f64 {
    multiple * (number / multiple).round()
}

/// Return the value in `values` nearest to `number`, looking both
/// directions; first entry wins a tie.
pub fn nearest_to(number: f64, values: &[f64]) -> f64 {
    let mut best = values[0];
    for &v in values {
        if (v - number).abs() < (best - number).abs() {
            best = v;
        }
    }
    best
}
