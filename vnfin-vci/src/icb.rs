//! Flat ICB code list to one row per leaf industry.
//!
//! VCI lists every ICB node once as `{icbCode, icbName, level}`. Codes are
//! four digits and a level-`n` node shares its first `n - 1` digits with its
//! parent: `8355` sits under `8350`, `8300` and `8000`. Level-1 codes do not
//! always end in zeros (Oil & Gas is `0001`, parent of `0500`), so parents are
//! looked up among the nodes rather than built from the child's code.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};
use vnfin_core::transport::int_at;
use vnfin_core::{AdapterFault, RawRow, RawRows};

const MAX_LEVEL: usize = 4;

struct Node {
    name: Value,
    level: usize,
}

/// The listed level-`level` node sharing the first `level` digits of `code`.
fn ancestor<'a>(
    nodes: &'a BTreeMap<String, Node>,
    code: &str,
    level: usize,
) -> Option<(&'a String, &'a Node)> {
    let prefix: String = code.chars().take(level).collect();
    nodes
        .iter()
        .find(|(c, n)| n.level == level && c.starts_with(&prefix))
}

fn read_node(obj: &Map<String, Value>, what: &str) -> Result<(String, Node), AdapterFault> {
    let code = match obj.get("icbCode") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(AdapterFault::malformed(format!("{what}: node without `icbCode`"))),
    };
    let level = int_at(obj, "level")
        .and_then(|l| usize::try_from(l).ok())
        .filter(|l| (1..=MAX_LEVEL).contains(l))
        .ok_or_else(|| {
            AdapterFault::malformed(format!("{what}: node {code} has no valid `level`"))
        })?;
    let name = obj.get("icbName").cloned().unwrap_or(Value::Null);
    Ok((code, Node { name, level }))
}

/// Build leaf paths from the flat node list.
///
/// Level-1 nodes without children are skipped: every taxonomy row carries at
/// least two levels. Ancestors missing from the list are left out of the row.
pub(crate) fn leaf_paths(items: &[Value], what: &str) -> Result<RawRows, AdapterFault> {
    let mut nodes = BTreeMap::new();
    for item in items {
        let obj = item
            .as_object()
            .ok_or_else(|| AdapterFault::malformed(format!("{what}: node is not an object")))?;
        let (code, node) = read_node(obj, what)?;
        nodes.insert(code, node);
    }

    let parents: HashSet<&String> = nodes
        .iter()
        .filter(|(_, n)| n.level > 1)
        .filter_map(|(code, n)| ancestor(&nodes, code, n.level - 1).map(|(p, _)| p))
        .collect();

    let rows = nodes
        .iter()
        .filter(|(code, n)| n.level > 1 && !parents.contains(code))
        .map(|(code, leaf)| {
            let mut row = RawRow::new();
            for level in 1..leaf.level {
                let Some((code_at, node)) = ancestor(&nodes, code, level) else {
                    continue;
                };
                row.insert(format!("icb_code{level}"), Value::String(code_at.clone()));
                row.insert(format!("icb_name{level}"), node.name.clone());
            }
            row.insert(format!("icb_code{}", leaf.level), Value::String(code.clone()));
            row.insert(format!("icb_name{}", leaf.level), leaf.name.clone());
            row
        })
        .collect::<Vec<_>>();

    if rows.is_empty() {
        return Err(AdapterFault::empty(format!("{what}: no industries below level 1")));
    }
    Ok(RawRows::new(rows))
}
