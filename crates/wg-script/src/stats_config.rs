//! Stat config reader: one `name = value` or `name: value` per line.

use std::collections::BTreeMap;

use crate::error::{ScriptError, ScriptErrorKind, ScriptResult};

/// Parse a stat config into case-folded stat defaults.
///
/// Only the first whitespace-separated token of a value is read, so trailing
/// notes are ignored.
pub fn parse_stats_config(source: &str) -> ScriptResult<BTreeMap<String, i64>> {
    let mut stats = BTreeMap::new();
    let mut offset = 0;
    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let text = raw.trim_end_matches(['\r', '\n']);
        let span = offset..offset + text.len();
        offset += raw.len();
        let error = |kind: ScriptErrorKind| ScriptError::new(idx + 1, span.clone(), kind);

        let line = text.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let sep = line
            .find(['=', ':'])
            .ok_or_else(|| error(ScriptErrorKind::MissingSeparator))?;
        let name = line[..sep].trim();
        if name.is_empty() {
            return Err(error(ScriptErrorKind::EmptyStatName));
        }
        let value = line[sep + 1..].split_whitespace().next().unwrap_or_default();
        let value: i64 = value.parse().map_err(|_| {
            error(ScriptErrorKind::InvalidStatValue {
                name: name.to_string(),
                value: value.to_string(),
            })
        })?;

        let key = name.to_lowercase();
        if stats.contains_key(&key) {
            return Err(error(ScriptErrorKind::DuplicateStat(name.to_string())));
        }
        stats.insert(key, value);
    }
    log::debug!("loaded {} stat defaults", stats.len());
    Ok(stats)
}
