// Copyright (c) Contributors to the EnvWrap project.
// SPDX-License-Identifier: Apache-2.0

//! Helpers for working with search path values such as `$PATH`.

#[cfg(test)]
#[path = "./search_path_test.rs"]
mod search_path_test;

/// Separator between search path entries on this platform.
#[cfg(windows)]
pub const SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const SEPARATOR: char = ':';

/// Split a search path into entries. An empty value has no entries.
pub fn split(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(SEPARATOR).map(String::from).collect()
}

/// Join entries into a search path value.
pub fn join<S: AsRef<str>>(entries: &[S]) -> String {
    let mut value = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            value.push(SEPARATOR);
        }
        value.push_str(entry.as_ref());
    }
    value
}

/// Remove previously injected entries from `value`.
///
/// The last occurrence of each injected entry is removed, since injections
/// are appended after the base segment.
pub fn strip_injected(value: &str, injected: &[String]) -> String {
    let mut entries = split(value);
    for entry in injected {
        if let Some(index) = entries.iter().rposition(|e| e == entry) {
            entries.remove(index);
        }
    }
    join(&entries)
}

/// Layer `paths` on top of `base`.
///
/// Returns the combined value and the entries that were actually added.
/// Entries already present in the base segment are skipped.
pub fn layer(base: &str, paths: &[String]) -> (String, Vec<String>) {
    let mut entries = split(base);
    let mut injected = Vec::new();
    for path in paths {
        if entries.iter().any(|e| e == path) {
            continue;
        }
        entries.push(path.clone());
        injected.push(path.clone());
    }
    (join(&entries), injected)
}
