// 🏷️ Display Helpers - label truncation and dollar formatting
// Truncation is display-only. Aggregation always groups on the full key;
// two keys that shorten to the same label get disambiguating markers so
// chart axes never merge distinct organizations.

use std::collections::HashMap;

/// Shorten a label to at most `max_len` characters, marking the cut with a
/// trailing ellipsis. Safe on multi-byte text.
pub fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        return label.to_string();
    }

    let kept: String = label.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Display labels for a list of distinct full keys.
///
/// Each key is truncated to `max_len`; when two distinct keys collide after
/// truncation, the second and later occurrences get an incrementing count:
/// "Long Organization Na…", "Long Organization Na… (2)", ...
pub fn display_labels(keys: &[String], max_len: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    keys.iter()
        .map(|key| {
            let label = truncate_label(key, max_len);
            let occurrence = seen.entry(label.clone()).or_insert(0);
            *occurrence += 1;

            if *occurrence == 1 {
                label
            } else {
                format!("{} ({})", label, occurrence)
            }
        })
        .collect()
}

/// Whole-dollar display text: 1234567 → "$1,234,567".
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}", grouped)
}
