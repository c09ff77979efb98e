//! Plain-text report helpers: banners, numbered columns and key tables.

const WIDTH: usize = 120;
const TAB: usize = 8;

/// `------ <<< title >>> ------`, centered on 120 columns.
pub fn title(name: &str) -> String {
    format!("{:-^WIDTH$}", format!(" <<< {name} >>> "))
}

/// One numbered row per item.
pub fn column<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let rows: Vec<String> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{i:>3}: {item}"))
        .collect();
    rows.join("\n")
}

/// Keys padded to the next tab stop past the longest key.
pub fn table<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: std::fmt::Display,
{
    let longest = pairs.iter().map(|(k, _)| k.as_ref().len()).max().unwrap_or(0);
    let width = longest / TAB * TAB + TAB;
    let rows: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{:<width$}{v}", k.as_ref()))
        .collect();
    rows.join("\n")
}

/// Title followed by `body`, or by `(empty)` when there is nothing to show.
pub fn section(name: &str, body: &str) -> String {
    let body = if body.is_empty() { "(empty)" } else { body };
    format!("{}\n{body}", title(name))
}
