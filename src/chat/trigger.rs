const SENTINEL: &str = "INFO_TRIGGER=";

pub const ACKNOWLEDGEMENT: &str = "(restaurant info updated)";

/// Result of scanning a finished assistant reply for the info sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoTrigger {
    /// Text to append to the restaurant info. `None` when the sentinel was empty.
    pub fragment: Option<String>,
    /// The reply with the sentinel line removed.
    pub visible_text: String,
}

/// Finds the first line that starts with `INFO_TRIGGER=` (trimmed, any case).
pub fn extract_info_trigger(text: &str) -> Option<InfoTrigger> {
    let lines: Vec<&str> = text.split('\n').collect();
    let index = lines.iter().position(|line| is_sentinel(line.trim()))?;

    let raw = lines[index].trim();
    let fragment = raw
        .split_once('=')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
        .map(str::to_string);

    let remaining = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");
    let remaining = remaining.trim();
    let visible_text = if remaining.is_empty() {
        ACKNOWLEDGEMENT.to_string()
    } else {
        remaining.to_string()
    };

    Some(InfoTrigger {
        fragment,
        visible_text,
    })
}

fn is_sentinel(line: &str) -> bool {
    line.get(..SENTINEL.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SENTINEL))
}

/// Appends `fragment` as a new line of `existing`.
pub fn append_info(existing: &str, fragment: &str) -> String {
    if existing.is_empty() {
        fragment.to_string()
    } else {
        format!("{existing}\n{fragment}")
    }
}
