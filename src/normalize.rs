//! Turkish-aware text folding used before command matching.

/// Folds user text into the form the command patterns are written against.
///
/// Lowercases with Turkish casing (`I` -> `ı`, `İ` -> `i`), drops one leading
/// `/`, folds Turkish letters to ASCII, turns markdown control characters
/// into spaces and collapses whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = turkish_lowercase(text);
    let unslashed = lowered.strip_prefix('/').unwrap_or(&lowered);

    let folded = unslashed
        .chars()
        .map(|ch| match ch {
            'ı' => 'i',
            'ş' => 's',
            'ç' => 'c',
            'ğ' => 'g',
            'ö' => 'o',
            'ü' => 'u',
            '~' | '_' | '*' | '`' => ' ',
            other => other,
        })
        .collect::<String>();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn turkish_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            'İ' => out.push('i'),
            'I' => out.push('ı'),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

/// Removes WhatsApp markdown characters from free text before it is embedded
/// in a formatted message.
pub fn sanitize_whatsapp(text: &str) -> String {
    text.chars()
        .filter(|ch| !matches!(ch, '*' | '_' | '~' | '`'))
        .collect()
}
