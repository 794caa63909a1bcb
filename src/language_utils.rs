use isolang::Language;

/// Language utilities for resolving configured language labels
///
/// The configuration accepts a human-readable English language name
/// ("French"), an ISO 639-1 (2-letter) code or an ISO 639-2 (3-letter)
/// code. The resolved ISO 639-1 short code names the default output file;
/// labels the catalogue does not know fall back to their lowercased form.

/// Map the ISO 639-2/B codes that differ from their ISO 639-2/T form
fn part2b_to_language(code: &str) -> Option<Language> {
    let part2t = match code {
        "fre" => "fra", // French
        "ger" => "deu", // German
        "dut" => "nld", // Dutch
        "gre" => "ell", // Greek
        "chi" => "zho", // Chinese
        "cze" => "ces", // Czech
        "ice" => "isl", // Icelandic
        "alb" => "sqi", // Albanian
        "arm" => "hye", // Armenian
        "baq" => "eus", // Basque
        "bur" => "mya", // Burmese
        "per" => "fas", // Persian
        "geo" => "kat", // Georgian
        "may" => "msa", // Malay
        "mac" => "mkd", // Macedonian
        "rum" => "ron", // Romanian
        "slo" => "slk", // Slovak
        "wel" => "cym", // Welsh
        _ => return None,
    };
    Language::from_639_3(part2t)
}

/// Resolve a language label to the language it names, if recognized
fn resolve_label(label: &str) -> Option<Language> {
    let normalized = label.trim().to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized) {
            return Some(lang);
        }
    }
    // Check for ISO 639-2 (3-letter) code, /T first then /B
    else if normalized.len() == 3 {
        if let Some(lang) = Language::from_639_3(&normalized) {
            return Some(lang);
        }
        if let Some(lang) = part2b_to_language(&normalized) {
            return Some(lang);
        }
    }

    // Fall back to the English name of the language
    Language::from_name(label.trim())
}

/// Short ISO 639-1 code for a configured language label, used to derive
/// the default output filename. Unknown labels are passed through in
/// lowercased form; languages without a two-letter code keep their
/// three-letter one.
pub fn short_code(label: &str) -> String {
    match resolve_label(label) {
        Some(lang) => match lang.to_639_1() {
            Some(code) => code.to_string(),
            None => lang.to_639_3().to_string(),
        },
        None => label.trim().to_lowercase(),
    }
}
