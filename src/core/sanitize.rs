// src/core/sanitize.rs

/// Collapse sequences of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Final normalisation applied to every extracted text field.
/// Any future charset detection belongs here, not in the extractors.
pub fn clean_text(s: &str) -> String {
    repair_replacement_chars(s).trim().to_string()
}

const REPLACEMENT: char = '\u{FFFD}';

/// Words the site serves with a mis-decoded accent (shows up as U+FFFD).
const KNOWN_WORDS: &[(&str, &str)] = &[
    // ó
    ("Descripci\u{FFFD}n", "Descripción"),
    ("descripci\u{FFFD}n", "descripción"),
    ("importaci\u{FFFD}n", "importación"),
    ("exportaci\u{FFFD}n", "exportación"),
    ("actuaci\u{FFFD}n", "actuación"),
    ("operaci\u{FFFD}n", "operación"),
    ("Corporaci\u{FFFD}n", "Corporación"),
    ("revisi\u{FFFD}n", "revisión"),
    ("Elaboraci\u{FFFD}n", "Elaboración"),
    ("Ubicaci\u{FFFD}n", "Ubicación"),
    // é
    ("t\u{FFFD}cnico", "técnico"),
    ("t\u{FFFD}cnica", "técnica"),
    ("Acad\u{FFFD}mico", "Académico"),
    ("G\u{FFFD}nero", "Género"),
    // á
    ("tem\u{FFFD}tica", "temática"),
    ("\u{FFFD}rea", "área"),
    // í
    ("asesor\u{FFFD}a", "asesoría"),
    ("estad\u{FFFD}stica", "estadística"),
    ("as\u{FFFD}", "así"),
];

/// Best-effort repair of U+FFFD left by a Latin-1/UTF-8 mismatch:
/// known words first, then every remaining U+FFFD becomes 'ó' (the usual culprit).
pub fn repair_replacement_chars(s: &str) -> String {
    if !s.contains(REPLACEMENT) {
        return s.to_string();
    }
    // Capitalised only where it opens the text, as in the "Área del Puesto" label
    let mut out = match s.strip_prefix("\u{FFFD}rea") {
        Some(rest) => join!("Área", rest),
        None => s.to_string(),
    };
    for (broken, fixed) in KNOWN_WORDS {
        if out.contains(broken) {
            out = out.replace(broken, fixed);
        }
    }
    out.replace(REPLACEMENT, "ó")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_collapses() {
        assert_eq!(normalize_ws("  San\n\t José  "), "San José");
    }

    #[test]
    fn known_words_win_over_generic() {
        assert_eq!(repair_replacement_chars("Nivel Acad\u{FFFD}mico"), "Nivel Académico");
        assert_eq!(repair_replacement_chars("soporte t\u{FFFD}cnicos"), "soporte técnicos");
        assert_eq!(repair_replacement_chars("G\u{FFFD}nero"), "Género");
    }

    #[test]
    fn area_is_capitalised_only_at_the_start() {
        assert_eq!(repair_replacement_chars("\u{FFFD}rea del Puesto"), "Área del Puesto");
        assert_eq!(repair_replacement_chars("Trabajo en el \u{FFFD}rea de ventas"), "Trabajo en el área de ventas");
    }

    #[test]
    fn unknown_words_fall_back_to_o_acute() {
        assert_eq!(repair_replacement_chars("atenci\u{FFFD}n"), "atención");
    }

    #[test]
    fn clean_text_leaves_good_text_alone() {
        assert_eq!(clean_text("  Miscelánea "), "Miscelánea");
    }
}
