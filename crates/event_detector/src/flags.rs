//! FIFA country code → flag emoji.

/// England, Scotland and Wales use subdivision tag sequences instead of a
/// regional indicator pair.
const SUBDIVISION_FLAGS: &[(&str, &str)] = &[
    ("ENG", "\u{1F3F4}\u{E0067}\u{E0062}\u{E0065}\u{E006E}\u{E0067}\u{E007F}"),
    ("SCO", "\u{1F3F4}\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}"),
    ("WAL", "\u{1F3F4}\u{E0067}\u{E0062}\u{E0077}\u{E006C}\u{E0073}\u{E007F}"),
];

const FIFA_TO_ISO: &[(&str, &str)] = &[
    ("ALG", "DZ"), ("ARG", "AR"), ("AUS", "AU"), ("AUT", "AT"), ("BEL", "BE"),
    ("BRA", "BR"), ("CAN", "CA"), ("CHI", "CL"), ("CIV", "CI"), ("CMR", "CM"),
    ("COL", "CO"), ("CRC", "CR"), ("CRO", "HR"), ("CZE", "CZ"), ("DEN", "DK"),
    ("ECU", "EC"), ("EGY", "EG"), ("ESP", "ES"), ("FRA", "FR"), ("GER", "DE"),
    ("GHA", "GH"), ("IRN", "IR"), ("ITA", "IT"), ("JPN", "JP"), ("KOR", "KR"),
    ("KSA", "SA"), ("MAR", "MA"), ("MEX", "MX"), ("NED", "NL"), ("NGA", "NG"),
    ("NOR", "NO"), ("NZL", "NZ"), ("PAN", "PA"), ("PAR", "PY"), ("PER", "PE"),
    ("POL", "PL"), ("POR", "PT"), ("QAT", "QA"), ("RSA", "ZA"), ("SEN", "SN"),
    ("SRB", "RS"), ("SUI", "CH"), ("SWE", "SE"), ("TUN", "TN"), ("TUR", "TR"),
    ("UKR", "UA"), ("URU", "UY"), ("USA", "US"),
];

/// Flag for a FIFA three-letter code, `None` for codes we do not know.
pub fn flag_for(fifa_code: &str) -> Option<String> {
    let code = fifa_code.trim().to_ascii_uppercase();
    if let Some((_, flag)) = SUBDIVISION_FLAGS.iter().find(|(c, _)| *c == code) {
        return Some((*flag).to_string());
    }
    let (_, iso) = FIFA_TO_ISO.iter().find(|(c, _)| *c == code)?;
    regional_indicators(iso)
}

fn regional_indicators(iso: &str) -> Option<String> {
    iso.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32).checked_sub('A' as u32)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_become_indicator_pairs() {
        assert_eq!(flag_for("ARG").as_deref(), Some("\u{1F1E6}\u{1F1F7}"));
        assert_eq!(flag_for("sui").as_deref(), Some("\u{1F1E8}\u{1F1ED}"));
        assert_eq!(flag_for("KSA").as_deref(), Some("\u{1F1F8}\u{1F1E6}"));
    }

    #[test]
    fn home_nations_use_tag_sequences() {
        assert!(flag_for("ENG").unwrap().starts_with('\u{1F3F4}'));
        assert_ne!(flag_for("ENG"), flag_for("WAL"));
    }

    #[test]
    fn unknown_codes_have_no_flag() {
        assert_eq!(flag_for("XYZ"), None);
        assert_eq!(flag_for(""), None);
    }
}
