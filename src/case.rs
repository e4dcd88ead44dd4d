//! Case normalization for stored fields: lower case for emails, title case for names and cities.

/// Lower-case an identifier such as an email address.
/// e.g. "Kate@Email.com" -> "kate@email.com"
pub fn to_lower_case(s: &str) -> String {
    s.to_lowercase()
}

/// Title-case a phrase: the first letter of every run of letters is upper-cased, the rest lower-cased.
/// e.g. "de la cruz" -> "De La Cruz", "o'NEIL" -> "O'Neil", "SAN JOSÉ" -> "San José"
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(to_title_case("perdomo"), "Perdomo");
        assert_eq!(to_title_case("de la cruz"), "De La Cruz");
        assert_eq!(to_title_case("SAN JOSÉ"), "San José");
        assert_eq!(to_title_case("o'NEIL"), "O'Neil");
        assert_eq!(to_title_case("smith-JONES"), "Smith-Jones");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn lower_case_email() {
        assert_eq!(to_lower_case("Kate@Email.com"), "kate@email.com");
    }

    #[test]
    fn normalization_is_idempotent() {
        for s in ["bogota", "NEIVA", "mcDonald's farm", "ÅSA-lena", "x2y", "  padded  "] {
            let once = to_title_case(s);
            assert_eq!(to_title_case(&once), once, "title case of {:?}", s);
            let lower = to_lower_case(s);
            assert_eq!(to_lower_case(&lower), lower, "lower case of {:?}", s);
        }
    }
}
