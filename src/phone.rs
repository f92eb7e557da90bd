// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Phone number normalization between the "country + national digits" form
//! users edit and the E.164 string the backend stores.
//!
//! Parsing is lenient: a value that cannot be parsed keeps the caller's
//! country and its digits. The backend is the validation authority.

use crate::error::{ClientError, Result};
use crate::i18n::Locale;
use phonenumber::country;
use phonenumber::metadata::DATABASE;

/// Display names for common regions: (ISO code, English, Portuguese).
/// Regions missing here are labeled with their ISO code.
const COUNTRY_NAMES: &[(&str, &str, &str)] = &[
    ("AR", "Argentina", "Argentina"),
    ("AU", "Australia", "Austrália"),
    ("BO", "Bolivia", "Bolívia"),
    ("BR", "Brazil", "Brasil"),
    ("CA", "Canada", "Canadá"),
    ("CL", "Chile", "Chile"),
    ("CN", "China", "China"),
    ("CO", "Colombia", "Colômbia"),
    ("DE", "Germany", "Alemanha"),
    ("ES", "Spain", "Espanha"),
    ("FR", "France", "França"),
    ("GB", "United Kingdom", "Reino Unido"),
    ("IE", "Ireland", "Irlanda"),
    ("IN", "India", "Índia"),
    ("IT", "Italy", "Itália"),
    ("JP", "Japan", "Japão"),
    ("MX", "Mexico", "México"),
    ("NL", "Netherlands", "Países Baixos"),
    ("PE", "Peru", "Peru"),
    ("PT", "Portugal", "Portugal"),
    ("PY", "Paraguay", "Paraguai"),
    ("US", "United States", "Estados Unidos"),
    ("UY", "Uruguay", "Uruguai"),
];

/// A phone number split for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneParts {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    /// National significant number, digits only
    pub national: String,
}

/// An entry for the country selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOption {
    pub iso2: &'static str,
    pub calling_code: String,
    pub label: String,
}

/// Strip everything that is not an ASCII digit.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// International calling code for an ISO country code, e.g. `BR` → 55.
pub fn calling_code(iso2: &str) -> Option<u16> {
    let id: country::Id = iso2.trim().to_ascii_uppercase().parse().ok()?;
    DATABASE.by_id(id.as_ref()).map(|meta| meta.country_code())
}

/// Split a stored E.164 value into country and national digits.
///
/// Empty input yields the fallback country with no digits. Unparsable input
/// yields the fallback country and the input's digits.
pub fn split_e164(value: Option<&str>, fallback_iso2: &str) -> PhoneParts {
    let raw = value.unwrap_or("").trim();
    if raw.is_empty() {
        return PhoneParts {
            country: fallback_iso2.to_string(),
            national: String::new(),
        };
    }

    match phonenumber::parse(None, raw) {
        Ok(parsed) => {
            let country = parsed
                .country()
                .id()
                .map(|id| id.as_ref().to_string())
                .unwrap_or_else(|| fallback_iso2.to_string());
            let national = parsed.national();
            let zeros = "0".repeat(usize::from(national.zeros()));
            PhoneParts {
                country,
                national: format!("{}{}", zeros, national.value()),
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Phone number not parsable, keeping digits");
            PhoneParts {
                country: fallback_iso2.to_string(),
                national: digits_only(raw),
            }
        }
    }
}

/// Build the E.164 string for a country and free-form national input.
pub fn build_e164(iso2: &str, national: &str) -> Result<String> {
    let code = calling_code(iso2)
        .ok_or_else(|| ClientError::Validation(format!("unknown country code: {}", iso2)))?;
    Ok(format!("+{}{}", code, digits_only(national)))
}

fn country_name(iso2: &str, locale: Locale) -> Option<&'static str> {
    COUNTRY_NAMES
        .iter()
        .find(|(code, _, _)| *code == iso2)
        .map(|(_, en, pt)| match locale {
            Locale::PtBr => *pt,
            Locale::En => *en,
        })
}

/// Country selector entries, labeled in `locale` and sorted by label.
///
/// Covers every region in the phone metadata, so any country `split_e164`
/// can return is selectable. Non-geographic entities are left out.
pub fn country_options(locale: Locale) -> Vec<CountryOption> {
    let mut options: Vec<CountryOption> = DATABASE
        .iter()
        .filter(|meta| meta.id().parse::<country::Id>().is_ok())
        .map(|meta| {
            let iso2 = meta.id();
            let code = meta.country_code();
            let name = country_name(iso2, locale).unwrap_or(iso2);
            CountryOption {
                iso2,
                calling_code: format!("+{}", code),
                label: format!("{} (+{})", name, code),
            }
        })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn test_calling_code() {
        assert_eq!(calling_code("BR"), Some(55));
        assert_eq!(calling_code("us"), Some(1));
        assert_eq!(calling_code("ZZ"), None);
    }

    #[test]
    fn test_split_e164() {
        let parts = split_e164(Some("+5511987654321"), "US");
        assert_eq!(parts.country, "BR");
        assert_eq!(parts.national, "11987654321");
    }

    #[test]
    fn test_split_falls_back() {
        assert_eq!(
            split_e164(None, "BR"),
            PhoneParts {
                country: "BR".to_string(),
                national: String::new()
            }
        );
        let parts = split_e164(Some("not a phone 12"), "BR");
        assert_eq!(parts.country, "BR");
        assert_eq!(parts.national, "12");
    }

    #[test]
    fn test_build_e164() {
        assert_eq!(
            build_e164("BR", "(11) 98765-4321").unwrap(),
            "+5511987654321"
        );
        assert!(build_e164("XX", "123").is_err());
    }

    #[test]
    fn test_country_options_sorted() {
        let options = country_options(Locale::PtBr);
        assert!(options.windows(2).all(|w| w[0].label <= w[1].label));
        let brazil = options.iter().find(|o| o.iso2 == "BR").unwrap();
        assert_eq!(brazil.label, "Brasil (+55)");
        assert_eq!(brazil.calling_code, "+55");
    }

    #[test]
    fn test_split_country_is_always_selectable() {
        let options = country_options(Locale::En);
        for number in ["+8613800138000", "+5511987654321", "+263771234567", "+14155552671"] {
            let parts = split_e164(Some(number), "BR");
            assert!(
                options.iter().any(|o| o.iso2 == parts.country),
                "{number} split to {}",
                parts.country
            );
        }

        let parts = split_e164(Some("+8613800138000"), "BR");
        assert_eq!(parts.country, "CN");
        let china = options.iter().find(|o| o.iso2 == "CN").unwrap();
        assert_eq!(china.label, "China (+86)");
    }

    #[test]
    fn test_uncurated_region_labeled_by_code() {
        let options = country_options(Locale::PtBr);
        let zimbabwe = options.iter().find(|o| o.iso2 == "ZW").unwrap();
        assert_eq!(zimbabwe.label, "ZW (+263)");
        assert!(options.iter().all(|o| o.iso2 != "001"));
        assert!(options.len() > 200);
    }
}
