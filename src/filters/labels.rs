//! Wire-id / display-label mapping for the two fields whose in-memory
//! representation is a human label. Ids are stable across relabeling; the
//! URL carries ids, controls show labels.
//!
//! Lookups fall back to the input unchanged when no mapping exists, so a
//! label added to the configuration before its id is registered still
//! round-trips through the URL.

const PROPERTY_TYPE_IDS: &[(&str, &str)] = &[
    ("apartment", "Apartment"),
    ("villa", "Villa"),
    ("cabin", "Cabin"),
    ("condo", "Condo"),
    ("cottage", "Cottage"),
    ("loft", "Loft"),
    ("townhouse", "Townhouse"),
];

const PLATFORM_IDS: &[(&str, &str)] = &[
    ("direct", "Direct Booking Site"),
    ("airbnb", "Airbnb"),
    ("vrbo", "Vrbo"),
    ("booking", "Booking.com"),
    ("expedia", "Expedia"),
];

fn to_id<'a>(table: &[(&'static str, &'static str)], label: &'a str) -> &'a str {
    table
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(id, _)| *id)
        .unwrap_or(label)
}

fn to_label<'a>(table: &[(&'static str, &'static str)], id: &'a str) -> &'a str {
    table
        .iter()
        .find(|(i, _)| *i == id)
        .map(|(_, l)| *l)
        .unwrap_or(id)
}

pub fn property_type_id(label: &str) -> &str {
    to_id(PROPERTY_TYPE_IDS, label)
}

pub fn property_type_label(id: &str) -> &str {
    to_label(PROPERTY_TYPE_IDS, id)
}

pub fn platform_id(label: &str) -> &str {
    to_id(PLATFORM_IDS, label)
}

pub fn platform_label(id: &str) -> &str {
    to_label(PLATFORM_IDS, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::config;

    #[test]
    fn platform_mapping_is_total_both_ways() {
        for label in config::PLATFORMS {
            let id = platform_id(label);
            assert_ne!(id, *label, "platform {} has no id", label);
            assert_eq!(platform_label(id), *label);
        }
    }

    #[test]
    fn every_mapped_id_resolves_to_a_registered_label() {
        for (id, _) in PROPERTY_TYPE_IDS {
            assert!(config::is_property_type(property_type_label(id)));
        }
        for (id, _) in PLATFORM_IDS {
            assert!(config::is_platform(platform_label(id)));
        }
    }

    #[test]
    fn unmapped_labels_pass_through_unchanged() {
        // "Entire Home" predates the id table; it travels as its label.
        assert_eq!(property_type_id("Entire Home"), "Entire Home");
        assert_eq!(property_type_label("Entire Home"), "Entire Home");
        assert_eq!(platform_label("some-future-platform"), "some-future-platform");
    }

    #[test]
    fn known_mappings() {
        assert_eq!(property_type_id("Villa"), "villa");
        assert_eq!(property_type_label("cabin"), "Cabin");
        assert_eq!(platform_id("Airbnb"), "airbnb");
        assert_eq!(platform_label("direct"), "Direct Booking Site");
    }
}
