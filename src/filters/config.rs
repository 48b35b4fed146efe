//! Static filter configuration: the experience registry and the
//! enumerations every set-valued filter field draws its values from.
//! Tables are read-only; everything downstream goes through the lookup
//! functions below.

pub const GUESTS_MIN: u32 = 1;
pub const GUESTS_MAX: u32 = 16;
pub const DEFAULT_GUESTS: u32 = 2;

pub const DEFAULT_MIN_PRICE: u32 = 50;
pub const DEFAULT_MAX_PRICE: u32 = 500;

pub const DEFAULT_RADIUS: &str = "Within 50 miles";
pub const DEFAULT_PLATFORM: &str = "Direct Booking Site";

#[derive(Debug, Clone, Copy)]
pub struct FeatureOption {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ExperienceConfig {
    pub key: &'static str,
    pub title: &'static str,
    /// Property type seeded into a fresh filter state for this experience.
    pub default_property_type: &'static str,
    /// Feature toggles offered by the filter UI for this experience.
    pub features: &'static [FeatureOption],
    /// Subset of `features` that starts selected.
    pub preselected_features: &'static [&'static str],
}

pub const EXPERIENCES: &[ExperienceConfig] = &[
    ExperienceConfig {
        key: "matchDayBases",
        title: "Match Day Bases",
        default_property_type: "Apartment",
        features: &[
            FeatureOption { id: "near-stadium", label: "Near a 2026 stadium" },
            FeatureOption { id: "fan-zone-walkable", label: "Walkable to a fan zone" },
            FeatureOption { id: "transit-access", label: "Direct transit to the grounds" },
            FeatureOption { id: "big-screen", label: "Big screen for watch parties" },
        ],
        preselected_features: &["near-stadium"],
    },
    ExperienceConfig {
        key: "mountainRetreats",
        title: "Mountain Retreats",
        default_property_type: "Cabin",
        features: &[
            FeatureOption { id: "hot-tub", label: "Hot tub" },
            FeatureOption { id: "fireplace", label: "Fireplace" },
            FeatureOption { id: "trail-access", label: "Trail access" },
            FeatureOption { id: "mountain-view", label: "Mountain view" },
        ],
        preselected_features: &["fireplace", "mountain-view"],
    },
    ExperienceConfig {
        key: "beachfrontEscapes",
        title: "Beachfront Escapes",
        default_property_type: "Villa",
        features: &[
            FeatureOption { id: "ocean-view", label: "Ocean view" },
            FeatureOption { id: "private-pool", label: "Private pool" },
            FeatureOption { id: "beach-access", label: "Steps to the beach" },
            FeatureOption { id: "outdoor-shower", label: "Outdoor shower" },
        ],
        preselected_features: &["beach-access"],
    },
    ExperienceConfig {
        key: "cityBreaks",
        title: "City Breaks",
        default_property_type: "Loft",
        features: &[
            FeatureOption { id: "rooftop-terrace", label: "Rooftop terrace" },
            FeatureOption { id: "near-nightlife", label: "Near nightlife" },
            FeatureOption { id: "coworking-nearby", label: "Coworking nearby" },
            FeatureOption { id: "skyline-view", label: "Skyline view" },
        ],
        preselected_features: &[],
    },
    ExperienceConfig {
        key: "familyGatherings",
        title: "Family Gatherings",
        default_property_type: "Entire Home",
        features: &[
            FeatureOption { id: "game-room", label: "Game room" },
            FeatureOption { id: "fenced-yard", label: "Fenced yard" },
            FeatureOption { id: "crib-available", label: "Crib available" },
            FeatureOption { id: "bunk-room", label: "Bunk room" },
        ],
        preselected_features: &["game-room"],
    },
];

/// Display labels, in the order the filter UI lists them.
pub const PROPERTY_TYPES: &[&str] = &[
    "Entire Home",
    "Apartment",
    "Villa",
    "Cabin",
    "Condo",
    "Cottage",
    "Loft",
    "Townhouse",
];

pub const PLATFORMS: &[&str] = &[
    "Direct Booking Site",
    "Airbnb",
    "Vrbo",
    "Booking.com",
    "Expedia",
];

pub const AMENITIES: &[FeatureOption] = &[
    FeatureOption { id: "wifi", label: "Wifi" },
    FeatureOption { id: "kitchen", label: "Full kitchen" },
    FeatureOption { id: "washer", label: "Washer" },
    FeatureOption { id: "air-conditioning", label: "Air conditioning" },
    FeatureOption { id: "heating", label: "Heating" },
    FeatureOption { id: "tv", label: "TV" },
    FeatureOption { id: "workspace", label: "Dedicated workspace" },
    FeatureOption { id: "free-parking", label: "Free parking" },
    FeatureOption { id: "ev-charger", label: "EV charger" },
    FeatureOption { id: "pool", label: "Pool" },
    FeatureOption { id: "hot-tub", label: "Hot tub" },
    FeatureOption { id: "gym", label: "Gym" },
    FeatureOption { id: "bbq-grill", label: "BBQ grill" },
    FeatureOption { id: "pet-friendly", label: "Pet friendly" },
];

pub const RADIUS_OPTIONS: &[&str] = &[
    "Within 10 miles",
    "Within 25 miles",
    "Within 50 miles",
    "Within 100 miles",
    "Within 250 miles",
    "Anywhere",
];

pub fn experience_config(key: &str) -> Option<&'static ExperienceConfig> {
    EXPERIENCES.iter().find(|e| e.key == key)
}

pub fn is_property_type(label: &str) -> bool {
    PROPERTY_TYPES.contains(&label)
}

pub fn is_platform(label: &str) -> bool {
    PLATFORMS.contains(&label)
}

pub fn is_amenity(id: &str) -> bool {
    AMENITIES.iter().any(|a| a.id == id)
}

pub fn is_radius_option(label: &str) -> bool {
    RADIUS_OPTIONS.contains(&label)
}

/// Feature ids are valid if any experience offers them, so list decoding
/// stays independent of whether the experience field itself parsed.
pub fn is_feature(id: &str) -> bool {
    EXPERIENCES
        .iter()
        .any(|e| e.features.iter().any(|f| f.id == id))
}

// Ranks position a value inside its enumeration so multi-value fields can
// be kept in the UI-declared order. Unknown values sort last.

pub fn property_type_rank(label: &str) -> usize {
    PROPERTY_TYPES
        .iter()
        .position(|t| *t == label)
        .unwrap_or(usize::MAX)
}

pub fn platform_rank(label: &str) -> usize {
    PLATFORMS
        .iter()
        .position(|p| *p == label)
        .unwrap_or(usize::MAX)
}

pub fn amenity_rank(id: &str) -> usize {
    AMENITIES
        .iter()
        .position(|a| a.id == id)
        .unwrap_or(usize::MAX)
}

pub fn feature_rank(id: &str) -> usize {
    EXPERIENCES
        .iter()
        .flat_map(|e| e.features.iter())
        .position(|f| f.id == id)
        .unwrap_or(usize::MAX)
}
