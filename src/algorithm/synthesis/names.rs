//! Vocabulary for synthetic providers
//!
//! None of these names belong to real providers.

/// Specialty taxonomy with relative frequency and claim amount multiplier
#[derive(Debug, Clone, Copy)]
pub struct Specialty {
    pub name: &'static str,
    pub weight: f64,
    pub amount_multiplier: f64,
    /// Word used in organization names
    pub practice: &'static str,
}

impl Specialty {
    const fn new(
        name: &'static str,
        weight: f64,
        amount_multiplier: f64,
        practice: &'static str,
    ) -> Self {
        Self {
            name,
            weight,
            amount_multiplier,
            practice,
        }
    }
}

pub const SPECIALTIES: &[Specialty] = &[
    Specialty::new("Family Medicine", 0.20, 0.8, "Family Health"),
    Specialty::new("Internal Medicine", 0.16, 1.0, "Internal Medicine"),
    Specialty::new("Pediatrics", 0.08, 0.7, "Pediatrics"),
    Specialty::new("Cardiovascular Disease", 0.07, 2.2, "Heart"),
    Specialty::new("Orthopaedic Surgery", 0.06, 3.0, "Orthopedics"),
    Specialty::new("Radiology", 0.07, 1.6, "Imaging"),
    Specialty::new("Emergency Medicine", 0.06, 2.0, "Urgent Care"),
    Specialty::new("Obstetrics & Gynecology", 0.06, 1.5, "Women's Health"),
    Specialty::new("Psychiatry & Neurology", 0.06, 1.1, "Behavioral Health"),
    Specialty::new("Dermatology", 0.05, 0.9, "Skin"),
    Specialty::new("Physical Therapist", 0.07, 0.6, "Rehabilitation"),
    Specialty::new("Clinical Laboratory", 0.06, 0.4, "Diagnostics"),
];

pub const FIRST_NAMES: &[&str] = &[
    "Avery", "Blake", "Casey", "Dana", "Emerson", "Finley", "Harper", "Jordan", "Kendall",
    "Logan", "Morgan", "Parker", "Quinn", "Reese", "Rowan", "Sawyer", "Skyler", "Taylor",
];

pub const MIDDLE_INITIALS: &[&str] = &["A", "B", "C", "D", "E", "J", "L", "M", "R", "S"];

pub const LAST_NAMES: &[&str] = &[
    "Ashford", "Brennan", "Calloway", "Delacroix", "Ellery", "Fairbanks", "Galloway", "Hollis",
    "Iverson", "Jarrett", "Kingsley", "Lockwood", "Marlowe", "Northcott", "Orwell", "Prescott",
    "Radcliffe", "Sterling", "Thornton", "Whitlock",
];

pub const CREDENTIALS: &[&str] = &["MD", "DO", "NP", "PA-C"];

pub const PHYSICAL_THERAPY_CREDENTIALS: &[&str] = &["PT", "DPT"];

pub const PLACES: &[&str] = &[
    "Lakeshore", "Riverbend", "Pinecrest", "Maple Ridge", "Cedar Point", "Northfield",
    "Harbor View", "Stonegate", "Willow Creek", "Summit",
];

pub const ORGANIZATION_SUFFIXES: &[&str] = &["Associates", "Group", "Partners", "Clinic", "Center"];
