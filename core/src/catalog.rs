//! Fixed reference data: marine regions, submitter roster and equipment kits.

/// A named marine region used for synthetic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub center_lat: f64,
    pub center_lng: f64,
    /// Sampling radius in degrees
    pub radius_deg: f64,
}

const fn region(name: &'static str, center_lat: f64, center_lng: f64, radius_deg: f64) -> Region {
    Region {
        name,
        center_lat,
        center_lng,
        radius_deg,
    }
}

pub const REGIONS: [Region; 19] = [
    // Europe
    region("North Atlantic", 59.0, -18.0, 5.0),
    region("Norwegian Sea", 65.0, 2.0, 4.0),
    region("Baltic Sea", 57.0, 18.0, 3.0),
    region("Celtic Sea", 50.0, -8.0, 3.0),
    region("Bay of Biscay", 45.0, -4.0, 2.5),
    region("Mediterranean West", 40.0, 2.0, 3.0),
    region("Adriatic Sea", 43.0, 15.0, 2.0),
    region("Aegean Sea", 38.0, 25.0, 2.0),
    // Africa
    region("West Africa", 0.0, 0.0, 8.0),
    region("East Africa", -10.0, 40.0, 6.0),
    region("North Africa", 35.0, 15.0, 4.0),
    // Asia
    region("South Asia", 15.0, 75.0, 6.0),
    region("Southeast Asia", 5.0, 110.0, 7.0),
    region("East Asia", 30.0, 125.0, 5.0),
    // Other
    region("Pacific Islands", -10.0, 160.0, 8.0),
    region("Indian Ocean", -10.0, 70.0, 6.0),
    region("Caribbean", 15.0, -70.0, 4.0),
    region("South America", -20.0, -50.0, 6.0),
    region("Middle East", 27.0, 52.0, 3.0),
];

/// Regions shown on the region x period heatmap.
pub fn european_regions() -> &'static [Region] {
    &REGIONS[..8]
}

pub fn find_region(name: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.name == name)
}

pub const SUBMITTER_NAMES: [&str; 16] = [
    "Captain Erik Nordström",
    "Maria Santos",
    "Giuseppe Marino",
    "Astrid Hansen",
    "Jean-Pierre Dubois",
    "Olaf Kristensen",
    "Isabella Rodriguez",
    "Dimitris Papadopoulos",
    "Liam O'Connor",
    "Sofia Petrova",
    "Magnus Eriksson",
    "Elena Kozlova",
    "Pedro Fernandez",
    "Ingrid Larsson",
    "Andreas Müller",
    "Catalina Ionescu",
];

pub const EQUIPMENT_KITS: [[&str; 3]; 5] = [
    ["GPS tracker", "Salinity meter", "pH probe"],
    ["Underwater camera", "Depth sounder", "Temperature probe"],
    ["Water quality sensor", "Biomass net", "Current meter"],
    ["ROV drone", "Sediment sampler", "Oxygen meter"],
    ["Algae harvester", "Kelp knife", "Buoyancy compensator"],
];

pub fn is_known_equipment(name: &str) -> bool {
    EQUIPMENT_KITS.iter().flatten().any(|item| *item == name)
}
