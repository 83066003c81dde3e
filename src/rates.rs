//! Built-in productivity tables.
//!
//! Rates are daily output of one standard team (a skilled worker plus a
//! helper). Keyword entries are scanned in order and the first keyword found
//! in the lowercased item name wins, so more specific phrases must precede
//! the shorter keywords they contain ("bata ringan" before "bata").

pub const SAFETY_FACTOR: f64 = 0.85;
pub const DEFAULT_RATE: f64 = 4.0;

pub const PRODUCTIVITY_RATES: &[(&str, f64)] = &[
    ("pembersihan", 50.0),
    ("bowplank", 20.0),
    ("uitzet", 20.0),
    ("galian", 4.0),
    ("urugan", 6.0),
    ("pemadatan", 15.0),
    ("batu kali", 2.5),
    ("pondasi batu", 2.5),
    ("bekisting", 6.0),
    ("pembesian", 100.0),
    ("besi", 100.0),
    ("cor", 4.0),
    ("beton", 4.0),
    ("bata ringan", 12.0),
    ("hebel", 12.0),
    ("bata merah", 8.0),
    ("bata", 8.0),
    ("plester", 10.0),
    ("acian", 15.0),
    ("keramik", 6.0),
    ("granit", 4.0),
    ("rangka atap", 6.0),
    ("baja ringan", 8.0),
    ("genteng", 10.0),
    ("plafon", 10.0),
    ("kusen", 3.0),
    ("pintu", 2.0),
    ("jendela", 3.0),
    ("cat", 25.0),
    ("instalasi", 5.0),
    ("kabel", 50.0),
    ("pipa", 15.0),
    ("closet", 2.0),
    ("waterproofing", 15.0),
];

/// Generic rates keyed by the exact normalized unit label.
pub const UNIT_RATES: &[(&str, f64)] = &[
    ("m2", 10.0),
    ("m3", 3.0),
    ("kg", 50.0),
    ("m1", 15.0),
    ("m'", 15.0),
    ("m", 15.0),
    ("bh", 5.0),
    ("buah", 5.0),
    ("unit", 2.0),
    ("titik", 4.0),
    ("set", 2.0),
    ("ls", 1.0),
];

/// Used when the unit is not an exact key but contains one of these fragments.
pub const UNIT_FRAGMENT_RATES: &[(&str, f64)] = &[
    ("m2", 10.0),
    ("m^2", 10.0),
    ("m3", 3.0),
    ("kg", 50.0),
];
