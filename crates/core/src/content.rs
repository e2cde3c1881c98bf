//! Static content pools.

/// General words for the word-fill layout.
pub const WORDS: &[&str] = &[
    "FLAP", "CODE", "BOARD", "TRAIN", "PLATFORM", "DEPART", "ARRIVE", "DELAYED", "ON TIME",
    "GATE", "TRACK", "EXPRESS", "LOCAL", "BOARDING", "CLOSED", "NEXT", "VIA", "SOLARI", "SIGNAL",
    "STATION", "TICKET", "SPLIT", "HINGE", "DRUM", "LETTER", "NUMBER", "MOTION", "CLOCK", "HOUR",
    "MINUTE", "NORTH", "SOUTH", "EAST", "WEST", "COACH", "CARRIAGE", "SLEEPER", "NIGHT", "DAY",
    "RETURN", "SINGLE", "WAIT", "NOW", "SOON", "LATER", "HELLO", "WORLD", "RUST", "TYPE", "SAFE",
];

/// Destination names for the sparse-line layout; some span several words.
pub const DESTINATIONS: &[&str] = &[
    "LONDON", "PARIS", "MILANO", "ROMA", "NAPOLI", "TORINO", "VENEZIA", "FIRENZE", "BERLIN",
    "MUNCHEN", "WIEN", "ZURICH", "GENEVE", "MADRID", "BARCELONA", "LISBOA", "AMSTERDAM",
    "BRUXELLES", "KOBENHAVN", "STOCKHOLM", "OSLO", "HELSINKI", "PRAHA", "BUDAPEST", "WARSZAWA",
    "NEW YORK", "LOS ANGELES", "SAN FRANCISCO", "CHICAGO", "BOSTON", "TORONTO", "MONTREAL",
    "MEXICO CITY", "SAO PAULO", "BUENOS AIRES", "RIO DE JANEIRO", "TOKYO", "OSAKA", "SEOUL",
    "HONG KONG", "SINGAPORE", "BANGKOK", "DELHI", "MUMBAI", "DUBAI", "CAIRO", "CAPE TOWN",
    "NAIROBI", "SYDNEY", "MELBOURNE", "AUCKLAND", "REYKJAVIK", "KUALA LUMPUR", "TEL AVIV",
    "SAINT-ETIENNE", "AIX-EN-PROVENCE",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharacterSet;

    #[test]
    fn pools_only_use_drawable_glyphs() {
        let set = CharacterSet::STANDARD;
        for entry in WORDS.iter().chain(DESTINATIONS) {
            for ch in entry.chars() {
                assert!(set.index_of(ch).is_some(), "{:?} in {:?}", ch, entry);
            }
        }
    }

    #[test]
    fn destinations_include_multi_word_entries() {
        assert!(DESTINATIONS.iter().any(|d| d.contains(' ')));
    }
}
