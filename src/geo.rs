// ---------------------------------------------------------------------------
// Country lookup: ISO3 code → display name and approximate centroid
// ---------------------------------------------------------------------------

/// A country as placed on the salary map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Country {
    pub iso3: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// Look up a country by its ISO3 code (case-insensitive).
pub fn lookup(iso3: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|c| c.iso3.eq_ignore_ascii_case(iso3.trim()))
}

const fn c(iso3: &'static str, name: &'static str, lat: f64, lon: f64) -> Country {
    Country { iso3, name, lat, lon }
}

/// Approximate geographic centroids (degrees).
pub static COUNTRIES: &[Country] = &[
    // Americas
    c("USA", "United States", 39.8, -98.6),
    c("CAN", "Canada", 56.1, -106.3),
    c("MEX", "Mexico", 23.6, -102.6),
    c("BRA", "Brazil", -10.8, -52.9),
    c("ARG", "Argentina", -38.4, -63.6),
    c("CHL", "Chile", -35.7, -71.5),
    c("COL", "Colombia", 4.6, -74.3),
    c("PER", "Peru", -9.2, -75.0),
    c("URY", "Uruguay", -32.5, -55.8),
    c("BOL", "Bolivia", -16.3, -63.6),
    c("ECU", "Ecuador", -1.8, -78.2),
    c("VEN", "Venezuela", 6.4, -66.6),
    c("PRY", "Paraguay", -23.4, -58.4),
    c("CRI", "Costa Rica", 9.7, -83.8),
    c("PAN", "Panama", 8.5, -80.8),
    c("GTM", "Guatemala", 15.8, -90.2),
    c("HND", "Honduras", 15.2, -86.2),
    c("SLV", "El Salvador", 13.8, -88.9),
    c("DOM", "Dominican Republic", 18.7, -70.2),
    c("PRI", "Puerto Rico", 18.2, -66.6),
    c("JAM", "Jamaica", 18.1, -77.3),
    c("BHS", "Bahamas", 25.0, -77.4),
    // Europe
    c("GBR", "United Kingdom", 54.0, -2.5),
    c("IRL", "Ireland", 53.4, -8.2),
    c("FRA", "France", 46.2, 2.2),
    c("DEU", "Germany", 51.2, 10.5),
    c("ESP", "Spain", 40.5, -3.7),
    c("PRT", "Portugal", 39.4, -8.2),
    c("ITA", "Italy", 41.9, 12.6),
    c("NLD", "Netherlands", 52.1, 5.3),
    c("BEL", "Belgium", 50.5, 4.5),
    c("LUX", "Luxembourg", 49.8, 6.1),
    c("CHE", "Switzerland", 46.8, 8.2),
    c("AUT", "Austria", 47.5, 14.6),
    c("DNK", "Denmark", 56.3, 9.5),
    c("SWE", "Sweden", 60.1, 18.6),
    c("NOR", "Norway", 60.5, 8.5),
    c("FIN", "Finland", 61.9, 25.7),
    c("ISL", "Iceland", 64.96, -19.0),
    c("POL", "Poland", 51.9, 19.1),
    c("CZE", "Czechia", 49.8, 15.5),
    c("SVK", "Slovakia", 48.7, 19.7),
    c("HUN", "Hungary", 47.2, 19.5),
    c("SVN", "Slovenia", 46.2, 14.995),
    c("HRV", "Croatia", 45.1, 15.2),
    c("BIH", "Bosnia and Herzegovina", 43.9, 17.7),
    c("SRB", "Serbia", 44.0, 21.0),
    c("MNE", "Montenegro", 42.7, 19.4),
    c("MKD", "North Macedonia", 41.6, 21.7),
    c("ALB", "Albania", 41.2, 20.2),
    c("GRC", "Greece", 39.1, 21.8),
    c("BGR", "Bulgaria", 42.7, 25.5),
    c("ROU", "Romania", 45.9, 24.97),
    c("MDA", "Moldova", 47.4, 28.4),
    c("UKR", "Ukraine", 48.4, 31.2),
    c("BLR", "Belarus", 53.7, 27.95),
    c("LTU", "Lithuania", 55.2, 23.9),
    c("LVA", "Latvia", 56.9, 24.6),
    c("EST", "Estonia", 58.6, 25.0),
    c("RUS", "Russia", 61.5, 105.3),
    c("CYP", "Cyprus", 35.1, 33.4),
    c("MLT", "Malta", 35.9, 14.4),
    c("AND", "Andorra", 42.5, 1.6),
    c("JEY", "Jersey", 49.2, -2.1),
    c("GIB", "Gibraltar", 36.1, -5.35),
    // Middle East and Central Asia
    c("TUR", "Turkey", 38.96, 35.2),
    c("ISR", "Israel", 31.0, 34.9),
    c("ARE", "United Arab Emirates", 23.4, 53.8),
    c("SAU", "Saudi Arabia", 23.9, 45.1),
    c("QAT", "Qatar", 25.4, 51.2),
    c("KWT", "Kuwait", 29.3, 47.5),
    c("BHR", "Bahrain", 26.0, 50.6),
    c("OMN", "Oman", 21.5, 55.9),
    c("JOR", "Jordan", 30.6, 36.2),
    c("LBN", "Lebanon", 33.9, 35.9),
    c("IRQ", "Iraq", 33.2, 43.7),
    c("IRN", "Iran", 32.4, 53.7),
    c("ARM", "Armenia", 40.1, 45.0),
    c("GEO", "Georgia", 42.3, 43.4),
    c("AZE", "Azerbaijan", 40.1, 47.6),
    c("KAZ", "Kazakhstan", 48.0, 66.9),
    c("UZB", "Uzbekistan", 41.4, 64.6),
    c("KGZ", "Kyrgyzstan", 41.2, 74.8),
    // South and East Asia, Oceania
    c("IND", "India", 20.6, 79.0),
    c("PAK", "Pakistan", 30.4, 69.3),
    c("BGD", "Bangladesh", 23.7, 90.4),
    c("LKA", "Sri Lanka", 7.9, 80.8),
    c("NPL", "Nepal", 28.4, 84.1),
    c("CHN", "China", 35.9, 104.2),
    c("HKG", "Hong Kong", 22.3, 114.2),
    c("TWN", "Taiwan", 23.7, 121.0),
    c("JPN", "Japan", 36.2, 138.3),
    c("KOR", "South Korea", 35.9, 127.8),
    c("MNG", "Mongolia", 46.9, 103.8),
    c("SGP", "Singapore", 1.35, 103.8),
    c("MYS", "Malaysia", 4.2, 102.0),
    c("THA", "Thailand", 15.9, 100.99),
    c("VNM", "Vietnam", 14.1, 108.3),
    c("PHL", "Philippines", 12.9, 121.8),
    c("IDN", "Indonesia", -0.8, 113.9),
    c("AUS", "Australia", -25.3, 133.8),
    c("NZL", "New Zealand", -40.9, 174.9),
    c("ASM", "American Samoa", -14.3, -170.7),
    // Africa
    c("ZAF", "South Africa", -30.6, 22.9),
    c("NGA", "Nigeria", 9.1, 8.7),
    c("GHA", "Ghana", 7.9, -1.0),
    c("KEN", "Kenya", -0.02, 37.9),
    c("UGA", "Uganda", 1.4, 32.3),
    c("TZA", "Tanzania", -6.4, 34.9),
    c("ETH", "Ethiopia", 9.1, 40.5),
    c("EGY", "Egypt", 26.8, 30.8),
    c("MAR", "Morocco", 31.8, -7.1),
    c("DZA", "Algeria", 28.0, 1.7),
    c("TUN", "Tunisia", 33.9, 9.5),
    c("CMR", "Cameroon", 7.4, 12.4),
    c("SEN", "Senegal", 14.5, -14.5),
    c("CIV", "Côte d'Ivoire", 7.5, -5.5),
    c("CAF", "Central African Republic", 6.6, 20.9),
    c("COD", "DR Congo", -4.0, 21.8),
    c("ZMB", "Zambia", -13.1, 27.8),
    c("ZWE", "Zimbabwe", -19.0, 29.2),
    c("MUS", "Mauritius", -20.3, 57.6),
    c("RWA", "Rwanda", -1.9, 29.9),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_is_case_insensitive() {
        let us = lookup("usa").unwrap();
        assert_eq!(us.name, "United States");
        assert!(lookup("XXX").is_none());
        assert_eq!(lookup(" bra ").map(|c| c.iso3), Some("BRA"));
    }

    #[test]
    fn table_is_consistent() {
        let mut seen = HashSet::new();
        for c in COUNTRIES {
            assert_eq!(c.iso3.len(), 3, "{}", c.iso3);
            assert!(seen.insert(c.iso3), "duplicate {}", c.iso3);
            assert!((-90.0..=90.0).contains(&c.lat));
            assert!((-180.0..=180.0).contains(&c.lon));
        }
    }
}
