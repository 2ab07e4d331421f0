use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::state::{Group, Match, MatchStatus, Stadium, Team};

/// Maps a region code onto regional-indicator codepoints. Display only; the
/// sentinel "TBD" is special-cased by callers before reaching this.
pub fn flag_emoji(code: &str) -> String {
    code.to_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(127_397 + c as u32))
        .collect()
}

/// Country-name to flag-code heuristic used by the stadium list. Not a data
/// key anywhere, just a best-effort glyph.
pub fn country_flag_code(country: &str) -> String {
    if country == "USA" {
        "US".to_string()
    } else {
        country.chars().take(2).collect::<String>().to_uppercase()
    }
}

fn team(name: &str, code: &str) -> Team {
    Team {
        name: name.to_string(),
        code: code.to_string(),
    }
}

pub static TEAMS: Lazy<Vec<Team>> = Lazy::new(|| {
    vec![
        team("Canada", "CA"),
        team("Mexico", "MX"),
        team("USA", "US"),
        team("Argentina", "AR"),
        team("Brazil", "BR"),
        team("England", "GB-ENG"),
        team("France", "FR"),
        team("Germany", "DE"),
        team("Spain", "ES"),
        team("Portugal", "PT"),
        team("Netherlands", "NL"),
        team("Belgium", "BE"),
        team("Croatia", "HR"),
        team("Italy", "IT"),
        team("Uruguay", "UY"),
        team("Colombia", "CO"),
        team("Japan", "JP"),
        team("South Korea", "KR"),
        team("Australia", "AU"),
        team("Saudi Arabia", "SA"),
        team("Iran", "IR"),
        team("Qatar", "QA"),
        team("Senegal", "SN"),
        team("Morocco", "MA"),
        team("Ghana", "GH"),
        team("Cameroon", "CM"),
        team("Nigeria", "NG"),
        team("Egypt", "EG"),
        team("Switzerland", "CH"),
        team("Denmark", "DK"),
        team("Sweden", "SE"),
        team("Poland", "PL"),
        team("Serbia", "RS"),
        team("Austria", "AT"),
        team("Chile", "CL"),
        team("Ecuador", "EC"),
        team("Peru", "PE"),
        team("Venezuela", "VE"),
        team("Paraguay", "PY"),
        team("Norway", "NO"),
        team("Scotland", "GB-SCT"),
        team("Wales", "GB-WLS"),
        team("Ireland", "IE"),
        team("Turkey", "TR"),
        team("Greece", "GR"),
        team("Russia", "RU"),
        team("Ukraine", "UA"),
        team("Ivory Coast", "CI"),
    ]
});

fn stadium(name: &str, city: &str, country: &str, capacity: u32, seed: &str) -> Stadium {
    Stadium {
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        capacity,
        image: format!("https://picsum.photos/seed/{seed}/600/400"),
    }
}

pub static STADIUMS: Lazy<Vec<Stadium>> = Lazy::new(|| {
    vec![
        stadium("BC Place", "Vancouver", "Canada", 54_500, "bcplace"),
        stadium("BMO Field", "Toronto", "Canada", 45_500, "bmofield"),
        stadium("Estadio Azteca", "Mexico City", "Mexico", 87_523, "azteca"),
        stadium("Estadio BBVA", "Monterrey", "Mexico", 53_500, "bbva"),
        stadium("Estadio Akron", "Guadalajara", "Mexico", 48_071, "akron"),
        stadium("MetLife Stadium", "New York / New Jersey", "USA", 82_500, "metlife"),
        stadium("AT&T Stadium", "Dallas", "USA", 80_000, "att"),
        stadium("SoFi Stadium", "Los Angeles", "USA", 70_240, "sofi"),
        stadium("Arrowhead Stadium", "Kansas City", "USA", 76_416, "arrowhead"),
        stadium("Mercedes-Benz Stadium", "Atlanta", "USA", 71_000, "mercedes"),
        stadium("NRG Stadium", "Houston", "USA", 72_220, "nrg"),
        stadium("Lincoln Financial Field", "Philadelphia", "USA", 69_796, "lincoln"),
        stadium("Lumen Field", "Seattle", "USA", 69_000, "lumen"),
        stadium("Levi's Stadium", "San Francisco Bay Area", "USA", 68_500, "levis"),
        stadium("Gillette Stadium", "Boston", "USA", 65_878, "gillette"),
        stadium("Hard Rock Stadium", "Miami", "USA", 64_767, "hardrock"),
    ]
});

pub static GROUPS: Lazy<Vec<Group>> = Lazy::new(|| {
    (0u8..12)
        .map(|i| Group {
            name: format!("Group {}", (b'A' + i) as char),
            teams: [
                Team::placeholder(),
                Team::placeholder(),
                Team::placeholder(),
                Team::placeholder(),
            ],
        })
        .collect()
});

// Tournament schedule: id, kickoff date, host city. Teams and groups stay
// placeholders until the Final Draw.
const SCHEDULE: &[(u32, &str, &str)] = &[
    (1, "2026-06-11", "Mexico City"),
    (2, "2026-06-11", "Guadalajara"),
    (3, "2026-06-12", "Toronto"),
    (4, "2026-06-12", "Los Angeles"),
    (5, "2026-06-13", "Boston"),
    (6, "2026-06-13", "Vancouver"),
    (7, "2026-06-13", "New York / New Jersey"),
    (8, "2026-06-14", "Philadelphia"),
    (9, "2026-06-14", "Houston"),
    (10, "2026-06-14", "Dallas"),
    (11, "2026-06-15", "Miami"),
    (12, "2026-06-15", "Atlanta"),
    (13, "2026-06-15", "Seattle"),
    (14, "2026-06-15", "San Francisco Bay Area"),
    (15, "2026-06-16", "Kansas City"),
    (16, "2026-06-16", "New York / New Jersey"),
    (17, "2026-06-16", "Boston"),
    (18, "2026-06-17", "Toronto"),
    (19, "2026-06-17", "Mexico City"),
    (20, "2026-06-17", "Dallas"),
    (21, "2026-06-18", "Atlanta"),
    (22, "2026-06-18", "Los Angeles"),
    (23, "2026-06-18", "Vancouver"),
    (24, "2026-06-18", "Guadalajara"),
    (25, "2026-06-19", "Philadelphia"),
    (26, "2026-06-19", "Boston"),
    (27, "2026-06-19", "Toronto"),
    (28, "2026-06-19", "Seattle"),
    (29, "2026-06-20", "Kansas City"),
    (30, "2026-06-20", "Houston"),
    (31, "2026-06-20", "Monterrey"),
    (32, "2026-06-20", "New York / New Jersey"),
    (33, "2026-06-21", "Miami"),
    (34, "2026-06-21", "Atlanta"),
    (35, "2026-06-21", "Los Angeles"),
    (36, "2026-06-21", "Vancouver"),
    (37, "2026-06-22", "Philadelphia"),
    (38, "2026-06-22", "Dallas"),
    (39, "2026-06-22", "San Francisco Bay Area"),
    (40, "2026-06-22", "Seattle"),
    (41, "2026-06-23", "Boston"),
    (42, "2026-06-23", "Toronto"),
    (43, "2026-06-23", "Houston"),
    (44, "2026-06-23", "Guadalajara"),
    (45, "2026-06-24", "Miami"),
    (46, "2026-06-24", "Atlanta"),
    (47, "2026-06-24", "Vancouver"),
    (48, "2026-06-24", "Mexico City"),
    (49, "2026-06-24", "Monterrey"),
    (50, "2026-06-25", "Philadelphia"),
    (51, "2026-06-25", "New York / New Jersey"),
    (52, "2026-06-25", "Dallas"),
    (53, "2026-06-25", "Kansas City"),
    (54, "2026-06-25", "Seattle"),
    (55, "2026-06-25", "Los Angeles"),
    (56, "2026-06-26", "Boston"),
    (57, "2026-06-26", "Toronto"),
    (58, "2026-06-26", "Houston"),
    (59, "2026-06-26", "San Francisco Bay Area"),
    (60, "2026-06-26", "Vancouver"),
    (61, "2026-06-26", "Guadalajara"),
    (62, "2026-06-27", "New York / New Jersey"),
    (63, "2026-06-27", "Philadelphia"),
    (64, "2026-06-27", "Kansas City"),
    (65, "2026-06-27", "Dallas"),
    (66, "2026-06-27", "Houston"),
    (67, "2026-06-27", "Miami"),
    (68, "2026-06-27", "Atlanta"),
    (69, "2026-06-27", "Los Angeles"),
    (70, "2026-06-27", "San Francisco Bay Area"),
    (71, "2026-06-27", "Seattle"),
    (72, "2026-06-27", "Mexico City"),
    (73, "2026-06-29", "Monterrey"),
    (74, "2026-06-30", "Mexico City"),
    (75, "2026-07-01", "San Francisco Bay Area"),
    (76, "2026-07-01", "Seattle"),
    (77, "2026-07-02", "Toronto"),
    (78, "2026-07-02", "Los Angeles"),
    (79, "2026-07-03", "Miami"),
    (80, "2026-07-03", "Houston"),
    (81, "2026-07-04", "Philadelphia"),
    (82, "2026-07-04", "Dallas"),
    (83, "2026-07-05", "New York / New Jersey"),
    (84, "2026-07-05", "Mexico City"),
    (85, "2026-07-06", "Dallas"),
    (86, "2026-07-06", "Seattle"),
    (87, "2026-07-07", "Atlanta"),
    (88, "2026-07-07", "Vancouver"),
    (89, "2026-07-09", "Boston"),
    (90, "2026-07-09", "Los Angeles"),
    (91, "2026-07-10", "Kansas City"),
    (92, "2026-07-10", "Miami"),
    (93, "2026-07-11", "Kansas City"),
    (94, "2026-07-11", "Boston"),
    (95, "2026-07-12", "Los Angeles"),
    (96, "2026-07-12", "Miami"),
    (97, "2026-07-14", "Dallas"),
    (98, "2026-07-15", "Atlanta"),
    (99, "2026-07-16", "New York / New Jersey"),
    (100, "2026-07-16", "Los Angeles"),
    (101, "2026-07-18", "Dallas"),
    (102, "2026-07-18", "Atlanta"),
    (103, "2026-07-18", "Miami"), // 3rd place play-off
    (104, "2026-07-19", "New York / New Jersey"), // Final
];

pub static MATCHES: Lazy<Vec<Match>> = Lazy::new(|| {
    let by_city: HashMap<&str, &Stadium> =
        STADIUMS.iter().map(|s| (s.city.as_str(), s)).collect();

    SCHEDULE
        .iter()
        .filter_map(|&(id, date, city)| {
            let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            let kickoff = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?);
            let venue = by_city.get(city);
            Some(Match {
                id,
                group: "TBD".to_string(),
                team_a: Team::placeholder(),
                team_b: Team::placeholder(),
                date: kickoff,
                stadium: venue
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "TBD Stadium".to_string()),
                city: city.to_string(),
                country: venue
                    .map(|s| s.country.clone())
                    .unwrap_or_else(|| "TBD".to_string()),
                score_a: None,
                score_b: None,
                status: MatchStatus::Scheduled,
            })
        })
        .collect()
});
