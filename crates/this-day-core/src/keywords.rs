//! Keyword tables for event enrichment.
//!
//! Every table is an ordered slice evaluated first-match-wins: the position
//! of an entry is its priority. Keywords are lowercase substrings matched
//! against the lowercased event text, so stems like `"войн"` cover every
//! inflection of the word. Matching is containment, not whole-word.

use crate::models::Category;

/// Category keyword sets in priority order.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::War,
        &[
            "войн", "битв", "сражен", "вторжен", "осад", "армия", "армии", "капитуляц",
            "перемири", "war", "battle", "invasion", "siege", "army", "surrender",
        ],
    ),
    (
        Category::Politics,
        &[
            "президент", "выбор", "парламент", "правительств", "революц", "договор",
            "конституц", "декларац", "независим", "коронац", "указ", "манифест", "president",
            "election", "parliament", "government", "revolution", "treaty", "constitution",
            "declaration", "independence", "coronation",
        ],
    ),
    (
        Category::Science,
        &[
            "открыт", "изобрет", "учёны", "ученый", "учёный", "научн", "космо", "спутник",
            "телескоп", "вакцин", "discover", "invent", "scientist", "scientific", "space",
            "satellite", "telescope", "vaccine",
        ],
    ),
    (
        Category::Art,
        &[
            "картин", "художник", "живопис", "скульптур", "выставк", "музей", "театр",
            "painting", "painter", "artist", "sculpture", "exhibition", "museum", "theatre",
            "theater",
        ],
    ),
    (
        Category::Literature,
        &[
            "роман", "писател", "поэт", "книг", "литератур", "стихотворен", "novel", "writer",
            "poet", "book", "literat",
        ],
    ),
    (
        Category::Music,
        &[
            "музык", "композитор", "оперы", "оперн", "концерт", "симфон", "music", "composer",
            "opera", "concert", "symphon",
        ],
    ),
    (
        Category::Sport,
        &[
            "олимпи", "чемпионат", "матч", "спорт", "футбол", "хоккей", "рекорд мира", "olympic",
            "championship", "sport", "football", "hockey",
        ],
    ),
];

/// Country keyword sets in priority order, keyed by canonical country name.
pub const COUNTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "russia",
        &[
            "росси", "русск", "москв", "петербург", "ссср", "советск", "russia", "moscow",
            "soviet", "ussr",
        ],
    ),
    (
        "usa",
        &[
            "сша", "америк", "вашингтон", "нью-йорк", "united states", "america", "washington",
            "new york",
        ],
    ),
    ("france", &["франц", "париж", "france", "french", "paris"]),
    ("germany", &["герман", "немец", "немецк", "берлин", "germany", "german", "berlin"]),
    (
        "uk",
        &[
            "британ", "англи", "лондон", "шотланд", "britain", "british", "england", "english",
            "london",
        ],
    ),
    ("china", &["кита", "пекин", "china", "chinese", "beijing"]),
    ("japan", &["япон", "токио", "japan", "japanese", "tokyo"]),
];

/// Keywords that mark an event as global in reach.
pub const GLOBAL_KEYWORDS: &[&str] = &[
    "миров", "всемирн", "международн", "глобальн", "оон", "объединённых наций",
    "объединенных наций", "world", "international", "global", "united nations",
];

/// Keywords that mark an event as regional in reach.
pub const REGIONAL_KEYWORDS: &[&str] = &[
    "европ", "азии", "азия", "африк", "балкан", "ближн", "регион", "europe", "asia", "africa",
    "balkan", "region",
];

/// Keywords that mark an event as national in reach.
pub const NATIONAL_KEYWORDS: &[&str] = &[
    "национальн", "страны", "государств", "республик", "королевств", "national", "country",
    "kingdom", "republic",
];

/// Each keyword found adds half a point of importance.
pub const IMPORTANCE_KEYWORDS: &[&str] = &[
    "война", "революц", "открыт", "изобрет", "основан", "независим", "впервые", "первый",
    "импери", "договор", "war", "revolution", "discover", "invent", "founded", "independence",
    "first", "empire", "treaty",
];

/// Upper bounds (exclusive) of each historical period, in order.
pub const ANCIENT_END: i64 = 476;
pub const MEDIEVAL_END: i64 = 1453;
pub const RENAISSANCE_END: i64 = 1789;
pub const MODERN_END: i64 = 1914;

/// Events at most this many years old count as recent.
pub const RECENT_AGE: i64 = 100;
/// Events at most this many years old still get a partial recency bonus.
pub const HISTORIC_AGE: i64 = 500;

/// Probability that a recent event with no scale keyword is global.
pub const RECENT_GLOBAL_CHANCE: f64 = 0.3;
/// Probability that an older event with no scale keyword is regional.
pub const OLDER_REGIONAL_CHANCE: f64 = 0.5;

/// Return the label of the first entry whose keyword set matches `text`.
///
/// `text` must already be lowercased.
pub fn first_match<'a, L: Copy>(table: &'a [(L, &'a [&'a str])], text: &str) -> Option<L> {
    table
        .iter()
        .find(|(_, words)| contains_any(text, words))
        .map(|(label, _)| *label)
}

/// True if any keyword is a substring of `text`.
pub fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}
