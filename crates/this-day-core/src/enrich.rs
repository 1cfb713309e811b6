//! Event enrichment: derive category, country, scale, period, and
//! importance for each raw event.
//!
//! All classification is a keyword-substring heuristic over the lowercased
//! event text (see [`crate::keywords`]) plus simple year arithmetic. The
//! only non-deterministic step is the scale fallback for events whose text
//! carries no scale keyword; its randomness source is injected so callers
//! can pin it.
//!
//! # Importance
//!
//! ```text
//! score = 1
//!       + 0.5 × (number of importance keywords found)
//!       + 1    if age ≤ 100
//!         0.5  if age ≤ 500
//!         0    otherwise
//! importance = clamp(round_half_up(score), 1, 5)
//! ```
//!
//! The score is tracked in half-point units so rounding is exact.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::keywords::{
    self, ANCIENT_END, CATEGORY_KEYWORDS, COUNTRY_KEYWORDS, GLOBAL_KEYWORDS, HISTORIC_AGE,
    IMPORTANCE_KEYWORDS, MEDIEVAL_END, MODERN_END, NATIONAL_KEYWORDS, OLDER_REGIONAL_CHANCE,
    RECENT_AGE, RECENT_GLOBAL_CHANCE, REGIONAL_KEYWORDS, RENAISSANCE_END,
};
use crate::models::{Category, EnrichedEvent, Metadata, Period, RawEvent, Scale, UNKNOWN_COUNTRY};

/// How to pick a scale for an event whose text has no scale keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleFallback {
    /// Recent: 30% global / 70% national. Older: 50% regional / 50% local.
    #[default]
    Random,
    /// Recent: national. Older: local.
    Fixed,
}

/// Derives [`Metadata`] for raw events.
///
/// Holds the reference year used for age calculations and the random
/// source for the scale fallback.
pub struct Enricher<R: RngCore = SmallRng> {
    current_year: i64,
    fallback: ScaleFallback,
    rng: R,
}

impl Enricher<SmallRng> {
    /// An enricher with an entropy-seeded random source.
    pub fn from_entropy(current_year: i64, fallback: ScaleFallback) -> Self {
        Self::with_rng(current_year, fallback, SmallRng::from_entropy())
    }
}

impl<R: RngCore> Enricher<R> {
    pub fn with_rng(current_year: i64, fallback: ScaleFallback, rng: R) -> Self {
        Self {
            current_year,
            fallback,
            rng,
        }
    }

    /// Enrich a batch. Order-preserving and one-to-one.
    pub fn enrich(&mut self, events: &[RawEvent]) -> Vec<EnrichedEvent> {
        events.iter().map(|e| self.enrich_one(e)).collect()
    }

    pub fn enrich_one(&mut self, event: &RawEvent) -> EnrichedEvent {
        let text = event.text.to_lowercase();
        let metadata = Metadata {
            category: infer_category(&text),
            country: infer_country(&text).to_string(),
            scale: self.infer_scale(&text, event.year),
            period: infer_period(event.year),
            importance: infer_importance(&text, event.year, self.current_year),
        };
        EnrichedEvent {
            event: event.clone(),
            metadata,
        }
    }

    /// Scale from keywords, falling back to the recency heuristic.
    ///
    /// `text` must already be lowercased.
    pub fn infer_scale(&mut self, text: &str, year: i64) -> Scale {
        if let Some(scale) = scale_from_keywords(text) {
            return scale;
        }
        let recent = age(year, self.current_year) <= RECENT_AGE;
        match (self.fallback, recent) {
            (ScaleFallback::Random, true) => {
                if self.rng.gen_bool(RECENT_GLOBAL_CHANCE) {
                    Scale::Global
                } else {
                    Scale::National
                }
            }
            (ScaleFallback::Random, false) => {
                if self.rng.gen_bool(OLDER_REGIONAL_CHANCE) {
                    Scale::Regional
                } else {
                    Scale::Local
                }
            }
            (ScaleFallback::Fixed, true) => Scale::National,
            (ScaleFallback::Fixed, false) => Scale::Local,
        }
    }
}

/// Category by first keyword-set hit in priority order; `Other` if none.
///
/// `text` must already be lowercased.
pub fn infer_category(text: &str) -> Category {
    keywords::first_match(CATEGORY_KEYWORDS, text).unwrap_or(Category::Other)
}

/// Canonical country name by first keyword-set hit; `"unknown"` if none.
///
/// `text` must already be lowercased.
pub fn infer_country(text: &str) -> &'static str {
    keywords::first_match(COUNTRY_KEYWORDS, text).unwrap_or(UNKNOWN_COUNTRY)
}

/// The keyword-determined scale, if the text carries one.
pub fn scale_from_keywords(text: &str) -> Option<Scale> {
    if keywords::contains_any(text, GLOBAL_KEYWORDS) {
        Some(Scale::Global)
    } else if keywords::contains_any(text, REGIONAL_KEYWORDS) {
        Some(Scale::Regional)
    } else if keywords::contains_any(text, NATIONAL_KEYWORDS) {
        Some(Scale::National)
    } else {
        None
    }
}

/// Step function of the year; lower bound inclusive, upper exclusive.
pub fn infer_period(year: i64) -> Period {
    if year < ANCIENT_END {
        Period::Ancient
    } else if year < MEDIEVAL_END {
        Period::Medieval
    } else if year < RENAISSANCE_END {
        Period::Renaissance
    } else if year < MODERN_END {
        Period::Modern
    } else {
        Period::Contemporary
    }
}

/// Years between `year` and `current_year`, saturating at the `i64` bounds.
fn age(year: i64, current_year: i64) -> i64 {
    current_year.saturating_sub(year)
}

/// Importance score in `1..=5`.
///
/// `text` must already be lowercased.
pub fn infer_importance(text: &str, year: i64, current_year: i64) -> u8 {
    // Half-point units: base score 1 is 2 halves.
    let keyword_halves = IMPORTANCE_KEYWORDS
        .iter()
        .filter(|w| text.contains(*w))
        .count() as i64;
    let elapsed = age(year, current_year);
    let age_halves = if elapsed <= RECENT_AGE {
        2
    } else if elapsed <= HISTORIC_AGE {
        1
    } else {
        0
    };
    let halves = 2 + keyword_halves + age_halves;
    // Round half up, like Math.round on a positive score.
    let rounded = (halves + 1) / 2;
    rounded.clamp(1, 5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// Always rolls 0, so every `gen_bool(p)` with `p > 0` is true.
    fn low_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Always rolls the maximum, so every `gen_bool(p)` with `p < 1` is false.
    fn high_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn enricher(rng: StepRng) -> Enricher<StepRng> {
        Enricher::with_rng(2026, ScaleFallback::Random, rng)
    }

    #[test]
    fn test_period_boundaries() {
        let cases = [
            (475, Period::Ancient),
            (476, Period::Medieval),
            (1452, Period::Medieval),
            (1453, Period::Renaissance),
            (1788, Period::Renaissance),
            (1789, Period::Modern),
            (1913, Period::Modern),
            (1914, Period::Contemporary),
        ];
        for (year, expected) in cases {
            assert_eq!(infer_period(year), expected, "year {}", year);
        }
    }

    #[test]
    fn test_period_negative_year_is_ancient() {
        assert_eq!(infer_period(-44), Period::Ancient);
    }

    #[test]
    fn test_category_priority() {
        // War outranks politics even though both match.
        assert_eq!(infer_category("мирный договор положил конец войне"), Category::War);
        assert_eq!(infer_category("принята конституция"), Category::Politics);
        assert_eq!(infer_category("премьера оперы в большом театре"), Category::Art);
        assert_eq!(infer_category("родился кот"), Category::Other);
    }

    #[test]
    fn test_country_inference() {
        assert_eq!(infer_country("основан город в россии"), "russia");
        assert_eq!(infer_country("конгресс сша принял закон"), "usa");
        assert_eq!(infer_country("в токио открылся музей"), "japan");
        assert_eq!(infer_country("наводнение"), UNKNOWN_COUNTRY);
    }

    #[test]
    fn test_scale_keywords_take_precedence() {
        let mut e = enricher(low_rng());
        assert_eq!(e.infer_scale("началась мировая война", 1939), Scale::Global);
        assert_eq!(e.infer_scale("конференция в европе", 1200), Scale::Regional);
        assert_eq!(e.infer_scale("провозглашена республика", 1200), Scale::National);
    }

    #[test]
    fn test_scale_random_fallback_recent() {
        assert_eq!(enricher(low_rng()).infer_scale("событие", 2000), Scale::Global);
        assert_eq!(enricher(high_rng()).infer_scale("событие", 2000), Scale::National);
    }

    #[test]
    fn test_scale_random_fallback_older() {
        assert_eq!(enricher(low_rng()).infer_scale("событие", 1500), Scale::Regional);
        assert_eq!(enricher(high_rng()).infer_scale("событие", 1500), Scale::Local);
    }

    #[test]
    fn test_scale_fixed_fallback() {
        let mut e = Enricher::with_rng(2026, ScaleFallback::Fixed, low_rng());
        assert_eq!(e.infer_scale("событие", 2000), Scale::National);
        assert_eq!(e.infer_scale("событие", 1500), Scale::Local);
    }

    #[test]
    fn test_scale_seeded_rng_stays_in_bracket() {
        let mut e = Enricher::with_rng(2026, ScaleFallback::Random, SmallRng::seed_from_u64(7));
        for _ in 0..50 {
            let recent = e.infer_scale("событие", 1990);
            assert!(matches!(recent, Scale::Global | Scale::National));
            let older = e.infer_scale("событие", 1100);
            assert!(matches!(older, Scale::Regional | Scale::Local));
        }
    }

    #[test]
    fn test_importance_war_keyword_mid_age() {
        // 1 + 0.5 (keyword) + 0.5 (age 107) = 2
        assert_eq!(infer_importance("война", 1943, 2050), 2);
    }

    #[test]
    fn test_importance_rounds_half_up() {
        // 1 + 0.5 (keyword) + 1 (recent) = 2.5 → 3
        assert_eq!(infer_importance("началась война", 2000, 2026), 3);
        // 1 + 0 + 0.5 = 1.5 → 2
        assert_eq!(infer_importance("событие", 1700, 2026), 2);
    }

    #[test]
    fn test_importance_ancient_no_keywords_is_one() {
        assert_eq!(infer_importance("событие", 100, 2026), 1);
    }

    #[test]
    fn test_importance_keywords_stack_and_clamp() {
        let text = "первый договор о независимости империи после революции и войны: война";
        let score = infer_importance(text, 2000, 2026);
        assert_eq!(score, 5);
    }

    #[test]
    fn test_importance_always_in_range() {
        let texts = ["", "война", "revolution war empire first treaty founded invent"];
        for text in texts {
            for year in [-500, 0, 476, 1500, 1900, 2020, 2100] {
                let s = infer_importance(text, year, 2026);
                assert!((1..=5).contains(&s), "score {} for {:?}/{}", s, text, year);
            }
        }
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let events = vec![
            RawEvent::new(i64::MIN, "событие"),
            RawEvent::new(i64::MAX, "событие"),
        ];
        let enriched = enricher(low_rng()).enrich(&events);
        let oldest = &enriched[0].metadata;
        assert_eq!(oldest.period, Period::Ancient);
        assert_eq!(oldest.scale, Scale::Regional);
        assert_eq!(oldest.importance, 1);
        let future = &enriched[1].metadata;
        assert_eq!(future.period, Period::Contemporary);
        assert_eq!(future.scale, Scale::Global);
        assert_eq!(future.importance, 2);

        assert_eq!(infer_importance("война", i64::MIN, i64::MAX), 1);
        assert_eq!(infer_importance("событие", i64::MAX, i64::MIN), 2);
    }

    #[test]
    fn test_enrich_preserves_order_and_count() {
        let events = vec![
            RawEvent::new(1863, "Авраам Линкольн подписал Прокламацию об освобождении рабов в США"),
            RawEvent::new(1942, "Подписана Декларация Объединённых Наций"),
            RawEvent::new(1000, "Событие"),
        ];
        let enriched = enricher(high_rng()).enrich(&events);
        assert_eq!(enriched.len(), 3);
        for (raw, e) in events.iter().zip(enriched.iter()) {
            assert_eq!(&e.event, raw);
        }
        assert_eq!(enriched[0].metadata.country, "usa");
        assert_eq!(enriched[0].metadata.period, Period::Modern);
        assert_eq!(enriched[1].metadata.scale, Scale::Global);
        assert_eq!(enriched[1].metadata.category, Category::Politics);
        assert_eq!(enriched[2].metadata.scale, Scale::Local);
    }

    #[test]
    fn test_enrich_lowercases_before_matching() {
        let events = vec![RawEvent::new(1812, "БОРОДИНСКОЕ СРАЖЕНИЕ")];
        let enriched = enricher(low_rng()).enrich(&events);
        assert_eq!(enriched[0].metadata.category, Category::War);
    }
}
