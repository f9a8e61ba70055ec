use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::daily::pick_daily_target;
use crate::normalize::normalize_name;
use crate::proximity::ProximityBand;
use crate::registry::MunicipalityRegistry;

/// One accepted guess. Immutable once recorded; the history is
/// append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub display_name: String,
    pub distance_meters: f64,
    pub band: ProximityBand,
}

/// Result of an accepted guess, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub guess: Guess,
    pub is_won: bool,
    /// Target display name, revealed only on the winning guess.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Rejected guess. None of these mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess is empty after trimming")]
    EmptyGuess,
    #[error("{name} was already guessed this session")]
    DuplicateGuess { name: String },
    #[error("{name} is not a known municipality")]
    UnknownMunicipality { name: String },
    #[error("the game is already won")]
    GameAlreadyWon,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewGameError {
    #[error("no municipalities available to pick a daily target from")]
    EmptyRegistry,
}

/// State of one day's play-through: the secret target, the ordered
/// guess history, and the win flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub date: NaiveDate,
    pub target_key: String,
    pub target_display_name: String,
    pub guesses: Vec<Guess>,
    pub is_won: bool,
}

impl GameSession {
    /// Fresh session for `date`: derives the sorted key list, picks the
    /// day's target deterministically, resolves its display name.
    ///
    /// Replaying the same date against the same registry reproduces the
    /// same target, so a lost session can always be restarted mid-day.
    pub fn start(date: NaiveDate, registry: &MunicipalityRegistry) -> Result<Self, NewGameError> {
        let sorted_keys = registry.sorted_keys();
        let target_key = pick_daily_target(&sorted_keys, date)
            .ok_or(NewGameError::EmptyRegistry)?
            .to_string();
        let target_display_name = registry
            .lookup(&target_key)
            .map(|entry| entry.display_name.clone())
            .ok_or(NewGameError::EmptyRegistry)?;

        Ok(Self {
            date,
            target_key,
            target_display_name,
            guesses: Vec::new(),
            is_won: false,
        })
    }

    /// Evaluate one raw guess against this session.
    ///
    /// Order matters: won-check, trim, duplicate, registry lookup,
    /// distance, band. A failed step leaves the session untouched; an
    /// accepted guess is appended and may flip `is_won`.
    pub fn evaluate_guess(
        &mut self,
        registry: &MunicipalityRegistry,
        raw: &str,
    ) -> Result<GuessOutcome, GuessError> {
        if self.is_won {
            return Err(GuessError::GameAlreadyWon);
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GuessError::EmptyGuess);
        }

        let key = normalize_name(trimmed);
        if self
            .guesses
            .iter()
            .any(|guess| normalize_name(&guess.display_name) == key)
        {
            return Err(GuessError::DuplicateGuess {
                name: trimmed.to_string(),
            });
        }

        let Some(entry) = registry.lookup(&key) else {
            return Err(GuessError::UnknownMunicipality {
                name: trimmed.to_string(),
            });
        };
        let target = registry
            .lookup(&self.target_key)
            .expect("target key always resolves in the registry it was picked from");

        let distance_meters = entry.position.distance_to(&target.position);
        let is_correct = key == self.target_key;
        // Exact match wins the Correct band even if centroid rounding
        // left the computed distance nonzero.
        let band = if is_correct {
            ProximityBand::Correct
        } else {
            ProximityBand::classify(distance_meters)
        };

        let guess = Guess {
            display_name: entry.display_name.clone(),
            distance_meters,
            band,
        };
        self.guesses.push(guess.clone());
        if is_correct {
            self.is_won = true;
        }

        Ok(GuessOutcome {
            guess,
            is_won: self.is_won,
            target: self.is_won.then(|| self.target_display_name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{GameSession, GuessError, NewGameError};
    use crate::geo::GeoPoint;
    use crate::proximity::ProximityBand;
    use crate::registry::{MunicipalityFeature, MunicipalityRegistry};

    fn feature(name: &str, lat: f64, lon: f64) -> MunicipalityFeature {
        MunicipalityFeature {
            display_name: name.to_string(),
            position: GeoPoint::new(lat, lon),
        }
    }

    fn registry(features: Vec<MunicipalityFeature>) -> MunicipalityRegistry {
        MunicipalityRegistry::build(features).0
    }

    fn any_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid test date")
    }

    /// Session whose target is forced to `target` regardless of what the
    /// daily selector would pick for the date.
    fn session_targeting(registry: &MunicipalityRegistry, target: &str) -> GameSession {
        let mut session = GameSession::start(any_date(), registry).expect("non-empty registry");
        let entry = registry.lookup(target).expect("target exists");
        session.target_key = target.to_string();
        session.target_display_name = entry.display_name.clone();
        session
    }

    #[test]
    fn start_fails_on_empty_registry() {
        let registry = registry(vec![]);
        assert_eq!(
            GameSession::start(any_date(), &registry),
            Err(NewGameError::EmptyRegistry)
        );
    }

    #[test]
    fn start_is_reproducible_for_the_same_date() {
        let registry = registry(vec![
            feature("Alegrete", -29.78, -55.79),
            feature("Bagé", -31.33, -54.10),
            feature("Canoas", -29.92, -51.18),
        ]);

        let a = GameSession::start(any_date(), &registry).expect("start");
        let b = GameSession::start(any_date(), &registry).expect("start");
        assert_eq!(a.target_key, b.target_key);
        assert_eq!(a.target_display_name, b.target_display_name);
        assert!(a.guesses.is_empty() && !a.is_won);
    }

    #[test]
    fn exact_target_guess_wins_with_correct_band_despite_accents_and_case() {
        let registry = registry(vec![
            feature("Porto Alegre", -30.03, -51.23),
            feature("Viamão", -30.08, -51.02),
        ]);
        let mut session = session_targeting(&registry, "PORTO ALEGRE");

        let outcome = session.evaluate_guess(&registry, "porto alegre").expect("accepted");
        assert_eq!(outcome.guess.band, ProximityBand::Correct);
        assert!(outcome.is_won);
        assert_eq!(outcome.target.as_deref(), Some("Porto Alegre"));
        assert!(session.is_won);
    }

    #[test]
    fn near_guess_gets_distance_band_and_no_target_reveal() {
        let registry = registry(vec![
            feature("Porto Alegre", -30.03, -51.23),
            feature("Viamão", -30.08, -51.02),
        ]);
        let mut session = session_targeting(&registry, "PORTO ALEGRE");

        let outcome = session.evaluate_guess(&registry, "Viamão").expect("accepted");
        assert_eq!(outcome.guess.band, ProximityBand::VeryClose);
        assert!(outcome.guess.distance_meters > 0.0);
        assert!(!outcome.is_won);
        assert_eq!(outcome.target, None);
        assert_eq!(session.guesses.len(), 1);
    }

    #[test]
    fn empty_guess_is_rejected_without_state_change() {
        let registry = registry(vec![feature("Canoas", -29.92, -51.18)]);
        let mut session = session_targeting(&registry, "CANOAS");

        assert_eq!(session.evaluate_guess(&registry, "   "), Err(GuessError::EmptyGuess));
        assert!(session.guesses.is_empty());
    }

    #[test]
    fn duplicate_guess_is_rejected_even_with_different_spelling() {
        let registry = registry(vec![
            feature("Porto Alegre", -30.03, -51.23),
            feature("São Leopoldo", -29.76, -51.15),
        ]);
        let mut session = session_targeting(&registry, "PORTO ALEGRE");

        session.evaluate_guess(&registry, "São Leopoldo").expect("first accepted");
        let result = session.evaluate_guess(&registry, "SAO LEOPOLDO");
        assert_eq!(
            result,
            Err(GuessError::DuplicateGuess {
                name: "SAO LEOPOLDO".to_string(),
            })
        );
        assert_eq!(session.guesses.len(), 1);
    }

    #[test]
    fn unknown_municipality_is_rejected_without_state_change() {
        let registry = registry(vec![feature("Canoas", -29.92, -51.18)]);
        let mut session = session_targeting(&registry, "CANOAS");

        let result = session.evaluate_guess(&registry, "Atlantis");
        assert_eq!(
            result,
            Err(GuessError::UnknownMunicipality {
                name: "Atlantis".to_string(),
            })
        );
        assert!(session.guesses.is_empty());
    }

    #[test]
    fn no_guesses_accepted_after_winning() {
        let registry = registry(vec![
            feature("A", 0.0, 0.0),
            feature("B", 0.0, 1.0),
            feature("C", 1.0, 0.0),
        ]);
        let mut session = session_targeting(&registry, "A");

        let b = session.evaluate_guess(&registry, "B").expect("accepted");
        // ~111km of longitude at the equator.
        assert_eq!(b.guess.band, ProximityBand::Far);

        let a = session.evaluate_guess(&registry, "A").expect("accepted");
        assert_eq!(a.guess.band, ProximityBand::Correct);
        assert!(a.is_won);

        assert_eq!(session.evaluate_guess(&registry, "C"), Err(GuessError::GameAlreadyWon));
        assert_eq!(session.guesses.len(), 2);
    }
}
