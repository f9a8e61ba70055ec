use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::normalize::normalize_name;

/// One municipality as supplied by the data layer: display name straight
/// from the dataset plus a representative position (bounds center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityFeature {
    pub display_name: String,
    pub position: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub display_name: String,
    pub position: GeoPoint,
}

/// Data-quality report from [`MunicipalityRegistry::build`]: either two
/// source features collided on the same normalized key (last one won)
/// or a feature's name normalized to nothing and was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildDiagnostic {
    DuplicateKey {
        key: String,
        kept: String,
        discarded: String,
    },
    UnusableName {
        display_name: String,
    },
}

/// Read-only lookup table from normalized municipality names to display
/// name + position. Built once per data load.
#[derive(Debug, Clone, Default)]
pub struct MunicipalityRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl MunicipalityRegistry {
    /// Build the registry, normalizing every display name. Duplicate
    /// normalized keys resolve last-write-wins; collisions and skipped
    /// features come back as diagnostics for the caller to log.
    pub fn build(features: Vec<MunicipalityFeature>) -> (Self, Vec<BuildDiagnostic>) {
        let mut entries: HashMap<String, RegistryEntry> = HashMap::with_capacity(features.len());
        let mut diagnostics = Vec::new();

        for feature in features {
            let key = normalize_name(&feature.display_name);
            if key.is_empty() {
                diagnostics.push(BuildDiagnostic::UnusableName {
                    display_name: feature.display_name,
                });
                continue;
            }

            let entry = RegistryEntry {
                display_name: feature.display_name,
                position: feature.position,
            };
            if let Some(previous) = entries.insert(key.clone(), entry) {
                let kept = entries[&key].display_name.clone();
                diagnostics.push(BuildDiagnostic::DuplicateKey {
                    key,
                    kept,
                    discarded: previous.display_name,
                });
            }
        }

        (Self { entries }, diagnostics)
    }

    pub fn lookup(&self, key: &str) -> Option<&RegistryEntry> {
        self.entries.get(key)
    }

    /// Normalized keys in stable lexicographic order, the selector's
    /// input. Byte-wise `Ord` is enough because normalization already
    /// folded away the accents that made locale collation matter.
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Display names in the same order as [`sorted_keys`], for
    /// autocomplete lists.
    pub fn sorted_display_names(&self) -> Vec<String> {
        self.sorted_keys()
            .iter()
            .filter_map(|key| self.entries.get(key))
            .map(|entry| entry.display_name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BuildDiagnostic, MunicipalityFeature, MunicipalityRegistry};
    use crate::geo::GeoPoint;

    fn feature(name: &str, lat: f64, lon: f64) -> MunicipalityFeature {
        MunicipalityFeature {
            display_name: name.to_string(),
            position: GeoPoint::new(lat, lon),
        }
    }

    #[test]
    fn lookup_is_accent_and_case_insensitive_via_normalized_keys() {
        let (registry, diagnostics) =
            MunicipalityRegistry::build(vec![feature("São Borja", -28.66, -56.00)]);
        assert!(diagnostics.is_empty());

        let entry = registry.lookup("SAO BORJA").expect("normalized key resolves");
        assert_eq!(entry.display_name, "São Borja");
    }

    #[test]
    fn duplicate_normalized_keys_last_write_wins_with_diagnostic() {
        let (registry, diagnostics) = MunicipalityRegistry::build(vec![
            feature("Santa Maria", -29.68, -53.80),
            feature("SANTA MARIA", -29.70, -53.81),
        ]);

        assert_eq!(registry.len(), 1);
        let entry = registry.lookup("SANTA MARIA").expect("key resolves");
        assert_eq!(entry.display_name, "SANTA MARIA");
        assert_eq!(entry.position, GeoPoint::new(-29.70, -53.81));

        assert_eq!(
            diagnostics,
            vec![BuildDiagnostic::DuplicateKey {
                key: "SANTA MARIA".to_string(),
                kept: "SANTA MARIA".to_string(),
                discarded: "Santa Maria".to_string(),
            }]
        );
    }

    #[test]
    fn blank_names_are_skipped_with_diagnostic() {
        let (registry, diagnostics) = MunicipalityRegistry::build(vec![
            feature("  ", 0.0, 0.0),
            feature("Ijuí", -28.39, -53.91),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            diagnostics,
            vec![BuildDiagnostic::UnusableName {
                display_name: "  ".to_string(),
            }]
        );
    }

    #[test]
    fn sorted_keys_are_lexicographic_and_stable() {
        let (registry, _) = MunicipalityRegistry::build(vec![
            feature("Torres", -29.33, -49.73),
            feature("Alegrete", -29.78, -55.79),
            feature("Bagé", -31.33, -54.10),
        ]);

        assert_eq!(registry.sorted_keys(), vec!["ALEGRETE", "BAGE", "TORRES"]);
        assert_eq!(
            registry.sorted_display_names(),
            vec!["Alegrete", "Bagé", "Torres"]
        );
    }
}
