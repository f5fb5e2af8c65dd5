use crate::detection::domain::embedding_provider::FaceObservation;
use crate::recognition::domain::gallery::Gallery;
use crate::recognition::domain::identity::Identity;

/// Outcome of matching one observed face against the gallery.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchResult {
    Identified { name: String, distance: f32 },
    Unknown,
}

impl MatchResult {
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchResult::Identified { name, .. } => Some(name),
            MatchResult::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, MatchResult::Unknown)
    }
}

/// Closest identity to `observation` with its distance, regardless of tolerance.
///
/// Exact ties go to the identity that comes first in gallery order.
pub fn nearest_identity<'g>(
    observation: &FaceObservation,
    gallery: &'g Gallery,
) -> Option<(&'g Identity, f32)> {
    let mut best: Option<(&Identity, f32)> = None;
    for identity in gallery.identities() {
        let distance = identity.min_distance(&observation.embedding);
        let closer = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => !distance.is_nan(),
        };
        if closer {
            best = Some((identity, distance));
        }
    }
    best
}

/// Decides whether `observation` is a known identity.
///
/// Lower `tolerance` is stricter. An empty gallery always yields `Unknown`.
pub fn match_face(observation: &FaceObservation, gallery: &Gallery, tolerance: f32) -> MatchResult {
    match nearest_identity(observation, gallery) {
        Some((identity, distance)) if distance <= tolerance => MatchResult::Identified {
            name: identity.name().to_string(),
            distance,
        },
        _ => MatchResult::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::DEFAULT_TOLERANCE;
    use crate::shared::embedding::Embedding;
    use crate::shared::region::Region;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn observation(values: &[f32]) -> FaceObservation {
        FaceObservation {
            region: Region {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
                confidence: 0.9,
            },
            embedding: Embedding::new(values.to_vec()),
        }
    }

    fn gallery(entries: &[(&str, &[&[f32]])]) -> Gallery {
        Gallery::new(
            entries
                .iter()
                .map(|(name, refs)| {
                    Identity::new(
                        *name,
                        refs.iter().map(|r| Embedding::new(r.to_vec())).collect(),
                    )
                    .unwrap()
                })
                .collect(),
        )
        .unwrap()
    }

    fn alice_gallery() -> Gallery {
        gallery(&[("Alice", &[&[0.0, 0.0]])])
    }

    #[test]
    fn test_close_face_is_identified() {
        let result = match_face(&observation(&[0.3, 0.0]), &alice_gallery(), DEFAULT_TOLERANCE);
        match result {
            MatchResult::Identified { name, distance } => {
                assert_eq!(name, "Alice");
                assert_relative_eq!(distance, 0.3, epsilon = 1e-6);
            }
            MatchResult::Unknown => panic!("expected Alice"),
        }
    }

    #[test]
    fn test_distant_face_is_unknown() {
        let result = match_face(&observation(&[0.7, 0.0]), &alice_gallery(), DEFAULT_TOLERANCE);
        assert_eq!(result, MatchResult::Unknown);
    }

    #[test]
    fn test_distance_equal_to_tolerance_is_accepted() {
        let result = match_face(&observation(&[0.5, 0.0]), &alice_gallery(), 0.5);
        assert_eq!(result.name(), Some("Alice"));
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.55)]
    #[case(10.0)]
    #[case(f32::MAX)]
    fn test_empty_gallery_is_always_unknown(#[case] tolerance: f32) {
        let result = match_face(&observation(&[0.0, 0.0]), &Gallery::empty(), tolerance);
        assert!(result.is_unknown());
    }

    #[test]
    fn test_picks_globally_closest_identity() {
        let g = gallery(&[
            ("Alice", &[&[1.0, 0.0]]),
            ("Bob", &[&[0.0, 1.0], &[0.2, 0.1]]),
            ("Carol", &[&[0.5, 0.5]]),
        ]);
        let result = match_face(&observation(&[0.2, 0.0]), &g, 1.0);
        match result {
            MatchResult::Identified { name, distance } => {
                assert_eq!(name, "Bob");
                assert_relative_eq!(distance, 0.1, epsilon = 1e-6);
            }
            MatchResult::Unknown => panic!("expected Bob"),
        }
    }

    #[test]
    fn test_exact_tie_goes_to_first_identity() {
        let g = gallery(&[("Zoe", &[&[1.0, 0.0]]), ("Adam", &[&[-1.0, 0.0]])]);
        let result = match_face(&observation(&[0.0, 0.0]), &g, 2.0);
        assert_eq!(result.name(), Some("Zoe"));

        let reversed = gallery(&[("Adam", &[&[-1.0, 0.0]]), ("Zoe", &[&[1.0, 0.0]])]);
        let result = match_face(&observation(&[0.0, 0.0]), &reversed, 2.0);
        assert_eq!(result.name(), Some("Adam"));
    }

    #[test]
    fn test_nan_embedding_is_unknown() {
        let result = match_face(&observation(&[f32::NAN, 0.0]), &alice_gallery(), 10.0);
        assert!(result.is_unknown());
    }

    #[test]
    fn test_acceptance_is_monotonic_in_tolerance() {
        let g = gallery(&[
            ("Alice", &[&[0.0, 0.0]]),
            ("Bob", &[&[1.0, 1.0], &[0.9, 1.2]]),
        ]);
        let tolerances = [0.0, 0.1, 0.3, 0.55, 0.8, 1.2, 2.0];
        let queries: [&[f32]; 5] = [&[0.0, 0.0], &[0.2, 0.1], &[0.6, 0.6], &[1.0, 0.8], &[3.0, 3.0]];

        for query in queries {
            let obs = observation(query);
            for pair in tolerances.windows(2) {
                let strict = match_face(&obs, &g, pair[0]);
                let loose = match_face(&obs, &g, pair[1]);
                if let Some(name) = strict.name() {
                    assert_eq!(loose.name(), Some(name), "query {query:?} at {pair:?}");
                }
            }
        }
    }

    #[test]
    fn test_nearest_identity_ignores_tolerance() {
        let g = alice_gallery();
        let (identity, distance) = nearest_identity(&observation(&[3.0, 4.0]), &g).unwrap();
        assert_eq!(identity.name(), "Alice");
        assert_relative_eq!(distance, 5.0, epsilon = 1e-6);
    }
}
