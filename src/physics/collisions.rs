//! Inelastic mergers of overlapping bodies.
//!
//! A body swallows every other body whose centre lies closer than
//! `factor * radius` of the *absorbing* body. Only the absorber's radius
//! counts, so a large body reaches further than a small one.
//!
//! Merging runs in two phases so the outcome does not depend on where bodies
//! sit in the collection:
//!
//! 1. [`plan_merges`] reads a snapshot of the collection. It visits bodies from
//!    heaviest to lightest, ties broken by [`BodyId`], and records who absorbs
//!    whom. Radii are those at the start of the tick.
//! 2. [`apply_merges`] folds each group into its final survivor and then
//!    removes every absorbed body in one pass.
//!
//! An absorber that is later absorbed itself hands its whole group to its
//! own absorber.

use crate::components::{Body, BodyId};
use crate::error::SimulationError;
use crate::physics::math::Scalar;

/// Fraction of the absorber's radius inside which another body is swallowed
pub const DEFAULT_MERGE_DISTANCE_FACTOR: Scalar = 0.8;

/// One body fused into another during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Merge {
    pub survivor: BodyId,
    pub absorbed: BodyId,
}

/// Absorption decisions taken from one snapshot of a body collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// `(absorber, absorbed)` index pairs in decision order
    absorptions: Vec<(usize, usize)>,
    /// Length of the collection the plan was taken from
    collection_len: usize,
}

impl MergePlan {
    pub fn is_empty(&self) -> bool {
        self.absorptions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.absorptions.len()
    }
}

/// Heaviest first, then lowest id. Depends only on body content, never on storage order.
fn canonical_order(bodies: &[Body]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..bodies.len()).collect();
    order.sort_by(|&a, &b| {
        bodies[b]
            .mass()
            .total_cmp(&bodies[a].mass())
            .then_with(|| bodies[a].id().cmp(&bodies[b].id()))
    });
    order
}

/// Decides which bodies merge this tick without touching the collection.
pub fn plan_merges(bodies: &[Body], factor: Scalar) -> MergePlan {
    let order = canonical_order(bodies);
    let mut absorbed = vec![false; bodies.len()];
    let mut absorptions = Vec::new();

    for &a in &order {
        if absorbed[a] {
            continue;
        }

        let threshold = factor * bodies[a].radius();

        for &b in &order {
            if b == a || absorbed[b] {
                continue;
            }

            if bodies[a].distance_to(&bodies[b]) < threshold {
                absorbed[b] = true;
                absorptions.push((a, b));
            }
        }
    }

    MergePlan {
        absorptions,
        collection_len: bodies.len(),
    }
}

/// Follows absorption links to the body that survives the whole chain.
fn survivor_of(mut index: usize, absorbed_by: &[Option<usize>]) -> usize {
    while let Some(next) = absorbed_by[index] {
        index = next;
    }
    index
}

/// Applies a plan produced by [`plan_merges`] for this same collection.
///
/// Every absorbed body contributes its own start-of-tick mass and momentum to
/// the final survivor of its chain. Absorbed bodies are then removed, and
/// survivors keep their relative order.
pub fn apply_merges(bodies: &mut Vec<Body>, plan: &MergePlan) -> Result<Vec<Merge>, SimulationError> {
    if plan.is_empty() {
        return Ok(Vec::new());
    }

    let len = bodies.len();
    if plan.collection_len != len {
        return Err(SimulationError::CollectionMutationHazard {
            index: plan.collection_len.saturating_sub(1),
            len,
        });
    }

    let mut absorbed_by: Vec<Option<usize>> = vec![None; len];
    for &(absorber, absorbed) in &plan.absorptions {
        if absorber >= len || absorbed >= len {
            return Err(SimulationError::CollectionMutationHazard {
                index: absorber.max(absorbed),
                len,
            });
        }
        absorbed_by[absorbed] = Some(absorber);
    }

    let mut merges = Vec::with_capacity(plan.absorptions.len());
    for &(_, absorbed) in &plan.absorptions {
        let survivor = survivor_of(absorbed, &absorbed_by);
        let swallowed = bodies[absorbed].clone();

        bodies[survivor].absorb(&swallowed)?;
        merges.push(Merge {
            survivor: bodies[survivor].id(),
            absorbed: swallowed.id(),
        });
    }

    let mut index = 0;
    bodies.retain(|_| {
        let keep = absorbed_by[index].is_none();
        index += 1;
        keep
    });

    Ok(merges)
}

/// Plans and applies this tick's merges in one call.
pub fn resolve_merges(bodies: &mut Vec<Body>, factor: Scalar) -> Result<Vec<Merge>, SimulationError> {
    let plan = plan_merges(bodies, factor);
    apply_merges(bodies, &plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::math::Vector;

    fn body(id: u32, mass: Scalar, x: Scalar, vx: Scalar) -> Body {
        Body::new(mass, Vector::new(x, 0.0), Vector::new(vx, 0.0))
            .unwrap()
            .with_id(BodyId(id))
    }

    #[test]
    fn test_distant_bodies_do_not_merge() {
        let mut bodies = vec![body(0, 1000.0, 0.0, 0.0), body(1, 1000.0, 100.0, 0.0)];

        let merges = resolve_merges(&mut bodies, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        assert!(merges.is_empty());
        assert_eq!(bodies.len(), 2);
    }

    #[test]
    fn test_equal_masses_opposite_velocities() {
        // radius 2 each, threshold 1.6
        let mut bodies = vec![body(0, 10.0, 0.0, 2.0), body(1, 10.0, 1.0, -2.0)];

        let merges = resolve_merges(&mut bodies, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        assert_eq!(
            merges,
            vec![Merge {
                survivor: BodyId(0),
                absorbed: BodyId(1)
            }]
        );
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].mass(), 20.0);
        assert_eq!(bodies[0].velocity, Vector::ZERO);
    }

    #[test]
    fn test_threshold_uses_absorber_radius_only() {
        // Heavy body radius 10 reaches 8 units; the light one (radius 1) would not reach it
        let mut bodies = vec![body(0, 1.0, 7.5, 0.0), body(1, 1000.0, 0.0, 0.0)];

        let merges = resolve_merges(&mut bodies, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].survivor, BodyId(1));
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].id(), BodyId(1));
        assert_eq!(bodies[0].mass(), 1001.0);
    }

    #[test]
    fn test_just_outside_threshold_survives() {
        let mut bodies = vec![body(0, 1000.0, 0.0, 0.0), body(1, 1.0, 8.0, 0.0)];

        let merges = resolve_merges(&mut bodies, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        assert!(merges.is_empty());
    }

    #[test]
    fn test_heavy_body_absorbs_several() {
        let mut bodies = vec![
            body(0, 2.0, 3.0, 0.0),
            body(1, 1000.0, 0.0, 0.0),
            body(2, 3.0, -4.0, 0.0),
            body(3, 4.0, 50.0, 0.0),
        ];

        let merges = resolve_merges(&mut bodies, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        assert_eq!(merges.len(), 2);
        assert!(merges.iter().all(|m| m.survivor == BodyId(1)));
        let ids: Vec<BodyId> = bodies.iter().map(Body::id).collect();
        assert_eq!(ids, vec![BodyId(1), BodyId(3)]);
        assert_eq!(bodies[0].mass(), 1005.0);
    }

    #[test]
    fn test_equal_heavyweights_resolved_by_id() {
        // Ids 0 and 2 share mass 125 (radius 5, reach 4); the lower id acts first
        let mut bodies = vec![
            body(0, 125.0, 0.0, 1.0),
            body(1, 1.0, 3.0, 0.0),
            body(2, 125.0, -3.5, -1.0),
        ];

        let merges = resolve_merges(&mut bodies, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        assert_eq!(merges.len(), 2);
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].id(), BodyId(0));
        assert_eq!(bodies[0].mass(), 251.0);
        assert!(bodies[0].momentum().length() < 1e-12);
    }

    #[test]
    fn test_result_independent_of_storage_order() {
        let original = vec![
            body(0, 50.0, 0.0, 1.0),
            body(1, 8.0, 2.0, -1.0),
            body(2, 27.0, 30.0, 0.5),
            body(3, 1.0, 31.0, 2.0),
            body(4, 64.0, 60.0, 0.0),
        ];
        let mut forward = original.clone();
        let mut reversed: Vec<Body> = original.iter().rev().cloned().collect();

        let mut merges_forward = resolve_merges(&mut forward, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();
        let mut merges_reversed =
            resolve_merges(&mut reversed, DEFAULT_MERGE_DISTANCE_FACTOR).unwrap();

        merges_forward.sort_by_key(|m| m.absorbed);
        merges_reversed.sort_by_key(|m| m.absorbed);
        assert_eq!(merges_forward, merges_reversed);

        forward.sort_by_key(Body::id);
        reversed.sort_by_key(Body::id);
        assert_eq!(forward.len(), reversed.len());
        for (a, b) in forward.iter().zip(&reversed) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.mass(), b.mass());
            assert_eq!(a.velocity, b.velocity);
        }
    }

    #[test]
    fn test_plan_from_other_collection_is_rejected() {
        let bodies = vec![body(0, 10.0, 0.0, 0.0), body(1, 10.0, 0.5, 0.0)];
        let plan = plan_merges(&bodies, DEFAULT_MERGE_DISTANCE_FACTOR);
        assert_eq!(plan.len(), 1);

        let mut shorter = vec![body(0, 10.0, 0.0, 0.0)];
        let result = apply_merges(&mut shorter, &plan);

        assert!(matches!(
            result,
            Err(SimulationError::CollectionMutationHazard { .. })
        ));
        assert_eq!(shorter.len(), 1);
    }
}
