// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end tests for the extension driver.
//!
//! These run complete extension rounds for small N and check the structural
//! properties every child must have, for each supported design type.

mod common;

use conference_search::candidates::{candidate_count, generate_candidates};
use conference_search::design::create_restricted_root;
use conference_search::filter::{CandidateFilterChain, FilterConfig};
use conference_search::search::exhaustive_double_extensions;
use conference_search::{
    select_classes, ConferenceType, Counter, DesignParameters, ExtendOptions, ExtensionDriver,
    IsomorphismType, Matrix, Statistics,
};
use std::collections::HashSet;

fn driver(params: DesignParameters) -> ExtensionDriver {
    ExtensionDriver::new(params, ExtendOptions::default()).unwrap()
}

fn double_params(n: usize, columns: usize, j1zero: bool, j3zero: bool) -> DesignParameters {
    DesignParameters::with_options(
        n,
        columns,
        ConferenceType::Double,
        IsomorphismType::Full,
        j1zero,
        j3zero,
    )
    .unwrap()
}

#[test]
fn test_n6_third_column_single_class() {
    let levels = driver(DesignParameters::new(6, 3).unwrap()).run(None).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].columns, 3);
    assert!(levels[0].extensions >= 1);
    assert_eq!(levels[0].representatives.len(), 1);
    common::assert_conference(&levels[0].representatives[0]);
}

#[test]
fn test_every_level_holds_distinct_partial_conference_matrices() {
    let levels = driver(DesignParameters::new(8, 8).unwrap()).run(None).unwrap();
    assert!(!levels.is_empty());
    for level in &levels {
        for m in &level.representatives {
            assert_eq!(m.columns(), level.columns);
            common::assert_conference(m);
        }
        let (again, _) = select_classes(&level.representatives, IsomorphismType::Full).unwrap();
        assert_eq!(again.len(), level.representatives.len());
    }
}

#[test]
fn test_candidate_lists_are_orthogonal_to_root() {
    for n in [8, 10, 12, 14] {
        let root = DesignParameters::new(n, 3).unwrap().root();
        for kz in 2..n {
            let candidates = generate_candidates(n, kz).unwrap();
            assert_eq!(candidates.len() as u64, candidate_count(n, kz).unwrap());
            for c in &candidates {
                assert_eq!(c[0], 1);
                assert_eq!(c[kz], 0);
                assert_eq!(c.iter().filter(|&&x| x == 0).count(), 1);
                assert!(root.with_column(c).has_orthogonal_columns(), "N={} kz={}", n, kz);
            }
        }
    }
}

#[test]
fn test_filter_chain_is_idempotent() {
    let params = DesignParameters::new(10, 4).unwrap();
    let level3 = driver(params).extend(&[params.root()]).unwrap();
    for parent in level3.iter().take(4) {
        let chain = CandidateFilterChain::new(parent, &FilterConfig::for_design(&params));
        let mut stats = Statistics::new();
        for kz in 3..10 {
            let once = chain.filter(&generate_candidates(10, kz).unwrap(), &mut stats);
            assert_eq!(chain.filter(&once, &mut stats), once);
        }
    }
}

#[test]
fn test_double_children_have_two_zeros() {
    let params = double_params(8, 3, false, false);
    let (children, stats) = driver(params)
        .extend_with_statistics(&[params.root()])
        .unwrap();
    assert!(!children.is_empty());
    assert_eq!(stats.get(Counter::Accepted), children.len() as u64);
    for child in &children {
        assert!(child.has_orthogonal_columns());
        assert!(child.column(1)[0] >= 0);
        for c in 0..child.columns() {
            assert_eq!(child.count_in_column(c, 0), 2);
        }
    }
}

#[test]
fn test_branch_and_bound_matches_exhaustive_n10() {
    let params = double_params(10, 3, false, true);
    let d = driver(params);
    let level2 = d.extend(&[params.root()]).unwrap();
    assert!(!level2.is_empty());
    for parent in level2.iter().take(5) {
        let found: HashSet<Vec<i8>> = d
            .extend(std::slice::from_ref(parent))
            .unwrap()
            .iter()
            .map(|child| child.column(2).to_vec())
            .collect();
        let chain = CandidateFilterChain::new(parent, &FilterConfig::for_design(&params));
        let reference: HashSet<Vec<i8>> =
            exhaustive_double_extensions(parent, &chain, false, &mut Statistics::new())
                .into_iter()
                .collect();
        assert_eq!(found, reference);
    }
}

#[test]
fn test_restricted_second_columns() {
    let n = 8;
    let params = DesignParameters::with_options(
        n,
        2,
        ConferenceType::Normal,
        IsomorphismType::Restricted,
        false,
        false,
    )
    .unwrap();
    let d = driver(params);
    assert_eq!(d.strategy_name(), "restricted");
    let roots: Vec<Matrix> = (1..n).map(|ones| create_restricted_root(n, ones)).collect();
    for root in &roots {
        let children = d.extend(std::slice::from_ref(root)).unwrap();
        for child in &children {
            assert_eq!(&child.column(1)[..2], &[1, 0]);
            assert!(child.has_orthogonal_columns());
        }
    }
    let levels = d.run(Some(vec![create_restricted_root(n, 3)])).unwrap();
    assert_eq!(levels.len(), 1);
    assert!(!levels[0].representatives.is_empty());
    assert!(levels[0].representatives.len() <= levels[0].extensions);
}

#[test]
fn test_diagonal_zeros_on_diagonal() {
    let params = DesignParameters::with_options(
        8,
        4,
        ConferenceType::Diagonal,
        IsomorphismType::Full,
        false,
        false,
    )
    .unwrap();
    let levels = driver(params).run(None).unwrap();
    for level in &levels {
        for m in &level.representatives {
            for c in 0..m.columns() {
                assert_eq!(m.at(c, c), 0, "column {} zero off the diagonal", c);
            }
            common::assert_conference(m);
        }
    }
}
