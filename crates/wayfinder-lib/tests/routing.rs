mod common;

use wayfinder_lib::{
    build_graph, find_route_dijkstra, find_route_linear_scan, Catalog, EdgeKind, Error, Navigator,
    PathConstraints, RouteAlgorithm, RouteRequest, SynthesisPolicy, WiringPolicy,
};

use common::{location, path_cost, sorted_ids, three_floor_catalog};

fn reference() -> Navigator {
    Navigator::reference().expect("reference building")
}

#[test]
fn classroom_to_classroom_across_floors() {
    let navigator = reference();

    let open = navigator.compute_route("809", "1001", false).expect("route");
    assert_eq!(open.total_seconds, 127);
    assert_eq!(open.path.first().map(String::as_str), Some("809"));
    assert_eq!(open.path.last().map(String::as_str), Some("1001"));
    assert_eq!(path_cost(navigator.graph(), &open.path), open.total_seconds);

    let accessible = navigator.compute_route("809", "1001", true).expect("route");
    assert_eq!(accessible.total_seconds, 157);
    assert_eq!(
        path_cost(navigator.graph(), &accessible.path),
        accessible.total_seconds
    );
}

#[test]
fn accessible_route_between_elevators_never_uses_stairs() {
    let navigator = reference();
    let result = navigator.compute_route("8E1", "10E1", true).expect("route");

    assert_eq!(result.path, vec!["8E1", "9E1", "10E1"]);
    assert_eq!(result.total_seconds, 80);
    for pair in result.path.windows(2) {
        let edge = navigator.graph().edge_between(&pair[0], &pair[1]).unwrap();
        assert_eq!(edge.kind, EdgeKind::Elevator);
    }
}

#[test]
fn unconstrained_route_picks_cheaper_vertical_option() {
    let navigator = reference();
    // Stair detour costs 10 + 10 + 25 + 25 + 10 + 10 = 90 against 80 by elevator.
    let result = navigator.compute_route("8E1", "10E1", false).expect("route");
    assert_eq!(result.total_seconds, 80);

    let fast_stairs = WiringPolicy {
        stair_hop_seconds: 5,
        ..WiringPolicy::default()
    };
    let navigator = Navigator::with_policies(
        Catalog::reference_building(),
        fast_stairs,
        SynthesisPolicy::default(),
    )
    .expect("navigator");

    let open = navigator.compute_route("8E1", "10E1", false).expect("route");
    assert_eq!(open.total_seconds, 50);
    let uses_stairs = open.path.windows(2).any(|pair| {
        navigator.graph().edge_between(&pair[0], &pair[1]).unwrap().kind == EdgeKind::Stairs
    });
    assert!(uses_stairs);

    let accessible = navigator.compute_route("8E1", "10E1", true).expect("route");
    assert_eq!(accessible.total_seconds, 80);
}

#[test]
fn same_start_and_goal_is_zero_cost() {
    let navigator = reference();
    for accessible in [false, true] {
        let result = navigator.compute_route("9SR", "9SR", accessible).expect("route");
        assert_eq!(result.path, vec!["9SR"]);
        assert_eq!(result.total_seconds, 0);
    }
}

#[test]
fn route_properties_hold_for_every_pair() {
    let navigator = reference();
    let graph = navigator.graph();
    let catalog = navigator.catalog();
    let ids = sorted_ids(catalog);

    for start in &ids {
        for goal in &ids {
            let open = find_route_dijkstra(graph, catalog, start, goal, &PathConstraints::default());
            let accessible =
                find_route_dijkstra(graph, catalog, start, goal, &PathConstraints::accessible());

            assert!(open.is_found(), "{start} -> {goal} unreachable");
            assert!(accessible.is_found(), "{start} -> {goal} unreachable");
            assert_eq!(open.path.first(), Some(start));
            assert_eq!(open.path.last(), Some(goal));
            assert_eq!(path_cost(graph, &open.path), open.total_seconds);
            assert_eq!(path_cost(graph, &accessible.path), accessible.total_seconds);
            assert!(accessible.total_seconds >= open.total_seconds);

            for pair in accessible.path.windows(2) {
                let edge = graph.edge_between(&pair[0], &pair[1]).unwrap();
                assert_ne!(edge.kind, EdgeKind::Stairs, "{start} -> {goal} used stairs");
            }
        }
    }
}

#[test]
fn costs_are_symmetric() {
    let navigator = reference();
    let ids = sorted_ids(navigator.catalog());

    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            for accessible in [false, true] {
                let forward = navigator.compute_route(a, b, accessible).expect("route");
                let backward = navigator.compute_route(b, a, accessible).expect("route");
                assert_eq!(
                    forward.total_seconds, backward.total_seconds,
                    "{a} <-> {b} (accessible: {accessible})"
                );
            }
        }
    }
}

#[test]
fn heap_and_linear_scan_agree() {
    let navigator = reference();
    let graph = navigator.graph();
    let catalog = navigator.catalog();
    let ids = sorted_ids(catalog);

    for start in ids.iter().step_by(3) {
        for goal in &ids {
            for constraints in [PathConstraints::default(), PathConstraints::accessible()] {
                let heap = find_route_dijkstra(graph, catalog, start, goal, &constraints);
                let scan = find_route_linear_scan(graph, catalog, start, goal, &constraints);
                assert_eq!(heap.total_seconds, scan.total_seconds, "{start} -> {goal}");
                assert_eq!(path_cost(graph, &scan.path), scan.total_seconds);
            }
        }
    }
}

#[test]
fn repeated_queries_are_identical() {
    let navigator = reference();
    let first = navigator.compute_route("807", "10C", false).expect("route");
    let second = navigator.compute_route("807", "10C", false).expect("route");
    assert_eq!(first, second);
}

#[test]
fn stairs_only_building_is_unreachable_when_accessible() {
    let mut locations = Vec::new();
    for floor in 1..=2 {
        locations.push(location(&format!("{floor}H"), floor, 0.0, 0.0, &["intersection"]));
        locations.push(location(&format!("{floor}R"), floor, 10.0, 0.0, &["classroom"]));
        locations.push(common::landing(&format!("{floor}S"), floor, &["stairs"], "S"));
    }
    let navigator = Navigator::new(Catalog::new(locations).expect("catalog")).expect("navigator");

    let open = navigator.compute_route("1R", "2R", false).expect("route");
    assert_eq!(open.total_seconds, 6 + 10 + 25 + 10 + 6);

    let accessible = navigator.compute_route("1R", "2R", true).expect("route");
    assert!(accessible.path.is_empty());
    assert_eq!(accessible.total_seconds, 0);

    // The stairwell landing itself is still reachable on the same floor.
    let landing = navigator.compute_route("1R", "1S", true).expect("route");
    assert_eq!(landing.total_seconds, 16);
}

#[test]
fn disconnected_stair_chain_is_never_selected_when_accessible() {
    let navigator = Navigator::new(three_floor_catalog()).expect("navigator");
    let result = navigator.compute_route("1E1", "3E1", true).expect("route");
    assert_eq!(result.path, vec!["1E1", "2E1", "3E1"]);
    assert_eq!(result.total_seconds, 80);
}

#[test]
fn iteration_cap_yields_unreachable() {
    let catalog = Catalog::reference_building();
    let graph = build_graph(&catalog).expect("graph");
    let constraints = PathConstraints {
        accessible_only: false,
        max_iterations: 1,
    };

    let heap = find_route_dijkstra(&graph, &catalog, "809", "1001", &constraints);
    assert!(!heap.is_found());
    let scan = find_route_linear_scan(&graph, &catalog, "809", "1001", &constraints);
    assert!(!scan.is_found());
}

#[test]
fn unknown_location_is_an_error_with_suggestions() {
    let navigator = reference();
    let error = navigator
        .compute_route("8E3", "1001", false)
        .expect_err("unknown start");
    match error {
        Error::UnknownLocation { id, suggestions } => {
            assert_eq!(id, "8E3");
            assert!(suggestions.contains(&"8E1".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn plan_records_request_options() {
    let navigator = reference();
    let request = RouteRequest::new("801", "903")
        .accessible()
        .with_algorithm(RouteAlgorithm::LinearScan);
    let plan = navigator.plan(&request).expect("plan");

    assert_eq!(plan.algorithm, RouteAlgorithm::LinearScan);
    assert!(plan.accessible_only);
    assert_eq!(plan.start, "801");
    assert_eq!(plan.goal, "903");
    assert!(plan.is_found());
    assert_eq!(plan.hop_count(), plan.steps.len() - 1);
    assert_eq!(plan.result().total_seconds, plan.total_seconds);
}
