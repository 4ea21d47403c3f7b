use solar_weather::math::*;

#[test]
fn test_lin_interp() {
    assert_eq!(lin_interp(1.0, 3.0, 0.5), 2.0);
    assert_eq!(lin_interp(0.0, 10.0, 0.25), 2.5);
    assert_eq!(lin_interp(5.0, 15.0, 0.0), 5.0);
    assert_eq!(lin_interp(5.0, 15.0, 1.0), 15.0);
    // Weights outside [0, 1] extrapolate
    assert_eq!(lin_interp(5.0, 15.0, 2.0), 25.0);
}

#[test]
fn test_bilin_interp() {
    assert_eq!(bilin_interp(1.0, 2.0, 3.0, 4.0, 0.5, 0.5), 2.5);
    assert_eq!(bilin_interp(0.0, 1.0, 2.0, 3.0, 0.0, 0.0), 0.0);
    assert_eq!(bilin_interp(0.0, 1.0, 2.0, 3.0, 1.0, 1.0), 3.0);
    // One step along x reaches f10, one step along y reaches f01
    assert_eq!(bilin_interp(0.0, 1.0, 2.0, 3.0, 1.0, 0.0), 2.0);
    assert_eq!(bilin_interp(0.0, 1.0, 2.0, 3.0, 0.0, 1.0), 1.0);
}

#[test]
fn test_midpoint() {
    assert_eq!(midpoint(2.0, 4.0), 3.0);
    assert_eq!(midpoint(-1.0, 1.0), 0.0);
    assert_eq!(midpoint(0.1_f64, 0.7), midpoint(0.7_f64, 0.1));
}

#[test]
fn test_find_grid_indices() {
    let coords = vec![10.0, 20.0, 30.0, 40.0, 50.0];

    // Interior point
    let (i0, i1, weight) = find_grid_indices(&coords, 25.0, BoundaryPolicy::Extrapolate);
    assert_eq!(i0, 1);
    assert_eq!(i1, 2);
    assert!((weight - 0.5).abs() < 1e-10);

    // Exactly on an interior node
    assert_eq!(
        find_grid_indices(&coords, 30.0, BoundaryPolicy::Extrapolate),
        (2, 3, 0.0)
    );

    // Exactly on the first and last nodes
    assert_eq!(
        find_grid_indices(&coords, 10.0, BoundaryPolicy::Clamp),
        (0, 1, 0.0)
    );
    assert_eq!(
        find_grid_indices(&coords, 50.0, BoundaryPolicy::Extrapolate),
        (4, 4, 0.0)
    );
}

#[test]
fn test_find_grid_indices_clamp() {
    let coords = vec![10.0, 20.0, 30.0, 40.0, 50.0];

    assert_eq!(
        find_grid_indices(&coords, 5.0, BoundaryPolicy::Clamp),
        (0, 0, 0.0)
    );
    assert_eq!(
        find_grid_indices(&coords, 55.0, BoundaryPolicy::Clamp),
        (4, 4, 0.0)
    );
}

#[test]
fn test_find_grid_indices_extrapolate() {
    let coords = vec![10.0, 20.0, 30.0, 40.0, 50.0];

    let (i0, i1, weight) = find_grid_indices(&coords, 5.0, BoundaryPolicy::Extrapolate);
    assert_eq!((i0, i1), (0, 1));
    assert!((weight + 0.5).abs() < 1e-10);

    let (i0, i1, weight) = find_grid_indices(&coords, 55.0, BoundaryPolicy::Extrapolate);
    assert_eq!((i0, i1), (3, 4));
    assert!((weight - 1.5).abs() < 1e-10);

    // Extrapolated value continues the edge segment
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert!((lin_interp(values[i0], values[i1], weight) - 5.5).abs() < 1e-10);
}

#[test]
fn test_find_grid_indices_single_node() {
    let coords = vec![42.0];
    for target in [0.0, 42.0, 100.0] {
        for policy in [BoundaryPolicy::Extrapolate, BoundaryPolicy::Clamp] {
            assert_eq!(find_grid_indices(&coords, target, policy), (0, 0, 0.0));
        }
    }
}

#[test]
fn test_boundary_policy_round_trips_through_text() {
    for policy in [BoundaryPolicy::Extrapolate, BoundaryPolicy::Clamp] {
        assert_eq!(policy.to_string().parse::<BoundaryPolicy>(), Ok(policy));
    }
    assert!(" CLAMP ".parse::<BoundaryPolicy>().is_ok());
    assert!("nearest".parse::<BoundaryPolicy>().is_err());
}
