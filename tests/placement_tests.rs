use battleship_sim::{
    deploy_fleet, find_blocks, find_runs, place_ship, CellState, Coord, FleetConfig,
    FleetRegistry, GameError, Grid, Orientation, ShipSpec,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn test_runs_on_empty_grid() {
    let grid = Grid::new(4, 3).unwrap();
    let horizontal = find_runs(&grid, 3, Orientation::Horizontal);
    assert_eq!(
        horizontal,
        vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(2, 0),
            Coord::new(2, 1)
        ]
    );
    let vertical = find_runs(&grid, 3, Orientation::Vertical);
    assert_eq!(vertical.len(), 4);
    assert!(vertical.iter().all(|c| c.row == 0));
    // longer than the grid is tall
    assert!(find_runs(&grid, 4, Orientation::Vertical).is_empty());
}

#[test]
fn test_runs_avoid_ships() {
    let mut grid = Grid::new(5, 1).unwrap();
    let mut registry = FleetRegistry::new();
    place_ship(
        &mut grid,
        &mut registry,
        "Buoy",
        1,
        Coord::new(0, 2),
        Orientation::Single,
    )
    .unwrap();
    assert_eq!(
        find_runs(&grid, 2, Orientation::Horizontal),
        vec![Coord::new(0, 0), Coord::new(0, 3)]
    );
    assert!(find_runs(&grid, 3, Orientation::Horizontal).is_empty());
    // single-cell ships ignore orientation
    assert_eq!(
        find_runs(&grid, 1, Orientation::Vertical),
        find_runs(&grid, 1, Orientation::Horizontal)
    );
    assert_eq!(find_runs(&grid, 1, Orientation::Single).len(), 4);
}

#[test]
fn test_blocks_match_predicate() {
    let mut grid = Grid::new(4, 4).unwrap();
    grid.set_cell(Coord::new(1, 1), CellState::Miss).unwrap();
    let open = |s: CellState| !s.is_fired();
    let blocks = find_blocks(&grid, 2, 2, open);
    // every 2x2 square except those covering (1, 1)
    assert_eq!(blocks.len(), 9 - 4);
    assert!(!blocks.contains(&Coord::new(0, 0)));
    assert!(blocks.contains(&Coord::new(2, 2)));
    assert!(blocks.contains(&Coord::new(0, 2)));
    assert!(find_blocks(&grid, 5, 1, open).is_empty());
    assert!(find_blocks(&grid, 0, 1, open).is_empty());
    assert_eq!(find_blocks(&grid, 4, 2, open), vec![Coord::new(2, 0)]);
}

#[test]
fn test_place_ship_validation() {
    let mut grid = Grid::new(10, 10).unwrap();
    let mut registry = FleetRegistry::new();
    let id = place_ship(
        &mut grid,
        &mut registry,
        "Destroyer",
        2,
        Coord::new(3, 4),
        Orientation::Horizontal,
    )
    .unwrap();
    assert_eq!(
        registry.instance(id).unwrap().cells(),
        &[Coord::new(3, 4), Coord::new(3, 5)]
    );
    assert_eq!(
        grid.cell_at(Coord::new(3, 5)).unwrap(),
        CellState::Occupied(id)
    );

    let overlap = place_ship(
        &mut grid,
        &mut registry,
        "Cruiser",
        3,
        Coord::new(1, 5),
        Orientation::Vertical,
    );
    assert_eq!(
        overlap.unwrap_err(),
        GameError::ShipOverlaps {
            ship: "Cruiser".into(),
            coord: Coord::new(3, 5)
        }
    );
    let outside = place_ship(
        &mut grid,
        &mut registry,
        "Cruiser",
        3,
        Coord::new(0, 8),
        Orientation::Horizontal,
    );
    assert!(matches!(outside, Err(GameError::OutOfBounds { .. })));
    let wrong_length = place_ship(
        &mut grid,
        &mut registry,
        "Destroyer",
        3,
        Coord::new(0, 0),
        Orientation::Horizontal,
    );
    assert!(matches!(wrong_length, Err(GameError::InvalidFleet { .. })));
    // failed placements leave nothing behind
    assert_eq!(registry.ship_count(), 1);
    assert_eq!(grid.count(|s| matches!(s, CellState::Occupied(_))), 2);
}

fn assert_legal_layout(grid: &Grid, registry: &FleetRegistry, fleet: &FleetConfig) {
    let mut seen = HashSet::new();
    for ship in registry.instances() {
        let cells = ship.cells();
        for w in cells.windows(2) {
            let (a, b) = (w[0], w[1]);
            let contiguous = match ship.orientation() {
                Orientation::Horizontal => a.row == b.row && b.col == a.col + 1,
                Orientation::Vertical => a.col == b.col && b.row == a.row + 1,
                Orientation::Single => false,
            };
            assert!(contiguous, "{} is not contiguous: {:?}", ship.name(), cells);
        }
        for &c in cells {
            assert!(grid.contains(c));
            assert!(seen.insert(c), "overlap at {}", c);
            assert_eq!(grid.cell_at(c).unwrap(), CellState::Occupied(ship.id()));
        }
    }
    assert_eq!(seen.len(), fleet.total_cells());
    for spec in fleet.ships() {
        let class = registry.class(spec.name()).unwrap();
        assert_eq!(class.length(), spec.length());
        assert_eq!(class.quantity(), spec.quantity());
        assert_eq!(class.instances().len(), spec.quantity());
    }
    registry.check_invariants().unwrap();
}

#[test]
fn test_deploy_standard_and_classic_fleets() {
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        for fleet in [FleetConfig::standard(), FleetConfig::classic()] {
            let mut grid = Grid::new(10, 10).unwrap();
            let registry = deploy_fleet(&mut grid, &fleet, &mut rng).unwrap();
            assert_legal_layout(&grid, &registry, &fleet);
        }
    }
}

#[test]
fn test_deploy_on_narrow_grid_uses_other_orientation() {
    let fleet = FleetConfig::new(vec![ShipSpec::new("Frigate", 3, 2)]);
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new(1, 8).unwrap();
        let registry = deploy_fleet(&mut grid, &fleet, &mut rng).unwrap();
        assert!(registry
            .instances()
            .all(|s| s.orientation() == Orientation::Vertical));
        assert_legal_layout(&grid, &registry, &fleet);
    }
}

#[test]
fn test_deploy_infeasible() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut grid = Grid::new(3, 3).unwrap();
    let fleet = FleetConfig::new(vec![ShipSpec::new("Cruiser", 3, 4)]);
    let err = deploy_fleet(&mut grid, &fleet, &mut rng).unwrap_err();
    assert_eq!(
        err,
        GameError::PlacementInfeasible {
            ship: "Cruiser".into(),
            length: 3
        }
    );
    // the grid is untouched on failure
    assert!(grid.cells().all(|(_, s)| s == CellState::Empty));

    let too_long = FleetConfig::new(vec![ShipSpec::new("Carrier", 5, 1)]);
    assert!(matches!(
        deploy_fleet(&mut grid, &too_long, &mut rng),
        Err(GameError::InvalidFleet { .. })
    ));
}

#[test]
fn test_origin_selection_is_uniform() {
    // a 4x1 strip fits a length-2 ship at three origins
    let fleet = FleetConfig::new(vec![ShipSpec::new("Patrol", 2, 1)]);
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut counts = [0usize; 3];
    let trials = 3000;
    for _ in 0..trials {
        let mut grid = Grid::new(4, 1).unwrap();
        let registry = deploy_fleet(&mut grid, &fleet, &mut rng).unwrap();
        let ship = registry.instances().next().unwrap();
        counts[ship.cells()[0].col] += 1;
    }
    for count in counts {
        assert!(
            (850..=1150).contains(&count),
            "origin counts not uniform: {:?}",
            counts
        );
    }
}
