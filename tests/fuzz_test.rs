/// Fuzzes the search strategies on many random terrain grids, checking them against each other and
/// against the connected components of the grid.
use rand::prelude::*;
use terrain_pathfinding::solver::astar::astar;
use terrain_pathfinding::solver::bfs::bfs;
use terrain_pathfinding::solver::bidirectional::bidirectional;
use terrain_pathfinding::solver::dfs::dfs;
use terrain_pathfinding::solver::dijkstra::dijkstra;
use terrain_pathfinding::*;

const WEIGHTED: [Terrain; 5] = [
    Terrain::Normal,
    Terrain::Sand,
    Terrain::Forest,
    Terrain::Water,
    Terrain::Mountain,
];

fn random_grid(n: usize, rng: &mut StdRng, wall_density: f64, weighted: bool) -> PathingGrid {
    let mut grid = PathingGrid::new(n, n).unwrap();
    for cell in grid.cells().collect::<Vec<_>>() {
        if grid.is_start(cell) || grid.is_finish(cell) {
            continue;
        }
        let terrain = if rng.gen_bool(wall_density) {
            Terrain::Wall
        } else if weighted {
            *WEIGHTED.choose(rng).unwrap()
        } else {
            Terrain::Normal
        };
        grid.set_terrain(cell, terrain).unwrap();
    }
    grid.update();
    grid
}

fn visualize_grid(grid: &PathingGrid, path: &[Cell]) {
    for row in 0..grid.rows() {
        let line = (0..grid.cols())
            .map(|col| {
                let cell = Cell::new(row, col);
                if grid.is_start(cell) {
                    'S'
                } else if grid.is_finish(cell) {
                    'F'
                } else if path.contains(&cell) {
                    '*'
                } else {
                    grid.terrain(cell).symbol()
                }
            })
            .collect::<String>();
        println!("{line}");
    }
}

fn assert_contiguous(grid: &PathingGrid, path: &[Cell]) {
    assert_eq!(path.first(), Some(&grid.start()));
    assert_eq!(path.last(), Some(&grid.finish()));
    assert!(path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
    assert!(path.iter().all(|&c| !grid.is_wall(c)));
}

#[test]
fn fuzz_found_matches_components() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng, 0.35, true);
        let reachable = grid.reachable(grid.start(), grid.finish());
        for strategy in Strategy::ALL {
            let outcome = strategy.run(&grid, grid.start(), grid.finish()).unwrap();
            // Show the grid if the strategy disagrees with the components
            if outcome.found() != reachable {
                println!("{strategy} disagrees with components (reachable: {reachable})");
                visualize_grid(&grid, &[]);
            }
            assert_eq!(outcome.found(), reachable);
            // The backward frontier always starts at the finish, and hierarchical search only
            // examines waypoint segments
            if !matches!(strategy, Strategy::Bidirectional | Strategy::Hierarchical) {
                assert_eq!(
                    outcome.visited().contains(&grid.finish()),
                    reachable,
                    "{strategy}"
                );
            }
            if reachable {
                assert_contiguous(&grid, &outcome.path());
            }
        }
    }
}

#[test]
fn fuzz_weighted_costs() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng, 0.2, true);
        let (start, finish) = (grid.start(), grid.finish());
        if grid.unreachable(start, finish) {
            continue;
        }
        let d = dijkstra(&grid, start, finish).unwrap();
        let a = astar(&grid, start, finish).unwrap();
        if a.cost() != d.cost() {
            println!("Dijkstra cost: {:?}; A* cost: {:?}", d.cost(), a.cost());
            visualize_grid(&grid, &a.path());
        }
        assert_eq!(a.cost(), d.cost());
        assert_eq!(path_cost(&grid, &a.path()), a.cost());
        assert_eq!(path_cost(&grid, &d.path()), d.cost());
        assert!(a.visited.len() <= d.visited.len());
        for strategy in Strategy::ALL {
            let path = strategy.run(&grid, start, finish).unwrap().path();
            let cost = path_cost(&grid, &path).unwrap();
            if strategy.cost_optimal() {
                assert_eq!(Some(cost), d.cost(), "{strategy}");
            } else {
                assert!(Some(cost) >= d.cost(), "{strategy}");
            }
        }
    }
}

#[test]
fn fuzz_unweighted_lengths() {
    const N: usize = 9;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng, 0.3, false);
        let (start, finish) = (grid.start(), grid.finish());
        if grid.unreachable(start, finish) {
            continue;
        }
        let expected = bfs(&grid, start, finish).unwrap().path().len();
        assert_eq!(dijkstra(&grid, start, finish).unwrap().path().len(), expected);
        assert_eq!(astar(&grid, start, finish).unwrap().path().len(), expected);
        let bi = bidirectional(&grid, start, finish).unwrap().path();
        if bi.len() != expected {
            visualize_grid(&grid, &bi);
        }
        assert_eq!(bi.len(), expected);
    }
}

#[test]
fn fuzz_dfs_stays_in_component() {
    const N: usize = 10;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng, 0.4, true);
        let start = grid.start();
        let t = dfs(&grid, start, grid.finish()).unwrap();
        assert!(t.visited.iter().all(|&c| grid.reachable(start, c)));
    }
}

#[test]
fn reruns_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..50 {
        let grid = random_grid(12, &mut rng, 0.25, true);
        for strategy in Strategy::ALL {
            let first = strategy.run(&grid, grid.start(), grid.finish()).unwrap();
            let second = strategy.run(&grid, grid.start(), grid.finish()).unwrap();
            assert_eq!(first.visited(), second.visited(), "{strategy}");
            assert_eq!(first.path(), second.path(), "{strategy}");
        }
    }
}
