use terrain_pathfinding::metrics::MetricsLog;
use terrain_pathfinding::{Cell, GridConfig, RunMetrics, SearchError, Strategy, Terrain};

// Runs every strategy on the 20x50 reference grid with mixed terrain and a wall between the
// endpoints, then prints the comparison table and the Dijkstra path.
//
// Start S is at (10, 15), finish F at (10, 35); the wall at column 25 leaves a gap at row 0.
fn main() -> Result<(), SearchError> {
    let mut grid = GridConfig::default().build()?;
    for col in 0..50 {
        grid.set_terrain(Cell::new(4, col), Terrain::Water)?;
    }
    for row in 1..20 {
        grid.set_terrain(Cell::new(row, 25), Terrain::Wall)?;
    }
    for row in 12..18 {
        for col in 28..34 {
            grid.set_terrain(Cell::new(row, col), Terrain::Forest)?;
        }
    }
    grid.update();

    let mut log = MetricsLog::default();
    let mut optimal = Vec::new();
    for strategy in Strategy::ALL {
        let (metrics, outcome) =
            RunMetrics::measure(strategy, &grid, grid.start(), grid.finish())?;
        if strategy == Strategy::Dijkstra {
            optimal = outcome.path();
        }
        log.record(metrics);
    }
    println!("{grid}");
    println!("{log}");
    println!("Dijkstra path ({} cells):", optimal.len());
    for cell in optimal {
        print!("{cell} ");
    }
    println!();
    Ok(())
}
