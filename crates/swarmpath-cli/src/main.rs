//! swarmpath CLI: swarm-optimized path planning on ASCII occupancy maps.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use swarmpath::planner::{
    extract_obstacle_clusters, CostWeights, GridCoord, LengthMetric, OccupancyMap, Planner,
    PlannerConfig, Strategy,
};

#[derive(Parser)]
#[command(name = "swarmpath")]
#[command(about = "Swarm-optimized path planning on occupancy grids")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a path between two pixels of a map
    Plan {
        /// ASCII map file ('#' or '1' obstacle, '.' or '0' free)
        map: PathBuf,

        /// Start pixel as x,y
        #[arg(short, long, value_parser = parse_coord)]
        start: GridCoord,

        /// End pixel as x,y
        #[arg(short, long, value_parser = parse_coord)]
        end: GridCoord,

        /// JSON planner configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Strategy: pso, gwo or abc
        #[arg(long)]
        strategy: Option<String>,

        /// Population size
        #[arg(short, long)]
        population: Option<usize>,

        /// Number of iterations
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Number of intermediate waypoints
        #[arg(long)]
        points: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Cost weights as violation,length[,repulsion]
        #[arg(short, long)]
        weights: Option<String>,

        /// Length metric: steps or euclidean
        #[arg(long)]
        metric: Option<String>,

        /// Write the planned path as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip drawing the path over the map
        #[arg(long)]
        no_render: bool,
    },

    /// List the obstacle clusters of a map
    Clusters {
        /// ASCII map file
        map: PathBuf,

        /// Print clusters as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Flag values that override the configuration file.
struct Overrides {
    strategy: Option<String>,
    population: Option<usize>,
    iterations: Option<usize>,
    points: Option<usize>,
    seed: Option<u64>,
    weights: Option<String>,
    metric: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            map,
            start,
            end,
            config,
            strategy,
            population,
            iterations,
            points,
            seed,
            weights,
            metric,
            output,
            no_render,
        } => {
            let overrides = Overrides {
                strategy,
                population,
                iterations,
                points,
                seed,
                weights,
                metric,
            };
            cmd_plan(
                &map,
                start,
                end,
                config.as_deref(),
                &overrides,
                output.as_deref(),
                !no_render,
            )
        }
        Commands::Clusters { map, json } => cmd_clusters(&map, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_coord(s: &str) -> Result<GridCoord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(GridCoord::new(x, y))
}

fn parse_weights(s: &str) -> Result<CostWeights, Box<dyn std::error::Error>> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("bad weights '{s}': {e}"))?;
    Ok(CostWeights::from_slice(&values)?)
}

fn build_config(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };

    if let Some(name) = &overrides.strategy {
        let strategy = Strategy::parse(name).ok_or_else(|| format!("Unknown strategy: {name}"))?;
        // Keep hyperparameters from the file when it already names this strategy.
        if strategy.as_str() != config.strategy.as_str() {
            config.strategy = strategy;
        }
    }
    if let Some(population) = overrides.population {
        config.swarm.population = population;
    }
    if let Some(iterations) = overrides.iterations {
        config.swarm.iterations = iterations;
    }
    if let Some(points) = overrides.points {
        config.swarm.points = points;
    }
    if let Some(seed) = overrides.seed {
        config.swarm.seed = Some(seed);
    }
    if let Some(weights) = &overrides.weights {
        config.weights = parse_weights(weights)?;
    }
    if let Some(metric) = &overrides.metric {
        config.length_metric =
            LengthMetric::parse(metric).ok_or_else(|| format!("Unknown metric: {metric}"))?;
    }

    Ok(config)
}

fn cmd_plan(
    map_path: &Path,
    start: GridCoord,
    end: GridCoord,
    config_path: Option<&Path>,
    overrides: &Overrides,
    output: Option<&Path>,
    render: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let map = OccupancyMap::load(map_path)?;
    let config = build_config(config_path, overrides)?;

    println!("Planning Path");
    println!("=============");
    println!("Map:         {} ({}x{})", map_path.display(), map.rows(), map.cols());
    println!("Strategy:    {}", config.strategy.as_str().to_uppercase());
    println!("Population:  {}", config.swarm.population);
    println!("Iterations:  {}", config.swarm.iterations);
    println!("Waypoints:   {}", config.swarm.points);
    println!("Route:       {start} -> {end}");
    println!();

    let planner = Planner::new(map, config)?;
    let timer = Instant::now();
    let planned = planner.get_path(start, end)?;
    let elapsed = timer.elapsed();

    println!("Path Found");
    println!("----------");
    println!("Pixels:      {}", planned.path.len());
    println!("Violations:  {}", planned.breakdown.violations);
    println!("Length:      {:.3}", planned.breakdown.length);
    if planner.config().weights.uses_repulsion() {
        println!("Repulsion:   {:.3}", planned.breakdown.repulsion);
    }
    println!("Cost:        {:.6}", planned.cost);
    println!("Evaluations: {}", planned.evaluations);
    println!("Time:        {:.3}s", elapsed.as_secs_f64());
    println!(
        "Waypoints:   {}",
        planned
            .waypoints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );

    if render {
        println!();
        print!("{}", planner.map().render_path(&planned.path));
    }

    if let Some(out_path) = output {
        std::fs::write(out_path, serde_json::to_string_pretty(&planned)?)?;
        println!("\nOutput: {}", out_path.display());
    }

    Ok(())
}

fn cmd_clusters(map_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let map = OccupancyMap::load(map_path)?;
    let clusters = extract_obstacle_clusters(&map);

    if json {
        println!("{}", serde_json::to_string_pretty(&clusters)?);
        return Ok(());
    }

    println!("Obstacle Clusters");
    println!("=================");
    println!("Map:      {} ({}x{})", map_path.display(), map.rows(), map.cols());
    println!("Clusters: {}", clusters.len());
    println!();
    println!("{:>4} {:>12} {:>8}", "#", "Centroid", "Mass");
    println!("{}", "-".repeat(26));
    for (i, cluster) in clusters.iter().enumerate() {
        println!(
            "{:>4} {:>12} {:>8}",
            i + 1,
            cluster.centroid.to_string(),
            cluster.mass
        );
    }

    Ok(())
}
