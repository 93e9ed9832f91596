use bombard_ant::{Evolution, EvolutionError, RunConfig};
use std::ops::ControlFlow;

fn main() -> Result<(), EvolutionError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = RunConfig::default();
    let max_generations = config.max_generations;

    let mut evo = Evolution::new();
    evo.reset(config)?;

    println!(
        "Bombing {} nests holding {} ants...",
        evo.nests().len(),
        evo.total_ants()
    );

    evo.run_with(max_generations, |e| {
        if e.generation() % 10 == 0 {
            println!(
                "generation {:>4} | best kills {:>8.1} | kill rate {:>5.1}%",
                e.generation(),
                e.best_fitness(),
                e.kill_rate()
            );
        }
        ControlFlow::Continue(())
    })?;

    println!("\nBest layout:");
    println!("{:<10} | {:<10}", "x", "y");
    println!("-----------------------");
    for bomb in evo.best_bombs() {
        println!("{:<10.2} | {:<10.2}", bomb.x, bomb.y);
    }
    Ok(())
}
