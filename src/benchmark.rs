use bst_demo::Tree;
use bst_demo::perf::{BenchConfig, DEFAULT_DOMAIN_FACTOR, DEFAULT_SIZES, run_benchmark};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tree-benchmark")]
#[command(about = "Times bulk random insertion into an unbalanced binary search tree")]
struct Args {
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES.to_vec())]
    sizes: Vec<usize>,

    #[arg(long, default_value_t = DEFAULT_DOMAIN_FACTOR)]
    domain_factor: usize,

    #[arg(long, default_value = "1")]
    rounds: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let config = BenchConfig {
        sizes: args.sizes,
        domain_factor: args.domain_factor,
    };

    println!(
        "Running {} rounds with batch sizes {:?}",
        args.rounds, config.sizes
    );

    let start = Instant::now();
    for round in 1..=args.rounds {
        let mut tree = Tree::new();
        println!("Round {round}");
        for timing in run_benchmark(&mut tree, &config, &mut rng) {
            println!("{timing}");
        }
        println!("Tree holds {} keys, height {}", tree.len(), tree.height());
    }
    let end = Instant::now();

    println!(
        "Total {} seconds",
        end.saturating_duration_since(start).as_secs_f32()
    );
}
