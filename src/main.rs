use bst_demo::menu::Session;
use bst_demo::perf::{BenchConfig, DEFAULT_DOMAIN_FACTOR, DEFAULT_SIZES};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

#[derive(Parser)]
#[command(name = "bst-demo")]
#[command(about = "Interactive unbalanced binary search tree")]
struct Args {
    /// Seed for the performance test keys
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the insertion trace switched off
    #[arg(long)]
    quiet: bool,

    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES.to_vec())]
    sizes: Vec<usize>,

    #[arg(long, default_value_t = DEFAULT_DOMAIN_FACTOR)]
    domain_factor: usize,
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .format_level(false)
        .init();

    let args = Args::parse();
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let bench = BenchConfig {
        sizes: args.sizes,
        domain_factor: args.domain_factor,
    };

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), rng, bench);
    session.tree_mut().set_verbose(!args.quiet);
    session.run()
}
