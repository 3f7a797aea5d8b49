use clap::Parser;
use colored::Colorize;
use std::error::Error;
use vlsm_subnet_planner::allocate;
use vlsm_subnet_planner::config::{AllocatorConfig, ClaimPolicy, TreeDepth};
use vlsm_subnet_planner::output::{format_table, print_binary, print_table, to_json};
use vlsm_subnet_planner::processing::parse_host_list;

/// Find the smallest free subnet of NETWORK for every host count.
#[derive(Parser, Debug)]
#[command(name = "vlsm", version, about, long_about = None)]
struct Args {
    /// Base network, e.g. 192.168.0.1/24
    network: String,

    /// Required host counts, as separate arguments or "59 7 15,29 2"
    #[arg(required = true, num_args = 1..)]
    hosts: Vec<String>,

    /// Print the structured result as JSON
    #[arg(long)]
    json: bool,

    /// Also print matched subnets in binary
    #[arg(long)]
    binary: bool,

    /// Flag ancestors of an assigned subnet as used too
    #[arg(long)]
    claim_ancestors: bool,

    /// Subdivide all the way to /31
    #[arg(long)]
    full_tree: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("Logging disabled, could not load log4rs.yml: {e}");
    }
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let args = Args::parse();
    let mut config = AllocatorConfig::from_env()?;
    if args.claim_ancestors {
        config.claim_policy = ClaimPolicy::SubtreeAndAncestors;
    }
    if args.full_tree {
        config.tree_depth = TreeDepth::Full;
    }

    let hosts = parse_host_list(&args.hosts.join(" "));
    let allocation = allocate(&args.network, &hosts, &config)?;

    if args.json {
        println!("{}", to_json(&allocation)?);
    } else {
        println!("{}", "-- IPv4 VLSM subnet planner --".on_blue());
        print_table(&allocation, &format_table(&allocation));
        if args.binary {
            print_binary(&allocation);
        }
    }

    Ok(())
}
