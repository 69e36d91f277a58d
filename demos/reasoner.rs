//  REASONER.rs
//    by Lut99
//
//  Created:
//    11 Apr 2025, 10:03:51
//  Last edited:
//    16 Apr 2025, 11:48:27
//  Auto updated?
//    Yes
//
//  Description:
//!   Runs the belief reasoners on evidence given on the command line.
//

use belief_models::evidence::Evidence;
use belief_models::reasoners::Reasoner;
use belief_models::space::{Proposition, StateSpace};
use clap::Parser;
use console::style;
use error_trace::toplevel;
use humanlog::{DebugMode, HumanLogger};
use log::{debug, error, info};


/***** CONSTANTS *****/
/// The states used when none are given.
pub const DEFAULT_STATES: [&str; 5] = ["dp", "sp", "dm", "sm", "do"];

/// The evidence used when none is given.
pub const DEFAULT_EVIDENCE: [(&[&str], f64); 3] = [(&["dp", "dm", "do"], 0.9), (&["dm", "sm"], 0.75), (&["dp", "sp"], 0.45)];





/***** ARGUMENTS *****/
/// Defines arguments to the reasoner.
#[derive(Debug, Parser)]
pub struct Arguments {
    /// If given, enables more verbose logging.
    #[clap(long, global = true)]
    debug: bool,

    /// The reasoner(s) to run. Can be 'ds_int', 'ds_min' or 'sd_min'. If omitted, runs all of them.
    #[clap(short, long)]
    model: Vec<Reasoner>,
    /// The state(s) to reason over. If omitted, uses the states of the medical example.
    #[clap(short, long, value_delimiter = ',')]
    state: Vec<String>,

    /// The pieces of evidence, given as 'LABEL,LABEL,...=MASS'. If omitted, uses the evidence of the medical example.
    #[clap(name = "EVIDENCE")]
    evidence: Vec<String>,
}





/***** HELPERS *****/
/// Parses a piece of evidence from the command line.
///
/// # Returns
/// The labels and the mass of the piece, or [`None`] if it's not of the form `LABELS=MASS`.
fn parse_evidence(raw: &str) -> Option<(Vec<&str>, f64)> {
    let (labels, mass) = raw.rsplit_once('=')?;
    let mass: f64 = mass.trim().parse().ok()?;
    Some((labels.split(',').map(str::trim).filter(|label| !label.is_empty()).collect(), mass))
}





/***** ENTRYPOINT *****/
fn main() {
    // Parse the CLI arguments
    let args = Arguments::parse();

    // Setup the logger
    if let Err(err) = HumanLogger::terminal(if args.debug { DebugMode::Full } else { DebugMode::HumanFriendly }).init() {
        eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
    }
    info!("belief-models {} - v{}", env!("CARGO_CRATE_NAME"), env!("CARGO_PKG_VERSION"));

    // Build the state space
    let space: StateSpace = match if args.state.is_empty() { StateSpace::new(DEFAULT_STATES) } else { StateSpace::new(args.state.iter().map(String::as_str)) } {
        Ok(space) => space,
        Err(err) => {
            error!("{}", toplevel!(("Failed to build state space"), err));
            std::process::exit(1);
        },
    };
    debug!("Reasoning over {} state(s)", space.len());

    // Build the evidence
    let mut raw: Vec<(Vec<&str>, f64)> = Vec::with_capacity(args.evidence.len());
    for piece in &args.evidence {
        match parse_evidence(piece) {
            Some(piece) => raw.push(piece),
            None => {
                error!("Illegal piece of evidence '{piece}' (expected 'LABEL,LABEL,...=MASS')");
                std::process::exit(1);
            },
        }
    }
    if raw.is_empty() {
        raw.extend(DEFAULT_EVIDENCE.iter().map(|(labels, mass)| (labels.to_vec(), *mass)));
    }
    let mut evidence = Evidence::new();
    for (labels, mass) in raw {
        let prop: Proposition = match space.proposition(&labels) {
            Ok(prop) => prop,
            Err(err) => {
                error!("{}", toplevel!(("Failed to parse evidence '{}={mass}'", labels.join(",")), err));
                std::process::exit(1);
            },
        };
        if let Err(err) = evidence.insert(prop, mass) {
            error!("{}", toplevel!(("Failed to add evidence {}", space.key(prop)), err));
            std::process::exit(1);
        }
    }
    debug!("Collected {} piece(s) of evidence", evidence.len());

    // Run the reasoners
    let models: Vec<Reasoner> = if args.model.is_empty() { Reasoner::ALL.to_vec() } else { args.model };
    for (i, reasoner) in models.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", style(format!("Reasoner '{reasoner}' ({} frame, {} allocation)", reasoner.frame(), reasoner.allocation().name())).bold());
        match reasoner.profile(&space, &evidence) {
            Ok(profile) => {
                print!("{}", profile.display(&space));
                println!("{}", style("belief for other propositions -> 0").dim());
            },
            Err(err) => error!("{}", toplevel!(("Failed to run reasoner '{reasoner}'"), err)),
        }
    }
}
