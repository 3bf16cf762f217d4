use chatflow::export;
use chatflow::flow::{Edge, Flow};
use chatflow::step::{Step, StepKind, StepPatch};
use chatflow::storage::snapshot::PersistedFlow;
use clap::Parser;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use std::fs;

/// A CLI tool to generate random chatbot flows for the chatflow editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The minimum number of question steps between welcome and end
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of question steps between welcome and end
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Number of extra edges that skip ahead in the sequence
    #[arg(long, default_value_t = 0)]
    branches: usize,

    /// Write a bare step array (the export format) instead of a snapshot
    #[arg(long)]
    steps_only: bool,
}

const QUESTIONS: &[&str] = &[
    "What's your name?",
    "How did you hear about us?",
    "What can we help you with today?",
    "How would you rate your experience?",
    "Where are you located?",
    "When would you like us to call you back?",
    "Would you recommend us to a friend?",
    "Anything else you'd like to add?",
];

const OPTIONS: &[&str] = &[
    "Search engine",
    "Social media",
    "A friend",
    "Advertisement",
    "Sales",
    "Support",
    "Billing",
    "Other",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let count = rng.random_range(cli.min..=cli.max);
    println!(
        "Generating a new flow with {} question steps (range {} to {})...",
        count, cli.min, cli.max
    );

    let flow = generate_flow(&mut rng, count, cli.branches)?;

    let json_output = if cli.steps_only {
        export::export_steps(flow.steps())?
    } else {
        serde_json::to_string_pretty(&PersistedFlow::from(&flow))?
    };
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} steps and {} edges, saved to '{}'",
        flow.len(),
        flow.edges().len(),
        cli.output
    );

    Ok(())
}

/// Builds welcome, `count` random questions, and a closing step, connected in
/// order plus up to `branches` forward edges.
fn generate_flow(
    rng: &mut ThreadRng,
    count: usize,
    branches: usize,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let question_kinds: Vec<StepKind> = StepKind::ALL
        .iter()
        .copied()
        .filter(|k| k.collects_response())
        .collect();

    let mut steps = vec![Step::new(StepKind::Welcome).titled("Hi there! Let's get started.")];
    for _ in 0..count {
        let kind = *question_kinds
            .choose(rng)
            .ok_or("step catalog has no question kinds")?;
        steps.push(generate_step(rng, kind));
    }
    steps.push(Step::new(StepKind::End));

    let mut flow = Flow::sequential(steps)?;
    println!("-> Generated {} steps.", flow.len());

    // Forward edges only, so the graph stays acyclic.
    let len = flow.len();
    for _ in 0..branches {
        if len < 3 {
            break;
        }
        let from = rng.random_range(0..len - 2);
        let to = rng.random_range(from + 2..len);
        let source = flow.steps()[from].id().clone();
        let target = flow.steps()[to].id().clone();
        flow = flow.add_edge(Edge::new(source, target));
    }
    println!("-> Generated {} edges.", flow.edges().len());

    Ok(flow)
}

fn generate_step(rng: &mut ThreadRng, kind: StepKind) -> Step {
    let title = QUESTIONS.choose(rng).copied().unwrap_or("New Question");
    let mut patch = StepPatch::title(title);
    patch.required = Some(rng.random_bool(0.5));
    if kind.is_choice() {
        let count = rng.random_range(2..=4);
        let options = OPTIONS
            .choose_multiple(rng, count)
            .map(|o| o.to_string())
            .collect();
        patch.options = Some(options);
    }
    Step::new(kind).patched(&patch)
}
