use chatflow::editing;
use chatflow::export::{self, EXPORT_FILE_NAME};
use chatflow::prelude::*;
use chatflow::step::catalog;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::EnvFilter;

/// Edit and preview chatbot conversation flows from the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory the flow snapshot is persisted in
    #[arg(long, default_value = ".chatflow", global = true)]
    store_dir: PathBuf,

    /// Optional path to an editor configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reset the stored flow to the seed flow
    Init,
    /// List every step kind in palette order
    Kinds,
    /// Print the steps and edges of the stored flow
    Show,
    /// Append a step of the given kind
    Add { kind: String },
    /// Insert a step of the given kind at a position
    Insert { kind: String, index: usize },
    /// Delete a step and its edges
    Delete { id: String },
    /// Insert a copy of a step right after it
    Duplicate { id: String },
    /// Change the fields of a step
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        required: Option<bool>,
        /// Replace the options of a choice step (repeatable)
        #[arg(long = "option")]
        options: Vec<String>,
        /// Append a numbered option to a choice step
        #[arg(long, conflicts_with = "options")]
        add_option: bool,
        /// Remove the option at this index from a choice step
        #[arg(long, conflicts_with_all = ["options", "add_option"])]
        remove_option: Option<usize>,
    },
    /// Apply a raw drop intent given as JSON
    Drop { intent: String },
    /// Connect two steps
    Connect { source: String, target: String },
    /// Remove the connection between two steps
    Disconnect { source: String, target: String },
    /// Print laid-out graph node positions
    Layout {
        #[arg(short, long, value_enum)]
        direction: Option<DirectionCli>,
    },
    /// Write the step array for the chat widget
    Export {
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Walk the flow as a chat preview
    Simulate {
        /// Skip the display delay of informational steps
        #[arg(long)]
        fast: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionCli {
    Lr,
    Tb,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config from '{}': {}", path, e))
        }),
        None => EditorConfig::default(),
    };
    let storage = DirStorage::new(&cli.store_dir);
    let mut store = FlowStore::open(storage, config.storage_key.clone());

    match cli.command {
        Command::Init => {
            store = FlowStore::with_flow(Flow::seed(), store.into_storage(), config.storage_key);
            store.persist();
            println!("Reset '{}' to the seed flow.", store.slot());
            print_flow(store.flow());
        }
        Command::Kinds => {
            for (kind, label) in catalog() {
                println!("{:<14} {:<16} {:?}", kind.as_str(), label, kind.interaction());
            }
        }
        Command::Show => print_flow(store.flow()),
        Command::Add { kind } => {
            let kind = parse_kind(&kind);
            match store.add_step(kind) {
                Some(id) => println!("Added {} step {}", kind, id),
                None => exit_with_error("Failed to add step."),
            }
        }
        Command::Insert { kind, index } => {
            let kind = parse_kind(&kind);
            match store.insert_step(kind, index) {
                Some(id) => {
                    let position = store.flow().position(&id).unwrap_or(index);
                    println!("Inserted {} step {} at {}", kind, id, position);
                }
                None => exit_with_error("Failed to insert step."),
            }
        }
        Command::Delete { id } => {
            let id = existing_step(&store, &id);
            store.delete_step(&id);
            println!("Deleted {} ({} steps left)", id, store.flow().len());
        }
        Command::Duplicate { id } => {
            let id = existing_step(&store, &id);
            match store.duplicate_step(&id) {
                Some(copy) => println!("Duplicated {} as {}", id, copy),
                None => exit_with_error("Failed to duplicate step."),
            }
        }
        Command::Update {
            id,
            title,
            required,
            options,
            add_option,
            remove_option,
        } => {
            let id = existing_step(&store, &id);
            let Some(step) = store.flow().step(&id).cloned() else {
                exit_with_error(&format!("Unknown step '{}'", id));
            };
            let mut patch = if add_option {
                editing::add_option(&step).unwrap_or_else(|e| exit_with_error(&e.to_string()))
            } else if let Some(index) = remove_option {
                editing::remove_option(&step, index)
                    .unwrap_or_else(|e| exit_with_error(&e.to_string()))
            } else if !options.is_empty() {
                if !step.kind().is_choice() {
                    exit_with_error(&format!("Step '{}' does not take options", id));
                }
                StepPatch::options(options)
            } else {
                StepPatch::default()
            };
            patch.title = title;
            patch.required = required;
            if patch.is_empty() {
                exit_with_error("Nothing to update.");
            }
            store.update_step(&id, patch);
            print_flow(store.flow());
        }
        Command::Drop { intent } => {
            let intent: DropIntent = serde_json::from_str(&intent)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse drop intent: {}", e)));
            match dnd::translate(store.flow(), &intent) {
                Some(action) => {
                    let name = action.name();
                    store
                        .dispatch(action)
                        .unwrap_or_else(|e| exit_with_error(&format!("Drop rejected: {}", e)));
                    println!("Applied {}", name);
                    print_flow(store.flow());
                }
                None => println!("Drop ignored."),
            }
        }
        Command::Connect { source, target } => {
            let source = existing_step(&store, &source);
            let target = existing_step(&store, &target);
            let before = store.edges().len();
            store
                .dispatch(graph::connect(source.clone(), target.clone()))
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            if store.edges().len() == before {
                println!("{} -> {} already connected", source, target);
            } else {
                println!("Connected {} -> {}", source, target);
            }
        }
        Command::Disconnect { source, target } => {
            let edge = Edge::new(source, target);
            let before = store.edges().len();
            store.apply_edge_changes(vec![EdgeChange::Remove { edge: edge.clone() }]);
            if store.edges().len() == before {
                println!("No edge {} -> {}", edge.source, edge.target);
            } else {
                println!("Removed edge {} -> {}", edge.source, edge.target);
            }
        }
        Command::Layout { direction } => {
            let mut layout = config.layout.clone();
            match direction {
                Some(DirectionCli::Lr) => layout.direction = LayoutDirection::LeftToRight,
                Some(DirectionCli::Tb) => layout.direction = LayoutDirection::TopToBottom,
                None => {}
            }
            let projection = graph::project(store.flow()).layout(&LayeredLayout, &layout);
            for node in &projection.nodes {
                println!(
                    "{:>3}  {:<38} {:<14} ({:>7.1}, {:>7.1})",
                    node.index,
                    node.id,
                    node.kind.as_str(),
                    node.position.x,
                    node.position.y
                );
            }
            println!("{} edges", projection.edges.len());
        }
        Command::Export { output } => {
            export::write_export(store.steps(), &output).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", output.display(), e))
            });
            println!(
                "Exported {} steps to '{}'",
                store.steps().len(),
                output.display()
            );
        }
        Command::Simulate { fast } => run_simulation(store.steps(), config.simulation, fast),
    }
}

fn print_flow(flow: &Flow) {
    println!("\n--- Steps ({}) ---", flow.len());
    for (index, step) in flow.steps().iter().enumerate() {
        let marker = if editing::shows_title_marker(step) { "!" } else { " " };
        let required = if step.required { "*" } else { " " };
        println!(
            "{:>3}{}{} {:<38} {:<14} {}",
            index,
            marker,
            required,
            step.id(),
            step.kind().as_str(),
            step.title
        );
        if !step.options().is_empty() {
            println!("          options: {}", step.options().join(" | "));
        }
    }
    println!("--- Edges ({}) ---", flow.edges().len());
    for edge in flow.edges() {
        println!("  {} -> {}", edge.source, edge.target);
    }
    println!();
}

/// Runs the chat preview on stdin/stdout until the chat ends.
fn run_simulation(steps: &[Step], config: SimulationConfig, fast: bool) {
    println!("--- Chat Preview ---");
    let (mut sim, mut pending) = ChatSimulator::start(steps, config);
    let mut shown = 0;

    loop {
        for turn in &sim.transcript()[shown..] {
            println!("{}", TranscriptFormatter::format_turn(turn));
        }
        shown = sim.transcript().len();

        match sim.state() {
            SimState::Idle => {
                println!("The flow has no steps.");
                return;
            }
            SimState::Ended => return,
            SimState::AutoAdvancing { .. } => {
                let Some(advance) = pending.take() else {
                    exit_with_error("Simulation stalled without a scheduled advance.");
                };
                if !fast {
                    thread::sleep(advance.delay);
                }
                pending = sim.on_timer(advance.ticket);
            }
            SimState::AwaitingInput { .. } => {
                let Some(step) = sim.current_step().cloned() else {
                    exit_with_error("Simulation lost its current step.");
                };
                let Some(answer) = prompt_for_input(answer_prompt(&step), None) else {
                    println!("\n--- Input closed, leaving the preview. ---");
                    return;
                };
                let answer = resolve_choice(&step, answer);
                match sim.submit_answer(&answer) {
                    Ok(next) => pending = next,
                    Err(e) => println!("  ! {}", e),
                }
            }
        }
    }
}

fn answer_prompt(step: &Step) -> &'static str {
    if step.kind().is_choice() {
        "Choose an option (number or text)"
    } else if step.required {
        "Your answer"
    } else {
        "Your answer (optional)"
    }
}

/// Maps a 1-based option number to the option text for choice steps.
fn resolve_choice(step: &Step, answer: String) -> String {
    if !step.kind().is_choice() {
        return answer;
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| step.options().get(i).cloned())
        .unwrap_or(answer)
}

fn parse_kind(kind: &str) -> StepKind {
    StepKind::from_palette_id(kind)
        .unwrap_or_else(|e| exit_with_error(&format!("{} (run `kinds` for the list)", e)))
}

fn existing_step(store: &FlowStore<DirStorage>, id: &str) -> StepId {
    let id = StepId::from(id);
    if !store.flow().contains(&id) {
        exit_with_error(&format!("Unknown step '{}'", id));
    }
    id
}

/// A helper function to prompt the user and read a line of input.
///
/// Returns `None` once stdin is closed.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> Option<String> {
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    read_input(&mut io::stdin().lock(), default)
}

/// Reads one trimmed line, falling back to `default` for a blank line.
/// End of input yields `None`.
fn read_input(reader: &mut impl BufRead, default: Option<&str>) -> Option<String> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).expect("Failed to read line");
    if read == 0 {
        return None;
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        Some(default.unwrap_or("").to_string())
    } else {
        Some(trimmed)
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_input_reads_as_none() {
        assert_eq!(read_input(&mut &b""[..], None), None);
        assert_eq!(read_input(&mut &b""[..], Some("1")), None);
    }

    #[test]
    fn blank_line_uses_default() {
        assert_eq!(read_input(&mut &b"\n"[..], Some("1")), Some("1".to_string()));
        assert_eq!(read_input(&mut &b"  A \n"[..], None), Some("A".to_string()));
        assert_eq!(read_input(&mut &b"\n"[..], None), Some(String::new()));
    }
}
