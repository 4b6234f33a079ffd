//! Gesture Interpreter - Sample trace replay and inspection
//!
//! Feeds recorded pointer sample traces through the interpretation pipeline
//! and reports the dispatched actions.

use gesture_interpreter::app::cli::{Cli, Commands, ConfigAction};
use gesture_interpreter::app::config::InterpreterConfig;
use gesture_interpreter::dispatch::RecognitionLog;
use gesture_interpreter::hittest::Target;
use gesture_interpreter::replay::{self, SampleTrace};
use gesture_interpreter::GestureInterpreter;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        InterpreterConfig::load(path)?
    } else {
        InterpreterConfig::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Replay {
            input,
            targets,
            gestures,
        } => {
            run_replay(&input, targets.as_deref(), gestures, &config)?;
        }
        Commands::Validate { trace } => {
            run_validate(&trace)?;
        }
        Commands::Synth { output } => {
            run_synth(output)?;
        }
        Commands::List { detailed } => {
            run_list(detailed)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_replay(
    input: &std::path::Path,
    targets: Option<&std::path::Path>,
    show_gestures: bool,
    config: &InterpreterConfig,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Trace file not found: {:?}", input);
    }

    let trace = SampleTrace::load(input)?;
    info!(
        "Loaded trace '{}' with {} samples",
        trace.metadata.name,
        trace.len()
    );

    let mut interpreter = GestureInterpreter::new(config.clone());

    // Register hit-testable targets, if provided
    if let Some(path) = targets {
        let content = std::fs::read_to_string(path)?;
        let targets: Vec<Target> = serde_json::from_str(&content)?;
        info!("Registered {} targets from {:?}", targets.len(), path);
        for t in targets {
            interpreter.targets_mut().register(t.id, t.bounds);
        }
    }

    let log = Arc::new(RecognitionLog::new(4096));
    interpreter.attach_log(Arc::clone(&log));

    let actions = replay::run(&trace, &mut interpreter);

    println!("\nReplay of '{}':", trace.metadata.name);
    if show_gestures {
        for entry in log.drain() {
            println!(
                "  {:>6}ms  {:?} on {:?} -> {:?}",
                entry.gesture.resolved_at.as_millis(),
                entry.gesture.kind,
                entry.gesture.target_id.as_deref().unwrap_or("-"),
                entry.action,
            );
        }
    } else {
        for action in &actions {
            println!("  {:?}", action);
        }
    }

    let stats = interpreter.stats();
    println!("\nSummary:");
    println!("  Samples: {} accepted, {} rejected", stats.samples_accepted, stats.samples_rejected);
    println!("  Gestures recognized: {}", stats.gestures_recognized);
    println!("  Actions dispatched: {}", stats.actions_dispatched);
    if stats.unmapped_gestures > 0 {
        println!("  Unmapped gestures: {}", stats.unmapped_gestures);
    }

    Ok(())
}

fn run_validate(path: &std::path::Path) -> anyhow::Result<()> {
    info!("Validating {:?}", path);

    if !path.exists() {
        anyhow::bail!("Trace file not found: {:?}", path);
    }

    let trace = SampleTrace::load(path)?;

    if let Some(index) = trace.first_out_of_order() {
        println!("Validation FAILED:");
        println!(
            "  - sample {} is out of order ({}ms after {}ms)",
            index,
            trace.samples[index].timestamp.as_millis(),
            trace.samples[index - 1].timestamp.as_millis(),
        );
        anyhow::bail!("Trace has out-of-order samples");
    }

    if trace.metadata.sample_count != trace.len() {
        println!(
            "Warning: metadata says {} samples, file holds {}",
            trace.metadata.sample_count,
            trace.len()
        );
    }

    println!("Validation PASSED");
    println!("  Samples: {}", trace.len());
    println!("  Duration: {:.1}s", trace.covered_duration_ms() as f64 / 1000.0);
    Ok(())
}

fn run_synth(output: Option<String>) -> anyhow::Result<()> {
    let trace = gesture_interpreter::replay::synth::demo_trace();

    let traces_dir = Cli::traces_dir();
    std::fs::create_dir_all(&traces_dir)?;

    let output_name = output.unwrap_or_else(|| {
        chrono::Local::now()
            .format("synth_%Y%m%d_%H%M%S")
            .to_string()
    });
    let output_path = traces_dir.join(format!("{}.json", output_name));
    trace.save(&output_path)?;

    info!("Saved synthetic trace to {:?}", output_path);
    println!("Generated '{}' with {} samples", output_path.display(), trace.len());
    println!("Replay it with: gesture-interp replay --input {:?}", output_path);

    Ok(())
}

fn run_list(detailed: bool) -> anyhow::Result<()> {
    let traces_dir = Cli::traces_dir();

    if !traces_dir.exists() {
        println!("No traces found in {}", traces_dir.display());
        println!("Generate one with: gesture-interp synth");
        return Ok(());
    }

    println!("Traces in {:?}:", traces_dir);

    let mut entries: Vec<_> = std::fs::read_dir(&traces_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.path());

    for entry in &entries {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        if detailed {
            match SampleTrace::load(&path) {
                Ok(trace) => {
                    let m = &trace.metadata;
                    let duration_secs = m.duration_ms as f64 / 1000.0;
                    let desc = m.description.as_deref().unwrap_or("-");
                    println!(
                        "  {}  ({} samples, {:.1}s, {})",
                        file_name, m.sample_count, duration_secs, desc
                    );
                }
                Err(_) => {
                    let fs_meta = entry.metadata()?;
                    println!("  {}  ({} bytes, failed to parse)", file_name, fs_meta.len());
                }
            }
        } else {
            println!("  {}", file_name);
        }
    }

    if entries.is_empty() {
        println!("  (none)");
        println!("Generate one with: gesture-interp synth");
    }

    Ok(())
}

fn run_init(force: bool, config: &InterpreterConfig) -> anyhow::Result<()> {
    let config_path = InterpreterConfig::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::traces_dir())?;
    println!("\nCreated directories:");
    println!("  Traces: {:?}", Cli::traces_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &InterpreterConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", InterpreterConfig::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            // Simple key lookup in TOML output
            let value = find_toml_value(&toml_str, &key);
            match value {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = InterpreterConfig::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'gesture-interp init' first.");
            }

            // Load, modify, validate, and save
            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if set_toml_value(&mut toml_content, &key, &value) {
                let updated: InterpreterConfig = toml::from_str(&toml_content)
                    .map_err(|e| anyhow::anyhow!("Updated config does not parse: {}", e))?;
                updated.validate()?;
                std::fs::write(&config_path, &toml_content)?;
                println!("Set {} = {}", key, value);
            } else {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
        }
        ConfigAction::Reset { force } => {
            let config_path = InterpreterConfig::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = InterpreterConfig::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last()?;

    // Find the right section
    let mut in_section = parts.len() == 1; // Top-level key
    let section_name = if parts.len() > 1 { parts[0] } else { "" };

    for line in toml_str.lines() {
        let trimmed = line.trim();

        // Check for section header
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last().unwrap();

    let section_name = if parts.len() > 1 { parts[0] } else { "" };
    let mut in_section = parts.len() == 1;
    let mut found = false;

    let lines: Vec<String> = toml_str.lines().map(|l| l.to_string()).collect();
    let mut new_lines = Vec::with_capacity(lines.len());

    for line in &lines {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
        }

        if in_section && !found {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.clone());
    }

    if found {
        *toml_str = new_lines.join("\n");
        // Ensure trailing newline
        if !toml_str.ends_with('\n') {
            toml_str.push('\n');
        }
    }

    found
}
