mod analyzer;
mod classifier;
mod loader;
mod models;

use analyzer::CountOrder;
use anyhow::Result;
use classifier::StateClassifier;
use clap::{Arg, Command};
use models::{Config, EnrichedRecord, StateRegistry};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let matches = Command::new("college-analytics")
        .version("1.0")
        .about("Analyzes student distribution by state and college")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("input")
                .value_name("CSV")
                .help("Student data CSV file (must contain a 'college' column)")
                .required(true),
        )
        .get_matches();

    let config_file = matches.get_one::<String>("config").unwrap();
    let input_file = matches.get_one::<String>("input").unwrap();

    // Load or create configuration
    let config = if Path::new(config_file).exists() {
        println!("📋 Loading configuration from: {}", config_file);
        Config::load_from_file(config_file)?
    } else {
        println!("📝 Creating default configuration file: {}", config_file);
        let default_config = Config::default();
        default_config.save_to_file(config_file)?;
        println!(
            "⚠️  Review {} (known states, aliases, code-format state), then run again.",
            config_file
        );
        return Ok(());
    };

    let output_dir = config.output_directory.as_deref().unwrap_or("output");
    fs::create_dir_all(output_dir)?;
    clean_output_directory(output_dir, &config)?;

    println!("📄 Reading student data from: {}", input_file);
    println!("📂 Output directory: {} (cleaned)", output_dir);
    println!(
        "🗺️  Known states: {}, aliases: {}, code-format state: {}",
        config.known_states.len(),
        config.aliases.len(),
        config.code_format_state
    );

    let dataset = loader::read_csv(input_file)?;
    println!("   ✅ Parsed {} records", dataset.records.len());

    let registry = StateRegistry::from_config(&config);
    let classifier = StateClassifier::new(&registry, &config.code_format_state);

    // Classification runs once; every aggregation below reuses the
    // enriched records.
    let enriched = match analyzer::process(&dataset, &classifier, &config.college_column) {
        Ok(enriched) => enriched,
        Err(e) => {
            println!("❌ {}", e);
            println!("   The CSV must contain a '{}' column.", config.college_column);
            return Ok(());
        }
    };

    generate_enriched_export(&dataset.headers, &enriched, output_dir)?;
    generate_state_counts_report(&enriched, output_dir)?;
    generate_college_counts_report(&enriched, &config, output_dir)?;
    generate_summary_report(&enriched, &config, output_dir)?;

    print_summary(&enriched, &config);

    println!("\n✅ Analysis complete!");
    println!("📂 Results written to: {}", output_dir);
    Ok(())
}

fn generate_enriched_export(
    headers: &[String],
    enriched: &[EnrichedRecord],
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("students_enriched.csv");
    loader::write_enriched_csv(headers, enriched, &path)?;
    Ok(())
}

fn generate_state_counts_report(enriched: &[EnrichedRecord], output_dir: &str) -> Result<()> {
    let counts = analyzer::state_counts(enriched, CountOrder::ByLabel);
    let path = Path::new(output_dir).join("state_counts.csv");
    loader::write_counts_csv("state", "student_count", &counts, &path)?;
    Ok(())
}

fn generate_college_counts_report(
    enriched: &[EnrichedRecord],
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    let counts = analyzer::college_counts(enriched, &config.code_format_state);
    let ranked = analyzer::top_n(&counts, counts.len());

    let safe_name = config.code_format_state.replace('/', "_").replace(' ', "_");
    let path = Path::new(output_dir).join(format!("{}_colleges.csv", safe_name));
    loader::write_counts_csv("college", "student_count", &ranked, &path)?;
    Ok(())
}

fn generate_summary_report(
    enriched: &[EnrichedRecord],
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    let state_counts = analyzer::state_counts(enriched, CountOrder::ByCountDesc);
    let distinct = analyzer::distinct_states(enriched);
    let code_format_count = state_counts
        .iter()
        .find(|(state, _)| state == &config.code_format_state)
        .map(|(_, count)| *count)
        .unwrap_or(0);

    let mut content = String::new();
    content.push_str("Student Distribution Summary\n");
    content.push_str("============================\n\n");
    content.push_str(&format!("Total students: {}\n", enriched.len()));
    content.push_str(&format!("States represented: {}\n", distinct.len()));
    content.push_str(&format!(
        "{} students: {}\n\n",
        config.code_format_state, code_format_count
    ));

    content.push_str("Students by state (most to least):\n");
    for (state, count) in &state_counts {
        content.push_str(&format!("   {} - {}\n", state, count));
    }

    let college_counts = analyzer::college_counts(enriched, &config.code_format_state);
    let top = analyzer::top_n(&college_counts, config.top_colleges);
    content.push_str(&format!(
        "\nTop {} {} colleges by student count:\n",
        config.top_colleges, config.code_format_state
    ));
    if top.is_empty() {
        content.push_str("   (no college names extracted)\n");
    }
    for (i, (college, count)) in top.iter().enumerate() {
        content.push_str(&format!("   {}. {} - {}\n", i + 1, college, count));
    }

    fs::write(Path::new(output_dir).join("summary.txt"), content)?;
    Ok(())
}

fn print_summary(enriched: &[EnrichedRecord], config: &Config) {
    println!("\n📊 SUMMARY");
    println!("==========\n");

    println!("👥 Total students: {}", enriched.len());
    println!(
        "🗺️  States represented: {}",
        analyzer::distinct_states(enriched).len()
    );

    println!("\n📈 Students by state (most to least):");
    for (state, count) in analyzer::state_counts(enriched, CountOrder::ByCountDesc) {
        println!("   {} - {}", state, count);
    }

    let college_counts = analyzer::college_counts(enriched, &config.code_format_state);
    let top = analyzer::top_n(&college_counts, config.top_colleges);
    if !top.is_empty() {
        println!(
            "\n🏫 Top {} {} colleges:",
            config.top_colleges, config.code_format_state
        );
        for (i, (college, count)) in top.iter().enumerate() {
            println!("   {}. {} - {} students", i + 1, college, count);
        }
    }
}

// Clean up previous results from the output directory
fn clean_output_directory(output_dir: &str, config: &Config) -> Result<()> {
    let output_path = Path::new(output_dir);

    if !output_path.exists() {
        return Ok(());
    }

    let safe_name = config.code_format_state.replace('/', "_").replace(' ', "_");
    let items_to_clean = [
        "students_enriched.csv".to_string(),
        "state_counts.csv".to_string(),
        format!("{}_colleges.csv", safe_name),
        "summary.txt".to_string(),
    ];

    for item in &items_to_clean {
        let item_path = output_path.join(item);
        if item_path.is_file() {
            fs::remove_file(&item_path)?;
        }
    }

    Ok(())
}
