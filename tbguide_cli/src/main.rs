use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tbguide_core::*;

#[derive(Parser)]
#[command(name = "tbguide")]
#[command(about = "Tuberculosis treatment reference tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an antituberculosis dosage recommendation
    Dose {
        /// Patient weight in kilograms
        #[arg(long)]
        weight: String,

        /// Age class (adult, child)
        #[arg(long)]
        age: String,

        /// Formulation (hrze, hr, separate)
        #[arg(long, default_value = "hrze")]
        form: String,

        /// Emit the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run the training quiz
    Quiz {
        /// Auto-answer every question with the first option (for testing)
        #[arg(long, conflicts_with = "auto_correct")]
        auto_answer: bool,

        /// Auto-answer every question correctly (for testing)
        #[arg(long, conflicts_with = "auto_answer")]
        auto_correct: bool,
    },

    /// List guide sections and mark the last viewed one
    Sections {
        /// Mark a section as viewed (by slug, e.g. "calculateur")
        #[arg(long)]
        view: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tbguide_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    // Refuse to run against inconsistent built-in content
    let errors = guide_content().validate();
    if !errors.is_empty() {
        eprintln!("Guide content validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::ContentValidation("Invalid guide content".into()));
    }

    match cli.command {
        Some(Commands::Dose {
            weight,
            age,
            form,
            json,
        }) => cmd_dose(&weight, &age, &form, json, &config),
        Some(Commands::Quiz {
            auto_answer,
            auto_correct,
        }) => cmd_quiz(auto_answer, auto_correct, &config),
        Some(Commands::Sections { view }) => cmd_sections(data_dir, view),
        None => {
            // Default to listing sections
            cmd_sections(data_dir, None)
        }
    }
}

fn parse_age(input: &str) -> Result<AgeClass> {
    match input.to_lowercase().as_str() {
        "adult" | "adulte" => Ok(AgeClass::Adult),
        "child" | "enfant" => Ok(AgeClass::Child),
        other => {
            eprintln!("Classe d'âge inconnue : {:?} (attendu : adult, child)", other);
            Err(Error::Other(format!("Unknown age class: {}", other)))
        }
    }
}

fn parse_form(input: &str) -> Result<Formulation> {
    match input.to_lowercase().as_str() {
        "hrze" => Ok(Formulation::Hrze),
        "hr" => Ok(Formulation::Hr),
        "separate" => Ok(Formulation::Separate),
        other => {
            eprintln!(
                "Forme inconnue : {:?} (attendu : hrze, hr, separate)",
                other
            );
            Err(Error::Other(format!("Unknown formulation: {}", other)))
        }
    }
}

fn cmd_dose(weight: &str, age: &str, form: &str, json: bool, config: &Config) -> Result<()> {
    let age = parse_age(age)?;
    let form = parse_form(form)?;

    // Plausibility warning only; the engine itself validates weight > 0
    if let Ok(parsed) = weight.trim().parse::<f64>() {
        if parsed < config.limits.min_weight_kg || parsed > config.limits.max_weight_kg {
            tracing::warn!(
                "Weight {} kg is outside the expected range {}-{} kg",
                parsed,
                config.limits.min_weight_kg,
                config.limits.max_weight_kg
            );
        }
    }

    let result = match compute_dosage(weight, age, form) {
        Ok(result) => result,
        Err(Error::InvalidWeight(input)) => {
            eprintln!("Veuillez entrer un poids valide (reçu : {:?})", input);
            return Err(Error::InvalidWeight(input));
        }
        Err(e) => return Err(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    display_dosage(&result);
    Ok(())
}

fn display_dosage(result: &DosageResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  💊 RÉSULTATS DU CALCUL");
    println!("╰─────────────────────────────────────────╯");
    println!();

    for line in &result.lines {
        println!("  {}: {}", line.label, line.rendered_value());
    }

    println!();
    println!("  ⚠ Important : {}", result.advisory);
    println!();
}

fn cmd_quiz(auto_answer: bool, auto_correct: bool, config: &Config) -> Result<()> {
    let mut session = QuizSession::new(guide_content().quiz.clone());
    let total = session.total();
    session.start();

    loop {
        let question = match session.current_question() {
            Some(question) => question.clone(),
            None => break,
        };
        let index = match session.phase() {
            QuizPhase::InProgress { question, .. } => *question,
            _ => break,
        };

        println!("\nQuestion {}/{}", index + 1, total);
        println!("  {}", question.question);
        for (i, option) in question.options.iter().enumerate() {
            println!("    {}. {}", i + 1, option);
        }

        let selected = if auto_correct {
            question.correct
        } else if auto_answer {
            0
        } else {
            prompt_option(question.options.len())?
        };

        let pending = match session.answer(selected) {
            Some(pending) => pending,
            None => continue,
        };

        if selected == question.correct {
            println!("  ✓ Bonne réponse !");
        } else {
            println!(
                "  ✗ Mauvaise réponse (la bonne était : {})",
                question.options[question.correct]
            );
        }
        println!("  Explication : {}", question.explanation);

        // Scheduled auto-advance; skipped in the non-interactive test modes
        if !auto_answer && !auto_correct {
            std::thread::sleep(std::time::Duration::from_secs(
                config.quiz.advance_delay_seconds,
            ));
        }
        session.fire(pending);
    }

    let score = match session.phase() {
        QuizPhase::Finished { score } => *score,
        _ => return Err(Error::Other("quiz ended without finishing".into())),
    };

    let percent = (score as f64 / total as f64 * 100.0).round() as u32;
    let tier = classify_score(score, total);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  🧠 RÉSULTAT FINAL");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Score : {}/{} ({}%)", score, total, percent);
    println!("  {}", tier.message());
    println!();

    Ok(())
}

fn prompt_option(option_count: usize) -> Result<usize> {
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        match input.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= option_count => return Ok(n - 1),
            _ => println!("  Entrez un numéro entre 1 et {}", option_count),
        }
    }
}

fn cmd_sections(data_dir: PathBuf, view: Option<String>) -> Result<()> {
    let state_path = data_dir.join("viewer.json");
    let content = guide_content();

    if let Some(slug) = view {
        let section_id = SectionId::from_slug(&slug).ok_or_else(|| {
            eprintln!("Section inconnue : {:?}", slug);
            eprintln!(
                "Sections valides : {}",
                content
                    .sections
                    .iter()
                    .map(|s| s.id.as_slug())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Error::Other(format!("Unknown section: {}", slug))
        })?;

        ViewerState::update(&state_path, |state| {
            state.mark_viewed(section_id);
            Ok(())
        })?;

        let label = content
            .section(section_id)
            .map(|s| s.label.as_str())
            .unwrap_or(section_id.as_slug());
        println!("✓ Section marquée comme consultée : {}", label);
        return Ok(());
    }

    let state = ViewerState::load(&state_path)?;

    println!("\nGuide de prise en charge de la tuberculose");
    println!("──────────────────────────────────────────");
    for section in &content.sections {
        let marker = if state.last_section == Some(section.id) {
            "  ← dernière section consultée"
        } else {
            ""
        };
        println!("  {} {}{}", section.icon, section.label, marker);
    }
    println!();

    Ok(())
}
