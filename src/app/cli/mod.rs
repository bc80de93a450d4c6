//! CLI Adapter.

mod render;

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::adapters::FilesystemPathwayStore;
use crate::app::api::{self, DEFAULT_DATA_DIR, RuntimeOptions};
use crate::app::commands::{
    ask, awards, certificate, complete, create, list, prepare, show,
};
use crate::app::AppContext;
use crate::domain::{AppError, LearnerId, ModuleId, OutlineRequest, PathwayId};

#[derive(Parser)]
#[command(name = "pathwise")]
#[command(version)]
#[command(about = "Self-paced learning pathways with lazily generated lessons", long_about = None)]
struct Cli {
    /// Directory holding pathway data and pathwise.toml
    #[arg(long, global = true, env = "PATHWISE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Configuration file (defaults to <data-dir>/pathwise.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Use offline mock services instead of Gemini and YouTube
    #[arg(long, global = true)]
    mock: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LearnerArg {
    /// Learner identifier
    #[arg(short, long)]
    learner: LearnerId,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new pathway for a goal
    #[clap(visible_alias = "c")]
    Create {
        #[command(flatten)]
        learner: LearnerArg,
        /// Goal keyword (e.g. grow_existing_business) or free text
        #[arg(short, long)]
        goal: String,
        /// Where the learner works
        #[arg(long)]
        location: String,
        /// Trade or skill category
        #[arg(short, long)]
        trade: Option<String>,
    },
    /// List the learner's pathways
    #[clap(visible_alias = "ls")]
    List {
        #[command(flatten)]
        learner: LearnerArg,
    },
    /// Show a pathway, or one module with --module
    Show {
        #[command(flatten)]
        learner: LearnerArg,
        /// Pathway id
        #[arg(required_unless_present = "module", conflicts_with = "module")]
        pathway: Option<PathwayId>,
        /// Module id
        #[arg(short, long)]
        module: Option<ModuleId>,
    },
    /// Generate content for the pathway's active module if needed
    #[clap(visible_alias = "p")]
    Prepare {
        #[command(flatten)]
        learner: LearnerArg,
        /// Pathway id
        pathway: PathwayId,
    },
    /// Complete the active module with a reflection on what you learned
    Complete {
        #[command(flatten)]
        learner: LearnerArg,
        /// Module id
        module: ModuleId,
        /// What you learned in this module
        #[arg(short, long)]
        reflection: String,
    },
    /// Ask a question about a module
    Ask {
        #[command(flatten)]
        learner: LearnerArg,
        /// Module id
        module: ModuleId,
        /// The question
        #[arg(short, long)]
        question: String,
    },
    /// Issue the completion certificate for a finished pathway
    Certificate {
        #[command(flatten)]
        learner: LearnerArg,
        /// Pathway id
        pathway: PathwayId,
        /// Name printed on the certificate (defaults to the learner id)
        #[arg(short, long, default_value = "")]
        name: String,
        /// Write the certificate to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List awards the learner holds
    Awards {
        #[command(flatten)]
        learner: LearnerArg,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let options = RuntimeOptions { data_dir: cli.data_dir, config: cli.config, mock: cli.mock };

    let result = api::open(&options).and_then(|ctx| dispatch(&ctx, cli.command));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(ctx: &AppContext<FilesystemPathwayStore>, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Create { learner, goal, location, trade } => {
            let request = OutlineRequest::new(&goal, &location, trade.as_deref())?;
            let pathway = create::execute(ctx, &learner.learner, &request)?;
            println!("✅ Created pathway {} ({} modules)", pathway.id, pathway.modules.len());
            render::pathway(&pathway);
        }
        Commands::List { learner } => {
            let summaries = list::execute(ctx, &learner.learner)?;
            if summaries.is_empty() {
                println!("No pathways yet. Create one with `pathwise create`.");
            }
            for summary in &summaries {
                render::summary(summary);
            }
        }
        Commands::Show { learner, pathway, module } => match (pathway, module) {
            (_, Some(module)) => render::module_view(&show::module(ctx, &learner.learner, module)?),
            (Some(pathway), None) => {
                render::pathway_view(&show::pathway(ctx, &learner.learner, pathway)?)
            }
            (None, None) => {
                return Err(AppError::InvalidInput("pass a pathway id or --module".to_string()));
            }
        },
        Commands::Prepare { learner, pathway } => {
            match prepare::prepare_active_module(ctx, &learner.learner, pathway)? {
                Some(module) => render::module(&module),
                None => println!("✅ Pathway {} is complete; nothing to prepare", pathway),
            }
        }
        Commands::Complete { learner, module, reflection } => {
            match complete::execute(ctx, &learner.learner, module, &reflection)? {
                complete::CompletionOutcome::Completed(report) => render::completion(&report),
                complete::CompletionOutcome::Rejected(rejection) => {
                    println!("❌ {}", rejection.message());
                }
            }
        }
        Commands::Ask { learner, module, question } => {
            match ask::execute(ctx, &learner.learner, module, &question)? {
                ask::QuestionOutcome::Answered(question) => render::question(&question),
                ask::QuestionOutcome::Rejected(rejection) => println!("❌ {}", rejection.message()),
            }
        }
        Commands::Certificate { learner, pathway, name, output } => {
            let issued = certificate::execute(
                ctx,
                &learner.learner,
                pathway,
                &name,
                Utc::now().date_naive(),
            )?;
            match output {
                Some(path) => {
                    fs::write(&path, &issued.document)?;
                    println!("✅ Certificate written to {}", path.display());
                }
                None => print!("{}", issued.document),
            }
        }
        Commands::Awards { learner } => {
            let grants = awards::list(ctx, &learner.learner)?;
            if grants.is_empty() {
                println!("No awards yet.");
            }
            for grant in &grants {
                println!("🏅 {} (awarded {})", grant.award, grant.awarded_at.format("%B %d, %Y"));
            }
        }
    }
    Ok(())
}
