use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentorlink::dashboard::{Dashboard, Navigation, Services, Tab};
use mentorlink::notice::{Notice, NoticeLevel};
use mentorlink::plan_view::{resolve_session, PlanController};
use mentorlink::render;
use mentorlink_client::{ClientConfig, MentorlinkApi};
use mentorlink_core::pitch::PitchQuestion;
use mentorlink_core::session::Session;

#[derive(Parser)]
#[command(name = "mentorlink", about = "Mentorship dashboard and plan editor")]
struct Cli {
    /// API base URL (overrides MENTORLINK_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides MENTORLINK_TOKEN env var)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show profile, relationships and pitch questions
    Dashboard,
    /// Open (or create) the plan shared with a participant
    OpenPlan {
        /// The other participant's user id
        participant_id: String,
    },
    /// Replace pitch questions from a JSON file
    SetPitchQuestions { file: PathBuf },
    /// Replace the plan template from a markdown file
    SetPlanTemplate { file: PathBuf },
    /// End an active relationship
    EndRelationship { relationship_id: String },
    #[command(flatten)]
    Plan(PlanCommands),
}

/// Commands that work on a single plan and only need the viewer's session.
#[derive(Subcommand)]
enum PlanCommands {
    /// Show a plan, newest version first
    ShowPlan {
        plan_id: String,
        /// Display row to expand (0 = newest)
        #[arg(long)]
        expand: Option<usize>,
    },
    /// Append a new version
    AddVersion {
        plan_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Bump the major version instead of the minor one
        #[arg(long)]
        major: bool,
    },
    /// Edit the version at a display row
    EditVersion {
        plan_id: String,
        /// Display row (0 = newest)
        row: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete the version at a display row
    DeleteVersion {
        plan_id: String,
        /// Display row (0 = newest)
        row: usize,
    },
    /// Comment on the version at a display row
    Comment {
        plan_id: String,
        /// Display row (0 = newest)
        row: usize,
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentorlink=info,mentorlink_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = ClientConfig::new(url)
            .with_token(config.token)
            .with_timeout(config.request_timeout);
    }
    if let Some(token) = cli.token {
        config = config.with_token(Some(token));
    }
    tracing::debug!(?config, "Loaded client configuration");

    let api = Arc::new(MentorlinkApi::new(&config).context(
        "no bearer token: set MENTORLINK_TOKEN or pass --token",
    )?);
    let services = Services {
        plans: api.clone(),
        profiles: api.clone(),
        relationships: api.clone(),
    };

    if let Commands::Plan(command) = cli.command {
        let session = resolve_session(&*services.profiles, api.token())
            .await
            .context("failed to load profile")?;
        return run_plan(command, session, &services).await;
    }

    let mut dashboard = Dashboard::load(api.token(), services.clone())
        .await
        .context("failed to load dashboard")?;

    let outcome = run_dashboard(cli.command, &mut dashboard, &services).await;
    print_notices(dashboard.take_notices());
    outcome
}

async fn run_dashboard(
    command: Commands,
    dashboard: &mut Dashboard,
    services: &Services,
) -> anyhow::Result<()> {
    let session = dashboard.session().clone();
    match command {
        Commands::Dashboard => {
            let profile = dashboard.profile();
            println!("{} <{}> ({})", profile.name, profile.email.as_deref().unwrap_or("-"), profile.role);
            print!(
                "{}",
                render::relationships("Active", &session.participant_id, dashboard.active_relationships())
            );
            print!(
                "{}",
                render::relationships("History", &session.participant_id, dashboard.relationship_history())
            );
            if session.is_mentor() {
                print!("{}", render::pitch_questions(dashboard.pitch_editor().questions()));
            }
        }
        Commands::OpenPlan { participant_id } => {
            let Navigation::Plan { plan_id } = dashboard.open_plan(&participant_id).await?;
            let controller = PlanController::load(session, services.plans.clone(), &plan_id).await?;
            print!("{}", render::plan(controller.editor()));
        }
        Commands::SetPitchQuestions { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let questions: Vec<PitchQuestion> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of pitch questions", file.display()))?;
            dashboard.switch_tab(Tab::PitchQuestions)?;
            dashboard.pitch_editor_mut().set_questions(questions);
            dashboard.save_pitch_questions().await?;
            print!("{}", render::pitch_questions(dashboard.pitch_editor().questions()));
        }
        Commands::SetPlanTemplate { file } => {
            let template = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            dashboard.switch_tab(Tab::PlanTemplate)?;
            dashboard.template_editor_mut().set_buffer(template);
            dashboard.save_plan_template().await?;
        }
        Commands::EndRelationship { relationship_id } => {
            dashboard.end_relationship(&relationship_id).await?;
        }
        Commands::Plan(command) => run_plan(command, session, services).await?,
    }
    Ok(())
}

async fn run_plan(command: PlanCommands, session: Session, services: &Services) -> anyhow::Result<()> {
    let plans = services.plans.clone();
    match command {
        PlanCommands::ShowPlan { plan_id, expand } => {
            let mut controller = PlanController::load(session, plans, &plan_id).await?;
            if let Some(row) = expand {
                controller.toggle_row(row)?;
            }
            print!("{}", render::plan(controller.editor()));
            Ok(())
        }
        PlanCommands::AddVersion {
            plan_id,
            title,
            content,
            major,
        } => {
            let mut controller = PlanController::load(session, plans, &plan_id).await?;
            let result = add_version(&mut controller, title, content, major).await;
            finish(controller, result)
        }
        PlanCommands::EditVersion {
            plan_id,
            row,
            title,
            content,
        } => {
            let mut controller = PlanController::load(session, plans, &plan_id).await?;
            let result = edit_version(&mut controller, row, title, content).await;
            finish(controller, result)
        }
        PlanCommands::DeleteVersion { plan_id, row } => {
            let mut controller = PlanController::load(session, plans, &plan_id).await?;
            let result = controller.delete_row(row).await;
            finish(controller, result)
        }
        PlanCommands::Comment { plan_id, row, text } => {
            let mut controller = PlanController::load(session, plans, &plan_id).await?;
            let result = comment(&mut controller, row, text).await;
            finish(controller, result)
        }
    }
}

async fn add_version(
    controller: &mut PlanController,
    title: String,
    content: String,
    major: bool,
) -> mentorlink::error::AppResult<()> {
    controller.open_composer()?;
    if let Some(composer) = controller.composer_mut() {
        composer.title = title;
        composer.content = content;
        composer.is_major = major;
    }
    controller.submit_new_version().await
}

async fn edit_version(
    controller: &mut PlanController,
    row: usize,
    title: Option<String>,
    content: Option<String>,
) -> mentorlink::error::AppResult<()> {
    controller.toggle_row(row)?;
    controller.begin_edit(row)?;
    if let Some(buffer) = controller.edit_buffer_mut() {
        if let Some(title) = title {
            buffer.title = title;
        }
        if let Some(content) = content {
            buffer.content = content;
        }
    }
    controller.save_edit().await
}

async fn comment(
    controller: &mut PlanController,
    row: usize,
    text: String,
) -> mentorlink::error::AppResult<()> {
    controller.toggle_row(row)?;
    controller.set_comment_draft(text);
    controller.submit_comment().await
}

/// Print the plan and the controller's notices, then surface the error.
fn finish(mut controller: PlanController, result: mentorlink::error::AppResult<()>) -> anyhow::Result<()> {
    print!("{}", render::plan(controller.editor()));
    print_notices(controller.take_notices());
    result.map_err(anyhow::Error::from)
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => eprintln!("ok: {}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}
