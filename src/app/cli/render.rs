//! Plain-text output for CLI commands.

use crate::app::commands::complete::CompletionReport;
use crate::app::commands::list::PathwaySummary;
use crate::app::commands::show::{ModuleView, PathwayView};
use crate::domain::progression;
use crate::domain::{GrantOutcome, Module, Pathway, Question};

pub(super) fn pathway(pathway: &Pathway) {
    println!("Pathway {}: {}", pathway.id, pathway.goal);
    let active = progression::active_module(pathway).map(|m| m.id);
    for module in &pathway.modules {
        let marker = if module.is_completed {
            "✔"
        } else if Some(module.id) == active {
            "▶"
        } else {
            "🔒"
        };
        println!("  {} [{}] {}", marker, module.id, module.title);
    }
}

pub(super) fn pathway_view(view: &PathwayView) {
    pathway(&view.pathway);
    println!(
        "Progress: {}/{} modules completed",
        view.progress.completed, view.progress.total
    );
}

pub(super) fn summary(summary: &PathwaySummary) {
    let status = if summary.progress.is_complete { "complete" } else { "in progress" };
    println!(
        "[{}] {} ({}) {}/{} {}",
        summary.id,
        summary.goal,
        summary.location,
        summary.progress.completed,
        summary.progress.total,
        status
    );
}

pub(super) fn module(module: &Module) {
    println!("# {}", module.title);
    if !module.content_generated {
        println!("(content not generated yet; run `pathwise prepare`)");
        return;
    }
    println!();
    println!("{}", module.content.trim_end());
    if !module.videos.is_empty() {
        println!();
        println!("Videos:");
        for video in &module.videos {
            println!("  {}. {} <{}>", video.order + 1, video.title, video.url);
        }
    }
}

pub(super) fn module_view(view: &ModuleView) {
    module(&view.module);
    let state = if view.module.is_completed {
        "completed"
    } else if view.is_active {
        "active"
    } else {
        "locked"
    };
    println!();
    println!("Status: {}", state);
    for asked in &view.questions {
        println!();
        question(asked);
    }
}

pub(super) fn completion(report: &CompletionReport) {
    println!("✅ Module {} completed", report.module);
    match report.next_active {
        Some(next) => println!("Next module unlocked: {}", next),
        None => println!("🎉 Pathway complete!"),
    }
    match &report.award {
        Some(GrantOutcome::Granted { grant }) => println!("🏅 Awarded: {}", grant.award),
        Some(GrantOutcome::AlreadyHeld) => println!("🏅 Award already held"),
        None if report.award_pending => {
            println!("⚠️ Award could not be recorded; run `pathwise complete` on this module again to retry");
        }
        None => {}
    }
}

pub(super) fn question(question: &Question) {
    println!("Q: {}", question.question);
    println!("A: {}", question.answer);
}
