//! Completion certificate for a finished pathway.

use chrono::NaiveDate;
use minijinja::context;
use serde::Serialize;

use super::identities::PathwayId;
use super::pathway::Pathway;
use super::progression;
use super::render::{CERTIFICATE_TEMPLATE, render_template};
use super::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub pathway: PathwayId,
    pub slug: String,
    pub full_name: String,
    pub document: String,
}

impl Certificate {
    /// Suggested download file name.
    pub fn file_name(&self) -> String {
        format!("certificate_{}.md", if self.slug.is_empty() { "pathway" } else { &self.slug })
    }
}

/// Render the certificate; only complete pathways qualify.
pub fn issue_certificate(
    pathway: &Pathway,
    full_name: &str,
    completion_date: NaiveDate,
) -> Result<Certificate, AppError> {
    let summary = progression::progress(pathway);
    if !summary.is_complete {
        return Err(AppError::PathwayIncomplete {
            pathway: pathway.id,
            remaining: summary.remaining,
        });
    }

    let full_name = full_name.trim();
    let full_name = if full_name.is_empty() { pathway.learner.as_str() } else { full_name };

    let mut modules: Vec<_> = pathway.modules.iter().collect();
    modules.sort_by_key(|m| m.order);
    let titles: Vec<&str> = modules.iter().map(|m| m.title.as_str()).collect();

    let document = render_template(
        "certificate",
        CERTIFICATE_TEMPLATE,
        context! {
            full_name => full_name,
            goal => &pathway.goal,
            modules => titles,
            completion_date => completion_date.format("%B %d, %Y").to_string(),
        },
    )?;

    Ok(Certificate {
        pathway: pathway.id,
        slug: pathway.slug.clone(),
        full_name: full_name.to_string(),
        document,
    })
}
