//! Learner goals and the module outline generated from them.

use serde::{Deserialize, Serialize};

use super::AppError;
use super::pathway::NewModule;

/// Trade used in prompts when the learner did not pick one.
pub const DEFAULT_TRADE: &str = "general artisan business";

const GOAL_DESCRIPTIONS: &[(&str, &str)] = &[
    ("start_small_business", "starting a small business from scratch"),
    ("grow_existing_business", "growing an existing business"),
    ("learn_marketing", "learning marketing and customer acquisition"),
    ("improve_service_quality", "improving service quality and skills"),
    ("manage_finances", "managing business finances and pricing"),
    ("build_online_presence", "building an online presence"),
    ("customer_service", "improving customer service and retention"),
    ("scale_operations", "scaling operations and hiring helpers"),
];

/// Known goal keywords, in display order.
pub fn goal_keywords() -> impl Iterator<Item = &'static str> {
    GOAL_DESCRIPTIONS.iter().map(|(keyword, _)| *keyword)
}

/// Human description of a goal keyword; unknown keywords pass through unchanged.
pub fn describe_goal(goal: &str) -> &str {
    GOAL_DESCRIPTIONS
        .iter()
        .find(|(keyword, _)| *keyword == goal)
        .map(|(_, description)| *description)
        .unwrap_or(goal)
}

/// What the learner asked for when requesting a pathway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRequest {
    pub goal: String,
    pub location: String,
    pub trade: Option<String>,
}

impl OutlineRequest {
    pub fn new(goal: &str, location: &str, trade: Option<&str>) -> Result<Self, AppError> {
        let goal = goal.trim();
        let location = location.trim();
        if goal.is_empty() {
            return Err(AppError::InvalidInput("goal must not be empty".to_string()));
        }
        if location.is_empty() {
            return Err(AppError::InvalidInput("location must not be empty".to_string()));
        }
        let trade = trade.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        Ok(Self { goal: goal.to_string(), location: location.to_string(), trade })
    }

    pub fn goal_description(&self) -> &str {
        describe_goal(&self.goal)
    }

    pub fn trade_or_default(&self) -> &str {
        self.trade.as_deref().unwrap_or(DEFAULT_TRADE)
    }

    /// Goal text stored on the pathway: `"<trade>: <description>"`, or just the
    /// description without a trade.
    pub fn pathway_goal(&self) -> String {
        match &self.trade {
            Some(trade) => format!("{}: {}", trade, self.goal_description()),
            None => self.goal_description().to_string(),
        }
    }
}

/// One module as proposed by the outline service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub title: String,
    #[serde(alias = "youtube_search_query", default)]
    pub search_query: String,
}

/// Validate an outline and turn it into creatable modules.
///
/// An empty outline or a module without a title fails the whole outline, so
/// callers never persist a partial pathway. A blank search query falls back
/// to the module title.
pub fn outline_to_modules(specs: Vec<ModuleSpec>) -> Result<Vec<NewModule>, AppError> {
    if specs.is_empty() {
        return Err(AppError::OutlineUnavailable("outline contained no modules".to_string()));
    }

    specs
        .into_iter()
        .enumerate()
        .map(|(position, spec)| {
            let title = spec.title.trim();
            if title.is_empty() {
                return Err(AppError::OutlineUnavailable(format!(
                    "module {} in outline has no title",
                    position + 1
                )));
            }
            let query = spec.search_query.trim();
            let search_query = if query.is_empty() { title } else { query };
            Ok(NewModule { title: title.to_string(), search_query: search_query.to_string() })
        })
        .collect()
}
