//! Prompt builder: fixed instruction templates plus caller fields → messages.
//!
//! Each stage has a system prompt (persona and output contract) and a user
//! template with `${name}` placeholders. Building is pure templating; the
//! interpolated fields are not validated here.

mod load;

pub use load::{
    default_from_embedded, load, load_or_default, LoadError, CONFIGURATION_SYSTEM_PROMPT_ENV,
    USECASE_SYSTEM_PROMPT_ENV,
};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::message::Message;
use crate::plan::{FinalPlan, UseCaseDraft};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex must compile")
});

/// Shown for empty fields so the model sees an explicit "unspecified".
const UNSPECIFIED: &str = "（未指定）";

/// System prompt and user template for one stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    /// `[System, User]` with `vars` substituted into the user template.
    pub fn messages(&self, vars: &[(&str, String)]) -> Vec<Message> {
        vec![
            Message::system(self.system.clone()),
            Message::user(render(&self.user, vars)),
        ]
    }
}

/// Templates for every stage that calls the completion service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptSet {
    pub usecase: PromptTemplate,
    pub configuration: PromptTemplate,
}

/// Replaces each `${name}` in `template` in a single pass, so substituted values
/// are never expanded again. Unknown placeholders are left as-is.
pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            vars.iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn or_unspecified(s: &str) -> String {
    if s.trim().is_empty() {
        UNSPECIFIED.to_string()
    } else {
        s.to_string()
    }
}

fn join_or_unspecified(items: &[String], sep: &str) -> String {
    if items.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        items.join(sep)
    }
}

impl PromptSet {
    /// Stage 1 messages for a free-text use case.
    pub fn usecase_messages(&self, usecase_text: &str) -> Vec<Message> {
        self.usecase
            .messages(&[("usecase_text", usecase_text.to_string())])
    }

    /// Stage 3 messages for a confirmed plan; `draft` contributes its actions.
    pub fn configuration_messages(
        &self,
        plan: &FinalPlan,
        draft: Option<&UseCaseDraft>,
    ) -> Vec<Message> {
        let actions = draft.map(|d| d.actions.as_slice()).unwrap_or(&[]);
        let satellites = if plan.proposed_configuration.is_empty() {
            "（候補なし）".to_string()
        } else {
            plan.proposed_configuration.join("、")
        };
        self.configuration.messages(&[
            ("usecase_name", or_unspecified(&plan.usecase_name)),
            ("objective", or_unspecified(&plan.observation_objective)),
            ("actions", join_or_unspecified(actions, "、")),
            ("bands", join_or_unspecified(&plan.observation_bands, "・")),
            ("resolution_m", plan.spatial_resolution_target_m.to_string()),
            ("revisit_days", plan.revisit_target_days.to_string()),
            ("satellites", satellites),
            ("supplemental_note", or_unspecified(&plan.supplemental_note)),
        ])
    }
}
