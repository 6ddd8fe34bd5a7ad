use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ReportErrors,
    ReportCheckResults,
    UpdateTranslators,
}

/// Where an action's comment content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Stdin,
    Translators,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::ReportErrors,
            Action::ReportCheckResults,
            Action::UpdateTranslators,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::ReportErrors => "report-errors",
            Action::ReportCheckResults => "report-check-results",
            Action::UpdateTranslators => "update-translators",
        }
    }

    pub fn content_source(self) -> ContentSource {
        match self {
            Action::UpdateTranslators => ContentSource::Translators,
            Action::ReportErrors | Action::ReportCheckResults => ContentSource::Stdin,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = crate::error::SendbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report-errors" => Ok(Action::ReportErrors),
            "report-check-results" => Ok(Action::ReportCheckResults),
            "update-translators" => Ok(Action::UpdateTranslators),
            _ => Err(crate::error::SendbotError::UnknownAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_action_name() {
        for action in Action::all() {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), *action);
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = "unknown-action".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "unknown action: unknown-action");
    }

    #[test]
    fn action_names_are_case_sensitive() {
        assert!("Report-Errors".parse::<Action>().is_err());
    }

    #[test]
    fn only_translator_updates_skip_stdin() {
        assert_eq!(
            Action::UpdateTranslators.content_source(),
            ContentSource::Translators
        );
        assert_eq!(Action::ReportErrors.content_source(), ContentSource::Stdin);
        assert_eq!(
            Action::ReportCheckResults.content_source(),
            ContentSource::Stdin
        );
    }
}
