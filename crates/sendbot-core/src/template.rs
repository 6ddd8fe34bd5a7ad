//! Comment templates, one per [`Action`].
//!
//! Each entry pairs the template text with whether the bot should post it at
//! most once per pull request. Placeholders are `{content}` and, for error
//! reports only, `{build_id}`. Substitution is a single pass, so values that
//! themselves contain braces are inserted verbatim.

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTemplate {
    pub action: Action,
    pub text: &'static str,
    /// Ask the bot to suppress duplicates of this comment on the same PR.
    pub once: bool,
}

const REPORT_ERRORS: &str = "
The [build](https://travis-ci.org/tldr-pages/tldr/builds/{build_id}) for this PR failed with the following error(s):

```
{content}
```

Please fix the error(s) and push again.
";

const REPORT_CHECK_RESULTS: &str = "
Hello! I've noticed something unusual when checking this PR:

{content}

Is this intended? If so, just ignore this comment. Otherwise, please double-check the commits.
";

const UPDATE_TRANSLATORS: &str = "
Hello! This comment is to notify those who have translated files affected by this
commit of its updates.

{content}

";

static TEMPLATES: [CommentTemplate; 3] = [
    CommentTemplate {
        action: Action::ReportErrors,
        text: REPORT_ERRORS,
        once: false,
    },
    CommentTemplate {
        action: Action::ReportCheckResults,
        text: REPORT_CHECK_RESULTS,
        once: true,
    },
    CommentTemplate {
        action: Action::UpdateTranslators,
        text: UPDATE_TRANSLATORS,
        once: false,
    },
];

/// A template filled in and ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedComment {
    pub body: String,
    pub once: bool,
}

impl CommentTemplate {
    pub fn for_action(action: Action) -> &'static CommentTemplate {
        // The table holds exactly one entry per Action; `all_actions_have_a_template`
        // keeps it that way.
        match action {
            Action::ReportErrors => &TEMPLATES[0],
            Action::ReportCheckResults => &TEMPLATES[1],
            Action::UpdateTranslators => &TEMPLATES[2],
        }
    }

    pub fn render(&self, content: &str, build_id: &str) -> RenderedComment {
        let body = match self.action {
            Action::ReportErrors => {
                substitute(self.text, &[("build_id", build_id), ("content", content)])
            }
            Action::ReportCheckResults | Action::UpdateTranslators => {
                substitute(self.text, &[("content", content)])
            }
        };
        RenderedComment {
            body,
            once: self.once,
        }
    }
}

/// Render the comment for `action`. `build_id` is used by error reports only.
pub fn render(action: Action, content: &str, build_id: &str) -> RenderedComment {
    CommentTemplate::for_action(action).render(content, build_id)
}

/// Replace `{name}` placeholders in one pass. Unknown placeholders are kept as-is.
fn substitute(text: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
