//! Fills in automod message templates.
//!
//! Supported placeholders:
//! - `{user}`: mention of the user who tripped the rule.
//! - `{keyword}`: the keyword that matched, as discord reported it.
//! - `{content}`: the matched content, falling back to the whole message.
//!
//! Anything else between braces is left alone.

use serenity::Mentionable;

use super::ModerationEvent;
use crate::serenity;

/// Render `template` for `event`.
///
/// Substitution is a single pass over the template, so text coming from the
/// event is never itself treated as a placeholder.
pub fn format(template: &str, event: &ModerationEvent) -> String {
    let user = event.user_id.mention().to_string();
    let keyword = event.matched_keyword.as_deref().unwrap_or_default();
    let content = event
        .matched_content
        .as_deref()
        .or(event.content.as_deref())
        .unwrap_or_default();

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let value = [("{user}", &*user), ("{keyword}", keyword), ("{content}", content)]
            .into_iter()
            .find(|(placeholder, _)| candidate.starts_with(*placeholder));

        match value {
            Some((placeholder, value)) => {
                rendered.push_str(value);
                rest = &candidate[placeholder.len()..];
            }
            None => {
                rendered.push('{');
                rest = &candidate[1..];
            }
        }
    }
    rendered.push_str(rest);

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serenity::UserId;

    fn event() -> ModerationEvent {
        ModerationEvent {
            user_id: UserId::new(42),
            channel_id: None,
            matched_keyword: Some("SPAM".to_string()),
            matched_content: Some("buy now".to_string()),
            content: Some("please buy now!!".to_string()),
        }
    }

    #[test]
    fn fills_every_placeholder() {
        let rendered = format("Hi {user}, no {keyword} here: {content}", &event());
        assert_eq!(rendered, "Hi <@42>, no SPAM here: buy now");
    }

    #[test]
    fn replaces_all_occurrences() {
        let rendered = format("{user} {user} {keyword}{keyword}", &event());
        assert_eq!(rendered, "<@42> <@42> SPAMSPAM");
    }

    #[test]
    fn unknown_placeholders_stay() {
        let rendered = format("{channel} {User} {user", &event());
        assert_eq!(rendered, "{channel} {User} {user");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(format("Be nice.", &event()), "Be nice.");
        assert_eq!(format("", &event()), "");
        assert_eq!(format("{{}}", &event()), "{{}}");
    }

    #[test]
    fn content_falls_back_to_message() {
        let event = ModerationEvent {
            matched_content: None,
            ..event()
        };
        assert_eq!(format("[{content}]", &event), "[please buy now!!]");
    }

    #[test]
    fn missing_fields_become_empty() {
        let event = ModerationEvent {
            matched_keyword: None,
            matched_content: None,
            content: None,
            ..event()
        };
        assert_eq!(format("[{keyword}][{content}]", &event), "[][]");
    }

    #[test]
    fn values_are_not_expanded_again() {
        let event = ModerationEvent {
            matched_keyword: Some("{content}".to_string()),
            matched_content: Some("{user}".to_string()),
            ..event()
        };
        assert_eq!(format("{keyword} {content}", &event), "{content} {user}");
    }

    #[test]
    fn handles_multibyte_text() {
        let rendered = format("ñ{keyword}ü{nope}é", &event());
        assert_eq!(rendered, "ñSPAMü{nope}é");
    }
}
