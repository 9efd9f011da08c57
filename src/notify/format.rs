//! Event-to-text formatting for Telegram messages.
//!
//! Output is Telegram Markdown. Lines are separated by a single `\n` with no
//! trailing newline.

use crate::types::{Event, EventType, NotifType};

/// Format an event for the given verbosity.
pub fn format_message(event: &Event, mode: NotifType) -> String {
    match mode {
        NotifType::Long => long_notification(event),
        NotifType::Short => short_notification(event),
    }
}

/// One-line summary of an event, shared by the short notification format.
pub fn format_short_message(event: &Event) -> String {
    let kind = single_line(&event.kind);
    let resource = match event.namespace() {
        Some(namespace) => single_line(&format!("{}/{}", namespace, event.name)),
        None => single_line(&event.name),
    };

    let mut summary = match event.event_type {
        Some(EventType::Create) => format!("{} *{}* has been created", kind, resource),
        Some(EventType::Update) => format!("{} *{}* has been updated", kind, resource),
        Some(EventType::Delete) => format!("{} *{}* has been deleted", kind, resource),
        Some(EventType::Error) => format!("Error occurred in {}: *{}*", kind, resource),
        Some(EventType::Warning) => format!("Warning {}: *{}*", kind, resource),
        Some(EventType::Normal) | Some(EventType::Info) => {
            format!("{} Info: *{}*", kind, resource)
        }
        None => format!("{} *{}*", kind, resource),
    };

    if let Some(cluster) = event.cluster() {
        summary.push_str(&format!(" in *{}* cluster", single_line(cluster)));
    }

    if !event.messages.is_empty() {
        summary.push_str(": ");
        summary.push_str(&single_line(&event.messages.join("; ")));
    }

    summary
}

fn short_notification(event: &Event) -> String {
    format!(
        "{}\nDescription: {}",
        bold_title(event),
        format_short_message(event)
    )
}

fn long_notification(event: &Event) -> String {
    let mut lines = vec![
        bold_title(event),
        format!("Kind: {}", event.kind),
        format!("Name: {}", event.name),
    ];

    if let Some(namespace) = event.namespace() {
        lines.push(format!("Namespace: {}", namespace));
    }
    if let Some(reason) = event.reason() {
        lines.push(format!("Reason: {}", reason));
    }
    push_section(&mut lines, "Message", &event.messages);
    if let Some(action) = event.action() {
        lines.push(format!("Action: {}", action));
    }
    push_section(&mut lines, "Recommendations", &event.recommendations);
    push_section(&mut lines, "Warnings", &event.warnings);

    lines.join("\n")
}

/// Label on the first entry, remaining entries one per line. Nothing when empty.
fn push_section(lines: &mut Vec<String>, label: &str, entries: &[String]) {
    if let Some((first, rest)) = entries.split_first() {
        lines.push(format!("{}: {}", label, first));
        lines.extend(rest.iter().cloned());
    }
}

fn bold_title(event: &Event) -> String {
    format!("**{}**", single_line(&event.title))
}

fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pod_event() -> Event {
        Event {
            title: "Pod Created".to_string(),
            kind: "Pod".to_string(),
            name: "nginx-1".to_string(),
            namespace: Some("default".to_string()),
            messages: vec!["created successfully".to_string()],
            ..Default::default()
        }
    }

    fn make_full_event() -> Event {
        Event {
            title: "Pod Failed".to_string(),
            kind: "Pod".to_string(),
            name: "api-7f9c".to_string(),
            namespace: Some("prod".to_string()),
            reason: Some("CrashLoopBackOff".to_string()),
            messages: vec!["back-off restarting".to_string(), "exit code 1".to_string()],
            action: Some("restarted".to_string()),
            recommendations: vec!["set resource limits".to_string()],
            warnings: vec!["image uses latest tag".to_string(), "no liveness probe".to_string()],
            event_type: Some(EventType::Error),
            cluster: Some("eu-west".to_string()),
        }
    }

    #[test]
    fn test_pod_created_long() {
        let text = format_message(&make_pod_event(), NotifType::Long);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "**Pod Created**",
                "Kind: Pod",
                "Name: nginx-1",
                "Namespace: default",
                "Message: created successfully",
            ]
        );
        for absent in ["Reason:", "Action:", "Recommendations:", "Warnings:"] {
            assert!(!text.contains(absent), "unexpected {}", absent);
        }
    }

    #[test]
    fn test_long_field_order() {
        let text = format_message(&make_full_event(), NotifType::Long);
        assert_eq!(
            text,
            "**Pod Failed**\n\
             Kind: Pod\n\
             Name: api-7f9c\n\
             Namespace: prod\n\
             Reason: CrashLoopBackOff\n\
             Message: back-off restarting\n\
             exit code 1\n\
             Action: restarted\n\
             Recommendations: set resource limits\n\
             Warnings: image uses latest tag\n\
             no liveness probe"
        );
    }

    #[test]
    fn test_long_skips_empty_optionals() {
        let event = Event {
            title: "Node Updated".to_string(),
            kind: "Node".to_string(),
            name: "worker-2".to_string(),
            namespace: Some(String::new()),
            reason: None,
            action: Some(String::new()),
            ..Default::default()
        };
        let text = format_message(&event, NotifType::Long);
        assert_eq!(text, "**Node Updated**\nKind: Node\nName: worker-2");
        assert!(!text.contains("Message:"));
        assert!(!text.ends_with('\n'));
        assert!(!text.contains("EOL"));
    }

    #[test]
    fn test_short_is_two_lines() {
        for event in [make_pod_event(), make_full_event(), Event::default()] {
            let text = format_message(&event, NotifType::Short);
            let lines: Vec<&str> = text.split('\n').collect();
            assert_eq!(lines.len(), 2, "{:?}", text);
            assert_eq!(lines[0], format!("**{}**", event.title));
            assert_eq!(
                lines[1],
                format!("Description: {}", format_short_message(&event))
            );
        }
    }

    #[test]
    fn test_short_collapses_multiline_fields() {
        let event = Event {
            title: "Job\nFailed".to_string(),
            kind: "Job".to_string(),
            name: "backup".to_string(),
            messages: vec!["line one\nline two".to_string()],
            ..Default::default()
        };
        let text = format_message(&event, NotifType::Short);
        assert_eq!(text, "**Job Failed**\nDescription: Job *backup*: line one line two");
    }

    #[test]
    fn test_unknown_mode_is_short() {
        let event = make_full_event();
        let unknown: NotifType = "detailed".parse().unwrap();
        assert_eq!(
            format_message(&event, unknown),
            format_message(&event, NotifType::Short)
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let event = make_full_event();
        for mode in [NotifType::Short, NotifType::Long] {
            assert_eq!(format_message(&event, mode), format_message(&event, mode));
        }
    }

    #[test]
    fn test_short_summary_phrases() {
        let mut event = make_pod_event();

        event.event_type = Some(EventType::Create);
        assert_eq!(
            format_short_message(&event),
            "Pod *default/nginx-1* has been created: created successfully"
        );

        event.event_type = Some(EventType::Delete);
        event.messages.clear();
        event.cluster = Some("staging".to_string());
        assert_eq!(
            format_short_message(&event),
            "Pod *default/nginx-1* has been deleted in *staging* cluster"
        );

        event.event_type = Some(EventType::Warning);
        assert_eq!(
            format_short_message(&event),
            "Warning Pod: *default/nginx-1* in *staging* cluster"
        );

        event.event_type = Some(EventType::Normal);
        event.namespace = None;
        assert_eq!(
            format_short_message(&event),
            "Pod Info: *nginx-1* in *staging* cluster"
        );
    }

    #[test]
    fn test_short_summary_error_with_messages() {
        assert_eq!(
            format_short_message(&make_full_event()),
            "Error occurred in Pod: *prod/api-7f9c* in *eu-west* cluster: back-off restarting; exit code 1"
        );
    }
}
