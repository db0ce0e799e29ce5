//! Snippet completions for inserting region pairs and tags

use super::Markers;

/// Editor command that toggles a line comment around the inserted marker
pub const ADD_COMMENT_LINE_COMMAND: &str = "editor.action.addCommentLine";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    RegionPair,
    Tag,
}

/// A snippet completion item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub kind: CompletionKind,
    pub label: String,
    pub detail: &'static str,
    /// Snippet body using `${n:placeholder}` tab stops
    pub insert_text: String,
    /// Markdown shown next to the item
    pub documentation: String,
    /// Command to run after insertion
    pub command: Option<&'static str>,
}

fn region_item(markers: &Markers) -> CompletionItem {
    CompletionItem {
        kind: CompletionKind::RegionPair,
        label: markers.start.clone(),
        detail: "Code Region",
        insert_text: format!(
            "{} ${{1:name}} ${{2:description}}\n$0\n{} ${{1:name}}",
            markers.start, markers.end
        ),
        documentation: format!(
            "Insert a region pair to fold the content between them\n\n```\n{} name description\n...\n{} name\n```",
            markers.start, markers.end
        ),
        command: None,
    }
}

fn tag_item(markers: &Markers) -> CompletionItem {
    CompletionItem {
        kind: CompletionKind::Tag,
        label: markers.tag.clone(),
        detail: "Code Tag",
        insert_text: format!("{} ${{1:name}} ${{2:description}}", markers.tag),
        documentation: format!(
            "Insert a tag to mark a specific point in the source code\n\n```\n{} name description\n```",
            markers.tag
        ),
        command: None,
    }
}

/// Completion items for the line the cursor is on.
///
/// When the trimmed line is still a prefix of the start or tag marker the
/// marker is not inside a comment yet, so both items ask the editor to
/// comment the line after inserting.
pub fn completions(markers: &Markers, current_line: &str) -> Vec<CompletionItem> {
    let typed = current_line.trim();
    let mut items = vec![region_item(markers), tag_item(markers)];

    if markers.start.starts_with(typed) || markers.tag.starts_with(typed) {
        for item in &mut items {
            item.command = Some(ADD_COMMENT_LINE_COMMAND);
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_snippet_repeats_name_tab_stop() {
        let items = completions(&Markers::default(), "// #");
        assert_eq!(
            items[0].insert_text,
            "#region ${1:name} ${2:description}\n$0\n#endregion ${1:name}"
        );
        assert_eq!(items[1].insert_text, "#tag ${1:name} ${2:description}");
    }

    #[test]
    fn test_comment_command_when_marker_not_commented() {
        let items = completions(&Markers::default(), "  #re");
        assert!(items
            .iter()
            .all(|item| item.command == Some(ADD_COMMENT_LINE_COMMAND)));

        let items = completions(&Markers::default(), "// #re");
        assert!(items.iter().all(|item| item.command.is_none()));
    }
}
