use cube_content::{CardContent, CardDescriptor, CardFragment, ContentId, ContentResult, Properties};

use crate::props;

const ID: &str = "Notes";

#[derive(Debug, Default)]
pub struct NotesCard;

impl CardContent for NotesCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(ID, "Notes", "Free-form text notes.")
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        let id = ContentId::new(ID);
        let title = props::string(&id, properties, "title")?.unwrap_or("Notes").to_owned();
        let notes: Vec<String> = props::decode(&id, properties, "notes")?.unwrap_or_default();

        let mut fragment = CardFragment::new(id, title);
        if notes.is_empty() {
            fragment = fragment.line("No notes yet.");
        }
        for note in notes {
            fragment = fragment.line(note);
        }
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_notes_in_order() {
        let props = json!({ "notes": ["first", "second"] }).as_object().cloned().unwrap();
        assert_eq!(NotesCard.render(&props).unwrap().lines, ["first", "second"]);
        assert_eq!(
            NotesCard.render(&Properties::new()).unwrap().lines,
            ["No notes yet."]
        );
    }

    #[test]
    fn notes_must_be_strings() {
        let props = json!({ "notes": [1, 2] }).as_object().cloned().unwrap();
        assert!(NotesCard.render(&props).is_err());
    }
}
