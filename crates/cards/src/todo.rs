use cube_content::{CardContent, CardDescriptor, CardFragment, ContentId, ContentResult, Properties};
use serde::Deserialize;

use crate::props;

const ID: &str = "TodoList";

#[derive(Debug, Default)]
pub struct TodoListCard;

#[derive(Debug, Deserialize)]
struct TodoItem {
    text: String,
    #[serde(default)]
    done: bool,
}

impl CardContent for TodoListCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(ID, "Todo List", "Checklist of tasks.")
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        let id = ContentId::new(ID);
        let title = props::string(&id, properties, "title")?.unwrap_or("Todo List").to_owned();
        let items: Vec<TodoItem> = props::decode(&id, properties, "items")?.unwrap_or_default();
        let remaining = items.iter().filter(|item| !item.done).count();

        let mut fragment = CardFragment::new(id, title);
        for item in &items {
            let mark = if item.done { 'x' } else { ' ' };
            fragment = fragment.line(format!("[{mark}] {}", item.text));
        }
        Ok(fragment.line(format!("{remaining} of {} remaining", items.len())))
    }
}
